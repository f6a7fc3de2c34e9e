//! Data Model: Survey, Question, Answer, SurveyResponse
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// QUESTIONS
// ============================================================================

/// Closed set of recognized question types.
///
/// Any type string outside the set lands in `Other` and is validated with the
/// free-text rule.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum QuestionType {
    Rating,
    SingleChoice,
    MultipleChoice,
    Text,
    Dropdown,
    Matrix,
    Ranking,
    Nps,
    Date,
    FileUpload,
    Other(String),
}

impl QuestionType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Rating => "rating",
            Self::SingleChoice => "single-choice",
            Self::MultipleChoice => "multiple-choice",
            Self::Text => "text",
            Self::Dropdown => "dropdown",
            Self::Matrix => "matrix",
            Self::Ranking => "ranking",
            Self::Nps => "nps",
            Self::Date => "date",
            Self::FileUpload => "file-upload",
            Self::Other(name) => name.as_str(),
        }
    }

    /// Whether an answer to this type may hold several selections
    pub fn is_multi_valued(&self) -> bool {
        matches!(self, Self::MultipleChoice)
    }
}

impl From<String> for QuestionType {
    fn from(name: String) -> Self {
        match name.as_str() {
            "rating" => Self::Rating,
            "single-choice" => Self::SingleChoice,
            "multiple-choice" => Self::MultipleChoice,
            "text" => Self::Text,
            "dropdown" => Self::Dropdown,
            "matrix" => Self::Matrix,
            "ranking" => Self::Ranking,
            "nps" => Self::Nps,
            "date" => Self::Date,
            "file-upload" => Self::FileUpload,
            _ => Self::Other(name),
        }
    }
}

impl From<&str> for QuestionType {
    fn from(name: &str) -> Self {
        Self::from(name.to_string())
    }
}

impl From<QuestionType> for String {
    fn from(kind: QuestionType) -> Self {
        kind.as_str().to_string()
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Numeric bounds, only meaningful for rating questions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    /// Display text (`title` is accepted as an alias)
    #[serde(alias = "title")]
    pub text: String,
    #[serde(rename = "type")]
    pub kind: QuestionType,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<QuestionSettings>,
}

impl Question {
    pub fn new(id: impl Into<String>, text: impl Into<String>, kind: impl Into<QuestionType>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            kind: kind.into(),
            required: false,
            options: Vec::new(),
            settings: None,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = options.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_range(mut self, min: i64, max: i64) -> Self {
        self.settings = Some(QuestionSettings {
            min: Some(min),
            max: Some(max),
        });
        self
    }
}

// ============================================================================
// SURVEYS
// ============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SurveyStatus {
    #[default]
    Active,
    Draft,
    Archived,
}

impl SurveyStatus {
    /// Parse a status filter; `None` for anything outside the known set
    pub fn parse(filter: &str) -> Option<Self> {
        match filter.to_lowercase().as_str() {
            "active" => Some(Self::Active),
            "draft" => Some(Self::Draft),
            "archived" => Some(Self::Archived),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Survey {
    #[serde(default, deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub questions: Vec<Question>,
    #[serde(default)]
    pub status: SurveyStatus,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Survey {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: None,
            questions: Vec::new(),
            status: SurveyStatus::default(),
            created_at: None,
        }
    }

    pub fn with_question(mut self, question: Question) -> Self {
        self.questions.push(question);
        self
    }

    /// Find a question by identifier (string equality)
    pub fn question(&self, id: &str) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == id)
    }

    pub fn required_count(&self) -> usize {
        self.questions.iter().filter(|q| q.required).count()
    }

    pub fn is_required(&self, question_id: &str) -> bool {
        self.question(question_id).is_some_and(|q| q.required)
    }

    /// Set the creation time unless one is already recorded
    pub fn stamp_created(&mut self, now: DateTime<Utc>) {
        if self.created_at.is_none() {
            self.created_at = Some(now);
        }
    }
}

/// Keep surveys matching a status filter. Unknown filters keep everything.
pub fn filter_by_status<'a>(surveys: &'a [Survey], filter: &str) -> Vec<&'a Survey> {
    match SurveyStatus::parse(filter) {
        Some(status) => surveys.iter().filter(|s| s.status == status).collect(),
        None => surveys.iter().collect(),
    }
}

// ============================================================================
// ANSWERS
// ============================================================================

/// A submitted answer value.
///
/// Multiple-choice answers are canonically `Selections`. A `Text` value on a
/// multiple-choice question is treated as a delimiter-joined list. JSON `null`
/// reads as empty text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Text(String),
    Selections(Vec<String>),
}

impl<'de> Deserialize<'de> for AnswerValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawValue {
            Text(String),
            Selections(Vec<String>),
        }

        Ok(match Option::<RawValue>::deserialize(deserializer)? {
            Some(RawValue::Text(text)) => Self::Text(text),
            Some(RawValue::Selections(items)) => Self::Selections(items),
            None => Self::default(),
        })
    }
}

impl AnswerValue {
    /// Emptiness as seen by the required rule.
    ///
    /// Text is checked as-is, so a legacy multiple-choice string made only of
    /// delimiters (`","`) is not empty. It passes validation and counts toward
    /// completion, yet yields no selections and no `answeredCount`.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Text(text) => text.is_empty(),
            Self::Selections(items) => items.iter().all(|item| item.trim().is_empty()),
        }
    }

    /// The value as one string: the text itself, or the only selection
    pub fn as_single(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text.as_str()),
            Self::Selections(items) if items.len() == 1 => Some(items[0].as_str()),
            Self::Selections(_) => None,
        }
    }

    /// Split into individual selections, dropping blanks.
    ///
    /// `Text` is split on `delimiter` only when `split_text` is set.
    pub fn selections<'a>(&'a self, delimiter: &str, split_text: bool) -> Vec<&'a str> {
        match self {
            Self::Text(text) if split_text && !delimiter.is_empty() => text
                .split(delimiter)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .collect(),
            Self::Text(text) if text.is_empty() => Vec::new(),
            Self::Text(text) => vec![text.as_str()],
            Self::Selections(items) => items
                .iter()
                .map(|s| s.trim())
                .filter(|s| !s.is_empty())
                .collect(),
        }
    }
}

impl Default for AnswerValue {
    fn default() -> Self {
        Self::Text(String::new())
    }
}

impl From<&str> for AnswerValue {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for AnswerValue {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<Vec<String>> for AnswerValue {
    fn from(items: Vec<String>) -> Self {
        Self::Selections(items)
    }
}

impl From<Vec<&str>> for AnswerValue {
    fn from(items: Vec<&str>) -> Self {
        Self::Selections(items.into_iter().map(String::from).collect())
    }
}

/// One answer inside a response (a.k.a. question response)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Answer {
    #[serde(deserialize_with = "string_or_number")]
    pub question_id: String,
    /// Copied from the question at submission time
    #[serde(default)]
    pub question_title: String,
    #[serde(default)]
    pub value: AnswerValue,
    #[serde(default = "default_valid")]
    pub is_valid: bool,
}

fn default_valid() -> bool {
    true
}

impl Answer {
    pub fn new(question_id: impl Into<String>, value: impl Into<AnswerValue>) -> Self {
        Self {
            question_id: question_id.into(),
            question_title: String::new(),
            value: value.into(),
            is_valid: true,
        }
    }
}

// ============================================================================
// RESPONSES
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurveyResponse {
    #[serde(default)]
    pub id: String,
    #[serde(deserialize_with = "string_or_number")]
    pub survey_id: String,
    #[serde(default)]
    pub respondent_name: String,
    #[serde(default)]
    pub respondent_email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub respondent_phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub respondent_company: Option<String>,
    #[serde(default)]
    pub is_existing_client: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub existing_client_id: Option<String>,
    #[serde(default)]
    pub answers: Vec<Answer>,
    #[serde(default)]
    pub submitted_at: Option<DateTime<Utc>>,
    /// Seconds spent filling the survey
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completion_time: Option<u64>,
}

impl SurveyResponse {
    pub fn new(survey_id: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            survey_id: survey_id.into(),
            respondent_name: String::new(),
            respondent_email: String::new(),
            respondent_phone: None,
            respondent_company: None,
            is_existing_client: false,
            existing_client_id: None,
            answers: Vec::new(),
            submitted_at: None,
            completion_time: None,
        }
    }

    pub fn with_answer(mut self, question_id: impl Into<String>, value: impl Into<AnswerValue>) -> Self {
        self.answers.push(Answer::new(question_id, value));
        self
    }

    pub fn with_completion_time(mut self, seconds: u64) -> Self {
        self.completion_time = Some(seconds);
        self
    }

    pub fn answers_for<'a>(&'a self, question_id: &'a str) -> impl Iterator<Item = &'a Answer> + 'a {
        self.answers.iter().filter(move |a| a.question_id == question_id)
    }
}

/// Raw submission as received from a respondent
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurveySubmission {
    #[serde(default, deserialize_with = "string_or_number")]
    pub survey_id: String,
    #[serde(default)]
    pub respondent_name: String,
    #[serde(default)]
    pub respondent_email: String,
    #[serde(default)]
    pub respondent_phone: Option<String>,
    #[serde(default)]
    pub respondent_company: Option<String>,
    #[serde(default)]
    pub is_existing_client: bool,
    #[serde(default)]
    pub existing_client_id: Option<String>,
    /// Question identifier → raw value, in submission order
    #[serde(default)]
    pub answers: AnswerMap,
    #[serde(default)]
    pub submitted_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub completion_time: Option<u64>,
}

impl SurveySubmission {
    /// Build an unenriched response: fresh id, blank titles, answers in order
    pub fn into_response(self) -> SurveyResponse {
        SurveyResponse {
            id: uuid::Uuid::new_v4().to_string(),
            survey_id: self.survey_id,
            respondent_name: self.respondent_name,
            respondent_email: self.respondent_email,
            respondent_phone: self.respondent_phone,
            respondent_company: self.respondent_company,
            is_existing_client: self.is_existing_client,
            existing_client_id: self.existing_client_id,
            answers: self
                .answers
                .into_iter()
                .map(|(question_id, value)| Answer::new(question_id, value))
                .collect(),
            submitted_at: self.submitted_at,
            completion_time: self.completion_time,
        }
    }
}

/// Question-id → value mapping in submission order
pub type AnswerMap = IndexMap<String, AnswerValue>;

/// Identifiers arrive as strings or integers; they are always compared as strings
fn string_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Int(i64),
        Unsigned(u64),
    }

    match RawId::deserialize(deserializer) {
        Ok(RawId::Text(text)) => Ok(text),
        Ok(RawId::Int(n)) => Ok(n.to_string()),
        Ok(RawId::Unsigned(n)) => Ok(n.to_string()),
        Err(_) => Err(de::Error::custom("expected a string or integer identifier")),
    }
}
