//! Submission stages: one contract for every enrichment step
use crate::context::SubmissionContext;
use crate::model::{Survey, SurveyResponse};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A single step of the submission pipeline.
///
/// Stages mutate the response in place and must be idempotent: applying a
/// stage to its own output changes nothing.
pub trait SubmissionStage: Send + Sync {
    /// Stable stage id (ex: "enrich.answers")
    fn id(&self) -> &'static str;

    fn apply(
        &self,
        response: &mut SurveyResponse,
        survey: &Survey,
        ctx: &SubmissionContext,
    ) -> StageTally;
}

/// Per-stage answer counts, summed into the submission summary
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageTally {
    pub matched: usize,
    pub unmatched: usize,
    pub invalid: usize,
}

impl std::ops::AddAssign for StageTally {
    fn add_assign(&mut self, other: Self) {
        self.matched += other.matched;
        self.unmatched += other.unmatched;
        self.invalid += other.invalid;
    }
}

/// Defaults `submittedAt` to the run clock when the caller left it unset
pub struct StampSubmittedAt;

impl SubmissionStage for StampSubmittedAt {
    fn id(&self) -> &'static str {
        "stamp.submitted_at"
    }

    fn apply(
        &self,
        response: &mut SurveyResponse,
        _survey: &Survey,
        ctx: &SubmissionContext,
    ) -> StageTally {
        if response.submitted_at.is_none() {
            response.submitted_at = Some(ctx.now);
        }
        StageTally::default()
    }
}

/// Fills missing question titles and sets each answer's validity flag.
///
/// Answers whose question id is not in the survey are left untouched; the
/// response may have been built against an older copy of the survey.
pub struct EnrichAnswers;

impl SubmissionStage for EnrichAnswers {
    fn id(&self) -> &'static str {
        "enrich.answers"
    }

    fn apply(
        &self,
        response: &mut SurveyResponse,
        survey: &Survey,
        ctx: &SubmissionContext,
    ) -> StageTally {
        let mut tally = StageTally::default();

        for answer in &mut response.answers {
            let Some(question) = survey.question(&answer.question_id) else {
                debug!(
                    trace_id = %ctx.trace_id,
                    question_id = %answer.question_id,
                    "answer does not match any question, passing through"
                );
                tally.unmatched += 1;
                continue;
            };

            tally.matched += 1;
            if answer.question_title.is_empty() {
                answer.question_title = question.text.clone();
            }

            match ctx.validator.check(&answer.value, question) {
                Ok(()) => answer.is_valid = true,
                Err(rejection) => {
                    debug!(
                        trace_id = %ctx.trace_id,
                        question_id = %answer.question_id,
                        %rejection,
                        "answer rejected"
                    );
                    answer.is_valid = false;
                    tally.invalid += 1;
                }
            }
        }

        tally
    }
}
