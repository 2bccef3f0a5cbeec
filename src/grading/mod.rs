//! Answer evaluation.
//!
//! Every question format implements [`Gradable`]: it describes the shape of
//! a submission, when a submission is complete, and how it is graded.
//! Grading is pure; the widget layer decides when it runs.

mod exercise;
mod question;

pub use question::{evaluate, Answer, TRUE_FALSE_OPTIONS};

/// Feedback for one option, blank or pair after submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mark {
    /// Chosen and correct, or a blank/pair answered correctly.
    Correct,
    /// Chosen but not correct, or a blank/pair answered wrongly.
    WronglyChosen,
    /// Correct but not chosen.
    Missed,
    /// Neither chosen nor correct.
    Neutral,
}

impl Mark {
    /// Mark for a selectable option.
    pub fn for_option(chosen: bool, correct: bool) -> Self {
        match (chosen, correct) {
            (true, true) => Self::Correct,
            (true, false) => Self::WronglyChosen,
            (false, true) => Self::Missed,
            (false, false) => Self::Neutral,
        }
    }

    /// Mark for a slot that is either right or wrong.
    pub fn for_slot(correct: bool) -> Self {
        if correct {
            Self::Correct
        } else {
            Self::WronglyChosen
        }
    }
}

/// A question format that can be answered and graded.
pub trait Gradable {
    /// The user's answer state, shaped like the correct-answer encoding.
    type Submission: Clone + std::fmt::Debug;

    /// The submission a freshly mounted widget starts from.
    fn empty_submission(&self) -> Self::Submission;

    /// Whether every required slot is filled.
    fn is_complete(&self, submission: &Self::Submission) -> bool;

    /// The verdict for a complete submission.
    fn evaluate(&self, submission: &Self::Submission) -> bool;

    /// Per-option, per-blank or per-pair feedback, in display order.
    fn marks(&self, submission: &Self::Submission) -> Vec<Mark>;
}
