//! Question widgets.
//!
//! A [`Widget`] wraps one question and the user's in-progress submission.
//! It starts [`Phase::Unanswered`], accepts any number of selection edits,
//! and moves to [`Phase::Submitted`] exactly once, when the submission is
//! complete. From then on the submission is frozen and the verdict, marks
//! and banner are available.

mod controls;
mod mounted;

use rand::seq::SliceRandom;
use rand::Rng;
use thiserror::Error;

use crate::grading::{Gradable, Mark};
use crate::models::{FillInBlanks, MatchPairs, MultipleChoice, Question, SingleChoice};

pub use mounted::MountedWidget;

/// State of a widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Unanswered,
    Submitted { correct: bool },
}

/// Aggregate feedback shown once a widget is submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Banner {
    Correct,
    Incorrect,
}

impl Banner {
    pub fn message(self) -> &'static str {
        match self {
            Self::Correct => "✓ Correct!",
            Self::Incorrect => "✗ Incorrect.",
        }
    }
}

/// Why a submit action was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("every answer slot must be filled before submitting")]
    Incomplete,
    #[error("this question has already been submitted")]
    AlreadySubmitted,
}

/// A question format that can be mounted in a widget.
///
/// Mounting computes whatever presentation state must stay fixed for the
/// lifetime of the widget, such as the shuffled right column of a
/// match-pairs exercise.
pub trait Mountable: Gradable {
    type Presentation;

    fn present<R: Rng + ?Sized>(&self, rng: &mut R) -> Self::Presentation;
}

impl Mountable for Question {
    type Presentation = ();

    fn present<R: Rng + ?Sized>(&self, _rng: &mut R) {}
}

impl Mountable for SingleChoice {
    type Presentation = ();

    fn present<R: Rng + ?Sized>(&self, _rng: &mut R) {}
}

impl Mountable for MultipleChoice {
    type Presentation = ();

    fn present<R: Rng + ?Sized>(&self, _rng: &mut R) {}
}

impl Mountable for FillInBlanks {
    type Presentation = ();

    fn present<R: Rng + ?Sized>(&self, _rng: &mut R) {}
}

impl Mountable for MatchPairs {
    /// Right-hand values in display order.
    type Presentation = Vec<String>;

    fn present<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<String> {
        let mut column: Vec<String> = self.pairs.iter().map(|pair| pair.right.clone()).collect();
        column.shuffle(rng);
        column
    }
}

type Callback = Box<dyn FnMut(bool)>;

/// One mounted question and its submission.
pub struct Widget<Q: Mountable> {
    question: Q,
    presentation: Q::Presentation,
    submission: Q::Submission,
    phase: Phase,
    on_submit: Option<Callback>,
}

impl<Q: Mountable> Widget<Q> {
    /// Mount a widget, drawing presentation randomness from the thread RNG.
    pub fn mount(question: Q) -> Self {
        Self::mount_with_rng(question, &mut rand::thread_rng())
    }

    pub fn mount_with_rng<R: Rng + ?Sized>(question: Q, rng: &mut R) -> Self {
        let presentation = question.present(rng);
        let submission = question.empty_submission();
        Self {
            question,
            presentation,
            submission,
            phase: Phase::Unanswered,
            on_submit: None,
        }
    }

    /// Register a callback that receives the verdict when the widget is
    /// submitted. It runs at most once.
    pub fn on_submit(mut self, callback: impl FnMut(bool) + 'static) -> Self {
        self.on_submit = Some(Box::new(callback));
        self
    }

    pub fn question(&self) -> &Q {
        &self.question
    }

    pub fn presentation(&self) -> &Q::Presentation {
        &self.presentation
    }

    pub fn submission(&self) -> &Q::Submission {
        &self.submission
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_submitted(&self) -> bool {
        matches!(self.phase, Phase::Submitted { .. })
    }

    /// Whether the submit action is available.
    pub fn can_submit(&self) -> bool {
        !self.is_submitted() && self.question.is_complete(&self.submission)
    }

    /// Apply a selection edit. Returns `false` once the widget is submitted,
    /// in which case the edit is dropped. Callers check the edit against
    /// the question first.
    pub(crate) fn update(&mut self, edit: impl FnOnce(&mut Q::Submission)) -> bool {
        if self.is_submitted() {
            return false;
        }
        edit(&mut self.submission);
        true
    }

    /// Grade the submission and lock the widget.
    pub fn submit(&mut self) -> Result<bool, SubmitError> {
        if self.is_submitted() {
            return Err(SubmitError::AlreadySubmitted);
        }
        if !self.question.is_complete(&self.submission) {
            return Err(SubmitError::Incomplete);
        }

        let correct = self.question.evaluate(&self.submission);
        self.phase = Phase::Submitted { correct };
        log::debug!("submission graded, correct: {}", correct);

        if let Some(mut callback) = self.on_submit.take() {
            callback(correct);
        }
        Ok(correct)
    }

    pub fn verdict(&self) -> Option<bool> {
        match self.phase {
            Phase::Unanswered => None,
            Phase::Submitted { correct } => Some(correct),
        }
    }

    /// Per-slot feedback, available after submission.
    pub fn marks(&self) -> Option<Vec<Mark>> {
        self.is_submitted()
            .then(|| self.question.marks(&self.submission))
    }

    pub fn banner(&self) -> Option<Banner> {
        self.verdict().map(|correct| {
            if correct {
                Banner::Correct
            } else {
                Banner::Incorrect
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::BTreeSet;
    use std::rc::Rc;

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::grading::Answer;
    use crate::models::{Pair, QuestionId};

    fn multiple() -> Question {
        Question::Multiple {
            id: QuestionId::from("m"),
            question: "Which are prime?".to_string(),
            options: vec!["2".into(), "4".into(), "5".into()],
            correct_answers: BTreeSet::from([0, 2]),
        }
    }

    fn pairs() -> MatchPairs {
        MatchPairs {
            title: "Match".to_string(),
            content: String::new(),
            pairs: vec![
                Pair::new("Python", "Data Science"),
                Pair::new("JavaScript", "Web Development"),
                Pair::new("Swift", "iOS Development"),
                Pair::new("SQL", "Database Queries"),
            ],
        }
    }

    #[test]
    fn test_submit_refused_until_complete() {
        let mut widget = Widget::mount(multiple());
        assert_eq!(widget.phase(), Phase::Unanswered);
        assert!(!widget.can_submit());
        assert_eq!(widget.submit(), Err(SubmitError::Incomplete));

        assert!(widget.toggle(2));
        assert!(widget.can_submit());
        assert!(widget.toggle(2));
        assert!(!widget.can_submit());
    }

    #[test]
    fn test_submit_locks_and_fires_callback_once() {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let seen = Rc::clone(&calls);
        let mut widget = Widget::mount(multiple()).on_submit(move |correct| seen.borrow_mut().push(correct));

        widget.toggle(2);
        widget.toggle(0);
        assert_eq!(widget.submit(), Ok(true));
        assert_eq!(widget.phase(), Phase::Submitted { correct: true });
        assert_eq!(widget.submit(), Err(SubmitError::AlreadySubmitted));

        assert!(!widget.toggle(1));
        assert_eq!(widget.submission(), &Answer::Multiple(BTreeSet::from([0, 2])));
        assert_eq!(*calls.borrow(), vec![true]);
        assert_eq!(widget.banner(), Some(Banner::Correct));
    }

    #[test]
    fn test_feedback_hidden_until_submitted() {
        let mut widget = Widget::mount(multiple());
        widget.toggle(1);
        assert_eq!(widget.marks(), None);
        assert_eq!(widget.banner(), None);

        assert_eq!(widget.submit(), Ok(false));
        assert_eq!(
            widget.marks(),
            Some(vec![Mark::Missed, Mark::WronglyChosen, Mark::Missed])
        );
        assert_eq!(widget.banner().map(Banner::message), Some("✗ Incorrect."));
    }

    #[test]
    fn test_match_column_is_a_fixed_permutation() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut widget = Widget::mount_with_rng(pairs(), &mut rng);
        let column = widget.right_column().to_vec();

        let mut sorted = column.clone();
        sorted.sort();
        let mut expected: Vec<String> = pairs().pairs.into_iter().map(|pair| pair.right).collect();
        expected.sort();
        assert_eq!(sorted, expected);

        for pair in pairs().pairs {
            assert!(widget.pair(&pair.left, &pair.right));
            assert_eq!(widget.right_column(), column.as_slice());
        }
        assert_eq!(widget.submit(), Ok(true));
        assert_eq!(widget.right_column(), column.as_slice());
    }

    #[test]
    fn test_matching_ignores_display_order() {
        for seed in 0..8 {
            let mut widget = Widget::mount_with_rng(pairs(), &mut StdRng::seed_from_u64(seed));
            for pair in pairs().pairs {
                widget.pair(&pair.left, &pair.right);
            }
            assert_eq!(widget.submit(), Ok(true));
        }
    }
}
