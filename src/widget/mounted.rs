//! A widget of any kind, driven by row position.
//!
//! The player shows every format as a list of rows (options, blanks or
//! left-hand items) under a cursor. [`MountedWidget`] maps row events onto
//! the typed controls of the widget underneath.

use crate::grading::{Mark, TRUE_FALSE_OPTIONS};
use crate::models::{
    Exercise, FillInBlanks, MatchPairs, MultipleChoice, Playable, Question, QuestionKind, SingleChoice,
};

use super::{Banner, SubmitError, Widget};

pub enum MountedWidget {
    Question(Widget<Question>),
    Single(Widget<SingleChoice>),
    Multiple(Widget<MultipleChoice>),
    Blanks(Widget<FillInBlanks>),
    Pairs(Widget<MatchPairs>),
}

macro_rules! each {
    ($mounted:expr, $widget:ident => $body:expr) => {
        match $mounted {
            MountedWidget::Question($widget) => $body,
            MountedWidget::Single($widget) => $body,
            MountedWidget::Multiple($widget) => $body,
            MountedWidget::Blanks($widget) => $body,
            MountedWidget::Pairs($widget) => $body,
        }
    };
}

impl MountedWidget {
    pub fn mount(item: Playable, on_submit: impl FnMut(bool) + 'static) -> Self {
        match item {
            Playable::Question(question) => Self::Question(Widget::mount(question).on_submit(on_submit)),
            Playable::Exercise(Exercise::Single(exercise)) => {
                Self::Single(Widget::mount(exercise).on_submit(on_submit))
            }
            Playable::Exercise(Exercise::Multiple(exercise)) => {
                Self::Multiple(Widget::mount(exercise).on_submit(on_submit))
            }
            Playable::Exercise(Exercise::FillInBlanks(exercise)) => {
                Self::Blanks(Widget::mount(exercise).on_submit(on_submit))
            }
            Playable::Exercise(Exercise::MatchPairs(exercise)) => {
                Self::Pairs(Widget::mount(exercise).on_submit(on_submit))
            }
        }
    }

    pub fn is_submitted(&self) -> bool {
        each!(self, widget => widget.is_submitted())
    }

    pub fn can_submit(&self) -> bool {
        each!(self, widget => widget.can_submit())
    }

    pub fn submit(&mut self) -> Result<bool, SubmitError> {
        each!(self, widget => widget.submit())
    }

    pub fn verdict(&self) -> Option<bool> {
        each!(self, widget => widget.verdict())
    }

    pub fn banner(&self) -> Option<Banner> {
        each!(self, widget => widget.banner())
    }

    pub fn marks(&self) -> Option<Vec<Mark>> {
        each!(self, widget => widget.marks())
    }

    /// Number of rows the cursor moves over.
    pub fn rows(&self) -> usize {
        match self {
            Self::Question(widget) => match widget.question() {
                Question::TrueFalse { .. } => TRUE_FALSE_OPTIONS.len(),
                question => question.options().len(),
            },
            Self::Single(widget) => widget.question().options.len(),
            Self::Multiple(widget) => widget.question().options.len(),
            Self::Blanks(widget) => widget.question().blanks.len(),
            Self::Pairs(widget) => widget.question().pairs.len(),
        }
    }

    /// Whether key presses go into a text answer.
    pub fn is_typing(&self) -> bool {
        matches!(self, Self::Question(widget)
            if matches!(widget.question(), Question::Text { .. }) && !widget.is_submitted())
    }

    /// Select or toggle the option on `row`. On blank and pair rows this
    /// steps to the next value.
    pub fn activate(&mut self, row: usize) -> bool {
        match self {
            Self::Question(widget) => match widget.question().kind() {
                QuestionKind::Single => widget.select(row),
                QuestionKind::Multiple => widget.toggle(row),
                QuestionKind::TrueFalse => match TRUE_FALSE_OPTIONS.get(row) {
                    Some(value) => widget.choose(*value),
                    None => false,
                },
                QuestionKind::Text => false,
            },
            Self::Single(widget) => match widget.question().options.get(row) {
                Some(option) => {
                    let id = option.id.clone();
                    widget.select(&id)
                }
                None => false,
            },
            Self::Multiple(widget) => match widget.question().options.get(row) {
                Some(option) => {
                    let id = option.id.clone();
                    widget.toggle(&id)
                }
                None => false,
            },
            Self::Blanks(_) | Self::Pairs(_) => self.cycle(row, true),
        }
    }

    /// Step the value of a blank or pair row through "unset" and the
    /// offered values, wrapping at both ends.
    pub fn cycle(&mut self, row: usize, forward: bool) -> bool {
        match self {
            Self::Blanks(widget) => {
                let exercise = widget.question();
                let Some(blank) = exercise.ordered_blanks().get(row).map(|blank| blank.id.clone()) else {
                    return false;
                };
                let next = step(&exercise.options, widget.submission().get(&blank), forward);
                widget.fill(&blank, &next)
            }
            Self::Pairs(widget) => {
                let Some(left) = widget.question().pairs.get(row).map(|pair| pair.left.clone()) else {
                    return false;
                };
                let next = step(widget.right_column(), widget.submission().get(&left), forward);
                widget.pair(&left, &next)
            }
            Self::Question(_) | Self::Single(_) | Self::Multiple(_) => false,
        }
    }

    pub fn push_char(&mut self, c: char) -> bool {
        match self {
            Self::Question(widget) => widget.push_char(c),
            _ => false,
        }
    }

    pub fn pop_char(&mut self) -> bool {
        match self {
            Self::Question(widget) => widget.pop_char(),
            _ => false,
        }
    }
}

/// The value after `current` in `["", choices..]`; empty means unset.
fn step(choices: &[String], current: Option<&String>, forward: bool) -> String {
    let len = choices.len() + 1;
    let position = current
        .and_then(|value| choices.iter().position(|choice| choice == value))
        .map_or(0, |index| index + 1);
    let next = if forward {
        (position + 1) % len
    } else {
        (position + len - 1) % len
    };
    match next {
        0 => String::new(),
        index => choices[index - 1].clone(),
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;
    use crate::data::demo_exercises;
    use crate::models::QuestionId;

    fn demo(index: usize) -> Playable {
        Playable::Exercise(demo_exercises().remove(index))
    }

    #[test]
    fn test_step_wraps_through_unset() {
        let choices = vec!["a".to_string(), "b".to_string()];
        assert_eq!(step(&choices, None, true), "a");
        assert_eq!(step(&choices, Some(&"a".to_string()), true), "b");
        assert_eq!(step(&choices, Some(&"b".to_string()), true), "");
        assert_eq!(step(&choices, None, false), "b");
        assert_eq!(step(&choices, Some(&"a".to_string()), false), "");
    }

    #[test]
    fn test_choice_rows() {
        let mut single = MountedWidget::mount(demo(0), |_| {});
        assert_eq!(single.rows(), 4);
        assert!(!single.activate(4));
        assert!(single.activate(2));
        assert_eq!(single.submit(), Ok(true));

        let mut multiple = MountedWidget::mount(demo(1), |_| {});
        multiple.activate(0);
        multiple.activate(1);
        multiple.activate(2);
        multiple.activate(1);
        assert_eq!(multiple.submit(), Ok(true));
        assert_eq!(
            multiple.marks(),
            Some(vec![Mark::Correct, Mark::Neutral, Mark::Correct, Mark::Neutral])
        );
    }

    #[test]
    fn test_blank_rows_cycle_offered_values() {
        let mut blanks = MountedWidget::mount(demo(2), |_| {});
        assert_eq!(blanks.rows(), 2);
        assert!(blanks.activate(0));
        assert!(!blanks.can_submit());

        // Backwards from unset: JavaScript, TypeScript, Next.js.
        for _ in 0..3 {
            blanks.cycle(1, false);
        }
        assert!(blanks.can_submit());
        assert_eq!(blanks.submit(), Ok(true));
        assert!(!blanks.cycle(0, true));
    }

    #[test]
    fn test_pair_rows_follow_right_column() {
        let verdict = Rc::new(Cell::new(None));
        let seen = Rc::clone(&verdict);
        let mut pairs = MountedWidget::mount(demo(3), move |correct| seen.set(Some(correct)));
        let MountedWidget::Pairs(widget) = &pairs else {
            panic!("expected a match-pairs widget");
        };
        let column = widget.right_column().to_vec();
        let first = column[0].clone();

        for row in 0..pairs.rows() {
            assert!(pairs.cycle(row, true));
        }
        let MountedWidget::Pairs(widget) = &pairs else {
            unreachable!();
        };
        assert!(widget.submission().values().all(|value| *value == first));
        assert!(pairs.can_submit());
        assert_eq!(pairs.submit(), Ok(false));
        assert_eq!(verdict.get(), Some(false));
    }

    #[test]
    fn test_typing_only_in_open_text_questions() {
        let question = Question::Text {
            id: QuestionId::from("1"),
            question: "Capital of Italy?".to_string(),
            answer: "Rome".to_string(),
        };
        let mut text = MountedWidget::mount(Playable::Question(question), |_| {});
        assert!(text.is_typing());
        assert_eq!(text.rows(), 0);
        for c in "Rome".chars() {
            text.push_char(c);
        }
        assert_eq!(text.submit(), Ok(true));
        assert!(!text.is_typing());

        let mut blanks = MountedWidget::mount(demo(2), |_| {});
        assert!(!blanks.is_typing());
        assert!(!blanks.push_char('x'));
    }
}
