//! Selection events for each widget kind.
//!
//! Every method returns whether the event was applied. Events are dropped
//! after submission and when they name an option, blank or item the
//! question does not have.

use crate::grading::Answer;
use crate::models::{FillInBlanks, MatchPairs, MultipleChoice, Question, SingleChoice};

use super::Widget;

impl Widget<Question> {
    /// Choose an option of a single-choice question.
    pub fn select(&mut self, index: usize) -> bool {
        if index >= self.question().options().len() {
            return false;
        }
        self.update_answer(|answer| match answer {
            Answer::Single(chosen) => {
                *chosen = Some(index);
                true
            }
            _ => false,
        })
    }

    /// Flip an option of a multiple-choice question.
    pub fn toggle(&mut self, index: usize) -> bool {
        if index >= self.question().options().len() {
            return false;
        }
        self.update_answer(|answer| match answer {
            Answer::Multiple(chosen) => {
                if !chosen.remove(&index) {
                    chosen.insert(index);
                }
                true
            }
            _ => false,
        })
    }

    /// Choose the value of a true/false question.
    pub fn choose(&mut self, value: bool) -> bool {
        self.update_answer(|answer| match answer {
            Answer::TrueFalse(chosen) => {
                *chosen = Some(value);
                true
            }
            _ => false,
        })
    }

    /// Replace the typed answer of a text question.
    pub fn set_text(&mut self, text: &str) -> bool {
        self.edit_text(|current| {
            current.clear();
            current.push_str(text);
        })
    }

    pub fn push_char(&mut self, c: char) -> bool {
        self.edit_text(|current| current.push(c))
    }

    pub fn pop_char(&mut self) -> bool {
        self.edit_text(|current| {
            current.pop();
        })
    }

    fn edit_text(&mut self, edit: impl FnOnce(&mut String)) -> bool {
        self.update_answer(|answer| match answer {
            Answer::Text(current) => {
                edit(current);
                true
            }
            _ => false,
        })
    }

    fn update_answer(&mut self, edit: impl FnOnce(&mut Answer) -> bool) -> bool {
        let mut applied = false;
        let open = self.update(|answer| applied = edit(answer));
        open && applied
    }
}

impl Widget<SingleChoice> {
    /// Choose an option by id.
    pub fn select(&mut self, option_id: &str) -> bool {
        if !self.question().options.iter().any(|option| option.id == option_id) {
            return false;
        }
        self.update(|chosen| *chosen = Some(option_id.to_string()))
    }
}

impl Widget<MultipleChoice> {
    /// Flip an option by id.
    pub fn toggle(&mut self, option_id: &str) -> bool {
        if !self.question().options.iter().any(|option| option.id == option_id) {
            return false;
        }
        self.update(|chosen| {
            if !chosen.remove(option_id) {
                chosen.insert(option_id.to_string());
            }
        })
    }
}

impl Widget<FillInBlanks> {
    /// Put one of the offered values into a blank. An empty value clears it.
    pub fn fill(&mut self, blank_id: &str, value: &str) -> bool {
        let question = self.question();
        if !question.blanks.iter().any(|blank| blank.id == blank_id) {
            return false;
        }
        if !value.is_empty() && !question.options.iter().any(|option| option == value) {
            return false;
        }
        self.update(|filled| {
            if value.is_empty() {
                filled.remove(blank_id);
            } else {
                filled.insert(blank_id.to_string(), value.to_string());
            }
        })
    }
}

impl Widget<MatchPairs> {
    /// Right-hand values in the order fixed at mount time.
    pub fn right_column(&self) -> &[String] {
        self.presentation()
    }

    /// Match a left item with a right-hand value. An empty value clears it.
    pub fn pair(&mut self, left: &str, right: &str) -> bool {
        if self.question().right_for(left).is_none() {
            return false;
        }
        if !right.is_empty() && !self.right_column().iter().any(|value| value == right) {
            return false;
        }
        self.update(|matches| {
            if right.is_empty() {
                matches.remove(left);
            } else {
                matches.insert(left.to_string(), right.to_string());
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::{BTreeMap, BTreeSet};

    use super::*;
    use crate::models::{Blank, ChoiceOption, Pair, QuestionId};
    use crate::widget::Phase;

    fn text() -> Question {
        Question::Text {
            id: QuestionId::from("t"),
            question: "Capital of France?".to_string(),
            answer: "Paris".to_string(),
        }
    }

    fn true_false() -> Question {
        Question::TrueFalse {
            id: QuestionId::from("tf"),
            question: "Rust has a garbage collector".to_string(),
            correct_answer: false,
        }
    }

    fn single() -> Question {
        Question::Single {
            id: QuestionId::from("s"),
            question: "2 + 2".to_string(),
            options: vec!["3".into(), "4".into()],
            correct_answer: 1,
        }
    }

    #[test]
    fn test_text_typing() {
        let mut widget = Widget::mount(text());
        assert!(!widget.can_submit());
        for c in "Parix".chars() {
            widget.push_char(c);
        }
        widget.pop_char();
        widget.push_char('s');
        assert!(widget.can_submit());
        assert_eq!(widget.submit(), Ok(true));
        assert!(!widget.push_char('!'));
    }

    #[test]
    fn test_events_for_other_kinds_are_ignored() {
        let mut widget = Widget::mount(true_false());
        assert!(!widget.select(0));
        assert!(!widget.toggle(0));
        assert!(!widget.set_text("false"));
        assert!(!widget.can_submit());

        assert!(widget.choose(true));
        assert!(widget.choose(false));
        assert_eq!(widget.submit(), Ok(true));
    }

    #[test]
    fn test_single_choice_index_bounds() {
        let mut widget = Widget::mount(single());
        assert!(!widget.select(2));
        assert!(widget.select(0));
        assert!(widget.select(1));
        assert_eq!(widget.submit(), Ok(true));
        assert_eq!(widget.phase(), Phase::Submitted { correct: true });
    }

    #[test]
    fn test_unknown_targets_leave_submission_unchanged() {
        let mut widget = Widget::mount(Question::Multiple {
            id: QuestionId::from("m"),
            question: "Even numbers".to_string(),
            options: vec!["1".into(), "2".into()],
            correct_answers: BTreeSet::from([1]),
        });
        assert!(widget.toggle(1));
        assert!(!widget.toggle(99));
        assert_eq!(widget.submission(), &Answer::Multiple(BTreeSet::from([1])));

        let mut pairs = Widget::mount(MatchPairs {
            title: String::new(),
            content: String::new(),
            pairs: vec![Pair {
                left: "SQL".to_string(),
                right: "Queries".to_string(),
            }],
        });
        assert!(!pairs.pair("COBOL", "Queries"));
        assert!(!pairs.pair("SQL", "Spreadsheets"));
        assert!(pairs.submission().is_empty());
        assert!(!pairs.can_submit());
    }

    #[test]
    fn test_exercise_controls() {
        let mut single = Widget::mount(SingleChoice {
            title: String::new(),
            content: String::new(),
            options: vec![ChoiceOption::text("1", "London"), ChoiceOption::text("3", "Paris")],
            correct_answer: "3".to_string(),
        });
        assert!(!single.select("9"));
        assert!(single.select("1"));
        assert_eq!(single.submit(), Ok(false));
        assert!(!single.select("3"));

        let mut multiple = Widget::mount(MultipleChoice {
            title: String::new(),
            content: String::new(),
            options: vec![ChoiceOption::text("1", "Python"), ChoiceOption::text("2", "CSS")],
            correct_answers: BTreeSet::from(["1".to_string()]),
        });
        assert!(multiple.toggle("1"));
        assert!(multiple.toggle("2"));
        assert!(multiple.toggle("2"));
        assert_eq!(multiple.submit(), Ok(true));

        let mut blanks = Widget::mount(FillInBlanks {
            title: String::new(),
            content: String::new(),
            blanks: vec![Blank {
                id: "b".to_string(),
                position: 0,
            }],
            options: vec!["React".to_string(), "Vue".to_string()],
            correct_answers: BTreeMap::from([("b".to_string(), "React".to_string())]),
        });
        assert!(!blanks.fill("b", "Angular"));
        assert!(!blanks.fill("zz", "React"));
        assert!(blanks.fill("b", "Vue"));
        assert!(blanks.fill("b", ""));
        assert!(!blanks.can_submit());
        assert!(blanks.fill("b", "React"));
        assert_eq!(blanks.submit(), Ok(true));
    }
}
