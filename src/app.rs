use std::cell::RefCell;
use std::rc::Rc;

use crate::models::{AppState, Playable, Question};
use crate::widget::MountedWidget;

/// State of the terminal player: one widget per item, in order.
pub struct App {
    pub state: AppState,
    title: String,
    items: Vec<Playable>,
    current_question_index: usize,
    widget: Option<MountedWidget>,
    cursor: usize,
    // Written by each widget's completion callback.
    verdicts: Rc<RefCell<Vec<Option<bool>>>>,
    result_scroll: usize,
}

impl App {
    pub fn with_questions(title: impl Into<String>, questions: Vec<Question>) -> Self {
        Self::with_items(title, questions.into_iter().map(Playable::from).collect())
    }

    pub fn with_items(title: impl Into<String>, items: Vec<Playable>) -> Self {
        let num_items = items.len();

        Self {
            state: AppState::Welcome,
            title: title.into(),
            items,
            current_question_index: 0,
            widget: None,
            cursor: 0,
            verdicts: Rc::new(RefCell::new(vec![None; num_items])),
            result_scroll: 0,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// The mounted widget, while a quiz is running.
    pub fn widget(&self) -> Option<&MountedWidget> {
        self.widget.as_ref()
    }

    /// The item behind the mounted widget.
    pub fn current_item(&self) -> Option<&Playable> {
        self.widget
            .as_ref()
            .and_then(|_| self.items.get(self.current_question_index))
    }

    pub fn current_question_number(&self) -> usize {
        self.current_question_index + 1
    }

    pub fn total_questions(&self) -> usize {
        self.items.len()
    }

    pub fn items(&self) -> &[Playable] {
        &self.items
    }

    pub fn verdicts(&self) -> Vec<Option<bool>> {
        self.verdicts.borrow().clone()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn result_scroll(&self) -> usize {
        self.result_scroll
    }

    /// Whether key presses should be typed into a text answer.
    pub fn is_typing(&self) -> bool {
        self.widget.as_ref().is_some_and(MountedWidget::is_typing)
    }

    pub fn start_quiz(&mut self) {
        if self.items.is_empty() {
            self.state = AppState::Result;
            return;
        }
        self.state = AppState::Quiz;
        self.mount_current();
    }

    pub fn select_next_option(&mut self) {
        let count = self.row_count();
        if count > 0 {
            self.cursor = (self.cursor + 1) % count;
        }
    }

    pub fn select_previous_option(&mut self) {
        let count = self.row_count();
        if count > 0 {
            self.cursor = (self.cursor + count - 1) % count;
        }
    }

    /// Select or toggle the option under the cursor, or step the value of
    /// the blank or pair under it.
    pub fn toggle_option(&mut self) {
        let cursor = self.cursor;
        if let Some(widget) = self.widget.as_mut() {
            widget.activate(cursor);
        }
    }

    /// Step the value of the blank or pair under the cursor.
    pub fn cycle_choice(&mut self, forward: bool) {
        let cursor = self.cursor;
        if let Some(widget) = self.widget.as_mut() {
            widget.cycle(cursor, forward);
        }
    }

    pub fn type_char(&mut self, c: char) {
        if let Some(widget) = self.widget.as_mut() {
            widget.push_char(c);
        }
    }

    pub fn delete_char(&mut self) {
        if let Some(widget) = self.widget.as_mut() {
            widget.pop_char();
        }
    }

    /// Submit the current item, or move on once it shows its feedback.
    pub fn confirm(&mut self) {
        let Some(widget) = self.widget.as_mut() else {
            return;
        };

        if widget.is_submitted() {
            self.next_question();
        } else if widget.can_submit() {
            // Refusal is impossible here; the submit action was available.
            let _ = widget.submit();
        }
    }

    pub fn calculate_score(&self) -> usize {
        self.verdicts
            .borrow()
            .iter()
            .filter(|verdict| **verdict == Some(true))
            .count()
    }

    pub fn scroll_results_down(&mut self) {
        let max_scroll = self.items.len().saturating_sub(1);
        self.result_scroll = (self.result_scroll + 1).min(max_scroll);
    }

    pub fn scroll_results_up(&mut self) {
        self.result_scroll = self.result_scroll.saturating_sub(1);
    }

    pub fn restart(&mut self) {
        self.state = AppState::Welcome;
        self.current_question_index = 0;
        self.widget = None;
        self.cursor = 0;
        self.result_scroll = 0;
        self.verdicts = Rc::new(RefCell::new(vec![None; self.items.len()]));
    }

    fn next_question(&mut self) {
        self.current_question_index += 1;
        if self.current_question_index >= self.items.len() {
            self.widget = None;
            self.state = AppState::Result;
        } else {
            self.mount_current();
        }
    }

    fn mount_current(&mut self) {
        let index = self.current_question_index;
        let verdicts = Rc::clone(&self.verdicts);
        let item = self.items[index].clone();

        self.cursor = 0;
        self.widget = Some(MountedWidget::mount(item, move |correct| {
            verdicts.borrow_mut()[index] = Some(correct);
        }));
    }

    fn row_count(&self) -> usize {
        self.widget.as_ref().map_or(0, MountedWidget::rows)
    }
}
