//! # quiz-forge
//!
//! Author quizzes, store them, and answer them through interactive question
//! widgets.
//!
//! The core is small: [`models`] describes questions and their correct
//! answers, [`grading`] compares a submission against them, and
//! [`widget::Widget`] is the two-state machine every question widget runs
//! (unanswered, then submitted exactly once). Around it sit a JSON file
//! [`store`], a question [`editor`], an SVG [`chart`] and a terminal player.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use quiz_forge::{Quiz, QuizError};
//!
//! fn main() -> Result<(), QuizError> {
//!     // Load questions from a JSON file
//!     let quiz = Quiz::from_json("questions.json")?;
//!
//!     // Answer them in the terminal
//!     quiz.run()?;
//!
//!     Ok(())
//! }
//! ```
//!
//! Widgets can be driven directly as well:
//!
//! ```rust
//! use quiz_forge::models::{Question, QuestionId};
//! use quiz_forge::widget::Widget;
//!
//! let question = Question::TrueFalse {
//!     id: QuestionId::from("1"),
//!     question: "Rust has a garbage collector".to_string(),
//!     correct_answer: false,
//! };
//! let mut widget = Widget::mount(question).on_submit(|correct| println!("correct: {correct}"));
//! assert!(!widget.can_submit());
//! widget.choose(false);
//! assert_eq!(widget.submit(), Ok(true));
//! ```

mod app;
pub mod chart;
pub mod cli;
pub mod config;
mod data;
pub mod editor;
pub mod grading;
pub mod models;
pub mod store;
pub mod terminal;
mod ui;
pub mod widget;

use std::io;
use std::path::Path;

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use thiserror::Error;
use uuid::Uuid;

pub use app::App;
pub use data::{demo_exercises, load_exercises_from_json, load_questions_from_json, LoadError};
pub use models::{AppState, Exercise, Playable, Question, QuizRecord};

use editor::EditorError;
use store::StoreError;

/// Error type for quiz operations.
#[derive(Debug, Error)]
pub enum QuizError {
    #[error("Failed to load questions: {0}")]
    Load(#[from] LoadError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Editor(#[from] EditorError),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("quiz {0} belongs to another user")]
    NotOwner(Uuid),
    #[error("{0}")]
    Usage(String),
}

/// A quiz that can be played in the terminal.
pub struct Quiz {
    app: App,
}

impl Quiz {
    /// Create a new quiz from a vector of questions.
    pub fn new(title: impl Into<String>, questions: Vec<Question>) -> Self {
        Self {
            app: App::with_questions(title, questions),
        }
    }

    /// Create a quiz from questions, exercises or a mix of both.
    pub fn with_items(title: impl Into<String>, items: Vec<Playable>) -> Self {
        Self {
            app: App::with_items(title, items),
        }
    }

    /// The built-in exercise set, one of each format.
    pub fn demo() -> Self {
        Self::with_items("Quiz Demo", demo_exercises().into_iter().map(Playable::from).collect())
    }

    /// Play the questions of a stored quiz.
    pub fn from_record(record: QuizRecord) -> Self {
        Self::new(record.title, record.questions)
    }

    /// Load a quiz from a JSON file holding an array of questions.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use quiz_forge::Quiz;
    ///
    /// let quiz = Quiz::from_json("questions.json").expect("Failed to load quiz");
    /// ```
    pub fn from_json<P: AsRef<Path>>(path: P) -> Result<Self, QuizError> {
        let path = path.as_ref();
        let questions = load_questions_from_json(path)?;
        Ok(Self::new(title_from_path(path), questions))
    }

    /// Load a quiz from a JSON file holding an array of exercises.
    pub fn from_exercises_json<P: AsRef<Path>>(path: P) -> Result<Self, QuizError> {
        let path = path.as_ref();
        let exercises = load_exercises_from_json(path)?;
        Ok(Self::with_items(
            title_from_path(path),
            exercises.into_iter().map(Playable::from).collect(),
        ))
    }

    /// Run the quiz in the terminal.
    ///
    /// This takes over the terminal and returns when the user quits.
    pub fn run(mut self) -> Result<(), QuizError> {
        let mut term = terminal::init()?;
        let result = run_event_loop(&mut term, &mut self.app);
        terminal::restore()?;
        result
    }

    pub fn app(&self) -> &App {
        &self.app
    }

    pub fn app_mut(&mut self) -> &mut App {
        &mut self.app
    }
}

fn title_from_path(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "Quiz".to_string())
}

fn run_event_loop(terminal: &mut terminal::AppTerminal, app: &mut App) -> Result<(), QuizError> {
    loop {
        terminal.draw(|frame| ui::render(frame, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }

            if handle_input(app, key.code) {
                break;
            }
        }
    }

    Ok(())
}

/// Returns true if the player should exit.
fn handle_input(app: &mut App, key: KeyCode) -> bool {
    match app.state {
        AppState::Welcome => handle_welcome_input(app, key),
        AppState::Quiz if app.is_typing() => handle_typing_input(app, key),
        AppState::Quiz => handle_quiz_input(app, key),
        AppState::Result => handle_result_input(app, key),
    }
}

fn handle_welcome_input(app: &mut App, key: KeyCode) -> bool {
    match key {
        KeyCode::Enter => {
            app.start_quiz();
            false
        }
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => true,
        _ => false,
    }
}

fn handle_typing_input(app: &mut App, key: KeyCode) -> bool {
    match key {
        KeyCode::Enter => {
            app.confirm();
            false
        }
        KeyCode::Backspace => {
            app.delete_char();
            false
        }
        KeyCode::Char(c) => {
            app.type_char(c);
            false
        }
        KeyCode::Esc => true,
        _ => false,
    }
}

fn handle_quiz_input(app: &mut App, key: KeyCode) -> bool {
    match key {
        KeyCode::Up | KeyCode::Char('k') => {
            app.select_previous_option();
            false
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.select_next_option();
            false
        }
        KeyCode::Left | KeyCode::Char('h') => {
            app.cycle_choice(false);
            false
        }
        KeyCode::Right | KeyCode::Char('l') => {
            app.cycle_choice(true);
            false
        }
        KeyCode::Char(' ') => {
            app.toggle_option();
            false
        }
        KeyCode::Enter => {
            app.confirm();
            false
        }
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => true,
        _ => false,
    }
}

fn handle_result_input(app: &mut App, key: KeyCode) -> bool {
    match key {
        KeyCode::Down | KeyCode::Char('j') => {
            app.scroll_results_down();
            false
        }
        KeyCode::Up | KeyCode::Char('k') => {
            app.scroll_results_up();
            false
        }
        KeyCode::Char('r') | KeyCode::Char('R') => {
            app.restart();
            false
        }
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => true,
        _ => false,
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::fs;
    use std::path::PathBuf;

    /// A fresh directory under the system temp dir, removed on drop.
    pub struct ScratchDir(PathBuf);

    impl ScratchDir {
        pub fn new() -> Self {
            let dir = std::env::temp_dir()
                .join("quiz-forge-tests")
                .join(uuid::Uuid::new_v4().to_string());
            fs::create_dir_all(&dir).unwrap();
            Self(dir)
        }

        pub fn path(&self, name: &str) -> PathBuf {
            self.0.join(name)
        }

        pub fn write(&self, name: &str, content: &str) -> PathBuf {
            let path = self.path(name);
            fs::write(&path, content).unwrap();
            path
        }

        pub fn dir(&self) -> &PathBuf {
            &self.0
        }
    }

    impl Drop for ScratchDir {
        fn drop(&mut self) {
            let _ = fs::remove_dir_all(&self.0);
        }
    }

    #[test]
    fn test_scratch_dir_is_removed_on_drop() {
        let scratch = ScratchDir::new();
        let dir = scratch.dir().clone();
        scratch.write("a.json", "[]");
        assert!(dir.join("a.json").exists());
        drop(scratch);
        assert!(!dir.exists());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::QuestionId;

    fn quiz() -> Quiz {
        Quiz::new(
            "Letters",
            vec![
                Question::Text {
                    id: QuestionId::from("1"),
                    question: "First letter?".to_string(),
                    answer: "aq".to_string(),
                },
                Question::TrueFalse {
                    id: QuestionId::from("2"),
                    question: "Z is last".to_string(),
                    correct_answer: true,
                },
            ],
        )
    }

    #[test]
    fn test_typing_captures_quit_key() {
        let mut quiz = quiz();
        let app = quiz.app_mut();
        assert!(!handle_input(app, KeyCode::Enter));
        assert_eq!(app.state, AppState::Quiz);

        // 'q' is text while a text answer is open.
        assert!(!handle_input(app, KeyCode::Char('a')));
        assert!(!handle_input(app, KeyCode::Char('q')));
        assert!(!handle_input(app, KeyCode::Enter));
        assert_eq!(app.widget().unwrap().verdict(), Some(true));

        assert!(!handle_input(app, KeyCode::Enter));
        assert!(!handle_input(app, KeyCode::Char(' ')));
        assert!(!handle_input(app, KeyCode::Enter));
        assert!(!handle_input(app, KeyCode::Enter));
        assert_eq!(app.state, AppState::Result);
        assert_eq!(app.calculate_score(), 2);
        assert!(handle_input(app, KeyCode::Char('q')));
    }

    #[test]
    fn test_quit_keys() {
        let mut quiz = quiz();
        let app = quiz.app_mut();
        handle_input(app, KeyCode::Enter);
        assert!(handle_input(app, KeyCode::Esc));

        for c in "aq".chars() {
            handle_input(app, KeyCode::Char(c));
        }
        handle_input(app, KeyCode::Enter);
        handle_input(app, KeyCode::Enter);
        assert!(!app.is_typing());
        assert!(handle_input(app, KeyCode::Char('q')));
    }

    #[test]
    fn test_arrow_keys_choose_blank_values() {
        let mut quiz = Quiz::demo();
        let app = quiz.app_mut();
        handle_input(app, KeyCode::Enter);

        // Pick the first option of both choice exercises.
        for _ in 0..2 {
            handle_input(app, KeyCode::Char(' '));
            handle_input(app, KeyCode::Enter);
            handle_input(app, KeyCode::Enter);
        }
        assert_eq!(app.current_question_number(), 3);

        handle_input(app, KeyCode::Char('l'));
        handle_input(app, KeyCode::Char('j'));
        for _ in 0..3 {
            handle_input(app, KeyCode::Left);
        }
        handle_input(app, KeyCode::Enter);

        assert_eq!(app.widget().unwrap().verdict(), Some(true));
        assert_eq!(app.verdicts()[..3], [Some(false), Some(false), Some(true)]);
    }
}
