mod exercise;
mod question;
mod quiz;

pub use exercise::{
    Blank, ChoiceOption, Exercise, ExerciseError, FillInBlanks, MatchPairs, MultipleChoice, Pair,
    SingleChoice,
};
pub use question::{Question, QuestionError, QuestionId, QuestionKind, MAX_OPTIONS, MIN_OPTIONS};
pub use quiz::{NewQuiz, QuizRecord};

/// One step of a play session: an authored question or an exercise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Playable {
    Question(Question),
    Exercise(Exercise),
}

impl Playable {
    /// Short text identifying the step in listings.
    pub fn prompt(&self) -> &str {
        match self {
            Self::Question(question) => question.prompt(),
            Self::Exercise(exercise) => exercise.title(),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Question(question) => question.kind().label(),
            Self::Exercise(exercise) => exercise.label(),
        }
    }
}

impl From<Question> for Playable {
    fn from(question: Question) -> Self {
        Self::Question(question)
    }
}

impl From<Exercise> for Playable {
    fn from(exercise: Exercise) -> Self {
        Self::Exercise(exercise)
    }
}

/// Screen the terminal player is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Welcome,
    Quiz,
    Result,
}
