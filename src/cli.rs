//! Command parser and executor.
//!
//! Each subcommand maps onto one quiz collection action: listing the
//! acting user's quizzes, creating and deleting them, and editing their
//! question lists.

use std::collections::BTreeSet;
use std::fmt::Write as _;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use uuid::Uuid;

use crate::chart::{ChartStyle, LineChart};
use crate::config::Config;
use crate::editor::{QuestionDraft, QuestionEdit, QuizEditor};
use crate::models::{NewQuiz, Question, QuestionId, QuizRecord};
use crate::store::{JsonFileStore, QuizStore};
use crate::{Quiz, QuizError};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub config: Config,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Command {
    /// List your quizzes
    List,
    /// Create an empty quiz
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: String,
    },
    /// Print a quiz with its questions and answers
    Show { id: Uuid },
    /// Change the title or description of a quiz
    Rename {
        id: Uuid,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },
    /// Delete a quiz
    Delete {
        id: Uuid,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Add a question to a quiz
    AddQuestion(AddQuestionArgs),
    /// Remove a question from a quiz
    RemoveQuestion {
        id: Uuid,
        /// Id of the question to remove
        question: String,
        #[arg(short, long)]
        yes: bool,
    },
    /// Change fields of an existing question
    EditQuestion(EditQuestionArgs),
    /// Answer a stored quiz, a question or exercise file, or the demo set
    Play(PlayArgs),
    /// Render a series of values as an SVG line chart
    Chart {
        /// Comma separated values
        #[arg(required = true, value_delimiter = ',', allow_negative_numbers = true)]
        values: Vec<f64>,
        #[arg(long, default_value = "black")]
        stroke: String,
        #[arg(long, default_value = "white")]
        background: String,
        /// Write the SVG here instead of stdout
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    Text,
    Single,
    Multiple,
    #[value(name = "truefalse", alias = "true-false")]
    TrueFalse,
}

#[derive(Args, Debug, PartialEq)]
pub struct AddQuestionArgs {
    /// Quiz to add the question to
    pub id: Uuid,
    #[arg(short, long, value_enum)]
    pub kind: KindArg,
    /// The prompt shown to the player
    #[arg(short, long)]
    pub question: String,
    /// Reference answer of a text question
    #[arg(long)]
    pub answer: Option<String>,
    /// Option text, repeat for each option slot
    #[arg(short, long = "option")]
    pub options: Vec<String>,
    /// 1-based slot of a correct option, repeat for multiple choice
    #[arg(short, long)]
    pub correct: Vec<usize>,
    /// Answer of a true/false question
    #[arg(long)]
    pub truth: Option<bool>,
}

#[derive(Args, Debug, PartialEq)]
pub struct EditQuestionArgs {
    /// Quiz holding the question
    pub id: Uuid,
    /// Id of the question to change
    pub question: String,
    /// New prompt
    #[arg(long)]
    pub prompt: Option<String>,
    /// New reference answer of a text question
    #[arg(long)]
    pub answer: Option<String>,
    /// Replace an option's text, as SLOT=TEXT with 1-based slots
    #[arg(long = "option-text", value_parser = parse_option_text)]
    pub option_text: Vec<(usize, String)>,
    /// New correct option of a single choice question (1-based)
    #[arg(long)]
    pub correct: Option<usize>,
    /// Flip whether an option of a multiple choice question is correct
    #[arg(long)]
    pub toggle: Vec<usize>,
    /// New answer of a true/false question
    #[arg(long)]
    pub truth: Option<bool>,
}

impl EditQuestionArgs {
    /// The requested changes, in the order they are applied.
    pub fn edits(&self) -> Result<Vec<QuestionEdit>, QuizError> {
        let mut edits = Vec::new();
        if let Some(prompt) = &self.prompt {
            edits.push(QuestionEdit::Prompt(prompt.clone()));
        }
        if let Some(answer) = &self.answer {
            edits.push(QuestionEdit::Answer(answer.clone()));
        }
        for (slot, text) in &self.option_text {
            edits.push(QuestionEdit::OptionText {
                index: slot_index(*slot)?,
                text: text.clone(),
            });
        }
        if let Some(slot) = self.correct {
            edits.push(QuestionEdit::CorrectOption(slot_index(slot)?));
        }
        for slot in &self.toggle {
            edits.push(QuestionEdit::ToggleCorrect(slot_index(*slot)?));
        }
        if let Some(truth) = self.truth {
            edits.push(QuestionEdit::TrueFalse(truth));
        }

        if edits.is_empty() {
            return Err(usage("nothing to change"));
        }
        Ok(edits)
    }
}

/// Where the questions to play come from. Exactly one is required.
#[derive(Args, Debug, PartialEq)]
#[group(required = true, multiple = false)]
pub struct PlayArgs {
    /// Stored quiz to play
    pub id: Option<Uuid>,
    /// JSON file of questions
    #[arg(short, long)]
    pub questions: Option<PathBuf>,
    /// JSON file of exercises (single, multiple, fillInBlanks, matchPairs)
    #[arg(short, long)]
    pub exercises: Option<PathBuf>,
    /// Play the built-in exercise set
    #[arg(long)]
    pub demo: bool,
}

impl AddQuestionArgs {
    pub fn into_draft(self) -> Result<QuestionDraft, QuizError> {
        let question = self.question;
        match self.kind {
            KindArg::Text => {
                let answer = self
                    .answer
                    .filter(|answer| !answer.is_empty())
                    .ok_or_else(|| usage("a text question needs --answer"))?;
                Ok(QuestionDraft::Text { question, answer })
            }
            KindArg::Single => {
                let [slot] = self.correct.as_slice() else {
                    return Err(usage("a single choice question needs exactly one --correct"));
                };
                Ok(QuestionDraft::Single {
                    question,
                    options: self.options,
                    correct: slot_index(*slot)?,
                })
            }
            KindArg::Multiple => {
                let correct = self
                    .correct
                    .iter()
                    .map(|slot| slot_index(*slot))
                    .collect::<Result<BTreeSet<_>, _>>()?;
                if correct.is_empty() {
                    return Err(usage("a multiple choice question needs at least one --correct"));
                }
                if let Some(slot) = correct.iter().find(|slot| **slot >= self.options.len()) {
                    return Err(usage(format!("--correct {} has no matching --option", slot + 1)));
                }
                let options = self
                    .options
                    .into_iter()
                    .enumerate()
                    .map(|(index, option)| (option, correct.contains(&index)))
                    .collect();
                Ok(QuestionDraft::Multiple { question, options })
            }
            KindArg::TrueFalse => {
                let correct = self
                    .truth
                    .ok_or_else(|| usage("a true/false question needs --truth"))?;
                Ok(QuestionDraft::TrueFalse { question, correct })
            }
        }
    }
}

/// Execute a parsed command line against the configured store.
pub async fn run(cli: Cli) -> Result<(), QuizError> {
    let Cli { config, command } = cli;
    let store = config.open_store();

    match command {
        Command::List => {
            let quizzes = store.list(&config.user).await?;
            print!("{}", render_list(&quizzes));
        }
        Command::Create { title, description } => {
            let record = store
                .create(&config.user, NewQuiz { title, description })
                .await?;
            println!("Created quiz {}", record.id);
        }
        Command::Show { id } => {
            let record = owned_quiz(&store, &config, id).await?;
            print!("{}", render_quiz(&record));
        }
        Command::Rename {
            id,
            title,
            description,
        } => {
            if title.is_none() && description.is_none() {
                return Err(usage("nothing to change, pass --title or --description"));
            }
            let mut editor = QuizEditor::new(owned_quiz(&store, &config, id).await?);
            if let Some(title) = title {
                editor.set_title(&title);
            }
            if let Some(description) = description {
                editor.set_description(&description);
            }
            store.update(&editor.finish()).await?;
            println!("Updated quiz {}", id);
        }
        Command::Delete { id, yes } => {
            let record = owned_quiz(&store, &config, id).await?;
            let prompt = format!("Delete quiz \"{}\"?", record.title);
            if !yes && !confirm(&prompt)? {
                println!("Cancelled.");
                return Ok(());
            }
            store.delete(id).await?;
            println!("Deleted quiz {}", id);
        }
        Command::AddQuestion(args) => {
            let id = args.id;
            let draft = args.into_draft()?;
            let mut editor = QuizEditor::new(owned_quiz(&store, &config, id).await?);
            let question_id = editor.add_question(draft)?.id().clone();
            store.update(&editor.finish()).await?;
            println!("Added question {}", question_id);
        }
        Command::RemoveQuestion { id, question, yes } => {
            let mut editor = QuizEditor::new(owned_quiz(&store, &config, id).await?);
            let question_id = QuestionId::from(question.as_str());
            let prompt = format!("Delete question {}?", question_id);
            if !yes && !confirm(&prompt)? {
                println!("Cancelled.");
                return Ok(());
            }
            editor.delete_question(&question_id)?;
            store.update(&editor.finish()).await?;
            println!("Removed question {}", question_id);
        }
        Command::EditQuestion(args) => {
            let edits = args.edits()?;
            let mut editor = QuizEditor::new(owned_quiz(&store, &config, args.id).await?);
            let question_id = QuestionId::from(args.question.as_str());
            for edit in edits {
                editor.edit_question(&question_id, edit)?;
            }
            store.update(&editor.finish()).await?;
            println!("Updated question {}", question_id);
        }
        Command::Play(PlayArgs {
            id,
            questions,
            exercises,
            demo,
        }) => {
            let quiz = if let Some(path) = questions {
                Quiz::from_json(path)?
            } else if let Some(path) = exercises {
                Quiz::from_exercises_json(path)?
            } else if demo {
                Quiz::demo()
            } else if let Some(id) = id {
                Quiz::from_record(owned_quiz(&store, &config, id).await?)
            } else {
                return Err(usage("pass a quiz id, --questions, --exercises or --demo"));
            };
            quiz.run()?;
        }
        Command::Chart {
            values,
            stroke,
            background,
            out,
        } => {
            let svg = LineChart::default().render_svg(&values, &ChartStyle { stroke, background });
            match out {
                Some(path) => tokio::fs::write(&path, svg).await?,
                None => println!("{}", svg),
            }
        }
    }

    Ok(())
}

/// Fetch a quiz, refusing quizzes of other users.
async fn owned_quiz(store: &JsonFileStore, config: &Config, id: Uuid) -> Result<QuizRecord, QuizError> {
    let record = store.get(id).await?;
    if record.user_id != config.user {
        return Err(QuizError::NotOwner(id));
    }
    Ok(record)
}

fn confirm(prompt: &str) -> io::Result<bool> {
    confirm_from(&mut io::stdin().lock(), &mut io::stdout(), prompt)
}

fn confirm_from<R: BufRead, W: Write>(input: &mut R, output: &mut W, prompt: &str) -> io::Result<bool> {
    write!(output, "{} [y/N] ", prompt)?;
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(matches!(line.trim().to_lowercase().as_str(), "y" | "yes"))
}

fn render_list(quizzes: &[QuizRecord]) -> String {
    if quizzes.is_empty() {
        return "No quizzes yet.\n".to_string();
    }

    let mut out = String::new();
    for quiz in quizzes {
        let _ = writeln!(
            out,
            "{}  {}  {}  ({} questions)",
            quiz.id,
            quiz.created_at.format("%Y-%m-%d"),
            quiz.title,
            quiz.question_count()
        );
        let _ = writeln!(out, "    {}", quiz.description);
    }
    out
}

fn render_quiz(quiz: &QuizRecord) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", quiz.title);
    let _ = writeln!(out, "{}", quiz.description);
    let _ = writeln!(out, "Created {}", quiz.created_at.format("%Y-%m-%d"));

    for (number, question) in quiz.questions.iter().enumerate() {
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "{}. [{}] {}  (id {})",
            number + 1,
            question.kind().label(),
            question.prompt(),
            question.id()
        );
        match question {
            Question::Text { answer, .. } => {
                let _ = writeln!(out, "   Answer: {}", answer);
            }
            Question::Single {
                options,
                correct_answer,
                ..
            } => render_options(&mut out, options, |index| index == *correct_answer),
            Question::Multiple {
                options,
                correct_answers,
                ..
            } => render_options(&mut out, options, |index| correct_answers.contains(&index)),
            Question::TrueFalse { correct_answer, .. } => {
                let _ = writeln!(out, "   Answer: {}", if *correct_answer { "True" } else { "False" });
            }
        }
    }
    out
}

fn render_options(out: &mut String, options: &[String], is_correct: impl Fn(usize) -> bool) {
    for (index, option) in options.iter().enumerate() {
        let marker = if is_correct(index) { '*' } else { ' ' };
        let _ = writeln!(out, "  {}{}. {}", marker, index + 1, option);
    }
}

fn parse_option_text(value: &str) -> Result<(usize, String), String> {
    let (slot, text) = value
        .split_once('=')
        .ok_or_else(|| format!("expected SLOT=TEXT, got {:?}", value))?;
    let slot = slot
        .trim()
        .parse()
        .map_err(|_| format!("{:?} is not an option slot", slot))?;
    Ok((slot, text.to_string()))
}

fn slot_index(slot: usize) -> Result<usize, QuizError> {
    slot.checked_sub(1)
        .ok_or_else(|| usage("option slots are numbered from 1"))
}

fn usage(message: impl Into<String>) -> QuizError {
    QuizError::Usage(message.into())
}
