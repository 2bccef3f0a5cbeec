mod demo;
mod loader;

pub use demo::demo_exercises;
pub use loader::{load_exercises_from_json, load_questions_from_json, LoadError};
