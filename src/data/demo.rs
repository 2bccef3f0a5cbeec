use std::collections::{BTreeMap, BTreeSet};

use crate::models::{
    Blank, ChoiceOption, Exercise, FillInBlanks, MatchPairs, MultipleChoice, Pair, SingleChoice,
};

/// One exercise of every format, for trying the player without a file.
pub fn demo_exercises() -> Vec<Exercise> {
    vec![
        Exercise::Single(SingleChoice {
            title: "Question 1: Single Choice".to_string(),
            content: "<p>What is the capital of France?</p>".to_string(),
            options: vec![
                ChoiceOption::text("1", "London"),
                ChoiceOption::text("2", "Berlin"),
                ChoiceOption::text("3", "Paris"),
                ChoiceOption::text("4", "Madrid"),
            ],
            correct_answer: "3".to_string(),
        }),
        Exercise::Multiple(MultipleChoice {
            title: "Question 2: Multiple Choice".to_string(),
            content: "<p>Which of the following are programming languages?</p>".to_string(),
            options: vec![
                ChoiceOption::text("1", "Python"),
                ChoiceOption::text("2", "HTML"),
                ChoiceOption::text("3", "JavaScript"),
                ChoiceOption::text("4", "CSS"),
            ],
            correct_answers: BTreeSet::from(["1".to_string(), "3".to_string()]),
        }),
        Exercise::FillInBlanks(FillInBlanks {
            title: "Question 3: Fill in the Blanks".to_string(),
            content: "<p>Complete the sentence with the correct words.</p>".to_string(),
            blanks: vec![
                Blank {
                    id: "blank1".to_string(),
                    position: 0,
                },
                Blank {
                    id: "blank2".to_string(),
                    position: 1,
                },
            ],
            options: ["React", "Angular", "Vue", "Next.js", "TypeScript", "JavaScript"]
                .map(String::from)
                .to_vec(),
            correct_answers: BTreeMap::from([
                ("blank1".to_string(), "React".to_string()),
                ("blank2".to_string(), "Next.js".to_string()),
            ]),
        }),
        Exercise::MatchPairs(MatchPairs {
            title: "Question 4: Match Pairs".to_string(),
            content: "<p>Match each programming language with its primary use case.</p>".to_string(),
            pairs: vec![
                Pair::new("Python", "Data Science"),
                Pair::new("JavaScript", "Web Development"),
                Pair::new("Swift", "iOS Development"),
                Pair::new("SQL", "Database Queries"),
            ],
        }),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_exercises_are_valid() {
        let exercises = demo_exercises();
        let labels: Vec<&str> = exercises.iter().map(Exercise::label).collect();
        assert_eq!(
            labels,
            vec!["Single Choice", "Multiple Choice", "Fill in the Blanks", "Match Pairs"]
        );
        for exercise in &exercises {
            assert_eq!(exercise.validate(), Ok(()));
        }
    }
}
