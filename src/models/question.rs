// src/models/question.rs

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use validator::Validate;

/// One of the four option slots of a question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OptionLabel {
    A,
    B,
    C,
    D,
}

impl OptionLabel {
    pub const ALL: [OptionLabel; 4] = [OptionLabel::A, OptionLabel::B, OptionLabel::C, OptionLabel::D];

    pub fn as_str(self) -> &'static str {
        match self {
            OptionLabel::A => "A",
            OptionLabel::B => "B",
            OptionLabel::C => "C",
            OptionLabel::D => "D",
        }
    }

    /// Position of this label in a question's option array.
    pub fn index(self) -> usize {
        match self {
            OptionLabel::A => 0,
            OptionLabel::B => 1,
            OptionLabel::C => 2,
            OptionLabel::D => 3,
        }
    }
}

impl fmt::Display for OptionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid option '{0}', expected one of A, B, C, D")]
pub struct InvalidOptionLabel(pub String);

/// Parses a label, ignoring surrounding whitespace and case.
impl FromStr for OptionLabel {
    type Err = InvalidOptionLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "A" => Ok(OptionLabel::A),
            "B" => Ok(OptionLabel::B),
            "C" => Ok(OptionLabel::C),
            "D" => Ok(OptionLabel::D),
            _ => Err(InvalidOptionLabel(s.to_string())),
        }
    }
}

/// A question from the bank, including its answer key.
///
/// Deliberately not `Serialize`: anything sent to a test-taker goes through
/// [`PublicQuestion`].
#[derive(Debug, Clone, PartialEq)]
pub struct Question {
    pub id: i64,
    pub question_text: String,
    /// Option texts in label order (A, B, C, D).
    pub options: [String; 4],
    pub correct_answer: OptionLabel,
}

impl Question {
    pub fn option(&self, label: OptionLabel) -> &str {
        &self.options[label.index()]
    }

    pub fn is_correct(&self, selected: OptionLabel) -> bool {
        self.correct_answer == selected
    }
}

/// DTO for serving a question to a test-taker (no answer key).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublicQuestion {
    pub id: i64,
    pub question_text: String,
    pub options: [String; 4],
}

impl From<Question> for PublicQuestion {
    fn from(q: Question) -> Self {
        PublicQuestion {
            id: q.id,
            question_text: q.question_text,
            options: q.options,
        }
    }
}

/// A validated question ready to be written to the bank.
#[derive(Debug, Clone, PartialEq)]
pub struct NewQuestion {
    pub question_text: String,
    pub options: [String; 4],
    pub correct_answer: OptionLabel,
}

/// DTO for one row of a question-bank import.
/// Field names follow the columns of the tabular bank format.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ImportQuestionRequest {
    #[validate(length(min = 1, max = 1000), custom(function = validate_not_blank))]
    pub question_text: String,
    #[validate(length(min = 1, max = 500), custom(function = validate_not_blank))]
    pub option_a: String,
    #[validate(length(min = 1, max = 500), custom(function = validate_not_blank))]
    pub option_b: String,
    #[validate(length(min = 1, max = 500), custom(function = validate_not_blank))]
    pub option_c: String,
    #[validate(length(min = 1, max = 500), custom(function = validate_not_blank))]
    pub option_d: String,
    #[validate(custom(function = validate_option_label))]
    pub correct_answer: String,
}

impl TryFrom<ImportQuestionRequest> for NewQuestion {
    type Error = InvalidOptionLabel;

    fn try_from(req: ImportQuestionRequest) -> Result<Self, Self::Error> {
        let correct_answer = req.correct_answer.parse()?;
        Ok(NewQuestion {
            question_text: req.question_text,
            options: [req.option_a, req.option_b, req.option_c, req.option_d],
            correct_answer,
        })
    }
}

fn validate_not_blank(value: &str) -> Result<(), validator::ValidationError> {
    if value.trim().is_empty() {
        return Err(validator::ValidationError::new("must_not_be_blank"));
    }
    Ok(())
}

fn validate_option_label(value: &str) -> Result<(), validator::ValidationError> {
    if value.parse::<OptionLabel>().is_err() {
        return Err(validator::ValidationError::new("invalid_option_label"));
    }
    Ok(())
}
