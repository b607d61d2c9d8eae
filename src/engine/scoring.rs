// src/engine/scoring.rs

use crate::models::response::ResponseRecord;

/// Totals for one session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Score {
    pub total_score: f64,
    pub correct_count: i64,
    pub incorrect_count: i64,
}

/// Negative-marking score over the stored responses of a session.
///
/// `correct * correct_marks - incorrect * negative_marks`, no floor and no
/// rounding. Unanswered questions have no record and count for nothing.
pub fn calculate_score(responses: &[ResponseRecord], correct_marks: f64, negative_marks: f64) -> Score {
    let correct_count = responses.iter().filter(|r| r.is_correct).count() as i64;
    let incorrect_count = responses.len() as i64 - correct_count;

    let total_score = correct_count as f64 * correct_marks - incorrect_count as f64 * negative_marks;

    Score {
        total_score,
        correct_count,
        incorrect_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::question::OptionLabel;
    use chrono::Utc;

    fn responses(flags: &[bool]) -> Vec<ResponseRecord> {
        flags
            .iter()
            .enumerate()
            .map(|(i, &is_correct)| ResponseRecord {
                id: i as i64 + 1,
                session_id: 1,
                question_id: i as i64 + 1,
                selected_answer: OptionLabel::A,
                is_correct,
                answered_at: Utc::now(),
            })
            .collect()
    }

    #[test]
    fn test_calculate_score_empty() {
        let score = calculate_score(&[], 4.0, 1.0);
        assert_eq!(score.total_score, 0.0);
        assert_eq!(score.correct_count, 0);
        assert_eq!(score.incorrect_count, 0);
    }

    #[test]
    fn test_calculate_score_mixed() {
        let score = calculate_score(&responses(&[true, true, false]), 2.0, 0.5);
        assert_eq!(score.correct_count, 2);
        assert_eq!(score.incorrect_count, 1);
        assert_eq!(score.total_score, 3.5);
    }

    #[test]
    fn test_calculate_score_can_go_negative() {
        let score = calculate_score(&responses(&[false, false, true]), 1.0, 1.0);
        assert_eq!(score.total_score, -1.0);
    }

    #[test]
    fn test_calculate_score_no_truncation() {
        let score = calculate_score(&responses(&[true, false]), 1.25, 0.33);
        assert!((score.total_score - 0.92).abs() < 1e-12);
    }

    #[test]
    fn test_calculate_score_zero_penalty() {
        let score = calculate_score(&responses(&[false, false]), 3.0, 0.0);
        assert_eq!(score.total_score, 0.0);
        assert_eq!(score.incorrect_count, 2);
    }
}
