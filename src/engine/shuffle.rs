// src/engine/shuffle.rs

use std::sync::Mutex;

use rand::{SeedableRng, rngs::StdRng, seq::SliceRandom};

use crate::models::question::PublicQuestion;

/// Source of the order in which questions are served.
pub trait QuestionShuffler: Send + Sync {
    fn shuffle(&self, questions: &mut [PublicQuestion]);
}

/// Fresh random order on every call.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRngShuffler;

impl QuestionShuffler for ThreadRngShuffler {
    fn shuffle(&self, questions: &mut [PublicQuestion]) {
        questions.shuffle(&mut rand::thread_rng());
    }
}

/// Reproducible order from a fixed seed. Successive calls keep drawing from
/// the same generator.
pub struct SeededShuffler {
    rng: Mutex<StdRng>,
}

impl SeededShuffler {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl QuestionShuffler for SeededShuffler {
    fn shuffle(&self, questions: &mut [PublicQuestion]) {
        // A poisoned lock still holds a usable generator.
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        questions.shuffle(&mut *rng);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bank(n: i64) -> Vec<PublicQuestion> {
        (1..=n)
            .map(|id| PublicQuestion {
                id,
                question_text: format!("Question {}", id),
                options: ["a".into(), "b".into(), "c".into(), "d".into()],
            })
            .collect()
    }

    fn ids(questions: &[PublicQuestion]) -> Vec<i64> {
        questions.iter().map(|q| q.id).collect()
    }

    #[test]
    fn test_seeded_shuffler_is_reproducible() {
        let mut first = bank(20);
        let mut second = bank(20);
        SeededShuffler::new(42).shuffle(&mut first);
        SeededShuffler::new(42).shuffle(&mut second);
        assert_eq!(ids(&first), ids(&second));
    }

    #[test]
    fn test_shufflers_keep_every_question() {
        let mut seeded = bank(20);
        SeededShuffler::new(7).shuffle(&mut seeded);
        let mut random = bank(20);
        ThreadRngShuffler.shuffle(&mut random);

        for shuffled in [seeded, random] {
            let mut sorted = ids(&shuffled);
            sorted.sort();
            assert_eq!(sorted, (1..=20).collect::<Vec<_>>());
        }
    }
}
