//! Random tokens for generated file names.
//!
//! Tokens only need to be unlikely to collide inside one upload directory;
//! they are not a security boundary.

use std::collections::VecDeque;
use std::sync::Mutex;

use rand::distr::Alphanumeric;
use rand::Rng;

/// Length of the token used for renamed uploads.
pub const RANDOM_TOKEN_LENGTH: usize = 25;

/// Source of alphanumeric tokens.
pub trait Randomizer: Send + Sync {
    /// Return a token of exactly `len` ASCII alphanumeric characters.
    fn token(&self, len: usize) -> String;
}

/// Thread-local RNG backed randomizer.
#[derive(Clone, Copy, Debug, Default)]
pub struct ThreadRandomizer;

impl Randomizer for ThreadRandomizer {
    fn token(&self, len: usize) -> String {
        rand::rng()
            .sample_iter(&Alphanumeric)
            .take(len)
            .map(char::from)
            .collect()
    }
}

/// Replays a fixed sequence of tokens, for deterministic callers and tests.
///
/// Each token is cut or right-padded with `'0'` to the requested length.
/// Once the sequence is exhausted it starts over.
#[derive(Debug)]
pub struct FixedRandomizer {
    tokens: Vec<String>,
    queue: Mutex<VecDeque<String>>,
}

impl FixedRandomizer {
    pub fn new<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let tokens: Vec<String> = tokens
            .into_iter()
            .map(|t| {
                let t: String = t.into();
                t.chars().filter(char::is_ascii_alphanumeric).collect::<String>()
            })
            .collect();
        Self {
            queue: Mutex::new(tokens.iter().cloned().collect()),
            tokens,
        }
    }
}

impl Randomizer for FixedRandomizer {
    fn token(&self, len: usize) -> String {
        let next = {
            let mut queue = match self.queue.lock() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
            if queue.is_empty() {
                queue.extend(self.tokens.iter().cloned());
            }
            queue.pop_front().unwrap_or_default()
        };

        let mut token: String = next.chars().take(len).collect();
        while token.len() < len {
            token.push('0');
        }
        token
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thread_randomizer_length_and_alphabet() {
        let randomizer = ThreadRandomizer;
        for len in [0, 1, 10, RANDOM_TOKEN_LENGTH, 100] {
            let token = randomizer.token(len);
            assert_eq!(token.len(), len);
            assert!(token.chars().all(|c| c.is_ascii_alphanumeric()));
        }
    }

    #[test]
    fn test_thread_randomizer_successive_tokens_differ() {
        let randomizer = ThreadRandomizer;
        let a = randomizer.token(RANDOM_TOKEN_LENGTH);
        let b = randomizer.token(RANDOM_TOKEN_LENGTH);
        assert_ne!(a, b);
    }

    #[test]
    fn test_fixed_randomizer_replays_in_order() {
        let randomizer = FixedRandomizer::new(["alpha", "beta"]);
        assert_eq!(randomizer.token(5), "alpha");
        assert_eq!(randomizer.token(4), "beta");
        assert_eq!(randomizer.token(5), "alpha");
    }

    #[test]
    fn test_fixed_randomizer_fits_length() {
        let randomizer = FixedRandomizer::new(["abc-def"]);
        assert_eq!(randomizer.token(3), "abc");
        assert_eq!(randomizer.token(8), "abcdef00");
    }

    #[test]
    fn test_fixed_randomizer_empty_sequence() {
        let randomizer = FixedRandomizer::new(Vec::<String>::new());
        assert_eq!(randomizer.token(4), "0000");
    }
}
