//! Shared application services, passed explicitly instead of looked up
//! through globals
//!
//! Every operation that needs the module RNG or the chat channel takes a
//! `&mut GameContext`. One context is built at application scope and threaded
//! through the event loop.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Sink for chat-visible report lines
pub trait Reporter {
    fn send(&mut self, text: &str);
}

/// Reporter that keeps every line in memory; used by tests and headless runs
#[derive(Debug, Default)]
pub struct ChatLog {
    pub lines: Vec<String>,
}

impl ChatLog {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Reporter for ChatLog {
    fn send(&mut self, text: &str) {
        self.lines.push(text.to_string());
    }
}

/// Reporter that forwards lines to the tracing subscriber
#[derive(Debug, Default)]
pub struct LogReporter;

impl Reporter for LogReporter {
    fn send(&mut self, text: &str) {
        tracing::info!(target: "chat", "{}", text);
    }
}

pub struct GameContext {
    pub rng: ChaCha8Rng,
    pub reporter: Box<dyn Reporter>,
}

impl GameContext {
    pub fn new(reporter: Box<dyn Reporter>) -> Self {
        Self {
            rng: ChaCha8Rng::from_entropy(),
            reporter,
        }
    }

    /// Deterministic context for replays and tests
    pub fn with_seed(seed: u64, reporter: Box<dyn Reporter>) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            reporter,
        }
    }

    /// Roll one local die, 1..=sides. Local dice serve collaborators outside
    /// the internet roll path (manual dice buttons, shuffles).
    pub fn roll_die(&mut self, sides: u32) -> u32 {
        self.rng.gen_range(1..=sides.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_rolls_are_deterministic() {
        let mut a = GameContext::with_seed(7, Box::new(ChatLog::new()));
        let mut b = GameContext::with_seed(7, Box::new(ChatLog::new()));
        let rolls_a: Vec<u32> = (0..10).map(|_| a.roll_die(6)).collect();
        let rolls_b: Vec<u32> = (0..10).map(|_| b.roll_die(6)).collect();
        assert_eq!(rolls_a, rolls_b);
        assert!(rolls_a.iter().all(|&r| (1..=6).contains(&r)));
    }

    #[test]
    fn test_chat_log_records_lines() {
        let mut log = ChatLog::new();
        log.send("* roll = 9");
        assert_eq!(log.lines, vec!["* roll = 9"]);
    }
}
