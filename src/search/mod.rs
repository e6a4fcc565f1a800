pub mod context;
pub mod eval;
pub mod ordering;
pub mod psqt;
#[allow(clippy::module_inception)]
pub mod search;
pub mod tt;

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Difficulty labels exposed to callers; each maps to a fixed parameter
/// set. No other configuration reaches the core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Beginner,
    Easy,
    Medium,
    Hard,
    Master,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    pub depth: i32,
    pub quiescence_depth: i32,
    /// Uniform eval jitter half-width; zero above easy.
    pub randomness: i32,
    pub time_budget: Duration,
}

impl Difficulty {
    pub fn config(self) -> SearchConfig {
        match self {
            Difficulty::Beginner => SearchConfig {
                depth: 3,
                quiescence_depth: 2,
                randomness: 150,
                time_budget: Duration::from_secs(1),
            },
            Difficulty::Easy => SearchConfig {
                depth: 4,
                quiescence_depth: 3,
                randomness: 30,
                time_budget: Duration::from_secs(2),
            },
            Difficulty::Medium => SearchConfig {
                depth: 5,
                quiescence_depth: 4,
                randomness: 0,
                time_budget: Duration::from_secs(3),
            },
            Difficulty::Hard => SearchConfig {
                depth: 6,
                quiescence_depth: 5,
                randomness: 0,
                time_budget: Duration::from_secs(5),
            },
            Difficulty::Master => SearchConfig {
                depth: 8,
                quiescence_depth: 6,
                randomness: 0,
                time_budget: Duration::from_secs(10),
            },
        }
    }
}
