//! Dark-chess (banqi) variant: a 4x8 board where every piece starts
//! face-down and flipping is itself an action. Shares the piece kinds and
//! the negamax skeleton with the main engine; flip actions become
//! expectimax chance nodes over the hidden pool.

pub mod board;
pub mod eval;
pub mod movegen;
#[allow(clippy::module_inception)]
pub mod search;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DarkDifficulty {
    Beginner,
    Easy,
    Medium,
    Hard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DarkSearchConfig {
    pub depth: i32,
    pub quiescence_depth: i32,
    /// `Some(n)`: replace flip-node enumeration with `n` Monte-Carlo draws
    /// (with replacement) from the hidden pool.
    pub mc_samples: Option<u32>,
}

impl DarkDifficulty {
    pub fn config(self) -> DarkSearchConfig {
        match self {
            DarkDifficulty::Beginner => DarkSearchConfig {
                depth: 2,
                quiescence_depth: 2,
                mc_samples: None,
            },
            DarkDifficulty::Easy => DarkSearchConfig {
                depth: 3,
                quiescence_depth: 3,
                mc_samples: None,
            },
            DarkDifficulty::Medium => DarkSearchConfig {
                depth: 4,
                quiescence_depth: 4,
                mc_samples: None,
            },
            DarkDifficulty::Hard => DarkSearchConfig {
                depth: 5,
                quiescence_depth: 4,
                mc_samples: Some(32),
            },
        }
    }
}
