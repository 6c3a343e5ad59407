//! On-disk persistence of the best score

pub mod high_score;

pub use high_score::{HighScoreStore, DEFAULT_HIGH_SCORE_FILE};
