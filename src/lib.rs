// Library interface for wordle-autopilot
// This allows integration tests to access internal modules

pub mod cli;
pub mod feedback;
pub mod game;
pub mod solver;
pub mod tui;
pub mod wordbank;

use thiserror::Error;

/// Word length for Wordle.
pub const WORD_LENGTH: usize = 5;

/// A game allows at most this many guesses.
pub const MAX_ROUNDS: usize = 6;

/// Errors surfaced by the solver core.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SolverError {
    /// An oracle reply that is not five symbols drawn from `0`/`1`/`2`.
    /// Recovered at the boundary by re-prompting; never escapes an oracle.
    #[error("invalid feedback {input:?}: expected 5 characters, each 0, 1, or 2")]
    InvalidFeedbackFormat { input: String },

    /// The recorded feedback eliminates every dictionary word. Fatal: the
    /// history is inconsistent or the dictionary is missing the secret.
    #[error("no candidate word satisfies the recorded feedback")]
    NoCandidateRemains,
}

// Re-export commonly used items for easier testing
pub use feedback::{Feedback, LetterState};
pub use game::{play, GameOutcome, Oracle};
pub use solver::{pick_first_guess, pick_next, FrequencyTable, GuessRecord};
pub use wordbank::{load_wordbank_from_file, load_wordbank_from_str};
