use log::info;

use crate::feedback::Feedback;
use crate::solver::{pick_first_guess, pick_next, FrequencyTable, GuessRecord};
use crate::{SolverError, MAX_ROUNDS};

/// Source of ground-truth feedback for a proposed guess. Implemented by the
/// console and TUI boundaries, and by scripted stand-ins in tests.
pub trait Oracle {
    /// Present `guess` for `round` (1-based) and collect the reply. The
    /// implementation re-solicits malformed input itself; `None` means the
    /// operator abandoned the session.
    fn feedback_for(&mut self, guess: &str, round: usize) -> Option<Feedback>;

    /// Report the terminal state of the run.
    fn notify_outcome(&mut self, outcome: &GameOutcome);
}

/// How a run ended. Winning is a normal terminal state, not an error, and
/// is distinct from running out of rounds or candidates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameOutcome {
    /// The oracle confirmed every position within six rounds.
    Won { word: String, rounds: usize },
    /// Six rounds elapsed without an all-correct reply.
    Exhausted { history: Vec<GuessRecord> },
    /// The operator quit before the game resolved.
    Aborted { rounds_played: usize },
}

/// Play one game: up to six rounds of propose, ask, record.
///
/// The round history is owned here and only lent to the selector. A
/// `NoCandidateRemains` failure from selection is surfaced to the caller;
/// it means the reported feedback contradicts itself or the dictionary
/// lacks the secret, and retrying cannot help.
pub fn play<O: Oracle>(
    dictionary: &[String],
    table: &FrequencyTable,
    oracle: &mut O,
) -> Result<GameOutcome, SolverError> {
    let mut history: Vec<GuessRecord> = Vec::with_capacity(MAX_ROUNDS);

    for round in 1..=MAX_ROUNDS {
        let guess = if history.is_empty() {
            pick_first_guess(dictionary, table)?
        } else {
            pick_next(dictionary, &history, table)?
        };
        info!("round {round}: proposing {guess}");

        let Some(feedback) = oracle.feedback_for(guess, round) else {
            let outcome = GameOutcome::Aborted {
                rounds_played: round - 1,
            };
            oracle.notify_outcome(&outcome);
            return Ok(outcome);
        };
        info!("round {round}: reply {feedback}");

        if feedback.is_win() {
            let outcome = GameOutcome::Won {
                word: guess.to_string(),
                rounds: round,
            };
            oracle.notify_outcome(&outcome);
            return Ok(outcome);
        }

        history.push(GuessRecord::new(guess, feedback));
    }

    let outcome = GameOutcome::Exhausted { history };
    oracle.notify_outcome(&outcome);
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dict(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    /// Oracle that scores every guess against a fixed secret.
    struct ScriptedOracle {
        secret: &'static str,
        outcomes: Vec<GameOutcome>,
    }

    impl ScriptedOracle {
        fn new(secret: &'static str) -> Self {
            Self {
                secret,
                outcomes: Vec::new(),
            }
        }
    }

    impl Oracle for ScriptedOracle {
        fn feedback_for(&mut self, guess: &str, _round: usize) -> Option<Feedback> {
            Some(Feedback::calculate(guess, self.secret))
        }

        fn notify_outcome(&mut self, outcome: &GameOutcome) {
            self.outcomes.push(outcome.clone());
        }
    }

    /// Oracle that immediately reports an abandoned session.
    struct QuittingOracle {
        notified: bool,
    }

    impl Oracle for QuittingOracle {
        fn feedback_for(&mut self, _guess: &str, _round: usize) -> Option<Feedback> {
            None
        }

        fn notify_outcome(&mut self, _outcome: &GameOutcome) {
            self.notified = true;
        }
    }

    #[test]
    fn test_play_wins_when_secret_is_reachable() {
        let words = dict(&["crane", "slate", "trace", "place"]);
        let table = FrequencyTable::build(&words);
        let mut oracle = ScriptedOracle::new("trace");

        let outcome = play(&words, &table, &mut oracle).unwrap();
        match &outcome {
            GameOutcome::Won { word, rounds } => {
                assert_eq!(word, "trace");
                assert!(*rounds <= MAX_ROUNDS);
            }
            other => panic!("expected a win, got {other:?}"),
        }
        assert_eq!(oracle.outcomes, vec![outcome]);
    }

    #[test]
    fn test_play_first_round_win() {
        let words = dict(&["crane"]);
        let table = FrequencyTable::build(&words);
        let mut oracle = ScriptedOracle::new("crane");

        let outcome = play(&words, &table, &mut oracle).unwrap();
        assert_eq!(
            outcome,
            GameOutcome::Won {
                word: "crane".to_string(),
                rounds: 1
            }
        );
    }

    #[test]
    fn test_play_exhausts_after_six_rounds() {
        // Ten words differing only in the first letter: every reply keeps
        // the rest alive, so the game runs the full six rounds.
        let words = dict(&[
            "bares", "cares", "dares", "fares", "hares", "mares", "nares", "pares",
            "tares", "wares",
        ]);
        let table = FrequencyTable::build(&words);

        struct NeverWins;
        impl Oracle for NeverWins {
            fn feedback_for(&mut self, _guess: &str, _round: usize) -> Option<Feedback> {
                Some(Feedback::parse("02222").unwrap())
            }
            fn notify_outcome(&mut self, _outcome: &GameOutcome) {}
        }

        let outcome = play(&words, &table, &mut NeverWins).unwrap();
        match outcome {
            GameOutcome::Exhausted { history } => {
                assert_eq!(history.len(), MAX_ROUNDS);
                // Each round guessed a different word.
                for (i, record) in history.iter().enumerate() {
                    for earlier in &history[..i] {
                        assert_ne!(record.word(), earlier.word());
                    }
                }
            }
            other => panic!("expected exhaustion, got {other:?}"),
        }
    }

    #[test]
    fn test_play_aborts_on_abandoned_session() {
        let words = dict(&["crane", "slate"]);
        let table = FrequencyTable::build(&words);
        let mut oracle = QuittingOracle { notified: false };

        let outcome = play(&words, &table, &mut oracle).unwrap();
        assert_eq!(outcome, GameOutcome::Aborted { rounds_played: 0 });
        assert!(oracle.notified);
    }

    #[test]
    fn test_play_surfaces_impossible_history() {
        let words = dict(&["crane", "slate"]);
        let table = FrequencyTable::build(&words);

        // All-miss replies for both words leave nothing to guess.
        struct AllMiss;
        impl Oracle for AllMiss {
            fn feedback_for(&mut self, _guess: &str, _round: usize) -> Option<Feedback> {
                Some(Feedback::parse("00000").unwrap())
            }
            fn notify_outcome(&mut self, _outcome: &GameOutcome) {}
        }

        assert_eq!(
            play(&words, &table, &mut AllMiss),
            Err(SolverError::NoCandidateRemains)
        );
    }
}
