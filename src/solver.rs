use itertools::Itertools;
use log::debug;

use crate::feedback::{Feedback, LetterState};
use crate::{SolverError, WORD_LENGTH};

const ALPHABET: usize = 26;

/// Per-position letter counts over the full dictionary. Built once at
/// startup and never updated; selection always scores against the whole
/// word bank, not the shrinking candidate pool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: [[u32; ALPHABET]; WORD_LENGTH],
}

impl FrequencyTable {
    /// Count how many dictionary words place each letter at each position.
    pub fn build(dictionary: &[String]) -> Self {
        let mut counts = [[0u32; ALPHABET]; WORD_LENGTH];
        for word in dictionary {
            for (i, letter) in word.bytes().enumerate() {
                counts[i][(letter - b'a') as usize] += 1;
            }
        }
        Self { counts }
    }

    /// Number of dictionary words with `letter` at `position`. Zero for a
    /// letter never observed there; absence is valid, not an error.
    pub fn score(&self, position: usize, letter: u8) -> u32 {
        self.counts[position][(letter - b'a') as usize]
    }
}

/// One completed round: the guessed word and the oracle's reply. Created
/// after the oracle responds and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuessRecord {
    word: String,
    feedback: Feedback,
}

impl GuessRecord {
    pub fn new(word: impl Into<String>, feedback: Feedback) -> Self {
        Self {
            word: word.into(),
            feedback,
        }
    }

    pub fn word(&self) -> &str {
        &self.word
    }

    pub fn feedback(&self) -> &Feedback {
        &self.feedback
    }

    /// Whether `candidate` could still be the secret given this round's
    /// reply. Each position of the guess imposes its own constraint; one
    /// violation rejects the candidate.
    pub fn permits(&self, candidate: &str) -> bool {
        let guess = self.word.as_bytes();
        let cand = candidate.as_bytes();
        debug_assert_eq!(cand.len(), WORD_LENGTH);

        for i in 0..WORD_LENGTH {
            let letter = guess[i];
            match self.feedback.state(i) {
                // A confirmed letter must reappear in the same slot.
                LetterState::Correct => {
                    if cand[i] != letter {
                        return false;
                    }
                }
                // A misplaced letter must occur somewhere, but not here.
                LetterState::Present => {
                    if cand[i] == letter || !cand.contains(&letter) {
                        return false;
                    }
                }
                // A Miss caps the letter's multiplicity: the secret holds
                // exactly as many copies as the reply marked non-Miss, so
                // any other count rejects. A copy absorbed by a Correct
                // slot elsewhere is not an excess occurrence.
                LetterState::Miss => {
                    let marked = (0..WORD_LENGTH)
                        .filter(|&j| guess[j] == letter)
                        .filter(|&j| self.feedback.state(j) != LetterState::Miss)
                        .count();
                    let held = cand.iter().filter(|&&c| c == letter).count();
                    if held != marked {
                        return false;
                    }
                }
            }
        }
        true
    }
}

/// Positions still unresolved after the most recent round. A slot counts as
/// known only when the last reply marked it Correct; Correct marks from
/// earlier rounds are deliberately not unioned in, matching the original
/// heuristic.
fn unknown_positions(history: &[GuessRecord]) -> [bool; WORD_LENGTH] {
    let mut unknown = [true; WORD_LENGTH];
    if let Some(last) = history.last() {
        for (i, slot) in unknown.iter_mut().enumerate() {
            if last.feedback.state(i) == LetterState::Correct {
                *slot = false;
            }
        }
    }
    unknown
}

/// Sum of positional letter frequencies over the still-unknown slots.
/// Locked-in positions are excluded so an already-confirmed letter earns
/// nothing.
fn positional_score(word: &str, unknown: &[bool; WORD_LENGTH], table: &FrequencyTable) -> u32 {
    word.bytes()
        .enumerate()
        .filter(|&(i, _)| unknown[i])
        .map(|(i, letter)| table.score(i, letter))
        .sum()
}

/// Shared selection rule: drop already-guessed words, keep only candidates
/// every record permits, take the best positional score. Ties go to the
/// earliest word in dictionary order, which keeps selection reproducible.
fn select<'a, F>(
    dictionary: &'a [String],
    history: &[GuessRecord],
    table: &FrequencyTable,
    keep: F,
) -> Option<&'a str>
where
    F: Fn(&str) -> bool,
{
    let unknown = unknown_positions(history);
    let mut best: Option<(&str, u32)> = None;
    let mut pool = 0usize;

    for word in dictionary {
        if history.iter().any(|record| record.word() == word) {
            continue;
        }
        if !keep(word) {
            continue;
        }
        if !history.iter().all(|record| record.permits(word)) {
            continue;
        }
        pool += 1;
        let score = positional_score(word, &unknown, table);
        match best {
            Some((_, top)) if score <= top => {}
            _ => best = Some((word, score)),
        }
    }

    if let Some((word, score)) = best {
        debug!("selected {word} (score {score}) from a pool of {pool}");
    }
    best.map(|(word, _)| word)
}

/// Opening guess: restricted to words with five distinct letters so the
/// first reply touches as many letters as possible.
///
/// # Errors
/// `NoCandidateRemains` if the dictionary is empty. A dictionary with no
/// distinct-letter word falls back to the unrestricted pool instead of
/// failing; the restriction is a heuristic, not a constraint.
pub fn pick_first_guess<'a>(
    dictionary: &'a [String],
    table: &FrequencyTable,
) -> Result<&'a str, SolverError> {
    if let Some(word) = select(dictionary, &[], table, |w| w.bytes().all_unique()) {
        return Ok(word);
    }
    debug!("no distinct-letter opener available, widening to the full pool");
    select(dictionary, &[], table, |_| true).ok_or(SolverError::NoCandidateRemains)
}

/// Best next guess given everything learned so far.
///
/// # Errors
/// `NoCandidateRemains` when the accumulated constraints eliminate every
/// dictionary word; the caller must treat this as fatal, since retrying
/// with the same history reproduces the same failure.
pub fn pick_next<'a>(
    dictionary: &'a [String],
    history: &[GuessRecord],
    table: &FrequencyTable,
) -> Result<&'a str, SolverError> {
    select(dictionary, history, table, |_| true).ok_or(SolverError::NoCandidateRemains)
}
