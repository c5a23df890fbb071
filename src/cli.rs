use clap::Parser;
use log::debug;
use std::io::{BufRead, Write};

use crate::feedback::Feedback;
use crate::game::{GameOutcome, Oracle};

/// Wordle autopilot CLI options
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to a newline-delimited wordbank file
    #[arg(short = 'i', long = "input")]
    pub wordbank_path: Option<String>,

    /// Use the full-screen terminal interface
    #[arg(long)]
    pub tui: bool,
}

#[must_use]
pub fn parse_cli() -> Cli {
    Cli::parse()
}

/// Console oracle: prints each proposed guess and reads the reply from a
/// buffered reader, so tests can script whole sessions with a `Cursor`.
pub struct ConsoleOracle<R, W> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> ConsoleOracle<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    fn read_line(&mut self) -> Option<String> {
        let mut line = String::new();
        match self.reader.read_line(&mut line) {
            // EOF or a broken pipe ends the session rather than erroring.
            Ok(0) | Err(_) => None,
            Ok(_) => Some(line),
        }
    }
}

impl<R: BufRead, W: Write> Oracle for ConsoleOracle<R, W> {
    fn feedback_for(&mut self, guess: &str, round: usize) -> Option<Feedback> {
        let _ = writeln!(
            self.writer,
            "\nRound {round}: enter \"{guess}\", then report the result."
        );
        loop {
            let _ = writeln!(
                self.writer,
                "Feedback (5 characters, 0 = miss, 1 = wrong spot, 2 = correct):"
            );
            let _ = self.writer.flush();

            let line = self.read_line()?;
            match Feedback::parse(&line) {
                Ok(feedback) => return Some(feedback),
                Err(err) => {
                    debug!("re-soliciting feedback: {err}");
                    let _ = writeln!(
                        self.writer,
                        "Invalid results. Enter 5 numbers, 0 = miss, 1 = wrong spot, 2 = correct."
                    );
                }
            }
        }
    }

    fn notify_outcome(&mut self, outcome: &GameOutcome) {
        match outcome {
            GameOutcome::Won { word, rounds } => {
                let _ = writeln!(self.writer, "Solved it: \"{word}\" in {rounds} round(s).");
            }
            GameOutcome::Exhausted { history } => {
                let _ = writeln!(
                    self.writer,
                    "No win in {} rounds. The secret was never confirmed.",
                    history.len()
                );
            }
            GameOutcome::Aborted { rounds_played } => {
                let _ = writeln!(self.writer, "Session ended after {rounds_played} round(s).");
            }
        }
    }
}
