use std::io;
use std::process::ExitCode;

use wordle_autopilot::cli::{parse_cli, ConsoleOracle};
use wordle_autopilot::game::play;
use wordle_autopilot::solver::FrequencyTable;
use wordle_autopilot::tui::TuiOracle;
use wordle_autopilot::wordbank::{
    load_wordbank_from_file, load_wordbank_from_str, EMBEDDED_WORDBANK,
};

fn main() -> ExitCode {
    env_logger::init();
    let cli = parse_cli();

    let dictionary = match &cli.wordbank_path {
        Some(path) => match load_wordbank_from_file(path) {
            Ok(words) => words,
            Err(e) => {
                eprintln!("Failed to load word bank from '{path}': {e}");
                return ExitCode::FAILURE;
            }
        },
        None => load_wordbank_from_str(EMBEDDED_WORDBANK),
    };
    if dictionary.is_empty() {
        eprintln!("Word bank has no usable 5-letter words.");
        return ExitCode::FAILURE;
    }
    println!("Loaded {} words.", dictionary.len());

    let table = FrequencyTable::build(&dictionary);

    let result = if cli.tui {
        match TuiOracle::new() {
            Ok(mut oracle) => play(&dictionary, &table, &mut oracle),
            Err(e) => {
                eprintln!("Failed to start the terminal interface: {e}");
                return ExitCode::FAILURE;
            }
        }
    } else {
        let stdin = io::stdin();
        let mut oracle = ConsoleOracle::new(stdin.lock(), io::stdout());
        play(&dictionary, &table, &mut oracle)
    };

    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            // An inconsistent feedback history cannot be retried; report
            // and bail so the operator can restart with clean input.
            eprintln!("{e}. Check the reported feedback for typos.");
            ExitCode::FAILURE
        }
    }
}
