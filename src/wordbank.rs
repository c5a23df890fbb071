use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

pub const EMBEDDED_WORDBANK: &str = include_str!("resources/wordbank.txt");

/// The core assumes a validated dictionary: exactly five ASCII letters,
/// already lowercased. Anything else is dropped at load time.
fn is_valid_word(word: &str) -> bool {
    word.len() == 5 && word.bytes().all(|b| b.is_ascii_lowercase())
}

pub fn load_wordbank_from_str(data: &str) -> Vec<String> {
    data.lines()
        .map(|line| line.trim().to_lowercase())
        .filter(|word| is_valid_word(word))
        .collect()
}

pub fn load_wordbank_from_file<P: AsRef<Path>>(path: P) -> io::Result<Vec<String>> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let mut words = Vec::new();
    for line in reader.lines() {
        let word = line?.trim().to_lowercase();
        if is_valid_word(&word) {
            words.push(word);
        }
    }
    Ok(words)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_from_str_normalizes_case() {
        let words = load_wordbank_from_str("CRANE\nSlate\ntrace\n");
        assert_eq!(words, vec!["crane", "slate", "trace"]);
    }

    #[test]
    fn test_load_from_str_rejects_invalid_entries() {
        let data = "crane\ncran\ncranes\ncr4ne\n hello \n\nwor ds\n";
        let words = load_wordbank_from_str(data);
        assert_eq!(words, vec!["crane", "hello"]);
    }

    #[test]
    fn test_load_from_str_preserves_order_and_duplicates() {
        // Selection subtracts guessed words; storage is never deduplicated.
        let words = load_wordbank_from_str("slate\ncrane\nslate\n");
        assert_eq!(words, vec!["slate", "crane", "slate"]);
    }

    #[test]
    fn test_embedded_wordbank_is_valid() {
        let words = load_wordbank_from_str(EMBEDDED_WORDBANK);
        assert!(!words.is_empty());
        assert_eq!(words.len(), EMBEDDED_WORDBANK.lines().count());
    }

    #[test]
    fn test_load_from_file_missing_path() {
        assert!(load_wordbank_from_file("/nonexistent/wordbank.txt").is_err());
    }

    #[test]
    fn test_load_from_file_round_trip() {
        use std::io::Write;

        let path = std::env::temp_dir().join("wordle_autopilot_wordbank_test.txt");
        {
            let mut file = File::create(&path).unwrap();
            writeln!(file, "CRANE\nnotaword\nslate").unwrap();
        }
        let words = load_wordbank_from_file(&path).unwrap();
        assert_eq!(words, vec!["crane", "slate"]);
        let _ = std::fs::remove_file(&path);
    }
}
