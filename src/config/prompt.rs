use crate::utils::errors::Result;
use std::io::{self, BufRead, Write};

/// Source of last-resort answers for configuration that no flag or variable provided
pub trait Prompter {
    /// Ask for one value. `None` means the input was closed.
    fn prompt(&mut self, label: &str) -> Result<Option<String>>;
}

/// Reads one line per question from stdin, writing the question to stderr
pub struct StdinPrompter;

impl Prompter for StdinPrompter {
    fn prompt(&mut self, label: &str) -> Result<Option<String>> {
        let mut stderr = io::stderr();
        write!(stderr, "{label}: ")?;
        stderr.flush()?;

        read_answer(io::stdin().lock())
    }
}

fn read_answer<R: BufRead>(mut input: R) -> Result<Option<String>> {
    let mut answer = String::new();
    if input.read_line(&mut answer)? == 0 {
        return Ok(None);
    }
    Ok(Some(answer.trim().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_answer_trims_line() {
        let answer = read_answer("  https://vault.example.com \nignored\n".as_bytes()).unwrap();
        assert_eq!(answer.as_deref(), Some("https://vault.example.com"));
    }

    #[test]
    fn test_read_answer_eof() {
        assert_eq!(read_answer("".as_bytes()).unwrap(), None);
    }
}
