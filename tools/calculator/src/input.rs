//! Line input adapter
//!
//! Turns raw user text into numbers before anything reaches the engine.
//! Invalid input is reported and the prompt repeats until a valid value or
//! end of input arrives.

use anyhow::Result;
use rustyline::error::ReadlineError;
use rustyline::history::History;
use rustyline::{Editor, Helper};
use std::io::Write;

/// Source of input lines
pub trait LineSource {
    /// Read one line after showing `prompt`. `None` means end of input.
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>>;
}

impl<H: Helper, I: History> LineSource for Editor<H, I> {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        match self.readline(prompt) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    // Add to history (ignore errors)
                    let _ = self.add_history_entry(line.as_str());
                }
                Ok(Some(line))
            },
            // Ctrl+C and Ctrl+D both end the session
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

const INVALID_NUMBER: &str = "Invalid input! Please enter a number.";
const INVALID_INTEGER: &str = "Invalid input! Please enter an integer.";

/// Parse a floating-point number, ignoring surrounding whitespace
pub fn parse_number(line: &str) -> Option<f64> {
    line.trim().parse().ok()
}

/// Parse an integer, ignoring surrounding whitespace
pub fn parse_integer(line: &str) -> Option<i64> {
    line.trim().parse().ok()
}

/// Prompt until the line parses as a number
pub fn prompt_number<S, W>(source: &mut S, out: &mut W, prompt: &str) -> Result<Option<f64>>
where
    S: LineSource + ?Sized,
    W: Write + ?Sized,
{
    loop {
        let Some(line) = source.read_line(prompt)? else {
            return Ok(None);
        };
        match parse_number(&line) {
            Some(value) => return Ok(Some(value)),
            None => writeln!(out, "{}", INVALID_NUMBER)?,
        }
    }
}

/// Prompt until the line parses as an integer
pub fn prompt_integer<S, W>(source: &mut S, out: &mut W, prompt: &str) -> Result<Option<i64>>
where
    S: LineSource + ?Sized,
    W: Write + ?Sized,
{
    loop {
        let Some(line) = source.read_line(prompt)? else {
            return Ok(None);
        };
        match parse_integer(&line) {
            Some(value) => return Ok(Some(value)),
            None => writeln!(out, "{}", INVALID_INTEGER)?,
        }
    }
}

/// Prompt for a number where an empty line selects `default`
pub fn prompt_number_or<S, W>(
    source: &mut S,
    out: &mut W,
    prompt: &str,
    default: f64,
) -> Result<Option<f64>>
where
    S: LineSource + ?Sized,
    W: Write + ?Sized,
{
    loop {
        let Some(line) = source.read_line(prompt)? else {
            return Ok(None);
        };
        if line.trim().is_empty() {
            return Ok(Some(default));
        }
        match parse_number(&line) {
            Some(value) => return Ok(Some(value)),
            None => writeln!(out, "{}", INVALID_NUMBER)?,
        }
    }
}

/// Pre-recorded input lines, for driving sessions without a terminal
#[cfg(test)]
#[derive(Debug, Default)]
pub struct ScriptedInput {
    lines: std::collections::VecDeque<String>,
    pub prompts: Vec<String>,
}

#[cfg(test)]
impl ScriptedInput {
    pub fn new<I, T>(lines: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
            prompts: Vec::new(),
        }
    }
}

#[cfg(test)]
impl LineSource for ScriptedInput {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        self.prompts.push(prompt.to_string());
        Ok(self.lines.pop_front())
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number(" 3.5 "), Some(3.5));
        assert_eq!(parse_number("-2"), Some(-2.0));
        assert_eq!(parse_number("1e3"), Some(1000.0));
        assert_eq!(parse_number("abc"), None);
        assert_eq!(parse_number(""), None);
    }

    #[test]
    fn test_parse_integer() {
        assert_eq!(parse_integer("5"), Some(5));
        assert_eq!(parse_integer("-3"), Some(-3));
        assert_eq!(parse_integer("2.5"), None);
    }

    #[test]
    fn test_prompt_number_retries() {
        let mut input = ScriptedInput::new(["x", "", "42"]);
        let mut out = Vec::new();

        let value = prompt_number(&mut input, &mut out, "Enter number: ").unwrap();
        assert_eq!(value, Some(42.0));
        assert_eq!(input.prompts.len(), 3);

        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.matches(INVALID_NUMBER).count(), 2);
    }

    #[test]
    fn test_prompt_integer_rejects_fraction() {
        let mut input = ScriptedInput::new(["2.5", "7"]);
        let mut out = Vec::new();

        let value = prompt_integer(&mut input, &mut out, "Enter integer: ").unwrap();
        assert_eq!(value, Some(7));
        assert!(String::from_utf8(out).unwrap().contains(INVALID_INTEGER));
    }

    #[test]
    fn test_prompt_number_or_default() {
        let mut input = ScriptedInput::new(["", "2"]);
        let mut out = Vec::new();

        assert_eq!(
            prompt_number_or(&mut input, &mut out, "Base: ", 10.0).unwrap(),
            Some(10.0)
        );
        assert_eq!(
            prompt_number_or(&mut input, &mut out, "Base: ", 10.0).unwrap(),
            Some(2.0)
        );
    }

    #[test]
    fn test_end_of_input() {
        let mut input = ScriptedInput::new(Vec::<String>::new());
        let mut out = Vec::new();
        assert_eq!(prompt_number(&mut input, &mut out, "> ").unwrap(), None);
    }
}
