//! Shared helper functions for CLI commands
//!
//! This module contains utility functions that are used across multiple
//! command modules to avoid code duplication.

use console::style;
use miette::{IntoDiagnostic, Result};
use std::io::{BufRead, Write};

use crate::core::ValidationError;

/// Truncate a string to max_len characters, adding "..." if truncated
///
/// Useful for table columns that need fixed-width output.
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Escape a string for CSV output
///
/// Handles commas, quotes, and newlines according to RFC 4180.
pub fn escape_csv(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

/// Split a command line into words, honoring single and double quotes
///
/// Quotes group words and are removed; a quoted empty string yields an
/// empty word. An unterminated quote runs to the end of the line.
pub fn split_words(line: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut quote: Option<char> = None;

    for c in line.chars() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => current.push(c),
            None if c == '"' || c == '\'' => {
                quote = Some(c);
                in_word = true;
            }
            None if c.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            None => {
                current.push(c);
                in_word = true;
            }
        }
    }
    if in_word {
        words.push(current);
    }
    words
}

/// Ask a yes/no question, reading the answer as the next line of `input`
///
/// Anything other than "y" or "yes" (including end of input) declines.
pub fn confirm(question: &str, input: &mut impl BufRead, out: &mut impl Write) -> Result<bool> {
    write!(out, "{} [y/N] ", question).into_diagnostic()?;
    out.flush().into_diagnostic()?;

    let mut answer = String::new();
    let read = input.read_line(&mut answer).into_diagnostic()?;
    if read == 0 {
        writeln!(out).into_diagnostic()?;
        return Ok(false);
    }
    Ok(matches!(
        answer.trim().to_lowercase().as_str(),
        "y" | "yes"
    ))
}

/// Print every violation in order, one per line, on stderr
pub fn report_violations(err: &ValidationError) {
    eprintln!(
        "{} {} problem(s) found:",
        style("✗").red(),
        err.violation_count()
    );
    for message in err.messages() {
        eprintln!("  {} {}", style("•").red(), message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_truncate_str() {
        assert_eq!(truncate_str("hello", 10), "hello");
        assert_eq!(truncate_str("hello world", 8), "hello...");
        assert_eq!(truncate_str("hi", 2), "hi");
        assert_eq!(truncate_str("ñandú grande", 8), "ñandú...");
    }

    #[test]
    fn test_escape_csv() {
        assert_eq!(escape_csv("simple"), "simple");
        assert_eq!(escape_csv("with,comma"), "\"with,comma\"");
        assert_eq!(escape_csv("with\"quote"), "\"with\"\"quote\"");
        assert_eq!(escape_csv("with\nnewline"), "\"with\nnewline\"");
    }

    #[test]
    fn test_split_words() {
        assert_eq!(split_words("parts"), vec!["parts"]);
        assert_eq!(
            split_words("add-part --name 'Hex Bolt' --company-name \"Acme, Inc\""),
            vec!["add-part", "--name", "Hex Bolt", "--company-name", "Acme, Inc"]
        );
        assert_eq!(split_words("  spaced   out  "), vec!["spaced", "out"]);
        assert!(split_words("   ").is_empty());
    }

    #[test]
    fn test_split_words_empty_quoted() {
        assert_eq!(split_words("--name ''"), vec!["--name", ""]);
        assert_eq!(split_words("--name \"Bolt"), vec!["--name", "Bolt"]);
    }

    #[test]
    fn test_confirm_answers() {
        let mut out = Vec::new();
        assert!(confirm("Delete?", &mut Cursor::new("y\n"), &mut out).unwrap());
        assert!(confirm("Delete?", &mut Cursor::new("YES\n"), &mut out).unwrap());
        assert!(!confirm("Delete?", &mut Cursor::new("n\n"), &mut out).unwrap());
        assert!(!confirm("Delete?", &mut Cursor::new("\n"), &mut out).unwrap());
        assert!(!confirm("Delete?", &mut Cursor::new(""), &mut out).unwrap());
        assert!(String::from_utf8(out).unwrap().contains("Delete? [y/N]"));
    }
}
