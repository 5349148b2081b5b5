//! Delimiter detection for Boolean instructions.
//!
//! A Boolean instruction surrounds each filter with either parentheses,
//! `(not done) AND (has id)`, or quotes, `"not done" AND "has id"`, never a
//! mix of both. [`BooleanDelimiters`] works out which convention a line uses
//! and hands the lexer regex fragments for its open and close characters.

use std::sync::LazyLock;

use regex::Regex;

use super::error::{QueryError, QueryResult};

/// The longest leading run of capitals and spaces, then the rest.
///
/// This is a shortcut for stripping `NOT` and friends; it also swallows any
/// capitalised word at the start of the line.
static LEADING_OPERATORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z ]*\s*(.*)").unwrap());

/// Builds a regex character class matching any of `chars`.
///
/// The result is a fragment to splice into a larger pattern, not a pattern
/// of its own.
pub fn any_of_these_chars(chars: &str) -> String {
    format!("[{chars}]")
}

/// The characters that open and close filters in one Boolean instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BooleanDelimiters {
    open_filter_chars: String,
    close_filter_chars: String,
    open_and_close_filter_chars: String,
    open_filter: String,
    close_filter: String,
}

impl BooleanDelimiters {
    fn new(open: &str, close: &str, open_and_close: &str) -> Self {
        Self {
            open_filter_chars: open.to_string(),
            close_filter_chars: close.to_string(),
            open_and_close_filter_chars: open_and_close.to_string(),
            open_filter: any_of_these_chars(open),
            close_filter: any_of_these_chars(close),
        }
    }

    /// Both conventions at once.
    ///
    /// Only useful for spotting that a line is a Boolean instruction; a
    /// single instruction is always parsed with one convention.
    pub fn all_supported_delimiters() -> Self {
        Self::new("(\"", ")\"", "()\"")
    }

    /// Works out the convention of one instruction from its last character.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::InvalidFilterSyntax`] if, after stripping the
    /// leading operators, the line ends in neither `)` nor `"`.
    ///
    /// # Example
    ///
    /// ```
    /// use tasks_query_rs::filter::BooleanDelimiters;
    ///
    /// let delimiters = BooleanDelimiters::from_instruction_line("NOT (done)").unwrap();
    /// assert_eq!(delimiters.open_filter_chars(), "(");
    /// assert_eq!(delimiters.close_filter(), "[)]");
    ///
    /// assert!(BooleanDelimiters::from_instruction_line("description includes foo").is_err());
    /// ```
    pub fn from_instruction_line(instruction: &str) -> QueryResult<Self> {
        let trimmed = instruction.trim();
        let remainder = LEADING_OPERATORS
            .captures(trimmed)
            .and_then(|captures| captures.get(1))
            .map_or(trimmed, |found| found.as_str());

        match remainder.chars().last() {
            Some(')') => Ok(Self::new("(", ")", "()")),
            Some('"') => Ok(Self::new("\"", "\"", "\"")),
            _ => Err(QueryError::invalid_filter_syntax(instruction)),
        }
    }

    /// Characters that open a filter.
    pub fn open_filter_chars(&self) -> &str {
        &self.open_filter_chars
    }

    /// Characters that close a filter.
    pub fn close_filter_chars(&self) -> &str {
        &self.close_filter_chars
    }

    /// Characters that open or close a filter.
    pub fn open_and_close_filter_chars(&self) -> &str {
        &self.open_and_close_filter_chars
    }

    /// Regex fragment matching one opening character.
    pub fn open_filter(&self) -> &str {
        &self.open_filter
    }

    /// Regex fragment matching one closing character.
    pub fn close_filter(&self) -> &str {
        &self.close_filter
    }

    /// Returns true for the parenthesis convention.
    pub fn uses_parentheses(&self) -> bool {
        self.open_filter_chars.contains('(')
    }
}
