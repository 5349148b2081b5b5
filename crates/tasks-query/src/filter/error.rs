//! Error types for the query parser.

use thiserror::Error;

/// A specialized Result type for query parsing operations.
pub type QueryResult<T> = Result<T, QueryError>;

/// Errors that can occur while parsing a query.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum QueryError {
    /// The delimiter convention of a Boolean instruction could not be determined.
    #[error(
        "All filters in a Boolean instruction must be surrounded with either '(' and ')' or '\"'. \
         Combinations of those delimiters are no longer supported."
    )]
    InvalidFilterSyntax {
        /// The instruction that was rejected.
        instruction: String,
    },

    /// The expression, or one of its filters, is empty.
    #[error("filter expression is empty")]
    EmptyExpression,

    /// An unexpected token was encountered during parsing.
    #[error("unexpected token: {token}")]
    UnexpectedToken {
        /// The unexpected token that was encountered.
        token: String,
    },

    /// An unexpected end of input was encountered.
    #[error("unexpected end of expression")]
    UnexpectedEndOfInput,

    /// An unclosed parenthesis was found.
    #[error("unclosed parenthesis")]
    UnclosedParenthesis,

    /// Groups and `NOT`s are nested deeper than the parser allows.
    #[error("expression is nested too deeply (at most {max_depth} levels)")]
    NestingTooDeep {
        /// The deepest nesting accepted.
        max_depth: usize,
    },

    /// The filter text matches no known filter.
    #[error("{}", unknown_filter_message(.instruction, .suggestion.as_deref()))]
    UnknownFilter {
        /// The unrecognized filter text.
        instruction: String,
        /// The closest known filter, if one is near enough.
        suggestion: Option<String>,
    },

    /// A date filter was given something other than `YYYY-MM-DD`.
    #[error("invalid date: {value} (expected YYYY-MM-DD)")]
    InvalidDate {
        /// The invalid date text.
        value: String,
    },

    /// An invalid priority name was specified.
    #[error("invalid priority: {value} (expected highest, high, medium, none, low or lowest)")]
    InvalidPriority {
        /// The invalid priority name.
        value: String,
    },

    /// A `limit` line without a usable count.
    #[error("invalid limit: {value}")]
    InvalidLimit {
        /// The rejected limit line.
        value: String,
    },

    /// A query line failed to parse.
    #[error("{source}\nProblem line: \"{instruction}\"")]
    Instruction {
        /// The offending line.
        instruction: String,
        /// Why it failed.
        #[source]
        source: Box<QueryError>,
    },
}

fn unknown_filter_message(instruction: &str, suggestion: Option<&str>) -> String {
    let base = format!("do not understand filter: {instruction}");
    match suggestion {
        Some(s) => format!("{base}. Did you mean '{s}'?"),
        None => base,
    }
}

impl QueryError {
    /// Creates an invalid filter syntax error.
    pub fn invalid_filter_syntax(instruction: impl Into<String>) -> Self {
        QueryError::InvalidFilterSyntax {
            instruction: instruction.into(),
        }
    }

    /// Creates an unexpected token error.
    pub fn unexpected_token(token: impl Into<String>) -> Self {
        QueryError::UnexpectedToken {
            token: token.into(),
        }
    }

    /// Creates a nesting too deep error.
    pub fn nesting_too_deep(max_depth: usize) -> Self {
        QueryError::NestingTooDeep { max_depth }
    }

    /// Creates an unknown filter error.
    pub fn unknown_filter(instruction: impl Into<String>, suggestion: Option<String>) -> Self {
        QueryError::UnknownFilter {
            instruction: instruction.into(),
            suggestion,
        }
    }

    /// Creates an invalid date error.
    pub fn invalid_date(value: impl Into<String>) -> Self {
        QueryError::InvalidDate {
            value: value.into(),
        }
    }

    /// Creates an invalid priority error.
    pub fn invalid_priority(value: impl Into<String>) -> Self {
        QueryError::InvalidPriority {
            value: value.into(),
        }
    }

    /// Creates an invalid limit error.
    pub fn invalid_limit(value: impl Into<String>) -> Self {
        QueryError::InvalidLimit {
            value: value.into(),
        }
    }

    /// Wraps an error with the query line it came from.
    pub fn in_instruction(self, instruction: impl Into<String>) -> Self {
        QueryError::Instruction {
            instruction: instruction.into(),
            source: Box::new(self),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_invalid_filter_syntax_names_both_conventions() {
        let message = QueryError::invalid_filter_syntax("x").to_string();
        assert!(message.contains("'(' and ')'"));
        assert!(message.contains("'\"'"));
        assert!(message.contains("no longer supported"));
    }

    #[test]
    fn test_unknown_filter_with_and_without_suggestion() {
        let with = QueryError::unknown_filter("dne", Some("done".to_string()));
        assert_eq!(
            with.to_string(),
            "do not understand filter: dne. Did you mean 'done'?"
        );

        let without = QueryError::unknown_filter("xyzzy", None);
        assert_eq!(without.to_string(), "do not understand filter: xyzzy");
    }

    #[test]
    fn test_instruction_wraps_source() {
        let error = QueryError::EmptyExpression.in_instruction("()");
        assert_eq!(
            error.to_string(),
            "filter expression is empty\nProblem line: \"()\""
        );
        assert_eq!(
            error.source().map(|source| source.to_string()),
            Some("filter expression is empty".to_string())
        );
    }
}
