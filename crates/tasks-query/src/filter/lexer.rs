//! Lexer for Boolean instructions.
//!
//! The lexer never looks inside a filter. It finds the runs of whitespace,
//! grouping parentheses and operator keywords that sit between filters, and
//! treats everything between two runs as one filter body:
//!
//! ```text
//! (not done) AND NOT (description includes (draft))
//! ^         ^^^^^^^^^^                           ^^
//! leading   boundary                             trailing
//! ```
//!
//! In the parenthesis convention the delimiters double as grouping
//! parentheses, and a body whose own parentheses do not balance borrows the
//! missing ones from the neighbouring runs. In the quote convention quotes
//! only mark where bodies start and end.

use regex::Regex;

use super::delimiters::BooleanDelimiters;
use super::error::{QueryError, QueryResult};

/// A token in a Boolean instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BooleanToken {
    /// `(`
    OpenGroup,
    /// `)`
    CloseGroup,
    /// `AND`
    And,
    /// `OR`
    Or,
    /// `XOR`
    Xor,
    /// `NOT`
    Not,
    /// The text of one filter, delimiters removed.
    Filter(String),
}

impl BooleanToken {
    /// The token as it would be written in an instruction.
    pub fn as_source(&self) -> &str {
        match self {
            BooleanToken::OpenGroup => "(",
            BooleanToken::CloseGroup => ")",
            BooleanToken::And => "AND",
            BooleanToken::Or => "OR",
            BooleanToken::Xor => "XOR",
            BooleanToken::Not => "NOT",
            BooleanToken::Filter(text) => text,
        }
    }
}

/// Splits one Boolean instruction into tokens.
pub struct Lexer {
    delimiters: BooleanDelimiters,
    leading: Regex,
    boundary: Regex,
    trailing: Regex,
}

impl Lexer {
    /// Builds a lexer for the convention used by `instruction`.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::InvalidFilterSyntax`] if the convention cannot
    /// be determined.
    pub fn for_instruction(instruction: &str) -> QueryResult<Self> {
        let delimiters = BooleanDelimiters::from_instruction_line(instruction)?;
        Self::with_delimiters(delimiters, instruction)
    }

    fn with_delimiters(delimiters: BooleanDelimiters, instruction: &str) -> QueryResult<Self> {
        let open = delimiters.open_filter();
        let close = delimiters.close_filter();
        let build = |pattern: String| {
            Regex::new(&pattern).map_err(|err| {
                tracing::warn!(%pattern, error = %err, "delimiter pattern did not compile");
                QueryError::invalid_filter_syntax(instruction)
            })
        };

        let leading = build(format!(r"^(?:[\s(]|NOT\b)*{open}"))?;
        let boundary = build(format!(
            r"{close}[\s)]*(?:AND|XOR|OR)\b(?:[\s(]|NOT\b)*{open}"
        ))?;
        let trailing = build(format!(r"{close}[\s)]*$"))?;

        Ok(Self {
            delimiters,
            leading,
            boundary,
            trailing,
        })
    }

    /// The delimiters this lexer splits on.
    pub fn delimiters(&self) -> &BooleanDelimiters {
        &self.delimiters
    }

    /// Tokenizes `instruction`.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::InvalidFilterSyntax`] if the line does not start
    /// and end with filter delimiters, and [`QueryError::EmptyExpression`] for
    /// an empty filter body.
    pub fn tokenize(&self, instruction: &str) -> QueryResult<Vec<BooleanToken>> {
        let text = instruction.trim();
        let mut runs = Vec::new();
        let mut bodies = Vec::new();

        let leading = self
            .leading
            .find(text)
            .ok_or_else(|| QueryError::invalid_filter_syntax(instruction))?;
        runs.push(leading.as_str().to_string());
        let mut position = leading.end();

        loop {
            let trailing = self
                .trailing
                .find_at(text, position)
                .ok_or_else(|| QueryError::invalid_filter_syntax(instruction))?;
            match self.boundary.find_at(text, position) {
                Some(boundary) if boundary.start() < trailing.start() => {
                    bodies.push(text[position..boundary.start()].to_string());
                    runs.push(boundary.as_str().to_string());
                    position = boundary.end();
                }
                _ => {
                    bodies.push(text[position..trailing.start()].to_string());
                    runs.push(trailing.as_str().to_string());
                    break;
                }
            }
        }

        if self.delimiters.uses_parentheses() {
            balance_bodies(&mut runs, &mut bodies);
        }
        tracing::trace!(?runs, ?bodies, "split boolean instruction");

        let mut tokens = Vec::new();
        for (index, run) in runs.iter().enumerate() {
            tokenize_run(run, &mut tokens)?;
            if let Some(body) = bodies.get(index) {
                let body = body.trim();
                if body.is_empty() {
                    return Err(QueryError::EmptyExpression);
                }
                tokens.push(BooleanToken::Filter(body.to_string()));
            }
        }
        Ok(tokens)
    }
}

/// Moves parentheses from the runs into bodies whose parentheses do not pair up.
///
/// `runs` always has one more entry than `bodies`: body `i` sits between
/// runs `i` and `i + 1`.
fn balance_bodies(runs: &mut [String], bodies: &mut [String]) {
    for (index, body) in bodies.iter_mut().enumerate() {
        let opens = body.matches('(').count();
        let closes = body.matches(')').count();

        if opens > closes {
            let next = &mut runs[index + 1];
            let available = next.chars().take_while(|c| *c == ')').count();
            let borrowed = (opens - closes).min(available);
            body.push_str(&next[..borrowed]);
            next.drain(..borrowed);
        } else if closes > opens {
            let previous = &mut runs[index];
            let available = previous.chars().rev().take_while(|c| *c == '(').count();
            let borrowed = (closes - opens).min(available);
            let split = previous.len() - borrowed;
            body.insert_str(0, &previous[split..]);
            previous.truncate(split);
        }
    }
}

/// Turns one run of punctuation and keywords into tokens.
fn tokenize_run(run: &str, tokens: &mut Vec<BooleanToken>) -> QueryResult<()> {
    let mut chars = run.char_indices().peekable();
    while let Some((start, c)) = chars.next() {
        match c {
            '(' => tokens.push(BooleanToken::OpenGroup),
            ')' => tokens.push(BooleanToken::CloseGroup),
            '"' => {}
            c if c.is_whitespace() => {}
            c if c.is_ascii_uppercase() => {
                let mut end = start + c.len_utf8();
                while let Some(&(index, next)) = chars.peek() {
                    if !next.is_ascii_uppercase() {
                        break;
                    }
                    end = index + next.len_utf8();
                    chars.next();
                }
                let token = match &run[start..end] {
                    "AND" => BooleanToken::And,
                    "OR" => BooleanToken::Or,
                    "XOR" => BooleanToken::Xor,
                    "NOT" => BooleanToken::Not,
                    other => return Err(QueryError::unexpected_token(other)),
                };
                tokens.push(token);
            }
            other => return Err(QueryError::unexpected_token(other.to_string())),
        }
    }
    Ok(())
}
