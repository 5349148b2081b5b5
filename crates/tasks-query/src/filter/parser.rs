//! Recursive descent parser for Boolean instructions and leaf filters.

use chrono::NaiveDate;
use strsim::levenshtein;
use tasks_model_rs::Priority;

use super::ast::Filter;
use super::error::{QueryError, QueryResult};
use super::lexer::{BooleanToken, Lexer};

/// Maximum Levenshtein distance to consider a filter as a suggestion.
const MAX_SUGGESTION_DISTANCE: usize = 3;

/// Maximum number of nested groups and `NOT`s in one instruction.
pub const MAX_NESTING_DEPTH: usize = 128;

/// Every filter the leaf parser knows, without arguments.
const KNOWN_FILTERS: &[&str] = &[
    "done",
    "not done",
    "description includes",
    "description does not include",
    "has id",
    "no id",
    "id includes",
    "has depends on",
    "no depends on",
    "is blocked",
    "is not blocked",
    "is blocking",
    "is not blocking",
    "has due date",
    "no due date",
    "due before",
    "due after",
    "due on",
    "priority is",
    "has tags",
    "no tags",
    "tags include",
    "tags do not include",
    "tag includes",
    "tag does not include",
    "is parent task",
    "is not parent task",
    "is root task",
];

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parser for task queries.
///
/// # Grammar
///
/// ```text
/// expression ::= or_expr
/// or_expr    ::= and_expr ("OR" and_expr)*
/// and_expr   ::= xor_expr ("AND" xor_expr)*
/// xor_expr   ::= unary_expr ("XOR" unary_expr)*
/// unary_expr ::= "NOT" unary_expr | primary
/// primary    ::= "(" expression ")" | filter
/// ```
///
/// # Operator Precedence (highest to lowest)
///
/// 1. `NOT` - unary
/// 2. `XOR` - binary, left-associative
/// 3. `AND` - binary, left-associative
/// 4. `OR` - binary, left-associative
///
/// # Example
///
/// ```
/// use tasks_query_rs::filter::{Filter, FilterParser};
///
/// let filter = FilterParser::parse("(not done) AND (has id)").unwrap();
/// assert_eq!(filter, Filter::and(Filter::NotDone, Filter::HasId));
///
/// let filter = FilterParser::parse_leaf("is blocked").unwrap();
/// assert_eq!(filter, Filter::IsBlocked);
/// ```
pub struct FilterParser {
    tokens: Vec<BooleanToken>,
    position: usize,
    depth: usize,
}

impl FilterParser {
    /// Parses a Boolean instruction into a Filter AST.
    ///
    /// # Errors
    ///
    /// Returns `QueryError::InvalidFilterSyntax` if the filters are not
    /// consistently delimited by parentheses or quotes.
    ///
    /// Returns `QueryError::EmptyExpression` if the input or a filter in it
    /// is empty.
    ///
    /// Returns `QueryError::UnexpectedToken` if an operator is misplaced.
    ///
    /// Returns `QueryError::UnclosedParenthesis` if parentheses are not balanced.
    ///
    /// Returns `QueryError::NestingTooDeep` if groups and `NOT`s nest more
    /// than [`MAX_NESTING_DEPTH`] levels.
    ///
    /// Any error from [`FilterParser::parse_leaf`] is returned unchanged.
    pub fn parse(instruction: &str) -> QueryResult<Filter> {
        let trimmed = instruction.trim();
        if trimmed.is_empty() {
            return Err(QueryError::EmptyExpression);
        }

        let lexer = Lexer::for_instruction(trimmed)?;
        let tokens = lexer.tokenize(trimmed)?;
        if tokens.is_empty() {
            return Err(QueryError::EmptyExpression);
        }
        tracing::debug!(
            instruction = trimmed,
            delimiters = lexer.delimiters().open_and_close_filter_chars(),
            tokens = tokens.len(),
            "parsing boolean instruction"
        );

        let mut parser = Self {
            tokens,
            position: 0,
            depth: 0,
        };
        let filter = parser.parse_expression()?;

        // Check that we consumed all tokens
        if let Some(remaining) = parser.peek() {
            return Err(QueryError::unexpected_token(remaining.as_source()));
        }

        Ok(filter)
    }

    /// Parses one filter such as `description includes report`.
    ///
    /// Keywords are case-insensitive.
    ///
    /// # Errors
    ///
    /// Returns `QueryError::EmptyExpression` for blank text,
    /// `QueryError::InvalidDate` or `QueryError::InvalidPriority` for a bad
    /// argument, and `QueryError::UnknownFilter` with the closest known
    /// filter for anything else.
    pub fn parse_leaf(text: &str) -> QueryResult<Filter> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(QueryError::EmptyExpression);
        }
        let lower = trimmed.to_lowercase();

        let exact = match lower.as_str() {
            "done" => Some(Filter::Done),
            "not done" => Some(Filter::NotDone),
            "has id" => Some(Filter::HasId),
            "no id" => Some(Filter::NoId),
            "has depends on" => Some(Filter::HasDependsOn),
            "no depends on" => Some(Filter::NoDependsOn),
            "is blocked" => Some(Filter::IsBlocked),
            "is not blocked" => Some(Filter::IsNotBlocked),
            "is blocking" => Some(Filter::IsBlocking),
            "is not blocking" => Some(Filter::IsNotBlocking),
            "has due date" => Some(Filter::HasDueDate),
            "no due date" => Some(Filter::NoDueDate),
            "has tags" | "has tag" => Some(Filter::HasTags),
            "no tags" | "no tag" => Some(Filter::NoTags),
            "is parent task" => Some(Filter::IsParentTask),
            "is not parent task" => Some(Filter::IsNotParentTask),
            "is root task" => Some(Filter::IsRootTask),
            _ => None,
        };
        if let Some(filter) = exact {
            return Ok(filter);
        }

        if let Some(text) = argument(&lower, &["description includes"]) {
            return Ok(Filter::DescriptionIncludes(text.to_string()));
        }
        if let Some(text) = argument(&lower, &["description does not include"]) {
            return Ok(Filter::DescriptionDoesNotInclude(text.to_string()));
        }
        if let Some(text) = argument(&lower, &["id includes"]) {
            return Ok(Filter::IdIncludes(text.to_string()));
        }
        if let Some(tag) = argument(&lower, &["tags include", "tag includes"]) {
            return Ok(Filter::TagsInclude(normalize_tag(tag)));
        }
        if let Some(tag) = argument(&lower, &["tags do not include", "tag does not include"]) {
            return Ok(Filter::TagsDoNotInclude(normalize_tag(tag)));
        }
        if let Some(name) = argument(&lower, &["priority is"]) {
            return Priority::from_name(name)
                .map(Filter::PriorityIs)
                .ok_or_else(|| QueryError::invalid_priority(name));
        }
        if let Some(date) = argument(&lower, &["due before"]) {
            return parse_date(date).map(Filter::DueBefore);
        }
        if let Some(date) = argument(&lower, &["due after"]) {
            return parse_date(date).map(Filter::DueAfter);
        }
        if let Some(date) = argument(&lower, &["due on", "due"]) {
            return parse_date(date).map(Filter::DueOn);
        }

        let suggestion = suggest_filter(&lower);
        tracing::debug!(filter = trimmed, ?suggestion, "unknown filter");
        Err(QueryError::unknown_filter(trimmed, suggestion))
    }

    /// Returns the current token without consuming it.
    fn peek(&self) -> Option<&BooleanToken> {
        self.tokens.get(self.position)
    }

    /// Consumes and returns the current token.
    fn advance(&mut self) -> Option<&BooleanToken> {
        let token = self.tokens.get(self.position);
        if token.is_some() {
            self.position += 1;
        }
        token
    }

    /// Enters one more level of nesting.
    fn descend(&mut self) -> QueryResult<()> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(QueryError::nesting_too_deep(MAX_NESTING_DEPTH));
        }
        self.depth += 1;
        Ok(())
    }

    /// Checks if the current token matches the expected token type.
    fn check(&self, expected: &BooleanToken) -> bool {
        self.peek() == Some(expected)
    }

    /// Parses the top-level expression (OR expression).
    fn parse_expression(&mut self) -> QueryResult<Filter> {
        self.parse_or_expr()
    }

    /// Parses OR expressions: `and_expr ("OR" and_expr)*`
    fn parse_or_expr(&mut self) -> QueryResult<Filter> {
        let mut left = self.parse_and_expr()?;

        while self.check(&BooleanToken::Or) {
            self.advance();
            let right = self.parse_and_expr()?;
            left = Filter::or(left, right);
        }

        Ok(left)
    }

    /// Parses AND expressions: `xor_expr ("AND" xor_expr)*`
    fn parse_and_expr(&mut self) -> QueryResult<Filter> {
        let mut left = self.parse_xor_expr()?;

        while self.check(&BooleanToken::And) {
            self.advance();
            let right = self.parse_xor_expr()?;
            left = Filter::and(left, right);
        }

        Ok(left)
    }

    /// Parses XOR expressions: `unary_expr ("XOR" unary_expr)*`
    fn parse_xor_expr(&mut self) -> QueryResult<Filter> {
        let mut left = self.parse_unary_expr()?;

        while self.check(&BooleanToken::Xor) {
            self.advance();
            let right = self.parse_unary_expr()?;
            left = Filter::xor(left, right);
        }

        Ok(left)
    }

    /// Parses unary expressions: `"NOT" unary_expr | primary`
    fn parse_unary_expr(&mut self) -> QueryResult<Filter> {
        if self.check(&BooleanToken::Not) {
            self.advance();
            self.descend()?;
            let inner = self.parse_unary_expr();
            self.depth -= 1;
            return Ok(Filter::negate(inner?));
        }

        self.parse_primary()
    }

    /// Parses primary expressions: `"(" expression ")" | filter`
    fn parse_primary(&mut self) -> QueryResult<Filter> {
        let token = self.advance().ok_or(QueryError::UnexpectedEndOfInput)?;

        match token.clone() {
            BooleanToken::OpenGroup => {
                self.descend()?;
                let inner = self.parse_expression();
                self.depth -= 1;
                let inner = inner?;
                if !self.check(&BooleanToken::CloseGroup) {
                    return Err(QueryError::UnclosedParenthesis);
                }
                self.advance();
                Ok(inner)
            }

            BooleanToken::Filter(text) => Self::parse_leaf(&text),

            other => Err(QueryError::unexpected_token(other.as_source())),
        }
    }
}

/// Returns the text after the first matching `prefix` and a space.
fn argument<'a>(text: &'a str, prefixes: &[&str]) -> Option<&'a str> {
    prefixes.iter().find_map(|prefix| {
        text.strip_prefix(prefix)
            .and_then(|rest| rest.strip_prefix(' '))
            .map(str::trim)
            .filter(|rest| !rest.is_empty())
    })
}

fn normalize_tag(tag: &str) -> String {
    tag.trim_start_matches('#').to_string()
}

fn parse_date(text: &str) -> QueryResult<NaiveDate> {
    NaiveDate::parse_from_str(text, DATE_FORMAT).map_err(|_| QueryError::invalid_date(text))
}

/// Finds the known filter closest to `text` by Levenshtein distance.
///
/// Each candidate is compared with as many leading words of `text` as it
/// has, so arguments do not count against the match.
fn suggest_filter(text: &str) -> Option<String> {
    let words: Vec<&str> = text.split_whitespace().collect();

    let (best_match, best_distance) = KNOWN_FILTERS
        .iter()
        .map(|candidate| {
            let width = candidate.split_whitespace().count().min(words.len());
            let head = words[..width].join(" ");
            (candidate, levenshtein(&head, candidate))
        })
        .min_by_key(|(_, d)| *d)?;

    if best_distance > 0 && best_distance <= MAX_SUGGESTION_DISTANCE {
        Some(best_match.to_string())
    } else {
        None
    }
}
