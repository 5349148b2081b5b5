//! Tests for the filter parser.

use super::*;
use chrono::NaiveDate;
use tasks_model_rs::Priority;

fn leaf(text: &str) -> Filter {
    FilterParser::parse_leaf(text).unwrap()
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// ==================== Status Filter Tests ====================

#[test]
fn test_parse_done_and_not_done() {
    assert_eq!(leaf("done"), Filter::Done);
    assert_eq!(leaf("not done"), Filter::NotDone);
}

#[test]
fn test_parse_leaf_case_insensitive() {
    assert_eq!(leaf("DONE"), Filter::Done);
    assert_eq!(leaf("Not Done"), Filter::NotDone);
    assert_eq!(leaf("Is Blocked"), Filter::IsBlocked);
}

#[test]
fn test_parse_leaf_with_whitespace() {
    assert_eq!(leaf("  done  "), Filter::Done);
    assert_eq!(leaf("\tnot done\n"), Filter::NotDone);
}

// ==================== Description Filter Tests ====================

#[test]
fn test_parse_description_filters() {
    assert_eq!(
        leaf("description includes Weekly Report"),
        Filter::DescriptionIncludes("weekly report".to_string())
    );
    assert_eq!(
        leaf("description does not include (draft)"),
        Filter::DescriptionDoesNotInclude("(draft)".to_string())
    );
}

#[test]
fn test_description_needs_an_argument() {
    assert!(matches!(
        FilterParser::parse_leaf("description includes"),
        Err(QueryError::UnknownFilter { .. })
    ));
}

// ==================== Dependency Filter Tests ====================

#[test]
fn test_parse_dependency_filters() {
    assert_eq!(leaf("has id"), Filter::HasId);
    assert_eq!(leaf("no id"), Filter::NoId);
    assert_eq!(leaf("id includes AB"), Filter::IdIncludes("ab".to_string()));
    assert_eq!(leaf("has depends on"), Filter::HasDependsOn);
    assert_eq!(leaf("no depends on"), Filter::NoDependsOn);
    assert_eq!(leaf("is blocked"), Filter::IsBlocked);
    assert_eq!(leaf("is not blocked"), Filter::IsNotBlocked);
    assert_eq!(leaf("is blocking"), Filter::IsBlocking);
    assert_eq!(leaf("is not blocking"), Filter::IsNotBlocking);
}

// ==================== Date Filter Tests ====================

#[test]
fn test_parse_due_filters() {
    assert_eq!(leaf("has due date"), Filter::HasDueDate);
    assert_eq!(leaf("no due date"), Filter::NoDueDate);
    assert_eq!(leaf("due before 2024-03-01"), Filter::DueBefore(date(2024, 3, 1)));
    assert_eq!(leaf("due after 2024-03-01"), Filter::DueAfter(date(2024, 3, 1)));
    assert_eq!(leaf("due on 2024-03-01"), Filter::DueOn(date(2024, 3, 1)));
    assert_eq!(leaf("due 2024-03-01"), Filter::DueOn(date(2024, 3, 1)));
}

#[test]
fn test_parse_invalid_date() {
    assert_eq!(
        FilterParser::parse_leaf("due before tomorrow"),
        Err(QueryError::invalid_date("tomorrow"))
    );
    assert_eq!(
        FilterParser::parse_leaf("due 2024-02-30"),
        Err(QueryError::invalid_date("2024-02-30"))
    );
}

// ==================== Priority Filter Tests ====================

#[test]
fn test_parse_priority() {
    assert_eq!(leaf("priority is high"), Filter::PriorityIs(Priority::High));
    assert_eq!(leaf("priority is NONE"), Filter::PriorityIs(Priority::None));
    assert_eq!(leaf("priority is lowest"), Filter::PriorityIs(Priority::Lowest));
}

#[test]
fn test_parse_invalid_priority() {
    assert_eq!(
        FilterParser::parse_leaf("priority is urgent"),
        Err(QueryError::invalid_priority("urgent"))
    );
}

// ==================== Tag Filter Tests ====================

#[test]
fn test_parse_tag_filters() {
    assert_eq!(leaf("has tags"), Filter::HasTags);
    assert_eq!(leaf("no tags"), Filter::NoTags);
    assert_eq!(leaf("tags include #Work"), Filter::TagsInclude("work".to_string()));
    assert_eq!(leaf("tag includes work"), Filter::TagsInclude("work".to_string()));
    assert_eq!(
        leaf("tags do not include #home"),
        Filter::TagsDoNotInclude("home".to_string())
    );
    assert_eq!(
        leaf("tag does not include home"),
        Filter::TagsDoNotInclude("home".to_string())
    );
}

// ==================== Hierarchy Filter Tests ====================

#[test]
fn test_parse_hierarchy_filters() {
    assert_eq!(leaf("is parent task"), Filter::IsParentTask);
    assert_eq!(leaf("is not parent task"), Filter::IsNotParentTask);
    assert_eq!(leaf("is root task"), Filter::IsRootTask);
}

// ==================== Unknown Filter Tests ====================

#[test]
fn test_unknown_filter_suggests_closest() {
    assert_eq!(
        FilterParser::parse_leaf("dne"),
        Err(QueryError::unknown_filter("dne", Some("done".to_string())))
    );
    assert_eq!(
        FilterParser::parse_leaf("descripton includes foo"),
        Err(QueryError::unknown_filter(
            "descripton includes foo",
            Some("description includes".to_string())
        ))
    );
}

#[test]
fn test_unknown_filter_without_suggestion() {
    assert_eq!(
        FilterParser::parse_leaf("happy path filter for nothing"),
        Err(QueryError::unknown_filter("happy path filter for nothing", None))
    );
}

#[test]
fn test_parse_leaf_empty() {
    assert_eq!(FilterParser::parse_leaf("   "), Err(QueryError::EmptyExpression));
}

// ==================== Boolean Operator Tests ====================

#[test]
fn test_parse_single_parenthesized_filter() {
    assert_eq!(FilterParser::parse("(done)").unwrap(), Filter::Done);
}

#[test]
fn test_parse_and() {
    let filter = FilterParser::parse("(not done) AND (has id)").unwrap();
    assert_eq!(filter, Filter::and(Filter::NotDone, Filter::HasId));
}

#[test]
fn test_parse_not() {
    assert_eq!(
        FilterParser::parse("NOT (done)").unwrap(),
        Filter::negate(Filter::Done)
    );
    assert_eq!(
        FilterParser::parse("NOT NOT (done)").unwrap(),
        Filter::negate(Filter::negate(Filter::Done))
    );
}

#[test]
fn test_and_binds_tighter_than_or() {
    assert_eq!(
        FilterParser::parse("(done) OR (has id) AND (no tags)").unwrap(),
        Filter::or(Filter::Done, Filter::and(Filter::HasId, Filter::NoTags))
    );
}

#[test]
fn test_xor_binds_tighter_than_and() {
    assert_eq!(
        FilterParser::parse("(done) AND (has id) XOR (no tags)").unwrap(),
        Filter::and(Filter::Done, Filter::xor(Filter::HasId, Filter::NoTags))
    );
}

#[test]
fn test_not_binds_tighter_than_xor() {
    assert_eq!(
        FilterParser::parse("NOT (done) XOR (has id)").unwrap(),
        Filter::xor(Filter::negate(Filter::Done), Filter::HasId)
    );
}

#[test]
fn test_binary_operators_are_left_associative() {
    assert_eq!(
        FilterParser::parse("(done) OR (has id) OR (no tags)").unwrap(),
        Filter::or(Filter::or(Filter::Done, Filter::HasId), Filter::NoTags)
    );
}

#[test]
fn test_grouping_overrides_precedence() {
    assert_eq!(
        FilterParser::parse("((done) OR (has id)) AND (no tags)").unwrap(),
        Filter::and(Filter::or(Filter::Done, Filter::HasId), Filter::NoTags)
    );
    assert_eq!(
        FilterParser::parse("(done) AND NOT ((has id) OR (no tags))").unwrap(),
        Filter::and(
            Filter::Done,
            Filter::negate(Filter::or(Filter::HasId, Filter::NoTags))
        )
    );
}

#[test]
fn test_parse_quoted_filters() {
    assert_eq!(
        FilterParser::parse("\"not done\" AND \"description includes (x)\"").unwrap(),
        Filter::and(
            Filter::NotDone,
            Filter::DescriptionIncludes("(x)".to_string())
        )
    );
    assert_eq!(
        FilterParser::parse("(\"done\" OR \"has id\") AND NOT \"is blocked\"").unwrap(),
        Filter::and(
            Filter::or(Filter::Done, Filter::HasId),
            Filter::negate(Filter::IsBlocked)
        )
    );
}

#[test]
fn test_parse_filter_containing_parentheses() {
    assert_eq!(
        FilterParser::parse("(description includes (draft)) OR (done)").unwrap(),
        Filter::or(
            Filter::DescriptionIncludes("(draft)".to_string()),
            Filter::Done
        )
    );
}

// ==================== Error Tests ====================

#[test]
fn test_parse_empty() {
    assert_eq!(FilterParser::parse(""), Err(QueryError::EmptyExpression));
    assert_eq!(FilterParser::parse("  "), Err(QueryError::EmptyExpression));
}

#[test]
fn test_parse_mixed_delimiters() {
    assert_eq!(
        FilterParser::parse("(done) AND \"has id\""),
        Err(QueryError::invalid_filter_syntax("(done) AND \"has id\""))
    );
}

#[test]
fn test_parse_missing_delimiters() {
    assert!(matches!(
        FilterParser::parse("done AND has id"),
        Err(QueryError::InvalidFilterSyntax { .. })
    ));
}

#[test]
fn test_parse_unclosed_group() {
    assert_eq!(
        FilterParser::parse("((done) AND (has id)"),
        Err(QueryError::UnclosedParenthesis)
    );
}

#[test]
fn test_parse_trailing_group_close() {
    assert_eq!(
        FilterParser::parse("(done) AND (has id))"),
        Err(QueryError::unexpected_token(")"))
    );
}

#[test]
fn test_parse_unknown_filter_inside_boolean() {
    assert_eq!(
        FilterParser::parse("(done) OR (is blockd)"),
        Err(QueryError::unknown_filter(
            "is blockd",
            Some("is blocked".to_string())
        ))
    );
}

#[test]
fn test_deeply_nested_instruction_is_rejected() {
    let depth = 1_000;
    let instruction = format!("{}done{}", "(".repeat(depth), ")".repeat(depth));
    assert_eq!(
        FilterParser::parse(&instruction),
        Err(QueryError::nesting_too_deep(MAX_NESTING_DEPTH))
    );

    let negations = format!("{}(done)", "NOT ".repeat(depth));
    assert_eq!(
        FilterParser::parse(&negations),
        Err(QueryError::nesting_too_deep(MAX_NESTING_DEPTH))
    );
}

#[test]
fn test_nesting_within_limit_is_accepted() {
    let depth = MAX_NESTING_DEPTH;
    let instruction = format!("{}done{}", "(".repeat(depth), ")".repeat(depth));
    assert_eq!(FilterParser::parse(&instruction).unwrap(), Filter::Done);
}

// ==================== Delimiter Tests ====================

#[test]
fn test_any_of_these_chars() {
    assert_eq!(any_of_these_chars("()"), "[()]");
}
