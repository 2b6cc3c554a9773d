//! End-to-end checks of the `validate` entry point and the marker model,
//! exercised exactly the way the editor host consumes them.

use sqllab_language_server::validation::brackets::{validate_brackets, BracketPair, ScanStyle};
use sqllab_language_server::{
    to_display_entries, validate, Dialect, LanguageId, Severity, ValidationOptions,
};

fn sql_options(dialect: Dialect) -> ValidationOptions {
    ValidationOptions {
        dialect: Some(dialect),
        ..Default::default()
    }
}

#[test]
fn empty_input_is_valid_everywhere() {
    for name in ["sql", "json", "javascript", "typescript", "python", "made-up"] {
        let result = validate("", LanguageId::from_name(name), None);
        assert!(result.is_valid, "{name}");
        assert!(result.markers.is_empty(), "{name}");
    }
}

#[test]
fn select_one_is_valid_postgres() {
    let result = validate(
        "SELECT 1",
        LanguageId::Sql,
        Some(&sql_options(Dialect::Postgresql)),
    );
    assert!(result.is_valid);
}

#[test]
fn select_name_users_is_invalid_postgres() {
    let result = validate(
        "SELECT name users",
        LanguageId::Sql,
        Some(&sql_options(Dialect::Postgresql)),
    );
    assert!(!result.is_valid);
    assert!(!result.markers.is_empty());
}

#[test]
fn json_trailing_comma_yields_exactly_one_marker() {
    let result = validate("{\"a\": 1,}", LanguageId::Json, None);
    assert!(!result.is_valid);
    assert_eq!(result.markers.len(), 1);
    assert_eq!(result.markers[0].source, "json-validator");
}

#[test]
fn javascript_unclosed_brace_is_located_at_its_opening() {
    let result = validate("function f() { return 1;", LanguageId::JavaScript, None);
    let marker = result
        .markers
        .iter()
        .find(|m| m.message.contains("Unclosed bracket '{'"))
        .expect("expected an unclosed-brace marker");
    assert_eq!(marker.start_line, 1);
    assert_eq!(marker.start_col, 14);
}

#[test]
fn structured_grammar_silences_the_fallback_parser() {
    // Any input where the structured grammar reports at least one marker
    // must contain no fallback-parser markers at all.
    let inputs = [
        "SELECT name users",
        "SELECT a, FROM t",
        "SELECT a FROM t GROUP BY a WHERE a = 1",
        "SELECT 'unterminated",
    ];
    for input in inputs {
        let result = validate(input, LanguageId::Sql, Some(&sql_options(Dialect::Postgresql)));
        let grammar_count = result
            .markers
            .iter()
            .filter(|m| m.source == "sql-grammar")
            .count();
        assert!(grammar_count >= 1, "{input}");
        assert!(
            result.markers.iter().all(|m| m.source != "sql-parser"),
            "{input}"
        );
    }
}

#[test]
fn one_extra_close_is_exactly_one_unmatched_marker() {
    let pairs = &[BracketPair::new('(', ')')];
    let markers = validate_brackets("SELECT (a + b)) FROM t", pairs, &ScanStyle::SQL);
    assert_eq!(markers.len(), 1);
    assert!(markers[0].message.contains("Unmatched closing bracket"));
    assert_eq!(markers[0].start_line, 1);
    assert_eq!(markers[0].start_col, 15);
}

#[test]
fn one_unclosed_open_is_exactly_one_marker_at_the_opening() {
    let pairs = &[BracketPair::new('(', ')')];
    let markers = validate_brackets("SELECT (a + b FROM t -- )", pairs, &ScanStyle::SQL);
    assert_eq!(markers.len(), 1);
    assert!(markers[0].message.contains("Unclosed bracket"));
    assert_eq!(markers[0].start_col, 8);
}

#[test]
fn validation_is_idempotent_modulo_timing() {
    let options = sql_options(Dialect::Postgresql);
    let first = validate("SELECT name users", LanguageId::Sql, Some(&options));
    let second = validate("SELECT name users", LanguageId::Sql, Some(&options));
    assert_eq!(first.markers, second.markers);
    assert_eq!(first.is_valid, second.is_valid);
}

#[test]
fn severity_ordinals_match_the_wire_contract() {
    assert_eq!(Severity::Hint.value(), 1);
    assert_eq!(Severity::Info.value(), 2);
    assert_eq!(Severity::Warning.value(), 4);
    assert_eq!(Severity::Error.value(), 8);
}

#[test]
fn display_entries_project_markers_for_the_error_panel() {
    let result = validate(
        "SELECT name,\nFROM users",
        LanguageId::Sql,
        Some(&sql_options(Dialect::Postgresql)),
    );
    let entries = to_display_entries(&result.markers);
    assert_eq!(entries.len(), result.markers.len());
    for (entry, marker) in entries.iter().zip(&result.markers) {
        assert_eq!(entry.line, marker.start_line);
        assert_eq!(entry.column, marker.start_col);
        assert_eq!(entry.message, marker.message);
        assert_eq!(entry.severity_label, marker.severity.label());
    }
}

#[test]
fn markers_arrive_sorted_by_position() {
    let result = validate(
        "SELECT name\nFROM a JOIN b\nWHERE x =",
        LanguageId::Sql,
        Some(&sql_options(Dialect::Postgresql)),
    );
    let positions: Vec<(usize, usize)> = result
        .markers
        .iter()
        .map(|m| (m.start_line, m.start_col))
        .collect();
    let mut sorted = positions.clone();
    sorted.sort();
    assert_eq!(positions, sorted);
}

#[test]
fn dialects_without_a_structured_grammar_still_catch_errors() {
    let result = validate(
        "SELECT FROM WHERE",
        LanguageId::Sql,
        Some(&sql_options(Dialect::Sqlite)),
    );
    assert!(!result.is_valid);
    assert!(result.markers.iter().any(|m| m.source == "sql-parser"));
}

#[test]
fn warnings_alone_leave_a_query_valid() {
    // Heuristic warning (SELECT without FROM) but no syntax error.
    let result = validate(
        "SELECT version()",
        LanguageId::Sql,
        Some(&sql_options(Dialect::Sqlite)),
    );
    assert!(result.is_valid);
    assert!(result
        .markers
        .iter()
        .any(|m| m.severity == Severity::Warning));
}
