use super::*;

#[test]
fn test_split_simple_statements() {
    assert_eq!(
        split_statements("SELECT 1; SELECT 2;"),
        vec!["SELECT 1", "SELECT 2"]
    );
}

#[test]
fn test_split_without_trailing_semicolon() {
    assert_eq!(split_statements("SELECT 1"), vec!["SELECT 1"]);
}

#[test]
fn test_split_trims_and_drops_empty_statements() {
    let script = "\n\tCREATE TABLE a (id INT);\r\n;;  \n INSERT INTO a VALUES (1) ;\n\n";
    assert_eq!(
        split_statements(script),
        vec!["CREATE TABLE a (id INT)", "INSERT INTO a VALUES (1)"]
    );
}

#[test]
fn test_split_preserves_order() {
    let stmts = split_statements("c;b;a;d");
    assert_eq!(stmts, vec!["c", "b", "a", "d"]);
}

#[test]
fn test_semicolon_inside_single_quotes() {
    assert_eq!(
        split_statements("INSERT INTO t VALUES ('a;b');"),
        vec!["INSERT INTO t VALUES ('a;b')"]
    );
}

#[test]
fn test_semicolon_inside_double_quotes() {
    assert_eq!(
        split_statements(r#"CREATE TABLE "odd;name" (id INT); SELECT 1;"#),
        vec![r#"CREATE TABLE "odd;name" (id INT)"#, "SELECT 1"]
    );
}

#[test]
fn test_multiple_semicolons_inside_literal() {
    assert_eq!(
        split_statements("INSERT INTO t VALUES ('a;b;c;d'); SELECT 2"),
        vec!["INSERT INTO t VALUES ('a;b;c;d')", "SELECT 2"]
    );
}

#[test]
fn test_doubled_quote_escape_keeps_parity() {
    assert_eq!(
        split_statements("INSERT INTO t VALUES ('it''s; fine'); SELECT 1;"),
        vec!["INSERT INTO t VALUES ('it''s; fine')", "SELECT 1"]
    );
}

#[test]
fn test_procedure_body_parens_not_split() {
    let stmts = split_statements("CREATE PROC p AS BEGIN SELECT (1,2); END;");
    assert_eq!(stmts, vec!["CREATE PROC p AS BEGIN SELECT (1,2)", "END"]);
    assert!(stmts.iter().all(|s| s.matches('(').count() == s.matches(')').count()));
}

#[test]
fn test_semicolons_inside_paren_group_rejoined() {
    let script = "CREATE MACRO m() AS (SELECT 1; SELECT 2); SELECT 3;";
    assert_eq!(
        split_statements(script),
        vec!["CREATE MACRO m() AS (SELECT 1; SELECT 2)", "SELECT 3"]
    );
}

#[test]
fn test_multi_row_insert_with_literal_semicolons() {
    let script = "INSERT INTO t VALUES (1, 'x;'), (2, ';y');\nSELECT CASE WHEN a = ';' THEN 1 END FROM t;";
    assert_eq!(
        split_statements(script),
        vec![
            "INSERT INTO t VALUES (1, 'x;'), (2, ';y')",
            "SELECT CASE WHEN a = ';' THEN 1 END FROM t",
        ]
    );
}

#[test]
fn test_unterminated_quote_yields_nothing() {
    assert!(split_statements("SELECT '").is_empty());
}

#[test]
fn test_unterminated_tail_discards_balanced_prefix() {
    assert!(split_statements("SELECT 1; SELECT 2; SELECT (3").is_empty());
}

#[test]
fn test_unbalanced_double_quote_yields_nothing() {
    assert!(split_statements(r#"SELECT "col; SELECT 1;"#).is_empty());
}

#[test]
fn test_blank_input_yields_nothing() {
    assert!(split_statements("").is_empty());
    assert!(split_statements("   ").is_empty());
    assert!(split_statements(" \n\t\r ").is_empty());
    assert!(split_statements(";;;").is_empty());
}

#[test]
fn test_is_blank() {
    assert!(is_blank(""));
    assert!(is_blank("  \t\r\n"));
    assert!(!is_blank("  x "));
    assert!(!is_blank(";"));
}

#[test]
fn test_split_trims_unicode_whitespace() {
    assert_eq!(split_statements("SELECT 1;\x0c"), vec!["SELECT 1"]);
    assert_eq!(split_statements("\u{a0}SELECT 1\u{a0};\x0b"), vec!["SELECT 1"]);
}

#[test]
fn test_unicode_whitespace_only_is_not_blank() {
    assert!(split_statements("\u{a0}").is_empty());
    assert!(split_statements("\x0c").is_empty());
    assert!(!is_blank("\u{a0}"));
    assert!(!is_blank("\x0c"));
}
