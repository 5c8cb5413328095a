//! Quote- and paren-aware splitting of migration scripts into statements.
//!
//! A script is cut at every `;`, then fragments are glued back together until
//! the accumulated text has an even number of `'` and `"` characters and as
//! many `(` as `)`. That keeps semicolons inside string literals, quoted
//! identifiers and parenthesized bodies from ending a statement.
//!
//! Doubled quotes (`''`) are counted as two quote characters, which keeps the
//! parity intact for standard SQL quote escaping.

/// Characters that make up a blank script.
const BLANK_CHARS: [char; 4] = [' ', '\t', '\n', '\r'];

/// Running counts of the characters that decide whether a statement is closed.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct Balance {
    single_quotes: usize,
    double_quotes: usize,
    open_parens: usize,
    close_parens: usize,
}

impl Balance {
    fn of(text: &str) -> Self {
        let mut balance = Self::default();
        for c in text.chars() {
            match c {
                '\'' => balance.single_quotes += 1,
                '"' => balance.double_quotes += 1,
                '(' => balance.open_parens += 1,
                ')' => balance.close_parens += 1,
                _ => {}
            }
        }
        balance
    }

    fn absorb(&mut self, other: Balance) {
        self.single_quotes += other.single_quotes;
        self.double_quotes += other.double_quotes;
        self.open_parens += other.open_parens;
        self.close_parens += other.close_parens;
    }

    /// True when no string literal, quoted identifier or paren group is open.
    fn is_closed(&self) -> bool {
        self.single_quotes % 2 == 0
            && self.double_quotes % 2 == 0
            && self.open_parens == self.close_parens
    }
}

/// Split a migration script into individually executable statements.
///
/// Statements are returned in source order, trimmed of surrounding
/// whitespace (any Unicode whitespace, including form feeds and NBSP), with
/// empty statements dropped. The separating `;` is
/// not part of any returned statement.
///
/// If the script ends inside an open quote or paren group, the whole result
/// is empty, including statements that were already balanced before the
/// unterminated tail. Callers tell a syntax error apart from an empty script
/// with [`is_blank`].
///
/// ```
/// use sdm_sql::split_statements;
///
/// let stmts = split_statements("INSERT INTO t VALUES ('a;b'); SELECT 1;");
/// assert_eq!(stmts, vec!["INSERT INTO t VALUES ('a;b')", "SELECT 1"]);
/// assert!(split_statements("SELECT '").is_empty());
/// ```
pub fn split_statements(script: &str) -> Vec<String> {
    let mut complete: Vec<String> = Vec::new();
    let mut pending = String::new();
    let mut balance = Balance::default();

    for fragment in script.split(';') {
        if !pending.is_empty() {
            pending.push(';');
        }
        pending.push_str(fragment);
        balance.absorb(Balance::of(fragment));

        if balance.is_closed() {
            complete.push(std::mem::take(&mut pending));
            balance = Balance::default();
        }
    }

    // An unterminated tail invalidates everything split so far.
    if !pending.is_empty() {
        return Vec::new();
    }

    complete
        .iter()
        .map(|stmt| stmt.trim())
        .filter(|stmt| !stmt.is_empty())
        .map(str::to_string)
        .collect()
}

/// True when `script` holds nothing but spaces, tabs and line breaks.
///
/// Narrower than the statement trim: a script of only form feeds or NBSPs is
/// not blank, and splits into nothing, so it reads as a syntax error.
pub fn is_blank(script: &str) -> bool {
    script.chars().all(|c| BLANK_CHARS.contains(&c))
}

#[cfg(test)]
#[path = "splitter_test.rs"]
mod tests;
