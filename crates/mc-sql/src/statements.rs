//! Statement splitting for migration text
//!
//! Splits on top-level semicolons using the sqlparser tokenizer, so that
//! semicolons inside string literals, quoted identifiers, comments, and
//! dollar-quoted function bodies stay part of their statement.

use regex::Regex;
use serde::Serialize;
use sqlparser::dialect::PostgreSqlDialect;
use sqlparser::tokenizer::{Location, Token, TokenWithSpan, Tokenizer};
use std::sync::OnceLock;

/// Pattern for `CREATE POLICY`, shared with the policy fact matcher
pub(crate) const CREATE_POLICY_PATTERN: &str = r"\bcreate\s+policy\b";

static CREATE_POLICY_RE: OnceLock<Regex> = OnceLock::new();

fn create_policy_regex() -> &'static Regex {
    CREATE_POLICY_RE.get_or_init(|| Regex::new(CREATE_POLICY_PATTERN).expect("valid regex"))
}

/// One SQL statement without its terminating semicolon.
///
/// Leading whitespace and comments are stripped; comments inside the
/// statement body are kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SqlStatement {
    text: String,
    #[serde(skip)]
    lowered: String,
}

impl SqlStatement {
    fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let lowered = text.to_lowercase();
        Self { text, lowered }
    }

    /// Statement text as written
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Lowercased statement text
    pub fn lowered(&self) -> &str {
        &self.lowered
    }

    /// First keyword of the statement, lowercased
    pub fn leading_keyword(&self) -> &str {
        self.lowered
            .split(|c: char| !c.is_alphanumeric() && c != '_')
            .next()
            .unwrap_or("")
    }

    /// Whether the statement is a `GRANT`
    pub fn is_grant(&self) -> bool {
        self.leading_keyword() == "grant"
    }

    /// Whether the statement creates a row-level security policy
    pub fn is_create_policy(&self) -> bool {
        create_policy_regex().is_match(&self.lowered)
    }

    /// First `max_chars` characters on one line, for listings
    pub fn summary(&self, max_chars: usize) -> String {
        let flat: String = self.text.split_whitespace().collect::<Vec<_>>().join(" ");
        match flat.char_indices().nth(max_chars) {
            Some((idx, _)) => format!("{}...", &flat[..idx]),
            None => flat,
        }
    }
}

/// Split migration text into statements.
///
/// Comment-only and blank fragments are discarded. A final statement without
/// a trailing semicolon is kept. Text the tokenizer rejects (for example an
/// unterminated string) falls back to a plain semicolon split.
pub fn split_statements(sql: &str) -> Vec<SqlStatement> {
    let dialect = PostgreSqlDialect {};
    match Tokenizer::new(&dialect, sql).tokenize_with_location() {
        Ok(tokens) => split_tokens(sql, &tokens),
        Err(e) => {
            log::warn!("SQL tokenizer failed ({}); splitting on raw semicolons", e);
            split_naive(sql)
        }
    }
}

/// Statements are sliced out of `sql` by token span, so their text is
/// byte-for-byte what the file contains.
fn split_tokens(sql: &str, tokens: &[TokenWithSpan]) -> Vec<SqlStatement> {
    let index = LineIndex::new(sql);
    let mut statements = Vec::new();
    // Byte range of the statement being collected, once it has content
    let mut current: Option<(usize, usize)> = None;

    for TokenWithSpan { token, span } in tokens {
        match token {
            Token::SemiColon => {
                if let Some((start, end)) = current.take() {
                    statements.push(SqlStatement::new(sql[start..end].trim_end()));
                }
            }
            Token::EOF => {}
            Token::Whitespace(_) => {
                if let Some((_, end)) = current.as_mut() {
                    *end = index.offset(span.end);
                }
            }
            _ => {
                let end = index.offset(span.end);
                match current.as_mut() {
                    Some((_, current_end)) => *current_end = end,
                    None => current = Some((index.offset(span.start), end)),
                }
            }
        }
    }

    if let Some((start, end)) = current {
        statements.push(SqlStatement::new(sql[start..end].trim_end()));
    }

    statements
}

/// Maps tokenizer locations (1-based line, 1-based char column) to byte
/// offsets. Lines break on `\n` only, as in the tokenizer.
struct LineIndex<'a> {
    sql: &'a str,
    starts: Vec<usize>,
}

impl<'a> LineIndex<'a> {
    fn new(sql: &'a str) -> Self {
        let starts = std::iter::once(0)
            .chain(sql.match_indices('\n').map(|(i, _)| i + 1))
            .collect();
        Self { sql, starts }
    }

    fn offset(&self, location: Location) -> usize {
        let line = (location.line as usize).saturating_sub(1);
        let Some(&start) = self.starts.get(line) else {
            return self.sql.len();
        };
        let column = (location.column as usize).saturating_sub(1);
        self.sql[start..]
            .char_indices()
            .nth(column)
            .map_or(self.sql.len(), |(i, _)| start + i)
    }
}

fn split_naive(sql: &str) -> Vec<SqlStatement> {
    sql.split(';')
        .filter_map(|fragment| {
            let body: Vec<&str> = fragment
                .lines()
                .skip_while(|line| {
                    let line = line.trim();
                    line.is_empty() || line.starts_with("--")
                })
                .collect();
            let text = body.join("\n");
            let text = text.trim();
            (!text.is_empty()).then(|| SqlStatement::new(text))
        })
        .collect()
}

#[cfg(test)]
#[path = "statements_test.rs"]
mod tests;
