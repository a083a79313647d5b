//! Row predicates: exact sequence match, set membership, keyword search.

use std::collections::HashSet;

use patentlens_table::{Table, TableError};
use regex::{Regex, RegexBuilder};

/// Keeps rows whose `column` equals `sequence` as text. `"0"` selects the
/// primary record; `"00"` would not.
pub fn filter_by_sequence(table: &Table, column: &str, sequence: &str) -> Result<Table, TableError> {
    let idx = table.column_index(column)?;
    Ok(table.filter_rows(|row| row[idx].as_deref() == Some(sequence)))
}

/// Keeps rows whose `column` value is one of `allowed`.
///
/// An empty `allowed` set disables the filter and returns every row.
pub fn filter_by_membership<S: AsRef<str>>(
    table: &Table,
    column: &str,
    allowed: &[S],
) -> Result<Table, TableError> {
    let idx = table.column_index(column)?;
    if allowed.is_empty() {
        return Ok(table.clone());
    }
    let allowed: HashSet<&str> = allowed.iter().map(AsRef::as_ref).collect();
    Ok(table.filter_rows(|row| row[idx].as_deref().is_some_and(|v| allowed.contains(v))))
}

/// Case-insensitive "contains any of" matcher over literal keywords.
///
/// Matching is substring-level: `implant` matches `implants`.
#[derive(Debug, Clone)]
pub struct KeywordMatcher {
    regex: Option<Regex>,
}

impl KeywordMatcher {
    pub fn new<S: AsRef<str>>(keywords: &[S]) -> Result<Self, regex::Error> {
        if keywords.is_empty() {
            return Ok(KeywordMatcher { regex: None });
        }
        let pattern = keywords
            .iter()
            .map(|k| regex::escape(k.as_ref()))
            .collect::<Vec<_>>()
            .join("|");
        let regex = RegexBuilder::new(&pattern)
            .case_insensitive(true)
            .build()?;
        Ok(KeywordMatcher { regex: Some(regex) })
    }

    /// True when `text` contains at least one keyword. An empty keyword set
    /// matches everything.
    pub fn is_match(&self, text: &str) -> bool {
        match &self.regex {
            Some(regex) => regex.is_match(text),
            None => true,
        }
    }
}

/// Keeps rows whose `text_column` contains any keyword, ignoring case on
/// both sides. Rows with no text never match.
pub fn filter_by_keywords(table: &Table, text_column: &str, matcher: &KeywordMatcher) -> Result<Table, TableError> {
    let idx = table.column_index(text_column)?;
    Ok(table.filter_rows(|row| row[idx].as_deref().is_some_and(|t| matcher.is_match(t))))
}

/// Drops rows where `column` is missing.
pub fn drop_missing(table: &Table, column: &str) -> Result<Table, TableError> {
    let idx = table.column_index(column)?;
    Ok(table.filter_rows(|row| row[idx].is_some()))
}
