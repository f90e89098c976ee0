//! Rule Dataset Module
//! Typed, immutable view of the rules sheet after normalization.

use std::collections::HashMap;

/// Column that partitions rules into sections. Required.
pub const CATEGORY_COLUMN: &str = "Category";
/// Default-language rule title column.
pub const TITLE_COLUMN: &str = "Rule Title";
/// Default-language rule description column.
pub const DESCRIPTION_COLUMN: &str = "Description";

/// Canonical form of a category value: trimmed and lowercased.
pub fn normalize_category(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// One row of the rules sheet.
///
/// `fields` only holds non-null cells, keyed by column name. The category is
/// stored separately and is always in canonical form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleRow {
    category: String,
    fields: HashMap<String, String>,
}

impl RuleRow {
    pub fn new<I, K, V>(category: &str, fields: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            category: normalize_category(category),
            fields: fields
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Normalized category key.
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Raw cell value for a column, `None` when the column is absent or the
    /// cell was empty in the sheet.
    pub fn field(&self, column: &str) -> Option<&str> {
        self.fields.get(column).map(String::as_str)
    }
}

/// Rows of the sheet in source order, plus the header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dataset {
    columns: Vec<String>,
    rows: Vec<RuleRow>,
}

impl Dataset {
    pub fn new(columns: Vec<String>, rows: Vec<RuleRow>) -> Self {
        Self { columns, rows }
    }

    /// Column names in header order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }

    pub fn rows(&self) -> &[RuleRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows whose category equals `key` after normalizing `key`, in source order.
    pub fn rows_in_category<'a>(&'a self, key: &str) -> impl Iterator<Item = &'a RuleRow> + 'a {
        let key = normalize_category(key);
        self.rows.iter().filter(move |row| row.category == key)
    }
}
