//! Rule Renderer Module
//! Filters the dataset by category and resolves the display columns with
//! English fallback.

use crate::data::{normalize_category, Dataset, RuleRow, DESCRIPTION_COLUMN, TITLE_COLUMN};
use crate::rules::{Category, Language};
use tracing::debug;

/// A rule ready to be shown: one title and a description that may span
/// several lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisplayRecord {
    pub title: String,
    pub description: String,
}

impl DisplayRecord {
    /// Description split on line breaks, empty lines included.
    pub fn description_lines(&self) -> impl Iterator<Item = &str> {
        self.description.split('\n')
    }
}

/// Result of rendering one category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderOutcome {
    Rules(Vec<DisplayRecord>),
    /// No row matched. This is an expected state, shown as an info line.
    Empty { category: String },
}

impl RenderOutcome {
    pub fn records(&self) -> &[DisplayRecord] {
        match self {
            RenderOutcome::Rules(records) => records.as_slice(),
            RenderOutcome::Empty { .. } => &[],
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, RenderOutcome::Empty { .. })
    }

    /// Informational message for the empty case.
    pub fn info_message(&self) -> Option<String> {
        match self {
            RenderOutcome::Empty { category } => Some(empty_category_message(category)),
            RenderOutcome::Rules(_) => None,
        }
    }
}

/// `No rules found for the 'Nap' category.`
pub fn empty_category_message(category: &str) -> String {
    format!("No rules found for the '{}' category.", capitalize(category))
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Turns dataset rows into display records.
pub struct RuleRenderer;

impl RuleRenderer {
    /// Render every row of `category_key`, reading `title_field` and
    /// `desc_field` and falling back to the English columns when a value is
    /// missing or blank.
    pub fn render(
        dataset: &Dataset,
        category_key: &str,
        title_field: &str,
        desc_field: &str,
    ) -> RenderOutcome {
        let key = normalize_category(category_key);

        for field in [title_field, desc_field] {
            if !dataset.has_column(field) {
                debug!(field, "Column not in sheet, falling back to English");
            }
        }

        let records: Vec<DisplayRecord> = dataset
            .rows_in_category(&key)
            .map(|row| DisplayRecord {
                title: Self::resolve_field(row, title_field, TITLE_COLUMN),
                description: Self::resolve_field(row, desc_field, DESCRIPTION_COLUMN),
            })
            .collect();

        debug!(
            category = %key,
            title_field,
            desc_field,
            matched = records.len(),
            "Rendered rules"
        );

        if records.is_empty() {
            RenderOutcome::Empty { category: key }
        } else {
            RenderOutcome::Rules(records)
        }
    }

    /// Render a category in the given language.
    pub fn render_category(
        dataset: &Dataset,
        category: Category,
        language: Language,
    ) -> RenderOutcome {
        let (title_field, desc_field) = language.fields();
        Self::render(dataset, category.key(), &title_field, &desc_field)
    }

    fn resolve_field(row: &RuleRow, field: &str, fallback: &str) -> String {
        let value = row
            .field(field)
            .filter(|v| !v.trim().is_empty())
            .or_else(|| row.field(fallback))
            .unwrap_or_default();

        value.replace("\r\n", "\n")
    }
}
