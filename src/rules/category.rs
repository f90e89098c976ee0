//! Rule categories shown in the category selector.

use std::fmt;

/// The three sections the sheet is partitioned into.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Category {
    #[default]
    NewMember,
    Nap,
    Alliance,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::NewMember, Category::Nap, Category::Alliance];

    /// Canonical key as stored in the normalized `Category` column.
    pub fn key(self) -> &'static str {
        match self {
            Category::NewMember => "newmember",
            Category::Nap => "nap",
            Category::Alliance => "alliance",
        }
    }

    /// Selector label.
    pub fn label(self) -> &'static str {
        match self {
            Category::NewMember => "🔰 New Member Rules",
            Category::Nap => "🤝 NAP Rules",
            Category::Alliance => "🏰 Alliance Rules",
        }
    }

    /// Section header above the rule listing.
    pub fn header(self) -> &'static str {
        match self {
            Category::NewMember => "🔰 Rules for New Members",
            Category::Nap => "🤝 Non-Aggression Pact (NAP) Rules",
            Category::Alliance => "🏰 Internal Alliance Rules",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::data::normalize_category;

    #[test]
    fn keys_are_already_normalized() {
        for category in Category::ALL {
            assert_eq!(normalize_category(category.key()), category.key());
            assert_eq!(category.to_string(), category.key());
        }
    }
}
