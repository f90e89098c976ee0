//! Rules module - category and language selection, rule rendering

mod category;
mod language;
mod renderer;

pub use category::Category;
pub use language::{localized_field, Language};
pub use renderer::{empty_category_message, DisplayRecord, RenderOutcome, RuleRenderer};
