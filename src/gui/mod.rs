//! GUI module - User interface components

mod app;
mod rule_viewer;
mod side_panel;

pub use app::{LoadState, RulesApp};
pub use rule_viewer::RuleViewer;
pub use side_panel::{SidePanel, SidePanelAction};
