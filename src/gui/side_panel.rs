//! Side Panel Widget
//! Left panel with the NAP alliance roster, language selection and reload.

use crate::config::AppConfig;
use crate::rules::Language;
use egui::{Color32, ComboBox, RichText};

/// Left side panel. Owns the language choice.
#[derive(Default)]
pub struct SidePanel {
    pub language: Language,
}

impl SidePanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw the side panel
    pub fn show(&mut self, ui: &mut egui::Ui, config: &AppConfig) -> SidePanelAction {
        let mut action = SidePanelAction::None;

        // ===== NAP Alliances =====
        ui.add_space(5.0);
        ui.label(RichText::new("🤝 NAP Alliances").size(20.0).strong());
        ui.label("Alliances in our Non-Aggression Pact (NAP):");
        ui.add_space(5.0);

        let (left, right) = config.alliance_columns();
        if left.is_empty() {
            ui.label(RichText::new("No NAP alliances listed.").color(Color32::GRAY));
        } else {
            ui.columns(2, |columns| {
                for name in left {
                    columns[0].label(RichText::new(format!("• {name}")).monospace());
                }
                for name in right {
                    columns[1].label(RichText::new(format!("• {name}")).monospace());
                }
            });
        }

        ui.add_space(10.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Language Selection =====
        ui.label(RichText::new("🌐 Language Selection").size(14.0).strong());
        ui.add_space(5.0);

        ComboBox::from_label("Choose your language")
            .selected_text(self.language.name())
            .show_ui(ui, |ui| {
                for language in Language::ALL {
                    ui.selectable_value(&mut self.language, language, language.name());
                }
            });

        ui.add_space(10.0);
        ui.separator();
        ui.add_space(10.0);

        ui.label(
            RichText::new("This app displays rules sourced directly from a shared Google Sheet.")
                .size(11.0)
                .color(Color32::GRAY),
        );

        ui.add_space(8.0);
        if ui.button("🔄 Reload").clicked() {
            action = SidePanelAction::Reload;
        }

        action
    }
}

/// Actions triggered by the side panel
#[derive(Debug, Clone, PartialEq)]
pub enum SidePanelAction {
    None,
    Reload,
}
