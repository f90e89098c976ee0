//! Rule Viewer Widget
//! Central panel: load status, category selector and the rule listing.

use crate::data::{Dataset, LoadFailureKind};
use crate::gui::app::LoadState;
use crate::rules::{Category, Language, RenderOutcome, RuleRenderer};
use egui::{Color32, RichText, ScrollArea};
use std::sync::Arc;

const ERROR_COLOR: Color32 = Color32::from_rgb(220, 53, 69);
const SUCCESS_COLOR: Color32 = Color32::from_rgb(40, 167, 69);
const INFO_COLOR: Color32 = Color32::from_rgb(100, 149, 237);

/// Last render, reused until the dataset, category or language changes.
struct Rendered {
    dataset: Arc<Dataset>,
    category: Category,
    language: Language,
    outcome: RenderOutcome,
}

/// Scrollable rule listing for the selected category.
#[derive(Default)]
pub struct RuleViewer {
    pub category: Category,
    rendered: Option<Rendered>,
}

impl RuleViewer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw the viewer for the current load state
    pub fn show(&mut self, ui: &mut egui::Ui, state: &LoadState, language: Language) {
        ui.label(RichText::new("📜 Alliance & NAP Rules").size(26.0).strong());
        ui.separator();

        match state {
            LoadState::Loading => {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label("Fetching rules...");
                });
            }
            LoadState::Failed { kind, message } => {
                let icon = match kind {
                    LoadFailureKind::Schema => "⚠",
                    LoadFailureKind::Fetch => "❌",
                };
                ui.label(
                    RichText::new(format!("{icon} {message}"))
                        .size(14.0)
                        .strong()
                        .color(ERROR_COLOR),
                );
            }
            LoadState::Loaded(dataset) => {
                ui.label(RichText::new("✅ Rules loaded successfully!").color(SUCCESS_COLOR));
                ui.add_space(8.0);

                ui.horizontal(|ui| {
                    for category in Category::ALL {
                        ui.radio_value(&mut self.category, category, category.label());
                    }
                });
                ui.separator();

                let category = self.category;
                let outcome = self.outcome(dataset, language);
                Self::draw_rules(ui, category, outcome);
            }
        }
    }

    fn outcome(&mut self, dataset: &Arc<Dataset>, language: Language) -> &RenderOutcome {
        let category = self.category;
        let stale = !matches!(
            &self.rendered,
            Some(r) if Arc::ptr_eq(&r.dataset, dataset)
                && r.category == category
                && r.language == language
        );

        if stale {
            self.rendered = None;
        }

        let rendered = self.rendered.get_or_insert_with(|| Rendered {
            dataset: Arc::clone(dataset),
            category,
            language,
            outcome: RuleRenderer::render_category(dataset, category, language),
        });
        &rendered.outcome
    }

    fn draw_rules(ui: &mut egui::Ui, category: Category, outcome: &RenderOutcome) {
        ui.label(RichText::new(category.header()).size(20.0).strong());
        ui.add_space(8.0);

        if let Some(message) = outcome.info_message() {
            ui.label(RichText::new(format!("ℹ {message}")).color(INFO_COLOR));
            return;
        }

        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                for record in outcome.records() {
                    ui.label(RichText::new(format!("📜 {}", record.title)).size(16.0).strong());
                    ui.add_space(4.0);
                    for line in record.description_lines() {
                        ui.label(line);
                    }
                    ui.add_space(6.0);
                    ui.separator();
                }
            });
    }
}
