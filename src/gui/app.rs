//! Alliance Rules Main Application
//! Main window with the alliance side panel and the rule viewer.

use crate::config::AppConfig;
use crate::data::{DataLoader, Dataset, HttpFetcher, LoadFailureKind, LoaderError};
use crate::gui::{RuleViewer, SidePanel, SidePanelAction};
use anyhow::Context;
use std::sync::mpsc::{channel, Receiver};
use std::sync::Arc;
use std::thread;
use tracing::{info, warn};

/// Where the rules sheet currently stands.
#[derive(Debug, Clone)]
pub enum LoadState {
    Loading,
    Loaded(Arc<Dataset>),
    Failed {
        kind: LoadFailureKind,
        message: String,
    },
}

impl LoadState {
    pub fn from_result(result: Result<Arc<Dataset>, LoaderError>) -> Self {
        match result {
            Ok(dataset) => LoadState::Loaded(dataset),
            Err(e) => LoadState::Failed {
                kind: e.kind(),
                message: e.user_message(),
            },
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }
}

/// Main application window.
pub struct RulesApp {
    config: AppConfig,
    loader: Arc<DataLoader<HttpFetcher>>,
    side_panel: SidePanel,
    rule_viewer: RuleViewer,
    state: LoadState,

    // Sheet is fetched on a background thread
    load_rx: Option<Receiver<Result<Arc<Dataset>, LoaderError>>>,
}

impl RulesApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: AppConfig) -> anyhow::Result<Self> {
        let fetcher = HttpFetcher::new(config.request_timeout())
            .context("failed to build HTTP client")?;

        let mut app = Self {
            config,
            loader: Arc::new(DataLoader::new(fetcher)),
            side_panel: SidePanel::new(),
            rule_viewer: RuleViewer::new(),
            state: LoadState::Loading,
            load_rx: None,
        };
        app.start_load();
        Ok(app)
    }

    /// Fetch the sheet in the background. The loader answers from its cache
    /// when the sheet was already loaded this session.
    fn start_load(&mut self) {
        if self.load_rx.is_some() {
            return;
        }

        let (tx, rx) = channel();
        self.load_rx = Some(rx);
        self.state = LoadState::Loading;

        let loader = Arc::clone(&self.loader);
        let url = self.config.sheet_url.clone();

        thread::spawn(move || {
            let _ = tx.send(loader.load(&url));
        });
    }

    fn handle_reload(&mut self) {
        if self.state.is_loading() {
            return;
        }
        info!(url = %self.config.sheet_url, "Reloading rules");
        self.loader.invalidate(&self.config.sheet_url);
        self.start_load();
    }

    /// Check for the background load result
    fn check_load_results(&mut self) {
        let Some(rx) = self.load_rx.take() else {
            return;
        };

        match rx.try_recv() {
            Ok(result) => {
                self.state = LoadState::from_result(result);
            }
            Err(std::sync::mpsc::TryRecvError::Empty) => {
                self.load_rx = Some(rx);
            }
            Err(std::sync::mpsc::TryRecvError::Disconnected) => {
                warn!("Load thread exited without a result");
                self.state = LoadState::from_result(Err(LoaderError::Interrupted));
            }
        }
    }
}

impl eframe::App for RulesApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.check_load_results();

        if self.state.is_loading() {
            ctx.request_repaint();
        }

        egui::SidePanel::left("side_panel")
            .min_width(240.0)
            .max_width(300.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    match self.side_panel.show(ui, &self.config) {
                        SidePanelAction::Reload => self.handle_reload(),
                        SidePanelAction::None => {}
                    }
                });
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.rule_viewer
                .show(ui, &self.state, self.side_panel.language);
        });
    }
}
