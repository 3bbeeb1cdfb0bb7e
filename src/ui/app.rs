//! Main application UI.

use std::future::Future;
use std::path::PathBuf;

use eframe::egui::{self, Align, Layout};
use tokio::sync::mpsc;

use crate::client::DirectoryClient;
use crate::config::{AppConfig, StartPanel};
use crate::directory::{Directory, LogLevel, PanelSlot, UiMessage};
use crate::error::Result;
use crate::models::{Department, Employee, HireForm, Position, Vacancy};
use crate::panel::{EntityId, Operation, PanelAction, PanelEvent, failure_text};

use super::components::colors;
use super::{dashboard, entity_panel, settings_panel};

/// Current panel being displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Panel {
    #[default]
    Dashboard,
    Departments,
    Positions,
    Vacancies,
    Employees,
    Settings,
}

impl Panel {
    /// Get the display name for the panel.
    pub fn name(&self) -> &'static str {
        match self {
            Panel::Dashboard => "Dashboard",
            Panel::Departments => "Departments",
            Panel::Positions => "Positions",
            Panel::Vacancies => "Vacancies",
            Panel::Employees => "Employees",
            Panel::Settings => "Settings",
        }
    }
}

impl From<StartPanel> for Panel {
    fn from(start: StartPanel) -> Self {
        match start {
            StartPanel::Dashboard => Panel::Dashboard,
            StartPanel::Departments => Panel::Departments,
            StartPanel::Positions => Panel::Positions,
            StartPanel::Vacancies => Panel::Vacancies,
            StartPanel::Employees => Panel::Employees,
        }
    }
}

/// Main application state.
pub struct App {
    // Runtime and backend
    pub rt: tokio::runtime::Runtime,
    pub client: DirectoryClient,
    ctx: egui::Context,

    // Message channel for async communication
    pub tx: mpsc::UnboundedSender<UiMessage>,
    pub rx: mpsc::UnboundedReceiver<UiMessage>,

    // Navigation
    pub current_panel: Panel,

    // Panels, company summary and activity log
    pub directory: Directory,

    // Configuration
    pub config: AppConfig,
    pub config_path: PathBuf,
    pub config_modified: bool,
    pub testing_connection: bool,

    // Dialogs
    pub error_message: Option<String>,
    pub success_message: Option<String>,
}

impl App {
    pub fn new(ctx: egui::Context, config: AppConfig, config_path: PathBuf, rt: tokio::runtime::Runtime) -> Result<Self> {
        let client = DirectoryClient::from_config(&config.api)?;
        let (tx, rx) = mpsc::unbounded_channel();

        let mut app = Self {
            rt,
            client,
            ctx,
            tx,
            rx,
            current_panel: config.ui.start_panel.into(),
            directory: Directory::new(),
            config,
            config_path,
            config_modified: false,
            testing_connection: false,
            error_message: None,
            success_message: None,
        };

        // Load initial data
        app.load_all();

        Ok(app)
    }

    /// Run `task` on the runtime and deliver its message to the UI thread.
    fn spawn<F>(&self, task: F)
    where
        F: Future<Output = UiMessage> + Send + 'static,
    {
        let tx = self.tx.clone();
        let ctx = self.ctx.clone();
        self.rt.spawn(async move {
            let _ = tx.send(task.await);
            ctx.request_repaint();
        });
    }

    /// Reload the company summary and every list.
    pub fn load_all(&mut self) {
        self.load_company();
        self.load::<Department>();
        self.load::<Position>();
        self.load::<Vacancy>();
        self.load::<Employee>();
    }

    /// Load the company summary.
    pub fn load_company(&mut self) {
        let client = self.client.clone();
        self.spawn(async move {
            match client.company().await {
                Ok(info) => UiMessage::CompanyLoaded(info),
                Err(e) => UiMessage::CompanyFailed(e.to_string()),
            }
        });
    }

    /// Replace a panel's rows with the server list.
    pub fn load<E: PanelSlot>(&mut self) {
        E::panel_mut(&mut self.directory).start_loading();
        let client = self.client.clone();
        self.spawn(async move {
            E::message(match client.list::<E>().await {
                Ok(records) => PanelEvent::Loaded(records),
                Err(e) => {
                    tracing::warn!("Loading {} failed: {}", E::KIND.plural(), e);
                    PanelEvent::LoadFailed(failure_text(E::KIND, Operation::Load))
                }
            })
        });
    }

    /// Submit the panel's create form.
    pub fn create<E: PanelSlot>(&mut self) {
        let Some(data) = E::panel_mut(&mut self.directory).submit_create() else {
            return;
        };
        let client = self.client.clone();
        self.spawn(async move {
            let result = client.create::<E>(&data).await;
            E::created(&data, result)
        });
    }

    /// Submit an editing row.
    pub fn update<E: PanelSlot>(&mut self, id: EntityId) {
        let Some(data) = E::panel_mut(&mut self.directory).submit_edit(id) else {
            return;
        };
        let client = self.client.clone();
        self.spawn(async move {
            E::message(match client.update::<E>(&data).await {
                Ok(record) => PanelEvent::Updated(id, record),
                Err(e) => PanelEvent::UpdateFailed(id, e.display_text(&failure_text(E::KIND, Operation::Update))),
            })
        });
    }

    /// Delete a row on the backend; the row goes away once the backend confirms.
    pub fn delete<E: PanelSlot>(&mut self, id: EntityId) {
        let client = self.client.clone();
        self.spawn(async move {
            E::message(match client.delete::<E>(id).await {
                Ok(()) => PanelEvent::Deleted(id),
                Err(e) => PanelEvent::DeleteFailed(id, e.display_text(&failure_text(E::KIND, Operation::Delete))),
            })
        });
    }

    /// Route a control click from an `E` panel.
    /// Route a click on the control with `element_id` inside the `E` panel.
    pub fn handle_click<E: PanelSlot>(&mut self, element_id: &str) {
        match PanelAction::from_element_id(E::KIND, element_id) {
            Some(action) => self.handle_action::<E>(action),
            None => tracing::warn!("{}: no action for control {:?}", E::KIND, element_id),
        }
    }

    pub fn handle_action<E: PanelSlot>(&mut self, action: PanelAction) {
        tracing::debug!("{}: {:?}", E::KIND, action);
        match action {
            PanelAction::Delete(id) => self.delete::<E>(id),
            PanelAction::BeginEdit(id) => {
                E::panel_mut(&mut self.directory).begin_edit(id);
            }
            PanelAction::SubmitEdit(id) => self.update::<E>(id),
            PanelAction::CancelEdit(id) => E::panel_mut(&mut self.directory).cancel_edit(id),
            PanelAction::Hire(id) => self.open_hire(id),
            PanelAction::OpenCreate => {
                let form = E::new_form(&self.directory);
                E::panel_mut(&mut self.directory).open_create_with(form);
            }
            PanelAction::SubmitCreate => self.create::<E>(),
            PanelAction::CancelCreate => E::panel_mut(&mut self.directory).cancel_create(),
        }
    }

    /// Open the employee hire form for a vacancy.
    pub fn open_hire(&mut self, vacancy_id: EntityId) {
        self.directory
            .employees
            .open_create_with(HireForm::for_vacancy(vacancy_id.0));
        self.current_panel = Panel::Employees;
    }

    /// Test the backend URL currently in the settings form.
    pub fn test_connection(&mut self) {
        self.directory.log(LogLevel::Info, "Testing backend connection...");
        self.directory.connection_ok = None;

        let client = match DirectoryClient::from_config(&self.config.api) {
            Ok(client) => client,
            Err(e) => {
                self.directory.log(LogLevel::Error, e.to_string());
                self.directory.connection_ok = Some(false);
                return;
            }
        };

        self.testing_connection = true;
        self.spawn(async move { UiMessage::ConnectionTested(client.test_connection().await.unwrap_or(false)) });
    }

    /// Validate and save the config, then reconnect with it.
    pub fn save_config(&mut self) {
        if let Err(e) = self.config.validate() {
            self.error_message = Some(e.to_string());
            return;
        }

        if let Err(e) = self.config.save(&self.config_path) {
            tracing::error!("Failed to save config: {}", e);
            self.error_message = Some(format!("Failed to save config: {e}"));
            return;
        }

        match DirectoryClient::from_config(&self.config.api) {
            Ok(client) => {
                self.client = client;
                self.config_modified = false;
                self.success_message = Some("Settings saved".to_string());
                self.directory.log(LogLevel::Success, "Settings saved");
                self.load_all();
            }
            Err(e) => self.error_message = Some(e.to_string()),
        }
    }

    /// Poll async operation results.
    fn poll_async_results(&mut self) {
        while let Ok(msg) = self.rx.try_recv() {
            if matches!(msg, UiMessage::ConnectionTested(_)) {
                self.testing_connection = false;
            }
            self.directory.apply(msg);
        }
    }

    /// Render menu bar.
    fn show_menu_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::MenuBar::new().ui(ui, |ui| {
                ui.menu_button("View", |ui| {
                    for panel in [
                        Panel::Dashboard,
                        Panel::Departments,
                        Panel::Positions,
                        Panel::Vacancies,
                        Panel::Employees,
                    ] {
                        if ui.selectable_label(self.current_panel == panel, panel.name()).clicked() {
                            self.current_panel = panel;
                            ui.close();
                        }
                    }
                });
                ui.menu_button("Tools", |ui| {
                    if ui.button("Refresh All").clicked() {
                        self.load_all();
                        ui.close();
                    }
                    if ui
                        .add_enabled(!self.testing_connection, egui::Button::new("Test Connection"))
                        .clicked()
                    {
                        self.test_connection();
                        ui.close();
                    }
                    ui.separator();
                    if ui.button("Settings").clicked() {
                        self.current_panel = Panel::Settings;
                        ui.close();
                    }
                });
            });
        });
    }

    /// Render status bar (display only, no interaction).
    fn show_status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar")
            .min_height(28.0)
            .show(ctx, |ui| {
                ui.disable();
                ui.horizontal(|ui| {
                    let (color, text) = match self.directory.connection_ok {
                        _ if self.testing_connection => (colors::WARNING, "Testing..."),
                        None => (colors::NEUTRAL, "Not tested"),
                        Some(true) => (colors::SUCCESS, "Connected"),
                        Some(false) => (colors::ERROR, "Connection Error"),
                    };

                    if self.testing_connection {
                        ui.spinner();
                    }
                    ui.colored_label(color, format!("Backend: {} ({})", self.client.base_url(), text));

                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        if self.directory.is_loading() {
                            ui.label("Loading...");
                            ui.spinner();
                        }
                    });
                });
            });
    }

    /// Render modal dialogs (error, success).
    fn show_dialogs(&mut self, ctx: &egui::Context) {
        if let Some(ref error) = self.error_message.clone() {
            egui::Window::new("Error")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.colored_label(colors::ERROR, error);
                    ui.add_space(10.0);
                    if ui.button("OK").clicked() {
                        self.error_message = None;
                    }
                });
        }

        if let Some(ref msg) = self.success_message.clone() {
            egui::Window::new("Success")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.colored_label(colors::SUCCESS, msg);
                    ui.add_space(10.0);
                    if ui.button("OK").clicked() {
                        self.success_message = None;
                    }
                });
        }
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_async_results();

        self.show_menu_bar(ctx);
        self.show_status_bar(ctx);
        self.show_dialogs(ctx);

        egui::CentralPanel::default().show(ctx, |ui| {
            let go_back = match self.current_panel {
                Panel::Dashboard => {
                    if let Some(next) = dashboard::show(self, ui) {
                        self.current_panel = next;
                    }
                    false
                }
                Panel::Departments => entity_panel::show::<Department>(self, ui, "Departments"),
                Panel::Positions => entity_panel::show::<Position>(self, ui, "Positions"),
                Panel::Vacancies => entity_panel::show::<Vacancy>(self, ui, "Vacancies"),
                Panel::Employees => entity_panel::show::<Employee>(self, ui, "Employees"),
                Panel::Settings => settings_panel::show(self, ui),
            };
            if go_back {
                self.current_panel = Panel::Dashboard;
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_panel_maps_to_panel() {
        assert_eq!(Panel::from(StartPanel::Dashboard), Panel::Dashboard);
        assert_eq!(Panel::from(StartPanel::Vacancies), Panel::Vacancies);
        assert_eq!(Panel::from(StartPanel::Employees).name(), "Employees");
    }
}
