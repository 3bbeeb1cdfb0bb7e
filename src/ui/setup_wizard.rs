//! First-run setup wizard for configuration.

use std::path::PathBuf;
use std::sync::mpsc;

use eframe::egui::{self, Color32, RichText};

use crate::client::DirectoryClient;
use crate::config::AppConfig;

/// Connection test state.
#[derive(Default, Clone, Debug, PartialEq, Eq)]
pub enum ConnectionTestState {
    #[default]
    NotTested,
    Testing,
    Success,
    Failed(String),
}

/// Setup wizard state.
pub struct SetupWizard {
    /// Current step (0-2).
    pub current_step: usize,
    /// Configuration being built.
    pub config: AppConfig,
    /// Backend connection test state.
    pub api_test_state: ConnectionTestState,
    /// Wizard completed flag.
    pub completed: bool,
    /// Timeout input as string for text editing.
    timeout_input: String,
}

impl Default for SetupWizard {
    fn default() -> Self {
        Self::new()
    }
}

impl SetupWizard {
    pub fn new() -> Self {
        Self::with_config(AppConfig::default())
    }

    /// Start from an existing (possibly invalid) config.
    pub fn with_config(config: AppConfig) -> Self {
        Self {
            current_step: 0,
            timeout_input: config.api.timeout_secs.to_string(),
            config,
            api_test_state: ConnectionTestState::NotTested,
            completed: false,
        }
    }

    /// Check if user can proceed to next step.
    pub fn can_proceed(&self) -> bool {
        match self.current_step {
            0 => true,
            // An unreachable backend is allowed; it may simply not be running yet.
            1 => self.config.validate().is_ok() && self.api_test_state != ConnectionTestState::Testing,
            2 => true,
            _ => false,
        }
    }

    /// Get step title.
    fn step_title(&self) -> &'static str {
        match self.current_step {
            0 => "Welcome",
            1 => "Backend Connection",
            2 => "Confirmation",
            _ => "Setup",
        }
    }

    /// Total number of steps.
    const TOTAL_STEPS: usize = 3;
}

/// Setup wizard application.
pub struct SetupApp {
    pub wizard: SetupWizard,
    pub initial_error: Option<String>,
    pub config_path: PathBuf,
    pub rt: tokio::runtime::Runtime,
    api_test_rx: Option<mpsc::Receiver<Result<(), String>>>,
}

impl SetupApp {
    pub fn new(
        wizard: SetupWizard,
        initial_error: Option<String>,
        config_path: PathBuf,
        rt: tokio::runtime::Runtime,
    ) -> Self {
        Self {
            wizard,
            initial_error,
            config_path,
            rt,
            api_test_rx: None,
        }
    }

    /// Test backend connection asynchronously.
    fn start_api_test(&mut self) {
        let client = match DirectoryClient::from_config(&self.wizard.config.api) {
            Ok(client) => client,
            Err(e) => {
                self.wizard.api_test_state = ConnectionTestState::Failed(e.to_string());
                return;
            }
        };

        let (tx, rx) = mpsc::channel();
        self.api_test_rx = Some(rx);
        self.wizard.api_test_state = ConnectionTestState::Testing;

        self.rt.spawn(async move {
            let result = match client.test_connection().await {
                Ok(true) => Ok(()),
                Ok(false) => Err("backend answered with an error status".to_string()),
                Err(e) => Err(e.to_string()),
            };
            let _ = tx.send(result);
        });
    }

    /// Check for async test results.
    fn poll_test_results(&mut self) {
        if let Some(rx) = &self.api_test_rx
            && let Ok(result) = rx.try_recv()
        {
            self.wizard.api_test_state = match result {
                Ok(()) => ConnectionTestState::Success,
                Err(e) => ConnectionTestState::Failed(e),
            };
            self.api_test_rx = None;
        }
    }
}

impl eframe::App for SetupApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_test_results();

        // Request repaint while testing
        if self.wizard.api_test_state == ConnectionTestState::Testing {
            ctx.request_repaint();
        }

        // Show initial error dialog
        if let Some(err) = self.initial_error.clone() {
            egui::Window::new("Configuration Error")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.colored_label(Color32::from_rgb(255, 100, 100), &err);
                    ui.add_space(10.0);
                    if ui.button("OK").clicked() {
                        self.initial_error = None;
                    }
                });
            return;
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(20.0);

                // Header
                ui.horizontal(|ui| {
                    ui.heading(RichText::new("Company Directory Setup").size(24.0).strong());
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.label(format!(
                            "Step {} of {}",
                            self.wizard.current_step + 1,
                            SetupWizard::TOTAL_STEPS
                        ));
                    });
                });

                ui.separator();
                ui.add_space(10.0);

                ui.heading(self.wizard.step_title());
                ui.add_space(20.0);

                let needs_api_test = match self.wizard.current_step {
                    0 => {
                        show_welcome_step(ui);
                        false
                    }
                    1 => show_backend_step(ui, &mut self.wizard),
                    2 => {
                        show_confirmation_step(ui, &self.wizard, &self.config_path);
                        false
                    }
                    _ => false,
                };

                if needs_api_test {
                    self.start_api_test();
                }

                ui.add_space(30.0);
                ui.separator();

                // Navigation buttons
                ui.horizontal(|ui| {
                    if self.wizard.current_step > 0 && ui.button("< Back").clicked() {
                        self.wizard.current_step -= 1;
                    }

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if self.wizard.current_step < SetupWizard::TOTAL_STEPS - 1 {
                            let btn_text = if self.wizard.current_step == 0 {
                                "Get Started >"
                            } else {
                                "Next >"
                            };
                            let enabled = self.wizard.can_proceed();
                            if ui.add_enabled(enabled, egui::Button::new(btn_text)).clicked() {
                                self.wizard.current_step += 1;
                            }
                        } else if ui.button("Save & Exit").clicked() {
                            self.wizard.completed = true;
                        }
                    });
                });
            });
        });

        if self.wizard.completed {
            match self.wizard.config.save(&self.config_path) {
                Ok(()) => {
                    tracing::info!("Config saved to {:?}", self.config_path);
                    ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                }
                Err(e) => {
                    self.initial_error = Some(format!("Failed to save config: {}", e));
                    self.wizard.completed = false;
                }
            }
        }
    }
}

fn show_welcome_step(ui: &mut egui::Ui) {
    ui.label("Welcome to Company Directory!");
    ui.add_space(10.0);
    ui.label("This wizard will help you configure the application.");
    ui.add_space(20.0);
    ui.label("You will need:");
    ui.add_space(5.0);
    ui.label("  - The address of the directory backend (e.g. http://127.0.0.1:5000)");
}

fn show_backend_step(ui: &mut egui::Ui, wizard: &mut SetupWizard) -> bool {
    let mut needs_test = false;

    egui::Grid::new("api_grid")
        .num_columns(2)
        .spacing([20.0, 8.0])
        .striped(true)
        .show(ui, |ui| {
            ui.label("API URL:");
            if ui.text_edit_singleline(&mut wizard.config.api.base_url).changed() {
                wizard.api_test_state = ConnectionTestState::NotTested;
            }
            ui.end_row();

            ui.label("Timeout (seconds, 0 = none):");
            if ui.text_edit_singleline(&mut wizard.timeout_input).changed()
                && let Ok(t) = wizard.timeout_input.parse()
            {
                wizard.config.api.timeout_secs = t;
            }
            ui.end_row();
        });

    if let Err(e) = wizard.config.validate() {
        ui.add_space(10.0);
        ui.colored_label(Color32::from_rgb(255, 100, 100), e.to_string());
    }

    ui.add_space(20.0);

    ui.horizontal(|ui| {
        let testing = wizard.api_test_state == ConnectionTestState::Testing;
        if ui.add_enabled(!testing, egui::Button::new("Test Connection")).clicked() {
            needs_test = true;
        }

        ui.add_space(10.0);

        match &wizard.api_test_state {
            ConnectionTestState::NotTested => {
                ui.label("Not tested");
            }
            ConnectionTestState::Testing => {
                ui.spinner();
                ui.label("Testing...");
            }
            ConnectionTestState::Success => {
                ui.colored_label(Color32::from_rgb(100, 200, 100), "Connection successful!");
            }
            ConnectionTestState::Failed(e) => {
                ui.colored_label(
                    Color32::from_rgb(255, 200, 100),
                    format!("Backend not reachable: {} (you can still continue)", e),
                );
            }
        }
    });

    needs_test
}

fn show_confirmation_step(ui: &mut egui::Ui, wizard: &SetupWizard, path: &std::path::Path) {
    ui.label("Review your configuration:");
    ui.add_space(10.0);

    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.heading("Backend");
        ui.label(format!("  {}", wizard.config.api.base_url));
        match wizard.config.api.timeout() {
            Some(timeout) => ui.label(format!("  Timeout: {} seconds", timeout.as_secs())),
            None => ui.label("  Timeout: none"),
        };
    });

    ui.add_space(20.0);
    ui.label(format!("Config will be written to {}", path.display()));
    ui.label("Click 'Save & Exit' to save and close the wizard.");
    ui.label("You will need to restart the application after setup.");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_step_requires_valid_config() {
        let mut wizard = SetupWizard::new();
        wizard.current_step = 1;
        assert!(wizard.can_proceed());

        wizard.config.api.base_url = "localhost:5000".to_string();
        assert!(!wizard.can_proceed());

        wizard.config.api.base_url = "http://localhost:5000".to_string();
        wizard.api_test_state = ConnectionTestState::Testing;
        assert!(!wizard.can_proceed());

        wizard.api_test_state = ConnectionTestState::Failed("refused".to_string());
        assert!(wizard.can_proceed());
    }

    #[test]
    fn test_with_config_keeps_values() {
        let mut config = AppConfig::default();
        config.api.timeout_secs = 12;
        let wizard = SetupWizard::with_config(config);
        assert_eq!(wizard.timeout_input, "12");
        assert_eq!(wizard.step_title(), "Welcome");
    }
}
