//! Settings panel for the backend connection and UI options.

use eframe::egui::{self, RichText};

use super::app::{App, Panel};
use super::components::{back_button, colors, panel_header};
use crate::config::{AppConfig, StartPanel};

const START_PANELS: [StartPanel; 5] = [
    StartPanel::Dashboard,
    StartPanel::Departments,
    StartPanel::Positions,
    StartPanel::Vacancies,
    StartPanel::Employees,
];

/// Show the settings panel.
/// Returns `true` if the back button was clicked.
pub fn show(app: &mut App, ui: &mut egui::Ui) -> bool {
    let go_back = back_button(ui);
    panel_header(ui, "Settings");

    egui::ScrollArea::vertical().show(ui, |ui| {
        // Backend Connection
        ui.group(|ui| {
            ui.heading("Backend Connection");
            ui.add_space(5.0);

            egui::Grid::new("api_settings_grid")
                .num_columns(2)
                .spacing([10.0, 8.0])
                .show(ui, |ui| {
                    ui.label("API URL:");
                    if ui.text_edit_singleline(&mut app.config.api.base_url).changed() {
                        app.config_modified = true;
                        app.directory.connection_ok = None; // Reset status on change
                    }
                    ui.end_row();

                    ui.label("Timeout (seconds, 0 = none):");
                    let mut timeout_str = app.config.api.timeout_secs.to_string();
                    if ui.text_edit_singleline(&mut timeout_str).changed()
                        && let Ok(timeout) = timeout_str.parse()
                    {
                        app.config.api.timeout_secs = timeout;
                        app.config_modified = true;
                    }
                    ui.end_row();
                });

            ui.add_space(5.0);

            ui.horizontal(|ui| {
                if ui
                    .add_enabled(!app.testing_connection, egui::Button::new("Test Connection"))
                    .clicked()
                {
                    app.test_connection();
                }

                // Inline status indicator
                if app.testing_connection {
                    ui.spinner();
                } else {
                    match app.directory.connection_ok {
                        Some(true) => {
                            ui.label(RichText::new("Connected").color(colors::SUCCESS));
                        }
                        Some(false) => {
                            ui.label(RichText::new("Failed").color(colors::ERROR));
                        }
                        None => {}
                    }
                }
            });

            if let Err(e) = app.config.validate() {
                ui.add_space(5.0);
                ui.colored_label(colors::ERROR, e.to_string());
            }
        });

        ui.add_space(15.0);

        // UI Options
        ui.group(|ui| {
            ui.heading("UI Options");
            ui.add_space(5.0);

            ui.horizontal(|ui| {
                ui.label("Start screen:");
                let current = Panel::from(app.config.ui.start_panel).name();
                egui::ComboBox::from_id_salt("start_panel")
                    .selected_text(current)
                    .show_ui(ui, |ui| {
                        for start in START_PANELS {
                            if ui
                                .selectable_value(&mut app.config.ui.start_panel, start, Panel::from(start).name())
                                .changed()
                            {
                                app.config_modified = true;
                            }
                        }
                    });
            });
        });

        ui.add_space(20.0);

        // Action buttons
        ui.horizontal(|ui| {
            let save_btn = egui::Button::new("Save Settings");
            if ui.add_enabled(app.config_modified, save_btn).clicked() {
                app.save_config();
            }

            if app.config_modified {
                ui.label(RichText::new("(unsaved changes)").color(colors::WARNING).italics());
            }

            if ui.button("Reset to Defaults").clicked() {
                app.config = AppConfig::default();
                app.config_modified = true;
                app.directory.connection_ok = None;
            }
        });

        ui.add_space(10.0);
        ui.label(RichText::new(format!("Config file: {}", app.config_path.display())).small().weak());
    });

    go_back
}
