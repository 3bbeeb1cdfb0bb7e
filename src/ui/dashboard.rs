//! Dashboard panel with company summary, navigation cards and activity log.

use eframe::egui::{self, Color32, CornerRadius, Margin, RichText, ScrollArea, Ui};
use egui_phosphor::regular::{BRIEFCASE, BUILDINGS, GEAR, MEGAPHONE, USERS};

use super::app::{App, Panel};
use super::components::{colors, dashboard_card, styled_button};
use crate::directory::LogLevel;

/// Show the dashboard panel.
///
/// Returns `Some(panel)` if navigation is requested.
pub fn show(app: &mut App, ui: &mut Ui) -> Option<Panel> {
    let mut next_panel = None;

    ui.vertical_centered(|ui| {
        ui.add_space(30.0);

        let company_name = app
            .directory
            .company
            .as_ref()
            .map(|c| c.company_name.as_str())
            .unwrap_or("Company Directory");
        ui.label(RichText::new(company_name).size(32.0).strong());
        ui.add_space(5.0);
        ui.label(RichText::new("Departments, positions, vacancies and staff").size(14.0).weak());

        ui.add_space(30.0);

        // Stat cards row
        ui.horizontal(|ui| {
            let available = ui.available_width();
            let start_offset = ((available - 700.0) / 2.0).max(0.0);
            ui.add_space(start_offset);

            let (departments, positions) = app.directory.stat_counts();
            stat_card(ui, "Departments", &departments.to_string(), "Organizational units");
            stat_card(ui, "Positions", &positions.to_string(), "Defined roles");
            stat_card(
                ui,
                "Open Vacancies",
                &app.directory.vacancies.len().to_string(),
                "Waiting to be filled",
            );
            stat_card(
                ui,
                "Employees",
                &app.directory.employees.len().to_string(),
                "Current staff",
            );
        });

        ui.add_space(30.0);

        // Navigation cards row
        let available = ui.available_width();
        let num_cards = 5.0;
        let spacing = 24.0;
        let total_spacing = spacing * (num_cards - 1.0);
        let card_width = ((available - total_spacing) / num_cards).clamp(140.0, 220.0);
        let card_height = card_width * 0.75;
        let card_size = egui::vec2(card_width, card_height);
        let total_width = card_width * num_cards + total_spacing;
        let start_offset = ((available - total_width) / 2.0).max(0.0);

        ui.horizontal(|ui| {
            ui.add_space(start_offset);

            let cards = [
                (Panel::Departments, "Departments", "Organizational units", BUILDINGS),
                (Panel::Positions, "Positions", "Roles per department", BRIEFCASE),
                (Panel::Vacancies, "Vacancies", "Open and hire", MEGAPHONE),
                (Panel::Employees, "Employees", "Staff records", USERS),
                (Panel::Settings, "Settings", "Backend connection", GEAR),
            ];
            for (i, (panel, title, description, icon)) in cards.into_iter().enumerate() {
                if i > 0 {
                    ui.add_space(spacing);
                }
                if dashboard_card(ui, title, description, icon, card_size).clicked() {
                    next_panel = Some(panel);
                }
            }
        });

        ui.add_space(30.0);
    });

    // Recent Activity
    egui::Frame::new()
        .fill(ui.style().visuals.extreme_bg_color)
        .inner_margin(Margin::same(15))
        .outer_margin(Margin::symmetric(10, 0))
        .corner_radius(CornerRadius::same(8))
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.label(RichText::new("Recent Activity").strong());
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if !app.directory.log_messages.is_empty() && styled_button(ui, "Clear").clicked() {
                        app.directory.clear_log();
                    }
                });
            });
            ui.add_space(10.0);

            ScrollArea::vertical().max_height(200.0).show(ui, |ui| {
                if app.directory.log_messages.is_empty() {
                    ui.label(RichText::new("No recent activity").weak());
                    return;
                }

                for entry in app.directory.log_messages.iter().rev().take(20) {
                    let color = match entry.level {
                        LogLevel::Info => Color32::GRAY,
                        LogLevel::Success => colors::SUCCESS,
                        LogLevel::Warning => colors::WARNING,
                        LogLevel::Error => colors::ERROR,
                    };

                    ui.horizontal(|ui| {
                        ui.label(
                            RichText::new(entry.timestamp.format("%H:%M:%S").to_string())
                                .small()
                                .color(Color32::DARK_GRAY),
                        );
                        ui.label(RichText::new(&entry.message).color(color));
                    });
                }
            });
        });

    next_panel
}

/// Render a stat card with title, value, and subtitle.
fn stat_card(ui: &mut Ui, title: &str, value: &str, subtitle: &str) {
    egui::Frame::new()
        .fill(ui.style().visuals.extreme_bg_color)
        .inner_margin(Margin::same(15))
        .outer_margin(Margin::same(5))
        .corner_radius(CornerRadius::same(8))
        .show(ui, |ui| {
            ui.set_min_width(150.0);

            ui.vertical(|ui| {
                ui.label(RichText::new(title).small());
                ui.label(RichText::new(value).heading().strong());
                ui.label(RichText::new(subtitle).small().weak());
            });
        });
}
