//! One screen per entity type: toolbar, create form, rows with inline editing.

use chrono::{Local, NaiveDate};
use eframe::egui::{self, Align, CornerRadius, Layout, Margin, RichText, ScrollArea, Ui};
use egui_phosphor::regular::{ARROWS_CLOCKWISE, FLOPPY_DISK, LINK, PLUS, X};

use super::app::App;
use super::components::{back_button, colors, control_button, panel_header, primary_button_with_icon, styled_button_with_icon};
use crate::dates;
use crate::directory::{Directory, PanelSlot};
use crate::models::ChoiceOptions;
use crate::panel::{
    ChoiceSource, ControlView, Entity, EntityForm, EntityId, EntityKind, FormInput, LoadStatus, PanelAction,
    editing_controls,
};

/// Choice options for this frame, taken before any form is borrowed mutably.
struct Choices {
    departments: ChoiceOptions,
    positions: ChoiceOptions,
    vacancies: ChoiceOptions,
}

impl Choices {
    fn new(dir: &Directory) -> Self {
        Self {
            departments: dir.choices(ChoiceSource::Departments),
            positions: dir.choices(ChoiceSource::Positions),
            vacancies: dir.choices(ChoiceSource::Vacancies),
        }
    }

    fn get(&self, source: ChoiceSource) -> &ChoiceOptions {
        match source {
            ChoiceSource::Departments => &self.departments,
            ChoiceSource::Positions => &self.positions,
            ChoiceSource::Vacancies => &self.vacancies,
        }
    }
}

/// Show the panel for entity type `E`.
///
/// Returns `true` if the back button was clicked.
pub fn show<E: PanelSlot>(app: &mut App, ui: &mut Ui, title: &str) -> bool {
    let kind = E::KIND;
    let go_back = back_button(ui);
    panel_header(ui, title);

    let choices = Choices::new(&app.directory);
    // Element ids of the controls clicked this frame.
    let mut clicked: Vec<String> = Vec::new();
    let mut refresh = false;

    // Toolbar
    ui.horizontal(|ui| {
        if !E::panel(&app.directory).is_creating() {
            let open = PanelAction::OpenCreate.element_id(kind);
            ui.push_id(&open, |ui| {
                if primary_button_with_icon(ui, PLUS, &create_caption(kind)).clicked() {
                    clicked.push(open.clone());
                }
            });
            ui.add_space(10.0);
        }

        if styled_button_with_icon(ui, ARROWS_CLOCKWISE, "Refresh").clicked() {
            refresh = true;
        }

        if kind != EntityKind::Department {
            ui.add_space(20.0);
            department_filter(ui, kind, &mut app.directory.selected_department, &choices.departments);
        }

        if E::panel(&app.directory).status() == LoadStatus::Loading {
            ui.add_space(10.0);
            ui.spinner();
        }
    });

    ui.add_space(10.0);

    // Error area
    if let Some(error) = E::panel(&app.directory).error().map(str::to_owned) {
        ui.horizontal(|ui| {
            ui.colored_label(colors::ERROR, error);
            if ui.small_button(X).clicked() {
                E::panel_mut(&mut app.directory).clear_error();
            }
        });
        ui.add_space(10.0);
    }

    // Create form
    if let Some(form) = E::panel_mut(&mut app.directory).create_form_mut() {
        card_frame(ui).show(ui, |ui| {
            ui.label(RichText::new(create_caption(kind)).strong());
            ui.add_space(8.0);
            form_grid(ui, &format!("new-{}", kind.tag()), form.inputs(), &choices);
            ui.add_space(8.0);
            ui.horizontal(|ui| {
                let submit = PanelAction::SubmitCreate.element_id(kind);
                ui.push_id(&submit, |ui| {
                    if primary_button_with_icon(ui, FLOPPY_DISK, "Save").clicked() {
                        clicked.push(submit.clone());
                    }
                });
                let cancel = PanelAction::CancelCreate.element_id(kind);
                ui.push_id(&cancel, |ui| {
                    if styled_button_with_icon(ui, X, "Cancel").clicked() {
                        clicked.push(cancel.clone());
                    }
                });
            });
        });
        ui.add_space(10.0);
    }

    // Rows
    let filter = match kind {
        EntityKind::Department => None,
        _ => app.directory.selected_department,
    };
    let base_url = app.client.base_url().clone();
    let panel = E::panel_mut(&mut app.directory);
    let ids: Vec<EntityId> = panel
        .records()
        .filter(|record| filter.is_none_or(|department| record.in_department(department)))
        .map(|record| record.id())
        .collect();

    ui.label(format!("Showing {} of {} {}", ids.len(), panel.len(), kind.plural()));
    ui.add_space(10.0);

    ScrollArea::vertical().id_salt(kind.plural()).show(ui, |ui| {
        if ids.is_empty() && panel.status() == LoadStatus::Loaded {
            ui.label(RichText::new(format!("No {}", kind.plural())).weak());
        }

        for id in ids {
            let Some(row) = panel.row(id) else {
                continue;
            };
            let view = row.view();
            let row_key = view.element_id.to_string();

            if row.is_editing() {
                let controls = editing_controls(&row.record);
                let error = row.edit_error().map(str::to_owned);
                let Some(form) = panel.edit_form_mut(id) else {
                    continue;
                };
                ui.push_id(&row_key, |ui| {
                    card_frame(ui).show(ui, |ui| {
                        ui.set_min_width(ui.available_width());
                        form_grid(ui, &row_key, form.inputs(), &choices);
                        if let Some(error) = error {
                            ui.colored_label(colors::ERROR, error);
                        }
                        ui.horizontal(|ui| control_row(ui, &controls, &mut clicked));
                    });
                });
                continue;
            }

            let link = row.record.detail_link(&base_url);
            ui.push_id(&row_key, |ui| {
                card_frame(ui).show(ui, |ui| {
                    ui.set_min_width(ui.available_width());
                    ui.horizontal(|ui| {
                        for cell in &view.fields {
                            ui.vertical(|ui| {
                                ui.label(RichText::new(cell.label).small().weak());
                                ui.label(&cell.text);
                            });
                            ui.add_space(16.0);
                        }
                        if let Some(link) = link {
                            ui.hyperlink_to(format!("{LINK} Open"), link.as_str());
                        }
                        ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                            for control in view.controls.iter().rev() {
                                control_row(ui, std::slice::from_ref(control), &mut clicked);
                            }
                        });
                    });
                });
            });
        }
    });

    if refresh {
        app.load::<E>();
    }
    for element_id in clicked {
        app.handle_click::<E>(&element_id);
    }

    go_back
}

fn create_caption(kind: EntityKind) -> String {
    match kind {
        EntityKind::Employee => "Hire Employee".to_string(),
        _ => format!("New {kind}"),
    }
}

fn card_frame(ui: &Ui) -> egui::Frame {
    egui::Frame::new()
        .fill(ui.style().visuals.extreme_bg_color)
        .inner_margin(Margin::same(12))
        .outer_margin(Margin::symmetric(0, 3))
        .corner_radius(CornerRadius::same(6))
}

fn control_row(ui: &mut Ui, controls: &[ControlView], clicked: &mut Vec<String>) {
    for control in controls {
        let element_id = control.element_id.to_string();
        ui.push_id(&element_id, |ui| {
            if control_button(ui, control.control)
                .on_hover_text(&control.class_name)
                .clicked()
            {
                clicked.push(element_id.clone());
            }
        });
    }
}

fn department_filter(ui: &mut Ui, kind: EntityKind, selected: &mut Option<EntityId>, departments: &ChoiceOptions) {
    ui.label("Department:");
    let selected_text = selected
        .and_then(|id| departments.iter().find(|(dept_id, _)| *dept_id == id.0))
        .map(|(_, name)| name.as_str())
        .unwrap_or("All");

    egui::ComboBox::from_id_salt(format!("{}-department-filter", kind.tag()))
        .width(180.0)
        .selected_text(selected_text)
        .show_ui(ui, |ui| {
            ui.selectable_value(selected, None, "All");
            for (id, name) in departments {
                ui.selectable_value(selected, Some(EntityId(*id)), name.as_str());
            }
        });
}

/// Two-column grid of labelled inputs.
fn form_grid(ui: &mut Ui, id: &str, inputs: Vec<FormInput<'_>>, choices: &Choices) {
    egui::Grid::new(format!("{id}-form"))
        .num_columns(2)
        .spacing([20.0, 8.0])
        .show(ui, |ui| {
            for input in inputs {
                let key = input.key();
                match input {
                    FormInput::Text { label, value, .. } => {
                        ui.label(format!("{label}:"));
                        ui.add(egui::TextEdit::singleline(value).desired_width(250.0));
                    }
                    FormInput::Date { label, value, .. } => {
                        ui.label(format!("{label}:"));
                        date_input(ui, &format!("{id}-{key}"), value);
                    }
                    FormInput::Choice {
                        label, source, value, ..
                    } => {
                        ui.label(format!("{label}:"));
                        choice_input(ui, &format!("{id}-{key}"), value, choices.get(source));
                    }
                    FormInput::Flag { label, value, .. } => {
                        ui.label("");
                        ui.checkbox(value, label);
                    }
                }
                ui.end_row();
            }
        });
}

/// `MM/DD/YYYY` text input with a calendar picker.
fn date_input(ui: &mut Ui, id: &str, value: &mut String) {
    ui.horizontal(|ui| {
        let is_valid = dates::normalize_date_input(value).is_some();
        let text_color = if is_valid {
            ui.visuals().text_color()
        } else {
            colors::ERROR
        };
        ui.add(
            egui::TextEdit::singleline(value)
                .desired_width(120.0)
                .hint_text("MM/DD/YYYY")
                .text_color(text_color),
        );

        let mut date = dates::parse_flexible_date(value).unwrap_or_else(|| Local::now().date_naive());
        let before: NaiveDate = date;
        ui.add(egui_extras::DatePickerButton::new(&mut date).id_salt(id));
        if date != before {
            *value = date.format(dates::DISPLAY_FORMAT).to_string();
        }
    });
}

fn choice_input(ui: &mut Ui, id: &str, value: &mut Option<i32>, options: &ChoiceOptions) {
    let selected_text = value
        .and_then(|v| options.iter().find(|(option_id, _)| *option_id == v))
        .map(|(_, name)| name.as_str())
        .unwrap_or("Select...");

    egui::ComboBox::from_id_salt(id)
        .width(250.0)
        .selected_text(selected_text)
        .show_ui(ui, |ui| {
            for (option_id, name) in options {
                ui.selectable_value(value, Some(*option_id), name.as_str());
            }
        });
}
