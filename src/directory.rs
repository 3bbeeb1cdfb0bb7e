//! Client-side state of every panel and the messages that update it.

use chrono::{DateTime, Local};
use reqwest::Url;

use crate::client::Resource;
use crate::error::Result;
use crate::models::{ChoiceOptions, CompanyInfo, Department, Employee, HireEmployee, NewVacancyForm, Position, Vacancy};
use crate::panel::{
    ChoiceSource, Entity, EntityId, EntityPanel, LoadStatus, Operation, PanelEvent, failure_text,
};

/// Messages from async tasks to UI.
#[derive(Debug)]
pub enum UiMessage {
    CompanyLoaded(CompanyInfo),
    CompanyFailed(String),
    Departments(PanelEvent<Department>),
    Positions(PanelEvent<Position>),
    Vacancies(PanelEvent<Vacancy>),
    Employees(PanelEvent<Employee>),
    /// A hire filled `vacancy_id`; the backend has closed it.
    Hired {
        vacancy_id: EntityId,
        employee: Employee,
    },
    HireFailed(String),
    ConnectionTested(bool),
}

/// Log level for UI messages.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// Log entry for display in the UI.
#[derive(Clone, Debug)]
pub struct LogEntry {
    pub timestamp: DateTime<Local>,
    pub message: String,
    pub level: LogLevel,
}

const MAX_LOG_ENTRIES: usize = 100;

/// Panels, company summary and activity log.
#[derive(Debug, Default)]
pub struct Directory {
    pub company: Option<CompanyInfo>,
    pub departments: EntityPanel<Department>,
    pub positions: EntityPanel<Position>,
    pub vacancies: EntityPanel<Vacancy>,
    pub employees: EntityPanel<Employee>,
    /// Department new vacancies are opened against; also filters the lists.
    pub selected_department: Option<EntityId>,
    pub connection_ok: Option<bool>,
    pub log_messages: Vec<LogEntry>,
}

impl Directory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Log a message to the UI log.
    pub fn log(&mut self, level: LogLevel, message: impl Into<String>) {
        self.log_messages.push(LogEntry {
            timestamp: Local::now(),
            message: message.into(),
            level,
        });

        // Keep only last 100 messages
        if self.log_messages.len() > MAX_LOG_ENTRIES {
            self.log_messages.remove(0);
        }
    }

    pub fn clear_log(&mut self) {
        self.log_messages.clear();
    }

    /// Route an async result to the panel it belongs to.
    pub fn apply(&mut self, msg: UiMessage) {
        match msg {
            UiMessage::CompanyLoaded(info) => {
                self.log(LogLevel::Info, format!("Company: {}", info.company_name));
                self.company = Some(info);
            }
            UiMessage::CompanyFailed(e) => {
                tracing::warn!("Failed to get company info: {}", e);
                self.log(LogLevel::Warning, "Failed to get data from /api/company/");
            }
            UiMessage::Departments(event) => self.apply_panel(event),
            UiMessage::Positions(event) => self.apply_panel(event),
            UiMessage::Vacancies(event) => self.apply_panel(event),
            UiMessage::Employees(event) => self.apply_panel(event),
            UiMessage::Hired { vacancy_id, employee } => {
                self.vacancies.remove(vacancy_id);
                self.log(LogLevel::Success, format!("Hired {}", employee.full_name()));
                self.employees.apply(PanelEvent::Created(employee));
            }
            UiMessage::HireFailed(e) => {
                tracing::error!("Hire failed: {}", e);
                self.log(LogLevel::Error, format!("Hire failed: {e}"));
                self.employees.apply(PanelEvent::CreateFailed(e));
            }
            UiMessage::ConnectionTested(ok) => {
                self.connection_ok = Some(ok);
                if ok {
                    self.log(LogLevel::Success, "Backend connection successful");
                } else {
                    self.log(LogLevel::Error, "Backend connection failed");
                }
            }
        }
    }

    fn apply_panel<E: PanelSlot>(&mut self, event: PanelEvent<E>) {
        let kind = E::KIND;
        let entry = match &event {
            PanelEvent::Loaded(records) => Some((LogLevel::Info, format!("Loaded {} {}", records.len(), kind.plural()))),
            PanelEvent::Created(record) => Some((LogLevel::Success, format!("Created {kind} '{}'", record.title()))),
            PanelEvent::Updated(_, record) => Some((LogLevel::Success, format!("Updated {kind} '{}'", record.title()))),
            PanelEvent::Deleted(id) => Some((LogLevel::Success, format!("Deleted {kind} {id}"))),
            PanelEvent::LoadFailed(e)
            | PanelEvent::CreateFailed(e)
            | PanelEvent::UpdateFailed(_, e)
            | PanelEvent::DeleteFailed(_, e) => {
                tracing::error!("{} request failed: {}", kind, e);
                Some((LogLevel::Error, e.clone()))
            }
        };

        E::panel_mut(self).apply(event);

        if let Some((level, message)) = entry {
            self.log(level, message);
        }
    }

    /// Options for a choice input, drawn from the loaded lists.
    pub fn choices(&self, source: ChoiceSource) -> ChoiceOptions {
        match source {
            ChoiceSource::Departments => self.departments.records().map(|d| (d.id, d.name.clone())).collect(),
            ChoiceSource::Positions => self.positions.records().map(|p| (p.id, p.name.clone())).collect(),
            ChoiceSource::Vacancies => self
                .vacancies
                .records()
                .map(|v| (v.id, format!("{} (opened {})", v.position.name, v.date_opened)))
                .collect(),
        }
    }

    /// Department and position totals for the dashboard.
    ///
    /// A loaded list tracks creates and deletes, so it wins over the company summary,
    /// which is only fetched on refresh.
    pub fn stat_counts(&self) -> (usize, usize) {
        let summary = self.company.as_ref();
        let departments = match (self.departments.status(), summary) {
            (LoadStatus::Loaded, _) | (_, None) => self.departments.len(),
            (_, Some(info)) => info.departments as usize,
        };
        let positions = match (self.positions.status(), summary) {
            (LoadStatus::Loaded, _) | (_, None) => self.positions.len(),
            (_, Some(info)) => info.positions as usize,
        };
        (departments, positions)
    }

    /// Whether any list request is still in flight.
    pub fn is_loading(&self) -> bool {
        [
            self.departments.status(),
            self.positions.status(),
            self.vacancies.status(),
            self.employees.status(),
        ]
        .contains(&LoadStatus::Loading)
    }
}

/// Binds an entity type to its panel inside [`Directory`] and its [`UiMessage`] variant.
pub trait PanelSlot: Resource {
    fn panel(dir: &Directory) -> &EntityPanel<Self>;

    fn panel_mut(dir: &mut Directory) -> &mut EntityPanel<Self>;

    fn message(event: PanelEvent<Self>) -> UiMessage;

    /// Empty create form, seeded from the current selection.
    fn new_form(_dir: &Directory) -> Self::CreateForm {
        Self::CreateForm::default()
    }

    /// Whether a record belongs to `department` when the list is filtered.
    fn in_department(&self, _department: EntityId) -> bool {
        true
    }

    /// Page the row title links to, if any.
    fn detail_link(&self, _base: &Url) -> Option<Url> {
        None
    }

    /// Message for a finished create request.
    fn created(_request: &Self::Create, result: Result<Self>) -> UiMessage {
        Self::message(match result {
            Ok(record) => PanelEvent::Created(record),
            Err(e) => PanelEvent::CreateFailed(e.display_text(&failure_text(Self::KIND, Operation::Create))),
        })
    }
}

impl PanelSlot for Department {
    fn panel(dir: &Directory) -> &EntityPanel<Self> {
        &dir.departments
    }

    fn panel_mut(dir: &mut Directory) -> &mut EntityPanel<Self> {
        &mut dir.departments
    }

    fn message(event: PanelEvent<Self>) -> UiMessage {
        UiMessage::Departments(event)
    }

    fn detail_link(&self, base: &Url) -> Option<Url> {
        Some(self.detail_url(base))
    }
}

impl PanelSlot for Position {
    fn panel(dir: &Directory) -> &EntityPanel<Self> {
        &dir.positions
    }

    fn panel_mut(dir: &mut Directory) -> &mut EntityPanel<Self> {
        &mut dir.positions
    }

    fn message(event: PanelEvent<Self>) -> UiMessage {
        UiMessage::Positions(event)
    }

    fn new_form(dir: &Directory) -> Self::CreateForm {
        crate::models::NewPositionForm {
            department_id: dir.selected_department.map(|id| id.0),
            ..Default::default()
        }
    }

    fn in_department(&self, department: EntityId) -> bool {
        self.department_id == Some(department.0)
    }
}

impl PanelSlot for Vacancy {
    fn panel(dir: &Directory) -> &EntityPanel<Self> {
        &dir.vacancies
    }

    fn panel_mut(dir: &mut Directory) -> &mut EntityPanel<Self> {
        &mut dir.vacancies
    }

    fn message(event: PanelEvent<Self>) -> UiMessage {
        UiMessage::Vacancies(event)
    }

    fn new_form(dir: &Directory) -> Self::CreateForm {
        NewVacancyForm::for_department(dir.selected_department.map(|id| id.0))
    }

    fn in_department(&self, department: EntityId) -> bool {
        self.department_id == Some(department.0)
    }
}

impl PanelSlot for Employee {
    fn panel(dir: &Directory) -> &EntityPanel<Self> {
        &dir.employees
    }

    fn panel_mut(dir: &mut Directory) -> &mut EntityPanel<Self> {
        &mut dir.employees
    }

    fn message(event: PanelEvent<Self>) -> UiMessage {
        UiMessage::Employees(event)
    }

    fn in_department(&self, department: EntityId) -> bool {
        self.department.as_ref().and_then(|d| d.id) == Some(department.0)
    }

    /// Hiring closes the vacancy, so the result goes to both panels.
    fn created(request: &HireEmployee, result: Result<Self>) -> UiMessage {
        match result {
            Ok(employee) => UiMessage::Hired {
                vacancy_id: EntityId(request.vacancy_id),
                employee,
            },
            Err(e) => UiMessage::HireFailed(e.display_text("error hiring employee")),
        }
    }
}
