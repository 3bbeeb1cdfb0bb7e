//! Per-entity panel state: rows, inline editing and the create form.

use std::collections::HashMap;

use super::entity::{Entity, EntityForm};
use super::ids::EntityId;
use super::row::{RowView, render_row};

/// Display or inline-edit mode of a row.
#[derive(Debug, Clone)]
pub enum RowMode<F> {
    Display,
    Editing { form: F, error: Option<String> },
}

/// A record and how it is currently shown.
#[derive(Debug, Clone)]
pub struct Row<E: Entity> {
    pub record: E,
    pub mode: RowMode<E::EditForm>,
}

impl<E: Entity> Row<E> {
    fn display(record: E) -> Self {
        Self {
            record,
            mode: RowMode::Display,
        }
    }

    pub fn id(&self) -> EntityId {
        self.record.id()
    }

    pub fn view(&self) -> RowView {
        render_row(&self.record)
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.mode, RowMode::Editing { .. })
    }

    /// Inline error of an editing row.
    pub fn edit_error(&self) -> Option<&str> {
        match &self.mode {
            RowMode::Editing { error, .. } => error.as_deref(),
            RowMode::Display => None,
        }
    }
}

/// Create affordance or open create form.
#[derive(Debug, Clone)]
pub enum CreateState<F> {
    Closed,
    Open { form: F },
}

/// Progress of the list request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadStatus {
    #[default]
    Idle,
    Loading,
    Loaded,
    Failed,
}

/// Completed request reported back to a panel.
#[derive(Debug, Clone)]
pub enum PanelEvent<E> {
    Loaded(Vec<E>),
    LoadFailed(String),
    Created(E),
    CreateFailed(String),
    Updated(EntityId, E),
    UpdateFailed(EntityId, String),
    Deleted(EntityId),
    DeleteFailed(EntityId, String),
}

/// List + inline edit + create state for one entity type.
#[derive(Debug, Clone)]
pub struct EntityPanel<E: Entity> {
    rows: Vec<Row<E>>,
    index: HashMap<EntityId, usize>,
    create: CreateState<E::CreateForm>,
    status: LoadStatus,
    error: Option<String>,
}

impl<E: Entity> Default for EntityPanel<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Entity> EntityPanel<E> {
    pub fn new() -> Self {
        Self {
            rows: Vec::new(),
            index: HashMap::new(),
            create: CreateState::Closed,
            status: LoadStatus::Idle,
            error: None,
        }
    }

    /// Rows in server order.
    pub fn rows(&self) -> &[Row<E>] {
        &self.rows
    }

    pub fn records(&self) -> impl Iterator<Item = &E> {
        self.rows.iter().map(|row| &row.record)
    }

    pub fn row(&self, id: EntityId) -> Option<&Row<E>> {
        self.index.get(&id).map(|&i| &self.rows[i])
    }

    pub fn get(&self, id: EntityId) -> Option<&E> {
        self.row(id).map(|row| &row.record)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn status(&self) -> LoadStatus {
        self.status
    }

    /// Message in the panel's error area.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    pub fn start_loading(&mut self) {
        self.status = LoadStatus::Loading;
    }

    /// Switch a display row to an edit form pre-filled from its record.
    ///
    /// Returns `false` when the row is missing, already editing, or not editable.
    pub fn begin_edit(&mut self, id: EntityId) -> bool {
        let Some(row) = self.row_mut(id) else {
            return false;
        };
        if row.is_editing() {
            return false;
        }
        match row.record.edit_form() {
            Some(form) => {
                row.mode = RowMode::Editing { form, error: None };
                true
            }
            None => false,
        }
    }

    pub fn edit_form_mut(&mut self, id: EntityId) -> Option<&mut E::EditForm> {
        match &mut self.row_mut(id)?.mode {
            RowMode::Editing { form, .. } => Some(form),
            RowMode::Display => None,
        }
    }

    pub fn cancel_edit(&mut self, id: EntityId) {
        if let Some(row) = self.row_mut(id) {
            row.mode = RowMode::Display;
        }
    }

    /// Validate an editing row. A validation failure stays in the form as an inline error.
    pub fn submit_edit(&mut self, id: EntityId) -> Option<E::Update> {
        let row = self.row_mut(id)?;
        let RowMode::Editing { form, error } = &mut row.mode else {
            return None;
        };
        match form.validate() {
            Ok(output) => {
                *error = None;
                Some(output)
            }
            Err(e) => {
                *error = Some(e.display_text("Invalid input"));
                None
            }
        }
    }

    pub fn create_state(&self) -> &CreateState<E::CreateForm> {
        &self.create
    }

    pub fn is_creating(&self) -> bool {
        matches!(self.create, CreateState::Open { .. })
    }

    pub fn create_form_mut(&mut self) -> Option<&mut E::CreateForm> {
        match &mut self.create {
            CreateState::Open { form } => Some(form),
            CreateState::Closed => None,
        }
    }

    /// Replace the create affordance with an empty form.
    pub fn open_create(&mut self) {
        self.open_create_with(E::CreateForm::default());
    }

    pub fn open_create_with(&mut self, form: E::CreateForm) {
        self.error = None;
        self.create = CreateState::Open { form };
    }

    pub fn cancel_create(&mut self) {
        self.create = CreateState::Closed;
    }

    /// Validate the create form. A validation failure keeps the form open with a panel error.
    pub fn submit_create(&mut self) -> Option<E::Create> {
        let CreateState::Open { form } = &self.create else {
            return None;
        };
        match form.validate() {
            Ok(output) => {
                self.error = None;
                Some(output)
            }
            Err(e) => {
                self.error = Some(e.display_text("Invalid input"));
                None
            }
        }
    }

    /// Apply a completed request.
    pub fn apply(&mut self, event: PanelEvent<E>) {
        match event {
            PanelEvent::Loaded(records) => {
                self.rows = records.into_iter().map(Row::display).collect();
                self.reindex();
                self.status = LoadStatus::Loaded;
                self.error = None;
            }
            PanelEvent::LoadFailed(msg) => {
                self.status = LoadStatus::Failed;
                self.error = Some(msg);
            }
            PanelEvent::Created(record) => {
                self.upsert(record);
                self.create = CreateState::Closed;
                self.error = None;
            }
            PanelEvent::CreateFailed(msg) => {
                self.create = CreateState::Closed;
                self.error = Some(msg);
            }
            PanelEvent::Updated(id, record) => match self.index.get(&id).copied() {
                Some(i) => {
                    let new_id = record.id();
                    self.rows[i] = Row::display(record);
                    if new_id != id {
                        self.reindex();
                    }
                }
                None => tracing::debug!("{} {} updated after removal, ignoring", E::KIND, id),
            },
            PanelEvent::UpdateFailed(id, msg) => match self.row_mut(id).map(|row| &mut row.mode) {
                Some(RowMode::Editing { error, .. }) => *error = Some(msg),
                _ => self.error = Some(msg),
            },
            PanelEvent::Deleted(id) => {
                self.remove(id);
            }
            PanelEvent::DeleteFailed(_, msg) => {
                self.error = Some(msg);
            }
        }
    }

    /// Drop the row for `id`, returning its record.
    pub fn remove(&mut self, id: EntityId) -> Option<E> {
        let i = self.index.get(&id).copied()?;
        let row = self.rows.remove(i);
        self.reindex();
        Some(row.record)
    }

    /// Append a record, or replace the row that already has its id.
    fn upsert(&mut self, record: E) {
        match self.index.get(&record.id()).copied() {
            Some(i) => self.rows[i] = Row::display(record),
            None => {
                self.index.insert(record.id(), self.rows.len());
                self.rows.push(Row::display(record));
            }
        }
    }

    fn row_mut(&mut self, id: EntityId) -> Option<&mut Row<E>> {
        let i = *self.index.get(&id)?;
        self.rows.get_mut(i)
    }

    fn reindex(&mut self) {
        self.index = self.rows.iter().enumerate().map(|(i, row)| (row.id(), i)).collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Department, UpdateDepartment};

    fn dept(id: i32, name: &str, description: &str) -> Department {
        Department {
            id,
            name: name.to_string(),
            description: description.to_string(),
        }
    }

    fn loaded(records: Vec<Department>) -> EntityPanel<Department> {
        let mut panel = EntityPanel::new();
        panel.start_loading();
        panel.apply(PanelEvent::Loaded(records));
        panel
    }

    #[test]
    fn test_load_renders_one_row_per_record_in_order() {
        let panel = loaded(vec![dept(3, "Ops", ""), dept(1, "Eng", "Engineering"), dept(2, "HR", "")]);

        assert_eq!(panel.status(), LoadStatus::Loaded);
        let ids: Vec<String> = panel.rows().iter().map(|r| r.view().element_id.to_string()).collect();
        assert_eq!(ids, ["department-3", "department-1", "department-2"]);
    }

    #[test]
    fn test_load_failure_sets_error() {
        let mut panel = EntityPanel::<Department>::new();
        panel.start_loading();
        panel.apply(PanelEvent::LoadFailed("error loading departments".to_string()));

        assert_eq!(panel.status(), LoadStatus::Failed);
        assert_eq!(panel.error(), Some("error loading departments"));
        assert!(panel.is_empty());
    }

    #[test]
    fn test_delete_removes_only_matching_row() {
        let mut panel = loaded(vec![dept(1, "Eng", ""), dept(2, "HR", ""), dept(3, "Ops", "")]);
        panel.apply(PanelEvent::Deleted(EntityId(2)));

        assert_eq!(panel.len(), 2);
        assert!(panel.get(EntityId(2)).is_none());
        assert_eq!(panel.get(EntityId(1)).unwrap().name, "Eng");
        assert_eq!(panel.get(EntityId(3)).unwrap().name, "Ops");
    }

    #[test]
    fn test_delete_failure_keeps_row() {
        let mut panel = loaded(vec![dept(1, "Eng", "")]);
        panel.apply(PanelEvent::DeleteFailed(EntityId(1), "error deleting department".to_string()));

        assert_eq!(panel.len(), 1);
        assert_eq!(panel.error(), Some("error deleting department"));
    }

    #[test]
    fn test_begin_edit_prefills_from_record() {
        let mut panel = loaded(vec![dept(1, "Eng", "Engineering")]);
        assert!(panel.begin_edit(EntityId(1)));
        assert!(!panel.begin_edit(EntityId(1)));

        let form = panel.edit_form_mut(EntityId(1)).unwrap();
        assert_eq!(form.name, "Eng");
        assert_eq!(form.description, "Engineering");
    }

    #[test]
    fn test_successful_edit_shows_server_record() {
        let mut panel = loaded(vec![dept(1, "Eng", "Engineering")]);
        panel.begin_edit(EntityId(1));
        panel.edit_form_mut(EntityId(1)).unwrap().name = "  engineering team ".to_string();

        let update: UpdateDepartment = panel.submit_edit(EntityId(1)).unwrap();
        assert_eq!(update.name, "engineering team");

        // Server normalizes the name; the row must show its version.
        panel.apply(PanelEvent::Updated(EntityId(1), dept(1, "Engineering Team", "Engineering")));

        let row = panel.row(EntityId(1)).unwrap();
        assert!(!row.is_editing());
        assert_eq!(row.view().text("name"), Some("Engineering Team"));
    }

    #[test]
    fn test_failed_edit_keeps_form_and_inputs() {
        let mut panel = loaded(vec![dept(1, "Eng", "Engineering")]);
        panel.begin_edit(EntityId(1));
        panel.edit_form_mut(EntityId(1)).unwrap().name = "Platform".to_string();
        assert!(panel.submit_edit(EntityId(1)).is_some());

        panel.apply(PanelEvent::UpdateFailed(EntityId(1), "department not found".to_string()));

        let row = panel.row(EntityId(1)).unwrap();
        assert!(row.is_editing());
        assert_eq!(row.edit_error(), Some("department not found"));
        assert_eq!(panel.edit_form_mut(EntityId(1)).unwrap().name, "Platform");
        assert_eq!(panel.get(EntityId(1)).unwrap().name, "Eng");
    }

    #[test]
    fn test_edit_validation_short_circuits() {
        let mut panel = loaded(vec![dept(1, "Eng", "")]);
        panel.begin_edit(EntityId(1));
        panel.edit_form_mut(EntityId(1)).unwrap().name = "   ".to_string();

        assert!(panel.submit_edit(EntityId(1)).is_none());
        assert_eq!(panel.row(EntityId(1)).unwrap().edit_error(), Some("Name is required"));
    }

    #[test]
    fn test_cancel_edit_restores_display() {
        let mut panel = loaded(vec![dept(1, "Eng", "")]);
        panel.begin_edit(EntityId(1));
        panel.edit_form_mut(EntityId(1)).unwrap().name = "Changed".to_string();
        panel.cancel_edit(EntityId(1));

        let row = panel.row(EntityId(1)).unwrap();
        assert!(!row.is_editing());
        assert_eq!(row.view().text("name"), Some("Eng"));
    }

    #[test]
    fn test_create_appends_server_record_and_closes_form() {
        let mut panel = loaded(vec![dept(1, "Eng", "")]);
        panel.open_create();
        let form = panel.create_form_mut().unwrap();
        form.name = "Sales".to_string();
        let request = panel.submit_create().unwrap();
        assert_eq!(request.name, "Sales");

        panel.apply(PanelEvent::Created(dept(42, "Sales", "")));

        assert_eq!(panel.len(), 2);
        assert_eq!(panel.rows()[1].view().element_id.to_string(), "department-42");
        assert!(!panel.is_creating());
    }

    #[test]
    fn test_create_failure_reverts_form_with_error() {
        let mut panel = loaded(vec![]);
        panel.open_create();
        panel.create_form_mut().unwrap().name = "Eng".to_string();
        assert!(panel.submit_create().is_some());

        panel.apply(PanelEvent::CreateFailed("department name is required".to_string()));

        assert!(!panel.is_creating());
        assert!(panel.is_empty());
        assert_eq!(panel.error(), Some("department name is required"));
    }

    #[test]
    fn test_create_validation_keeps_form_open() {
        let mut panel = loaded(vec![]);
        panel.open_create();

        assert!(panel.submit_create().is_none());
        assert!(panel.is_creating());
        assert_eq!(panel.error(), Some("Name is required"));
    }

    #[test]
    fn test_reload_replaces_rows() {
        let mut panel = loaded(vec![dept(1, "Eng", ""), dept(2, "HR", "")]);
        panel.apply(PanelEvent::Loaded(vec![dept(5, "Ops", "")]));

        assert_eq!(panel.len(), 1);
        assert!(panel.get(EntityId(1)).is_none());
        assert!(panel.get(EntityId(5)).is_some());
    }

    #[test]
    fn test_update_after_delete_is_ignored() {
        let mut panel = loaded(vec![dept(1, "Eng", "")]);
        panel.apply(PanelEvent::Deleted(EntityId(1)));
        panel.apply(PanelEvent::Updated(EntityId(1), dept(1, "Eng", "late")));

        assert!(panel.is_empty());
    }
}
