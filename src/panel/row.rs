//! Display-row projection of a record.

use super::entity::Entity;
use super::ids::{Control, ElementId};

/// One field cell of a display row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldCell {
    pub element_id: ElementId,
    pub label: &'static str,
    pub text: String,
}

/// One action control of a display row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlView {
    pub element_id: ElementId,
    pub control: Control,
    pub class_name: String,
    pub caption: &'static str,
}

/// Rendered row: container id, field cells and controls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    pub element_id: ElementId,
    pub fields: Vec<FieldCell>,
    pub controls: Vec<ControlView>,
}

impl RowView {
    /// Text of the field with the given key.
    pub fn text(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|cell| matches!(&cell.element_id.part, Some(super::ids::Part::Field(k)) if k == key))
            .map(|cell| cell.text.as_str())
    }
}

/// Build the display row for `record`.
pub fn render_row<E: Entity>(record: &E) -> RowView {
    let kind = E::KIND;
    let id = record.id();

    let fields = record
        .fields()
        .into_iter()
        .map(|field| FieldCell {
            element_id: ElementId::field(kind, id, field.key),
            label: field.label,
            text: field.text,
        })
        .collect();

    RowView {
        element_id: ElementId::row(kind, id),
        fields,
        controls: E::controls().iter().map(|&c| control_view::<E>(record, c)).collect(),
    }
}

/// Submit/cancel controls shown while a row is being edited.
pub fn editing_controls<E: Entity>(record: &E) -> Vec<ControlView> {
    [Control::SubmitEdit, Control::CancelEdit]
        .into_iter()
        .map(|c| control_view::<E>(record, c))
        .collect()
}

fn control_view<E: Entity>(record: &E, control: Control) -> ControlView {
    ControlView {
        element_id: ElementId::control(E::KIND, record.id(), control),
        control,
        class_name: control.class_name(E::KIND),
        caption: control.caption(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Department;
    use crate::panel::dispatch::PanelAction;
    use crate::panel::ids::{EntityId, EntityKind};

    fn decoded(controls: &[ControlView]) -> Vec<Option<PanelAction>> {
        controls
            .iter()
            .map(|c| PanelAction::from_element_id(EntityKind::Department, &c.element_id.to_string()))
            .collect()
    }

    fn eng() -> Department {
        Department {
            id: 1,
            name: "Eng".to_string(),
            description: "Engineering".to_string(),
        }
    }

    #[test]
    fn test_render_department_row() {
        let row = render_row(&eng());

        assert_eq!(row.element_id.to_string(), "department-1");
        assert_eq!(row.text("name"), Some("Eng"));
        assert_eq!(row.text("description"), Some("Engineering"));

        let field_ids: Vec<String> = row.fields.iter().map(|f| f.element_id.to_string()).collect();
        assert_eq!(field_ids, ["department-1-name", "department-1-description"]);

        let control_ids: Vec<String> = row.controls.iter().map(|c| c.element_id.to_string()).collect();
        assert_eq!(control_ids, ["department-1-delete-button", "department-1-edit-button"]);
        assert_eq!(row.controls[0].class_name, "department-delete-button");
        assert_eq!(
            decoded(&row.controls),
            [Some(PanelAction::Delete(EntityId(1))), Some(PanelAction::BeginEdit(EntityId(1)))]
        );
    }

    #[test]
    fn test_editing_controls() {
        let controls = editing_controls(&eng());
        assert_eq!(controls[0].element_id.to_string(), "department-1-submit-edit-button");
        assert_eq!(
            decoded(&controls),
            [Some(PanelAction::SubmitEdit(EntityId(1))), Some(PanelAction::CancelEdit(EntityId(1)))]
        );
    }
}
