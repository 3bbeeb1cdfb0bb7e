//! Typed actions emitted by panel controls.

use super::ids::{Control, ElementId, EntityId, EntityKind, Part};

/// What a click on a panel control asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelAction {
    Delete(EntityId),
    BeginEdit(EntityId),
    SubmitEdit(EntityId),
    CancelEdit(EntityId),
    Hire(EntityId),
    OpenCreate,
    SubmitCreate,
    CancelCreate,
}

impl PanelAction {
    /// Action bound to a row control.
    pub fn for_control(id: EntityId, control: Control) -> Self {
        match control {
            Control::Delete => PanelAction::Delete(id),
            Control::Edit => PanelAction::BeginEdit(id),
            Control::SubmitEdit => PanelAction::SubmitEdit(id),
            Control::CancelEdit => PanelAction::CancelEdit(id),
            Control::Hire => PanelAction::Hire(id),
        }
    }

    /// Element id of the control that emits this action in a `kind` panel.
    pub fn element_id(self, kind: EntityKind) -> String {
        let tag = kind.tag();
        let row = |id, control| ElementId::control(kind, id, control).to_string();
        match self {
            PanelAction::Delete(id) => row(id, Control::Delete),
            PanelAction::BeginEdit(id) => row(id, Control::Edit),
            PanelAction::SubmitEdit(id) => row(id, Control::SubmitEdit),
            PanelAction::CancelEdit(id) => row(id, Control::CancelEdit),
            PanelAction::Hire(id) => row(id, Control::Hire),
            PanelAction::OpenCreate => format!("open-{tag}"),
            PanelAction::SubmitCreate => format!("send-new-{tag}-button"),
            PanelAction::CancelCreate => format!("cancel-new-{tag}-button"),
        }
    }

    /// Decode a control element id clicked inside a `kind` panel.
    ///
    /// Ids of other panels, row ids and field ids route nowhere.
    pub fn from_element_id(kind: EntityKind, element_id: &str) -> Option<Self> {
        for action in [
            PanelAction::OpenCreate,
            PanelAction::SubmitCreate,
            PanelAction::CancelCreate,
        ] {
            if action.element_id(kind) == element_id {
                return Some(action);
            }
        }

        let parsed: ElementId = element_id.parse().ok()?;
        if parsed.kind != kind {
            return None;
        }
        match parsed.part? {
            Part::Control(control) => Some(PanelAction::for_control(parsed.id, control)),
            Part::Field(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_row_controls() {
        let kind = EntityKind::Department;
        assert_eq!(
            PanelAction::from_element_id(kind, "department-1-delete-button"),
            Some(PanelAction::Delete(EntityId(1)))
        );
        assert_eq!(
            PanelAction::from_element_id(kind, "department-22-edit-button"),
            Some(PanelAction::BeginEdit(EntityId(22)))
        );
        assert_eq!(
            PanelAction::from_element_id(kind, "department-22-submit-edit-button"),
            Some(PanelAction::SubmitEdit(EntityId(22)))
        );
    }

    #[test]
    fn test_decode_create_controls() {
        let kind = EntityKind::Vacancy;
        assert_eq!(
            PanelAction::from_element_id(kind, "open-vacancy"),
            Some(PanelAction::OpenCreate)
        );
        assert_eq!(
            PanelAction::from_element_id(kind, "send-new-vacancy-button"),
            Some(PanelAction::SubmitCreate)
        );
    }

    #[test]
    fn test_ignores_foreign_and_non_control_ids() {
        let kind = EntityKind::Position;
        assert_eq!(PanelAction::from_element_id(kind, "department-1-delete-button"), None);
        assert_eq!(PanelAction::from_element_id(kind, "position-1-name"), None);
        assert_eq!(PanelAction::from_element_id(kind, "position-1"), None);
        assert_eq!(PanelAction::from_element_id(kind, "positions"), None);
    }

    #[test]
    fn test_element_id_round_trips_through_decoder() {
        let kind = EntityKind::Vacancy;
        let action = PanelAction::Hire(EntityId(9));
        assert_eq!(action.element_id(kind), "vacancy-9-hire-button");
        assert_eq!(PanelAction::from_element_id(kind, &action.element_id(kind)), Some(action));
    }
}
