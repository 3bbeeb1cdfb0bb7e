//! Entity Panel: the list, inline-edit, delete and create pattern shared by every screen.
//!
//! Everything here is UI-agnostic; `crate::ui::entity_panel` draws it with egui.

pub mod dispatch;
pub mod entity;
pub mod entity_panel;
pub mod ids;
pub mod row;

pub use dispatch::PanelAction;
pub use entity::{ChoiceSource, Entity, EntityForm, FieldView, FormInput, NoEdit, Operation, failure_text, required};
pub use entity_panel::{CreateState, EntityPanel, LoadStatus, PanelEvent, Row, RowMode};
pub use ids::{Control, ElementId, EntityId, EntityKind, InvalidElementId, Part};
pub use row::{ControlView, FieldCell, RowView, editing_controls, render_row};
