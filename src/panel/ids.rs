//! Typed identifiers and the `{type}-{id}-{suffix}` element-id contract.
//!
//! Rows are addressed by [`EntityId`] inside the panel. [`ElementId`] is the
//! external, string form used for widget ids and for decoding legacy control ids.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Resource type shown by a panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Department,
    Position,
    Vacancy,
    Employee,
}

impl EntityKind {
    pub const ALL: [EntityKind; 4] = [
        EntityKind::Department,
        EntityKind::Position,
        EntityKind::Vacancy,
        EntityKind::Employee,
    ];

    /// Lowercase tag used as the first segment of element ids.
    pub fn tag(self) -> &'static str {
        match self {
            EntityKind::Department => "department",
            EntityKind::Position => "position",
            EntityKind::Vacancy => "vacancy",
            EntityKind::Employee => "employee",
        }
    }

    /// Plural used in headings and load errors.
    pub fn plural(self) -> &'static str {
        match self {
            EntityKind::Department => "departments",
            EntityKind::Position => "positions",
            EntityKind::Vacancy => "vacancies",
            EntityKind::Employee => "employees",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.tag() == tag)
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Server-assigned identifier of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(pub i32);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Per-row action control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    Delete,
    Edit,
    SubmitEdit,
    CancelEdit,
    Hire,
}

impl Control {
    /// Suffix appended to the row id, e.g. `delete-button`.
    pub fn suffix(self) -> &'static str {
        match self {
            Control::Delete => "delete-button",
            Control::Edit => "edit-button",
            Control::SubmitEdit => "submit-edit-button",
            Control::CancelEdit => "cancel-edit-button",
            Control::Hire => "hire-button",
        }
    }

    /// Button caption.
    pub fn caption(self) -> &'static str {
        match self {
            Control::Delete => "Delete",
            Control::Edit => "Edit",
            Control::SubmitEdit => "Save",
            Control::CancelEdit => "Cancel",
            Control::Hire => "Hire",
        }
    }

    /// Class name shared by every control of this type within a panel.
    pub fn class_name(self, kind: EntityKind) -> String {
        format!("{}-{}", kind.tag(), self.suffix())
    }

    fn from_suffix(suffix: &str) -> Option<Self> {
        [
            Control::Delete,
            Control::Edit,
            Control::SubmitEdit,
            Control::CancelEdit,
            Control::Hire,
        ]
        .into_iter()
        .find(|c| c.suffix() == suffix)
    }
}

/// Sub-element of a row.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Part {
    Field(String),
    Control(Control),
}

/// Deterministic element id: `{type}-{id}` or `{type}-{id}-{suffix}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ElementId {
    pub kind: EntityKind,
    pub id: EntityId,
    pub part: Option<Part>,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid element id: {0:?}")]
pub struct InvalidElementId(pub String);

impl ElementId {
    pub fn row(kind: EntityKind, id: EntityId) -> Self {
        Self { kind, id, part: None }
    }

    pub fn field(kind: EntityKind, id: EntityId, key: &str) -> Self {
        Self {
            kind,
            id,
            part: Some(Part::Field(key.to_string())),
        }
    }

    pub fn control(kind: EntityKind, id: EntityId, control: Control) -> Self {
        Self {
            kind,
            id,
            part: Some(Part::Control(control)),
        }
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.kind.tag(), self.id)?;
        match &self.part {
            None => Ok(()),
            Some(Part::Field(key)) => write!(f, "-{key}"),
            Some(Part::Control(control)) => write!(f, "-{}", control.suffix()),
        }
    }
}

impl FromStr for ElementId {
    type Err = InvalidElementId;

    /// The first hyphen ends the type tag. The id may carry one leading minus
    /// sign; the next hyphen after its digits ends it and the rest is the suffix.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || InvalidElementId(s.to_string());

        let (tag, rest) = s.split_once('-').ok_or_else(invalid)?;
        let kind = EntityKind::from_tag(tag).ok_or_else(invalid)?;

        let sign_len = usize::from(rest.starts_with('-'));
        let digits_len = rest[sign_len..]
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(rest.len() - sign_len);
        if digits_len == 0 {
            return Err(invalid());
        }
        let (raw_id, tail) = rest.split_at(sign_len + digits_len);
        let id = raw_id.parse::<i32>().map(EntityId).map_err(|_| invalid())?;

        let part = match tail {
            "" => None,
            _ => {
                let suffix = tail.strip_prefix('-').ok_or_else(invalid)?;
                if suffix.is_empty() {
                    return Err(invalid());
                }
                Some(match Control::from_suffix(suffix) {
                    Some(control) => Part::Control(control),
                    None => Part::Field(suffix.to_string()),
                })
            }
        };

        Ok(Self { kind, id, part })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_and_control_ids() {
        let id = EntityId(1);
        assert_eq!(ElementId::row(EntityKind::Department, id).to_string(), "department-1");
        assert_eq!(
            ElementId::control(EntityKind::Department, id, Control::Delete).to_string(),
            "department-1-delete-button"
        );
        assert_eq!(
            ElementId::field(EntityKind::Vacancy, EntityId(7), "date-opened").to_string(),
            "vacancy-7-date-opened"
        );
    }

    #[test]
    fn test_parse_keeps_hyphenated_suffix() {
        let parsed: ElementId = "vacancy-12-date-opened".parse().unwrap();
        assert_eq!(parsed.kind, EntityKind::Vacancy);
        assert_eq!(parsed.id, EntityId(12));
        assert_eq!(parsed.part, Some(Part::Field("date-opened".to_string())));

        let parsed: ElementId = "vacancy-12-hire-button".parse().unwrap();
        assert_eq!(parsed.part, Some(Part::Control(Control::Hire)));
    }

    #[test]
    fn test_parse_row_id() {
        let parsed: ElementId = "employee-3".parse().unwrap();
        assert_eq!(parsed, ElementId::row(EntityKind::Employee, EntityId(3)));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("open-vacancy".parse::<ElementId>().is_err());
        assert!("department-x-name".parse::<ElementId>().is_err());
        assert!("department-4-".parse::<ElementId>().is_err());
        assert!("".parse::<ElementId>().is_err());
    }

    #[test]
    fn test_negative_id_round_trips() {
        let ids = [
            ElementId::row(EntityKind::Department, EntityId(-1)),
            ElementId::control(EntityKind::Vacancy, EntityId(-42), Control::Hire),
            ElementId::field(EntityKind::Employee, EntityId(i32::MIN), "birth-date"),
        ];
        for id in ids {
            let text = id.to_string();
            assert_eq!(text.parse::<ElementId>().ok(), Some(id), "{text}");
        }
        assert_eq!(
            ElementId::row(EntityKind::Department, EntityId(-1)).to_string(),
            "department--1"
        );
    }

    #[test]
    fn test_parse_rejects_malformed_ids() {
        assert!("department---1".parse::<ElementId>().is_err());
        assert!("department-+1".parse::<ElementId>().is_err());
        assert!("department-1x".parse::<ElementId>().is_err());
        assert!("department-99999999999".parse::<ElementId>().is_err());
        assert!("department-".parse::<ElementId>().is_err());
    }

    #[test]
    fn test_class_name() {
        assert_eq!(Control::Delete.class_name(EntityKind::Vacancy), "vacancy-delete-button");
        assert_eq!(Control::Hire.class_name(EntityKind::Vacancy), "vacancy-hire-button");
    }
}
