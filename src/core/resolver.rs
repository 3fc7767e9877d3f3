//! Label resolution between prompt labels and durable ids
//!
//! A `LabelSet` is built from the rows offered in a prompt and keeps each
//! row's id next to its label, so the label the operator picks maps back to
//! exactly one id. Positions in the prompt list are never used as ids.
//!
//! Department names are unique, so a department's label is its name. Role
//! titles and employee names are not, so their labels embed the id:
//! `Engineer (ID: 1)`, `Jane Doe (ID: 4)`.

use thiserror::Error;

use crate::core::entity::{Department, Employee, EmployeeView, EntityKind, Role};

/// Errors raised when a label cannot be turned back into a single id
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResolveError {
    #[error("'{label}' matches {} {} records (IDs {ids:?}); names must be unique", .ids.len(), .kind)]
    Ambiguous {
        kind: EntityKind,
        label: String,
        ids: Vec<i64>,
    },

    #[error("No {kind} matches '{label}'")]
    UnknownLabel { kind: EntityKind, label: String },
}

impl ResolveError {
    /// Ambiguity means a uniqueness invariant no longer holds
    pub fn is_fatal(&self) -> bool {
        matches!(self, ResolveError::Ambiguous { .. })
    }
}

/// Format a display name with its id embedded
pub fn with_id(name: &str, id: i64) -> String {
    format!("{} (ID: {})", name, id)
}

/// Require exactly one id for `label`
pub fn expect_unique(kind: EntityKind, label: &str, ids: Vec<i64>) -> Result<i64, ResolveError> {
    match ids.as_slice() {
        [id] => Ok(*id),
        [] => Err(ResolveError::UnknownLabel {
            kind,
            label: label.to_string(),
        }),
        _ => Err(ResolveError::Ambiguous {
            kind,
            label: label.to_string(),
            ids,
        }),
    }
}

/// A prompt choice: the label shown and the id it stands for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Labeled {
    pub id: i64,
    pub label: String,
}

/// The candidate set for one prompt, carrying id + label pairs
#[derive(Debug, Clone)]
pub struct LabelSet {
    kind: EntityKind,
    entries: Vec<Labeled>,
}

impl LabelSet {
    fn new(kind: EntityKind, entries: Vec<Labeled>) -> Self {
        Self { kind, entries }
    }

    pub fn departments(rows: &[Department]) -> Self {
        let entries = rows
            .iter()
            .map(|d| Labeled {
                id: d.id,
                label: d.name.clone(),
            })
            .collect();
        Self::new(EntityKind::Department, entries)
    }

    pub fn roles(rows: &[Role]) -> Self {
        let entries = rows
            .iter()
            .map(|r| Labeled {
                id: r.id,
                label: with_id(&r.title, r.id),
            })
            .collect();
        Self::new(EntityKind::Role, entries)
    }

    pub fn employees(rows: &[Employee]) -> Self {
        let entries = rows
            .iter()
            .map(|e| Labeled {
                id: e.id,
                label: with_id(&e.full_name(), e.id),
            })
            .collect();
        Self::new(EntityKind::Employee, entries)
    }

    pub fn employee_views(rows: &[EmployeeView]) -> Self {
        let entries = rows
            .iter()
            .map(|e| Labeled {
                id: e.id,
                label: with_id(&e.full_name(), e.id),
            })
            .collect();
        Self::new(EntityKind::Employee, entries)
    }

    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Labels in presentation order
    pub fn labels(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.label.clone()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Labeled> {
        self.entries.iter()
    }

    /// Map a chosen label back to its id
    pub fn resolve(&self, label: &str) -> Result<i64, ResolveError> {
        let ids = self
            .entries
            .iter()
            .filter(|e| e.label == label)
            .map(|e| e.id)
            .collect();
        expect_unique(self.kind, label, ids)
    }

    /// Display label for an id in this set
    pub fn label_for(&self, id: i64) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.id == id)
            .map(|e| e.label.as_str())
    }
}
