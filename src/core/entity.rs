//! Entity types - departments, roles and employees
//!
//! Ids are opaque integers assigned by the store, scoped per entity kind.
//! A `Role` always belongs to a `Department`; an `Employee` always holds a
//! `Role` and optionally reports to another `Employee`.

/// The three record kinds held by the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Department,
    Role,
    Employee,
}

impl EntityKind {
    /// Backing table name
    pub fn table(&self) -> &'static str {
        match self {
            EntityKind::Department => "departments",
            EntityKind::Role => "roles",
            EntityKind::Employee => "employees",
        }
    }

    /// Plural noun used in operator notices ("No roles found.")
    pub fn plural(&self) -> &'static str {
        self.table()
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntityKind::Department => write!(f, "department"),
            EntityKind::Role => write!(f, "role"),
            EntityKind::Employee => write!(f, "employee"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Department {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Role {
    pub id: i64,
    pub title: String,
    pub salary: f64,
    pub department_id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Employee {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub is_manager: bool,
    pub role_id: i64,
    /// `None` is the only representation of "no manager"
    pub manager_id: Option<i64>,
}

impl Employee {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Fields for a role insert; `department_id` must already be resolved
#[derive(Debug, Clone, PartialEq)]
pub struct NewRole {
    pub title: String,
    pub salary: f64,
    pub department_id: i64,
}

/// Fields for an employee insert; `role_id` and `manager_id` must already be resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEmployee {
    pub first_name: String,
    pub last_name: String,
    pub is_manager: bool,
    pub role_id: i64,
    pub manager_id: Option<i64>,
}

/// Role joined with its department name (read-only projection)
#[derive(Debug, Clone, PartialEq)]
pub struct RoleView {
    pub id: i64,
    pub title: String,
    pub department: String,
    pub salary: f64,
}

/// Employee joined with role, department and manager name (read-only projection)
#[derive(Debug, Clone, PartialEq)]
pub struct EmployeeView {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub title: String,
    pub department: String,
    pub salary: f64,
    pub is_manager: bool,
    /// Full name of the manager, `None` when `manager_id` is NULL
    pub manager: Option<String>,
}

impl EmployeeView {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Normalize free text to title case: each whitespace-separated word gets an
/// uppercase first letter and lowercase remainder, joined by single spaces.
pub fn title_case(s: &str) -> String {
    s.split_whitespace()
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                None => String::new(),
                Some(c) => c
                    .to_uppercase()
                    .chain(chars.flat_map(|c| c.to_lowercase()))
                    .collect(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
