//! Table rendering for view results
//!
//! Rows arrive as plain display strings keyed by an ordered column list;
//! nothing flows back from here to the store.

use tabled::{builder::Builder, settings::Style};

use crate::cli::helpers::format_salary;
use crate::core::entity::{Department, EmployeeView, EntityKind, RoleView};

/// An ordered result set ready for display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultSet {
    pub kind: EntityKind,
    pub columns: Vec<&'static str>,
    pub rows: Vec<Vec<String>>,
}

impl ResultSet {
    pub fn departments(rows: &[Department]) -> Self {
        Self {
            kind: EntityKind::Department,
            columns: vec!["ID", "Name"],
            rows: rows
                .iter()
                .map(|d| vec![d.id.to_string(), d.name.clone()])
                .collect(),
        }
    }

    pub fn roles(rows: &[RoleView]) -> Self {
        Self {
            kind: EntityKind::Role,
            columns: vec!["ID", "Title", "Department", "Salary"],
            rows: rows
                .iter()
                .map(|r| {
                    vec![
                        r.id.to_string(),
                        r.title.clone(),
                        r.department.clone(),
                        format_salary(r.salary),
                    ]
                })
                .collect(),
        }
    }

    pub fn employees(rows: &[EmployeeView]) -> Self {
        Self {
            kind: EntityKind::Employee,
            columns: vec![
                "ID",
                "First Name",
                "Last Name",
                "Title",
                "Department",
                "Salary",
                "Is Manager",
                "Manager",
            ],
            rows: rows
                .iter()
                .map(|e| {
                    vec![
                        e.id.to_string(),
                        e.first_name.clone(),
                        e.last_name.clone(),
                        e.title.clone(),
                        e.department.clone(),
                        format_salary(e.salary),
                        if e.is_manager { "Yes" } else { "No" }.to_string(),
                        e.manager.clone().unwrap_or_else(|| "None".to_string()),
                    ]
                })
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Value of `column` in row `index`, if both exist
    pub fn cell(&self, index: usize, column: &str) -> Option<&str> {
        let col = self.columns.iter().position(|c| *c == column)?;
        self.rows.get(index)?.get(col).map(String::as_str)
    }
}

/// Render a result set as a table, or a notice when it has no rows
pub fn render(set: &ResultSet) -> String {
    if set.is_empty() {
        return format!("No {} found.\n", set.kind.plural());
    }

    let mut builder = Builder::default();
    builder.push_record(set.columns.iter().copied());
    for row in &set.rows {
        builder.push_record(row.iter().map(String::as_str));
    }

    let mut output = builder.build().with(Style::psql()).to_string();
    output.push('\n');
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_empty() {
        let set = ResultSet::departments(&[]);
        assert_eq!(render(&set), "No departments found.\n");
    }

    #[test]
    fn test_render_departments() {
        let set = ResultSet::departments(&[Department {
            id: 1,
            name: "Engineering".to_string(),
        }]);
        let out = render(&set);
        assert!(out.contains("ID"));
        assert!(out.contains("Name"));
        assert!(out.contains("Engineering"));
    }

    #[test]
    fn test_employee_without_manager_shows_none() {
        let set = ResultSet::employees(&[EmployeeView {
            id: 3,
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            title: "Engineer".to_string(),
            department: "Engineering".to_string(),
            salary: 80000.0,
            is_manager: false,
            manager: None,
        }]);

        assert_eq!(set.cell(0, "Manager"), Some("None"));
        assert_eq!(set.cell(0, "Is Manager"), Some("No"));
        assert_eq!(set.cell(0, "Salary"), Some("80000.00"));
        assert_eq!(set.cell(1, "Manager"), None);
        assert!(render(&set).contains("Jane"));
    }

    #[test]
    fn test_role_columns() {
        let set = ResultSet::roles(&[RoleView {
            id: 1,
            title: "Engineer".to_string(),
            department: "Engineering".to_string(),
            salary: 80000.0,
        }]);
        assert_eq!(set.columns, vec!["ID", "Title", "Department", "Salary"]);
        assert_eq!(set.cell(0, "Department"), Some("Engineering"));
    }
}
