//! Reads, joined projections and writes against the three tables
//!
//! Every list is ordered by id so repeated reads present rows in a stable order.

use rusqlite::{params, OptionalExtension, Row};

use super::{EntityStore, StoreError};
use crate::core::entity::{
    Department, Employee, EmployeeView, EntityKind, NewEmployee, NewRole, Role, RoleView,
};

const EMPLOYEE_COLUMNS: &str = "id, first_name, last_name, is_manager, role_id, manager_id";

const EMPLOYEE_VIEW_SELECT: &str = r#"
    SELECT e.id, e.first_name, e.last_name, r.title, d.name, r.salary, e.is_manager,
           m.first_name || ' ' || m.last_name
    FROM employees e
    JOIN roles r ON e.role_id = r.id
    JOIN departments d ON r.department_id = d.id
    LEFT JOIN employees m ON e.manager_id = m.id
"#;

fn employee_from_row(row: &Row<'_>) -> rusqlite::Result<Employee> {
    Ok(Employee {
        id: row.get(0)?,
        first_name: row.get(1)?,
        last_name: row.get(2)?,
        is_manager: row.get(3)?,
        role_id: row.get(4)?,
        manager_id: row.get(5)?,
    })
}

fn employee_view_from_row(row: &Row<'_>) -> rusqlite::Result<EmployeeView> {
    Ok(EmployeeView {
        id: row.get(0)?,
        first_name: row.get(1)?,
        last_name: row.get(2)?,
        title: row.get(3)?,
        department: row.get(4)?,
        salary: row.get(5)?,
        is_manager: row.get(6)?,
        manager: row.get(7)?,
    })
}

impl EntityStore {
    /// Run a select and collect every mapped row
    fn collect<T, P, F>(&self, kind: EntityKind, sql: &str, params: P, map: F) -> Result<Vec<T>, StoreError>
    where
        P: rusqlite::Params,
        F: FnMut(&Row<'_>) -> rusqlite::Result<T>,
    {
        let mut stmt = self
            .conn
            .prepare(sql)
            .map_err(|e| StoreError::from_sqlite(kind, e))?;
        let rows = stmt
            .query_map(params, map)
            .map_err(|e| StoreError::from_sqlite(kind, e))?;
        rows.collect::<Result<Vec<_>, _>>()
            .map_err(|e| StoreError::from_sqlite(kind, e))
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Number of rows of the given kind
    pub fn count(&self, kind: EntityKind) -> Result<i64, StoreError> {
        let sql = format!("SELECT COUNT(*) FROM {}", kind.table());
        self.conn
            .query_row(&sql, [], |row| row.get(0))
            .map_err(|e| StoreError::from_sqlite(kind, e))
    }

    pub fn list_departments(&self) -> Result<Vec<Department>, StoreError> {
        self.collect(
            EntityKind::Department,
            "SELECT id, name FROM departments ORDER BY id",
            [],
            |row| {
                Ok(Department {
                    id: row.get(0)?,
                    name: row.get(1)?,
                })
            },
        )
    }

    pub fn list_roles(&self) -> Result<Vec<Role>, StoreError> {
        self.collect(
            EntityKind::Role,
            "SELECT id, title, salary, department_id FROM roles ORDER BY id",
            [],
            |row| {
                Ok(Role {
                    id: row.get(0)?,
                    title: row.get(1)?,
                    salary: row.get(2)?,
                    department_id: row.get(3)?,
                })
            },
        )
    }

    pub fn list_employees(&self) -> Result<Vec<Employee>, StoreError> {
        let sql = format!("SELECT {} FROM employees ORDER BY id", EMPLOYEE_COLUMNS);
        self.collect(EntityKind::Employee, &sql, [], employee_from_row)
    }

    /// Employees flagged `is_manager`, whether or not anyone reports to them
    pub fn list_managers(&self) -> Result<Vec<Employee>, StoreError> {
        let sql = format!(
            "SELECT {} FROM employees WHERE is_manager = 1 ORDER BY id",
            EMPLOYEE_COLUMNS
        );
        self.collect(EntityKind::Employee, &sql, [], employee_from_row)
    }

    pub fn get_employee(&self, id: i64) -> Result<Option<Employee>, StoreError> {
        let sql = format!("SELECT {} FROM employees WHERE id = ?1", EMPLOYEE_COLUMNS);
        self.conn
            .query_row(&sql, params![id], employee_from_row)
            .optional()
            .map_err(|e| StoreError::from_sqlite(EntityKind::Employee, e))
    }

    /// Ids of every department stored under exactly this name
    ///
    /// More than one id means the uniqueness invariant was broken outside
    /// this tool; callers must treat that as fatal rather than pick one.
    pub fn department_ids_by_name(&self, name: &str) -> Result<Vec<i64>, StoreError> {
        self.collect(
            EntityKind::Department,
            "SELECT id FROM departments WHERE name = ?1 ORDER BY id",
            params![name],
            |row| row.get(0),
        )
    }

    /// Roles joined with their department name
    pub fn role_views(&self) -> Result<Vec<RoleView>, StoreError> {
        self.collect(
            EntityKind::Role,
            r#"SELECT r.id, r.title, d.name, r.salary
               FROM roles r
               JOIN departments d ON r.department_id = d.id
               ORDER BY r.id"#,
            [],
            |row| {
                Ok(RoleView {
                    id: row.get(0)?,
                    title: row.get(1)?,
                    department: row.get(2)?,
                    salary: row.get(3)?,
                })
            },
        )
    }

    /// Employees joined with role, department and manager name
    pub fn employee_views(&self) -> Result<Vec<EmployeeView>, StoreError> {
        let sql = format!("{} ORDER BY e.id", EMPLOYEE_VIEW_SELECT);
        self.collect(EntityKind::Employee, &sql, [], employee_view_from_row)
    }

    /// Joined employee rows whose first and last name match exactly
    pub fn find_employees_by_name(
        &self,
        first_name: &str,
        last_name: &str,
    ) -> Result<Vec<EmployeeView>, StoreError> {
        let sql = format!(
            "{} WHERE e.first_name = ?1 AND e.last_name = ?2 ORDER BY e.id",
            EMPLOYEE_VIEW_SELECT
        );
        self.collect(
            EntityKind::Employee,
            &sql,
            params![first_name, last_name],
            employee_view_from_row,
        )
    }

    // =========================================================================
    // Writes
    // =========================================================================

    /// Insert a department; a taken name fails with `DuplicateKey`
    pub fn insert_department(&self, name: &str) -> Result<i64, StoreError> {
        self.conn
            .execute("INSERT INTO departments (name) VALUES (?1)", params![name])
            .map_err(|e| StoreError::from_sqlite(EntityKind::Department, e))?;
        let id = self.conn.last_insert_rowid();
        tracing::debug!(id, name, "inserted department");
        Ok(id)
    }

    pub fn insert_role(&self, role: &NewRole) -> Result<i64, StoreError> {
        self.conn
            .execute(
                "INSERT INTO roles (title, salary, department_id) VALUES (?1, ?2, ?3)",
                params![role.title, role.salary, role.department_id],
            )
            .map_err(|e| StoreError::from_sqlite(EntityKind::Role, e))?;
        let id = self.conn.last_insert_rowid();
        tracing::debug!(id, department_id = role.department_id, "inserted role");
        Ok(id)
    }

    pub fn insert_employee(&self, employee: &NewEmployee) -> Result<i64, StoreError> {
        self.conn
            .execute(
                r#"INSERT INTO employees (first_name, last_name, is_manager, role_id, manager_id)
                   VALUES (?1, ?2, ?3, ?4, ?5)"#,
                params![
                    employee.first_name,
                    employee.last_name,
                    employee.is_manager,
                    employee.role_id,
                    employee.manager_id,
                ],
            )
            .map_err(|e| StoreError::from_sqlite(EntityKind::Employee, e))?;
        let id = self.conn.last_insert_rowid();
        tracing::debug!(id, role_id = employee.role_id, manager_id = ?employee.manager_id, "inserted employee");
        Ok(id)
    }

    /// Set one employee's role and manager flag
    pub fn update_employee_role(
        &self,
        employee_id: i64,
        role_id: i64,
        is_manager: bool,
    ) -> Result<(), StoreError> {
        let changed = self
            .conn
            .execute(
                "UPDATE employees SET role_id = ?1, is_manager = ?2 WHERE id = ?3",
                params![role_id, is_manager, employee_id],
            )
            .map_err(|e| StoreError::from_sqlite(EntityKind::Employee, e))?;

        if changed == 0 {
            return Err(StoreError::NotFound {
                kind: EntityKind::Employee,
                id: employee_id,
            });
        }
        tracing::debug!(employee_id, role_id, is_manager, "updated employee role");
        Ok(())
    }

    /// Administrative delete; dependent roles and their employees cascade
    pub fn delete_department(&self, id: i64) -> Result<(), StoreError> {
        let changed = self
            .conn
            .execute("DELETE FROM departments WHERE id = ?1", params![id])
            .map_err(|e| StoreError::from_sqlite(EntityKind::Department, e))?;

        if changed == 0 {
            return Err(StoreError::NotFound {
                kind: EntityKind::Department,
                id,
            });
        }
        tracing::debug!(id, "deleted department");
        Ok(())
    }
}
