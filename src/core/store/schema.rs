//! Database schema initialization

use super::{EntityStore, StoreError};

impl EntityStore {
    /// Create the three tables if they do not exist yet
    pub(super) fn init_schema(&self) -> Result<(), StoreError> {
        self.conn
            .execute_batch(
                r#"
            CREATE TABLE IF NOT EXISTS departments (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL UNIQUE CHECK (name <> '')
            );

            CREATE TABLE IF NOT EXISTS roles (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL CHECK (title <> ''),
                salary REAL NOT NULL CHECK (salary >= 0),
                department_id INTEGER NOT NULL,
                FOREIGN KEY (department_id)
                    REFERENCES departments(id)
                    ON DELETE CASCADE
            );
            CREATE INDEX IF NOT EXISTS idx_roles_department ON roles(department_id);

            CREATE TABLE IF NOT EXISTS employees (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                first_name TEXT NOT NULL CHECK (first_name <> ''),
                last_name TEXT NOT NULL CHECK (last_name <> ''),
                is_manager INTEGER NOT NULL DEFAULT 0,
                role_id INTEGER NOT NULL,
                manager_id INTEGER,
                FOREIGN KEY (role_id)
                    REFERENCES roles(id)
                    ON UPDATE CASCADE
                    ON DELETE CASCADE,
                FOREIGN KEY (manager_id)
                    REFERENCES employees(id)
                    ON UPDATE CASCADE
                    ON DELETE CASCADE
            );
            CREATE INDEX IF NOT EXISTS idx_employees_role ON employees(role_id);
            CREATE INDEX IF NOT EXISTS idx_employees_manager ON employees(manager_id);
            CREATE INDEX IF NOT EXISTS idx_employees_name ON employees(first_name, last_name);
            "#,
            )
            .map_err(StoreError::Query)?;

        Ok(())
    }
}
