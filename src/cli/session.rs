//! Interactive session state machine
//!
//! The session starts at `MainMenu` and every flow returns there when it
//! finishes or hits a recoverable error. `Exit` is the only terminal state.
//! Each state handler makes at most one store call at a time and waits for
//! its result before prompting again.
//!
//! Only two things end a session early: a terminal failure while prompting,
//! and an ambiguous department name (the uniqueness invariant was broken
//! outside this tool, so continuing is unsafe).

use std::io::Write;
use std::str::FromStr;

use console::style;
use miette::Diagnostic;
use thiserror::Error;

use crate::cli::helpers::{
    parse_salary, require_name, require_text, split_full_name, ValidationError,
};
use crate::cli::prompt::{PromptError, Prompter};
use crate::cli::table::{render, ResultSet};
use crate::core::entity::{EntityKind, NewEmployee, NewRole};
use crate::core::resolver::{expect_unique, LabelSet, ResolveError};
use crate::core::store::{EntityStore, StoreError};

/// Menu item that leaves a detour prompt without acting
pub const RETURN_TO_MENU: &str = "Return to main menu";

const BANNER: &str = r#" _______________________________________
|\______________________________________\
||                                       |
||    E M P L O Y E E    T R A C K E R   |
\|_______________________________________|
"#;

/// Session states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    MainMenu,
    ViewDepartments,
    ViewRoles,
    ViewEmployees,
    CreateDepartment,
    CreateRole,
    CreateEmployee,
    EditEmployeeRole,
    Exit,
}

/// Main menu intents; labels exist only at the prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    ViewDepartments,
    ViewRoles,
    ViewEmployees,
    AddDepartment,
    AddRole,
    AddEmployee,
    UpdateEmployeeRole,
    Quit,
}

impl MenuChoice {
    pub const ALL: [MenuChoice; 8] = [
        MenuChoice::ViewDepartments,
        MenuChoice::ViewRoles,
        MenuChoice::ViewEmployees,
        MenuChoice::AddDepartment,
        MenuChoice::AddRole,
        MenuChoice::AddEmployee,
        MenuChoice::UpdateEmployeeRole,
        MenuChoice::Quit,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            MenuChoice::ViewDepartments => "View all departments",
            MenuChoice::ViewRoles => "View all roles",
            MenuChoice::ViewEmployees => "View all employees",
            MenuChoice::AddDepartment => "Add a department",
            MenuChoice::AddRole => "Add a role",
            MenuChoice::AddEmployee => "Add an employee",
            MenuChoice::UpdateEmployeeRole => "Update an employee role",
            MenuChoice::Quit => "Quit",
        }
    }

    /// State entered when this item is chosen
    pub fn target(&self) -> State {
        match self {
            MenuChoice::ViewDepartments => State::ViewDepartments,
            MenuChoice::ViewRoles => State::ViewRoles,
            MenuChoice::ViewEmployees => State::ViewEmployees,
            MenuChoice::AddDepartment => State::CreateDepartment,
            MenuChoice::AddRole => State::CreateRole,
            MenuChoice::AddEmployee => State::CreateEmployee,
            MenuChoice::UpdateEmployeeRole => State::EditEmployeeRole,
            MenuChoice::Quit => State::Exit,
        }
    }

    pub fn labels() -> Vec<String> {
        Self::ALL.iter().map(|c| c.label().to_string()).collect()
    }
}

impl std::fmt::Display for MenuChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for MenuChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MenuChoice::ALL
            .iter()
            .find(|c| c.label().eq_ignore_ascii_case(s.trim()))
            .copied()
            .ok_or_else(|| format!("Unknown menu option: {}", s))
    }
}

/// Errors that end the session
#[derive(Debug, Error, Diagnostic)]
pub enum SessionError {
    #[error("Stored data violates a uniqueness rule: {0}")]
    #[diagnostic(
        code(emptrack::corrupted_invariant),
        help("Department names must be unique. Remove the duplicate rows directly in the database, then restart.")
    )]
    CorruptedInvariant(#[source] ResolveError),

    #[error(transparent)]
    #[diagnostic(code(emptrack::prompt))]
    Prompt(#[from] PromptError),

    #[error("Could not write to the terminal: {0}")]
    #[diagnostic(code(emptrack::output))]
    Output(#[from] std::io::Error),
}

/// One operator session over one store
pub struct Session<P: Prompter, W: Write> {
    store: EntityStore,
    prompter: P,
    out: W,
}

impl<P: Prompter, W: Write> Session<P, W> {
    pub fn new(store: EntityStore, prompter: P, out: W) -> Self {
        Self {
            store,
            prompter,
            out,
        }
    }

    pub fn store(&self) -> &EntityStore {
        &self.store
    }

    pub fn prompter(&self) -> &P {
        &self.prompter
    }

    pub fn output(&self) -> &W {
        &self.out
    }

    /// Drive the session from `MainMenu` until `Exit`
    pub fn run(&mut self) -> Result<(), SessionError> {
        self.say(BANNER)?;
        self.say("Welcome to the Employee Tracker!")?;
        self.say("An easy-to-use directory right in your command line.")?;
        self.say("\n[ MAIN MENU ]\n")?;

        let mut state = State::MainMenu;
        while state != State::Exit {
            let next = self.step(state)?;
            tracing::debug!(from = ?state, to = ?next, "session transition");
            state = next;
        }

        self.say("Goodbye!")?;
        Ok(())
    }

    /// Handle one state and return the next one
    pub fn step(&mut self, state: State) -> Result<State, SessionError> {
        match state {
            State::MainMenu => self.main_menu(),
            State::ViewDepartments => self.view_departments(),
            State::ViewRoles => self.view_roles(),
            State::ViewEmployees => self.view_employees(),
            State::CreateDepartment => self.create_department(),
            State::CreateRole => self.create_role(),
            State::CreateEmployee => self.create_employee(),
            State::EditEmployeeRole => self.edit_employee_role(),
            State::Exit => Ok(State::Exit),
        }
    }

    /// Release the store connection
    pub fn close(self) -> Result<(), StoreError> {
        self.store.close()
    }

    // =========================================================================
    // States
    // =========================================================================

    fn main_menu(&mut self) -> Result<State, SessionError> {
        let answer = self
            .prompter
            .select("What would you like to do?", &MenuChoice::labels())?;

        match answer.parse::<MenuChoice>() {
            Ok(choice) => Ok(choice.target()),
            Err(message) => {
                self.error(message)?;
                Ok(State::MainMenu)
            }
        }
    }

    fn view_departments(&mut self) -> Result<State, SessionError> {
        match self.store.list_departments() {
            Ok(rows) => self.show(&ResultSet::departments(&rows))?,
            Err(e) => self.store_error(&e)?,
        }
        Ok(State::MainMenu)
    }

    fn view_roles(&mut self) -> Result<State, SessionError> {
        match self.store.role_views() {
            Ok(rows) => self.show(&ResultSet::roles(&rows))?,
            Err(e) => self.store_error(&e)?,
        }
        Ok(State::MainMenu)
    }

    fn view_employees(&mut self) -> Result<State, SessionError> {
        match self.store.employee_views() {
            Ok(rows) => self.show(&ResultSet::employees(&rows))?,
            Err(e) => self.store_error(&e)?,
        }
        Ok(State::MainMenu)
    }

    fn create_department(&mut self) -> Result<State, SessionError> {
        let raw = self.prompter.input("What is the name of the department?")?;
        let name = match require_text("Department name", &raw) {
            Ok(name) => name,
            Err(e) => return self.invalid(e, State::CreateDepartment),
        };

        match self.store.insert_department(&name) {
            Ok(id) => {
                self.success(format!("Added department {} (ID: {})", name, id))?;
                Ok(State::MainMenu)
            }
            Err(StoreError::DuplicateKey { .. }) => {
                self.warn(format!(
                    "A department named '{}' already exists. Please choose another name.",
                    name
                ))?;
                Ok(State::CreateDepartment)
            }
            Err(e) => {
                self.store_error(&e)?;
                Ok(State::MainMenu)
            }
        }
    }

    fn create_role(&mut self) -> Result<State, SessionError> {
        let departments = match self.store.list_departments() {
            Ok(rows) => rows,
            Err(e) => return self.abandon(&e),
        };
        if departments.is_empty() {
            self.warn("There are no departments yet. Every role must belong to a department.")?;
            return self.detour(MenuChoice::AddDepartment);
        }

        let raw = self.prompter.input("What is the title of the role?")?;
        let title = match require_text("Role title", &raw) {
            Ok(title) => title,
            Err(e) => return self.invalid(e, State::CreateRole),
        };

        let raw = self.prompter.input("What is the salary of the role?")?;
        let salary = match parse_salary(&raw) {
            Ok(salary) => salary,
            Err(e) => return self.invalid(e, State::CreateRole),
        };

        let choices = LabelSet::departments(&departments);
        let label = self
            .prompter
            .select("Which department does the role belong to?", &choices.labels())?;

        let department_id = match self.resolve_department(&label)? {
            Some(id) => id,
            None => return Ok(State::MainMenu),
        };

        let role = NewRole {
            title,
            salary,
            department_id,
        };
        match self.store.insert_role(&role) {
            Ok(id) => self.success(format!(
                "Added role {} (ID: {}) to {}",
                role.title, id, label
            ))?,
            Err(e) => self.store_error(&e)?,
        }
        Ok(State::MainMenu)
    }

    fn create_employee(&mut self) -> Result<State, SessionError> {
        let roles = match self.store.list_roles() {
            Ok(rows) => rows,
            Err(e) => return self.abandon(&e),
        };
        if roles.is_empty() {
            self.warn("There are no roles yet. Every employee must hold a role.")?;
            return self.detour(MenuChoice::AddRole);
        }

        let raw = self.prompter.input("What is the employee's first name?")?;
        let first_name = match require_name("First name", &raw) {
            Ok(name) => name,
            Err(e) => return self.invalid(e, State::CreateEmployee),
        };

        let raw = self.prompter.input("What is the employee's last name?")?;
        let last_name = match require_name("Last name", &raw) {
            Ok(name) => name,
            Err(e) => return self.invalid(e, State::CreateEmployee),
        };

        let role_choices = LabelSet::roles(&roles);
        let label = self
            .prompter
            .select("What is the employee's role?", &role_choices.labels())?;
        let role_id = match self.resolve_choice(&role_choices, &label)? {
            Some(id) => id,
            None => return Ok(State::MainMenu),
        };

        let is_manager = self.prompter.confirm("Is this employee a manager?", false)?;

        let managers = match self.store.list_managers() {
            Ok(rows) => rows,
            Err(e) => return self.abandon(&e),
        };
        let manager_id = if managers.is_empty() {
            self.warn(format!(
                "No managers exist yet, so {} {} will be added with no manager.",
                first_name, last_name
            ))?;
            None
        } else if self
            .prompter
            .confirm("Does this employee have a manager?", false)?
        {
            let manager_choices = LabelSet::employees(&managers);
            let label = self
                .prompter
                .select("Who is the employee's manager?", &manager_choices.labels())?;
            match self.resolve_choice(&manager_choices, &label)? {
                Some(id) => Some(id),
                None => return Ok(State::MainMenu),
            }
        } else {
            None
        };

        let employee = NewEmployee {
            first_name,
            last_name,
            is_manager,
            role_id,
            manager_id,
        };
        match self.store.insert_employee(&employee) {
            Ok(id) => self.success(format!(
                "Added employee {} {} (ID: {})",
                employee.first_name, employee.last_name, id
            ))?,
            Err(e) => self.store_error(&e)?,
        }
        Ok(State::MainMenu)
    }

    fn edit_employee_role(&mut self) -> Result<State, SessionError> {
        match self.store.count(EntityKind::Employee) {
            Ok(0) => {
                self.warn("There are no employees to update yet.")?;
                return Ok(State::MainMenu);
            }
            Ok(_) => {}
            Err(e) => return self.abandon(&e),
        }

        let raw = self
            .prompter
            .input("What is the employee's full name (first and last)?")?;
        let (first_name, last_name) = match split_full_name(&raw) {
            Ok(parts) => parts,
            Err(e) => return self.invalid(e, State::EditEmployeeRole),
        };

        let matches = match self.store.find_employees_by_name(&first_name, &last_name) {
            Ok(rows) => rows,
            Err(e) => return self.abandon(&e),
        };
        if matches.is_empty() {
            self.warn(format!(
                "No employee named {} {} was found.",
                first_name, last_name
            ))?;
            return Ok(State::MainMenu);
        }

        self.show(&ResultSet::employees(&matches))?;

        let target = if let [only] = matches.as_slice() {
            only.clone()
        } else {
            let choices = LabelSet::employee_views(&matches);
            let label = self.prompter.select(
                "Several employees share that name. Which one do you want to update?",
                &choices.labels(),
            )?;
            let id = match self.resolve_choice(&choices, &label)? {
                Some(id) => id,
                None => return Ok(State::MainMenu),
            };
            match matches.iter().find(|m| m.id == id) {
                Some(m) => m.clone(),
                None => return Ok(State::MainMenu),
            }
        };

        let roles = match self.store.list_roles() {
            Ok(rows) => rows,
            Err(e) => return self.abandon(&e),
        };
        if roles.is_empty() {
            self.warn("There are no roles to assign.")?;
            return Ok(State::MainMenu);
        }

        let role_choices = LabelSet::roles(&roles);
        let label = self.prompter.select(
            &format!("What is {}'s new role?", target.full_name()),
            &role_choices.labels(),
        )?;
        let role_id = match self.resolve_choice(&role_choices, &label)? {
            Some(id) => id,
            None => return Ok(State::MainMenu),
        };

        let is_manager = self
            .prompter
            .confirm("Is this employee a manager?", target.is_manager)?;

        match self.store.update_employee_role(target.id, role_id, is_manager) {
            Ok(()) => self.success(format!(
                "Updated {} (ID: {}) to {}",
                target.full_name(),
                target.id,
                label
            ))?,
            Err(e) => self.store_error(&e)?,
        }
        Ok(State::MainMenu)
    }

    // =========================================================================
    // Shared steps
    // =========================================================================

    /// Offer the state a precondition needs, or the main menu
    fn detour(&mut self, offer: MenuChoice) -> Result<State, SessionError> {
        let items = vec![offer.label().to_string(), RETURN_TO_MENU.to_string()];
        let answer = self.prompter.select("What would you like to do?", &items)?;

        if answer == offer.label() {
            Ok(offer.target())
        } else {
            Ok(State::MainMenu)
        }
    }

    /// Look the chosen department up by name; more than one row is fatal
    fn resolve_department(&mut self, name: &str) -> Result<Option<i64>, SessionError> {
        let ids = match self.store.department_ids_by_name(name) {
            Ok(ids) => ids,
            Err(e) => {
                self.store_error(&e)?;
                return Ok(None);
            }
        };

        match expect_unique(EntityKind::Department, name, ids) {
            Ok(id) => Ok(Some(id)),
            Err(e) if e.is_fatal() => {
                tracing::error!(error = %e, "duplicate department names in store");
                Err(SessionError::CorruptedInvariant(e))
            }
            Err(e) => {
                self.error(e)?;
                Ok(None)
            }
        }
    }

    /// Resolve a picked label through its candidate set
    fn resolve_choice(&mut self, choices: &LabelSet, label: &str) -> Result<Option<i64>, SessionError> {
        match choices.resolve(label) {
            Ok(id) => Ok(Some(id)),
            Err(e) if e.is_fatal() => Err(SessionError::CorruptedInvariant(e)),
            Err(e) => {
                self.error(e)?;
                Ok(None)
            }
        }
    }

    fn invalid(&mut self, err: ValidationError, retry: State) -> Result<State, SessionError> {
        self.error(err)?;
        Ok(retry)
    }

    fn abandon(&mut self, err: &StoreError) -> Result<State, SessionError> {
        self.store_error(err)?;
        Ok(State::MainMenu)
    }

    /// Report a store failure in place; none of them end the session
    fn store_error(&mut self, err: &StoreError) -> Result<(), SessionError> {
        match err {
            StoreError::ForeignKeyViolation { kind, detail } => {
                tracing::error!(%kind, detail, "label resolver produced an id the store rejected");
            }
            StoreError::Unavailable(detail) => {
                tracing::warn!(detail, "store unavailable");
            }
            other => {
                tracing::warn!(error = %other, "store operation failed");
            }
        }
        self.error(err)
    }

    // =========================================================================
    // Output
    // =========================================================================

    fn say(&mut self, text: impl std::fmt::Display) -> Result<(), SessionError> {
        writeln!(self.out, "{}", text)?;
        Ok(())
    }

    fn show(&mut self, set: &ResultSet) -> Result<(), SessionError> {
        write!(self.out, "\n{}\n", render(set))?;
        Ok(())
    }

    fn success(&mut self, text: impl std::fmt::Display) -> Result<(), SessionError> {
        let line = format!("{} {}", style("✓").green(), text);
        self.say(line)
    }

    fn warn(&mut self, text: impl std::fmt::Display) -> Result<(), SessionError> {
        let line = format!("{} {}", style("!").yellow().bold(), text);
        self.say(line)
    }

    fn error(&mut self, text: impl std::fmt::Display) -> Result<(), SessionError> {
        let line = format!("{} {}", style("✗").red(), text);
        self.say(line)
    }
}
