//! Core module - entities, label resolution, storage and configuration

pub mod config;
pub mod entity;
pub mod resolver;
pub mod store;

pub use config::Config;
pub use entity::{
    title_case, Department, Employee, EmployeeView, EntityKind, NewEmployee, NewRole, Role,
    RoleView,
};
pub use resolver::{LabelSet, Labeled, ResolveError};
pub use store::{EntityStore, StoreError};
