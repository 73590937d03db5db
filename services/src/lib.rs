//! Workflow operations for the thesis portal.
//!
//! Each module owns one area of the domain and returns
//! [`ServiceResult`]; HTTP mapping happens in the `api` crate.

pub mod dashboard;
pub mod defense;
pub mod error;
pub mod process_stage;
pub mod progress;
pub mod review;
pub mod statistics;
pub mod submission;
pub mod supervision;
pub mod topic;
pub mod user;

pub use error::{ServiceError, ServiceResult};

use db::models::user::Role;

/// The authenticated caller of an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub id: i64,
    pub role: Role,
}

impl Actor {
    pub fn new(id: i64, role: Role) -> Self {
        Self { id, role }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    pub fn is_teacher(&self) -> bool {
        self.role == Role::Teacher
    }

    pub fn is_student(&self) -> bool {
        self.role == Role::Student
    }
}
