//! `equipreq-core`: shared building blocks of the form rules.
//!
//! This crate contains **pure** primitives (no host or infrastructure concerns).

pub mod error;
pub mod id;
pub mod value_object;

pub use error::{RuleError, RuleErrorKind};
pub use id::{DepartmentId, DirectoryItemId, EmployeeId};
pub use value_object::ValueObject;
