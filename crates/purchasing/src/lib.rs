//! Equipment purchase request card: form business rules.
//!
//! This crate contains the rules that run on the request form (validation,
//! derived price, summaries, save lifecycle messages). Rendering, persistence and
//! directory lookups belong to the host and are reached through the traits in
//! [`card`], [`messages`] and [`directory`].

pub mod card;
pub mod config;
pub mod directory;
pub mod engine;
pub mod field;
pub mod messages;
pub mod price;
pub mod summary;

pub use card::{CardLayout, CardLayoutExt, InMemoryCard, LayoutError};
pub use config::EngineConfig;
pub use directory::{
    Department, DepartmentDirectory, DirectoryDataType, DirectoryItem, Employee,
    EmployeeDirectory, EmployeeStatus, ServiceError,
};
pub use engine::{DateEndpoint, DateRangeCheck, FormRuleEngine, PriceDerivation};
pub use field::{Field, FieldKey, FieldKind, FieldValue, ValueKind};
pub use messages::{ChannelError, ConfirmOutcome, MessageBox};
pub use price::{NumberFormatError, parse_integer};
pub use summary::{CardSummary, EmployeeSummary};
