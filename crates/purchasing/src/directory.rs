//! Host directory entities and the staff directory services.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use equipreq_core::{DepartmentId, DirectoryItemId, EmployeeId, ValueObject};

/// Kind of entity a directory row points at.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DirectoryDataType {
    Employee,
    Department,
    Organization,
    Position,
    DesignerRow,
    #[serde(other)]
    Unknown,
}

/// Snapshot of a directory row as carried by a directory-reference field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryItem {
    pub id: DirectoryItemId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub data_type: DirectoryDataType,
}

impl DirectoryItem {
    pub fn new(id: DirectoryItemId, name: impl Into<String>, data_type: DirectoryDataType) -> Self {
        Self {
            id,
            name: name.into(),
            description: None,
            data_type,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// A row with the empty identifier counts as "nothing selected".
    pub fn is_unset(&self) -> bool {
        self.id.is_empty()
    }
}

impl ValueObject for DirectoryItem {}

/// Staff status of an employee.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EmployeeStatus {
    Active,
    SickLeave,
    Vacation,
    BusinessTrip,
    Absent,
    Dismissed,
    Transferred,
    #[serde(other)]
    Unknown,
}

impl EmployeeStatus {
    pub fn label(self) -> &'static str {
        match self {
            EmployeeStatus::Active => "Active",
            EmployeeStatus::SickLeave => "On sick leave",
            EmployeeStatus::Vacation => "On vacation",
            EmployeeStatus::BusinessTrip => "On a business trip",
            EmployeeStatus::Absent => "Absent",
            EmployeeStatus::Dismissed => "Dismissed",
            EmployeeStatus::Transferred => "Transferred",
            EmployeeStatus::Unknown => "Unknown",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: EmployeeId,
    pub last_name: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub middle_name: Option<String>,
    #[serde(default)]
    pub position: Option<String>,
    pub status: EmployeeStatus,
    pub unit_id: DepartmentId,
}

impl ValueObject for Employee {}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Department {
    pub id: DepartmentId,
    pub name: String,
}

impl ValueObject for Department {}

/// Failure of a remote directory lookup.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ServiceError {
    #[error("directory service unavailable: {0}")]
    Unavailable(String),

    #[error("directory request rejected: {0}")]
    Rejected(String),
}

/// Staff directory: employee records.
#[async_trait]
pub trait EmployeeDirectory: Send + Sync {
    /// `Ok(None)` when no employee has this id.
    async fn employee(&self, id: EmployeeId) -> Result<Option<Employee>, ServiceError>;
}

/// Staff directory: departments (units).
#[async_trait]
pub trait DepartmentDirectory: Send + Sync {
    /// `Ok(None)` when the unit is unknown.
    async fn department(&self, id: DepartmentId) -> Result<Option<Department>, ServiceError>;
}
