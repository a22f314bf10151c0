#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};

use equipreq_core::{DepartmentId, DirectoryItemId, EmployeeId};
use equipreq_observability::MemorySink;
use equipreq_purchasing::{
    ChannelError, ConfirmOutcome, Department, DepartmentDirectory, DirectoryDataType,
    DirectoryItem, Employee, EmployeeDirectory, FormRuleEngine, InMemoryCard, MessageBox,
    ServiceError,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Shown {
    Confirm(String),
    Info { text: String, title: Option<String> },
    Warn(String),
    Error(String),
}

/// Message box that records everything and answers confirmations with a
/// preset outcome.
pub struct RecordingMessageBox {
    shown: Mutex<Vec<Shown>>,
    answer: ConfirmOutcome,
    broken: bool,
    detach_on_warn: Option<Arc<InMemoryCard>>,
}

impl Default for RecordingMessageBox {
    fn default() -> Self {
        Self {
            shown: Mutex::new(Vec::new()),
            answer: ConfirmOutcome::Confirmed,
            broken: false,
            detach_on_warn: None,
        }
    }
}

impl RecordingMessageBox {
    pub fn answering(answer: ConfirmOutcome) -> Self {
        Self {
            answer,
            ..Self::default()
        }
    }

    /// Every notification fails as if the message service were down.
    pub fn broken() -> Self {
        Self {
            broken: true,
            answer: ConfirmOutcome::ChannelFailure,
            ..Self::default()
        }
    }

    /// Closes `card` while a warning is on screen.
    pub fn detaching_on_warn(card: Arc<InMemoryCard>) -> Self {
        Self {
            detach_on_warn: Some(card),
            ..Self::default()
        }
    }

    pub fn shown(&self) -> Vec<Shown> {
        self.shown.lock().unwrap().clone()
    }

    pub fn infos(&self) -> Vec<String> {
        self.shown()
            .into_iter()
            .filter_map(|s| match s {
                Shown::Info { text, .. } => Some(text),
                _ => None,
            })
            .collect()
    }

    pub fn warnings(&self) -> Vec<String> {
        self.shown()
            .into_iter()
            .filter_map(|s| match s {
                Shown::Warn(text) => Some(text),
                _ => None,
            })
            .collect()
    }

    pub fn errors(&self) -> Vec<String> {
        self.shown()
            .into_iter()
            .filter_map(|s| match s {
                Shown::Error(text) => Some(text),
                _ => None,
            })
            .collect()
    }

    fn push(&self, shown: Shown) -> Result<(), ChannelError> {
        self.shown.lock().unwrap().push(shown);
        if self.broken {
            return Err(ChannelError::Unavailable("message service offline".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl MessageBox for RecordingMessageBox {
    async fn confirm(&self, text: &str) -> ConfirmOutcome {
        self.shown
            .lock()
            .unwrap()
            .push(Shown::Confirm(text.to_string()));
        self.answer
    }

    async fn info(&self, text: &str, title: Option<&str>) -> Result<(), ChannelError> {
        self.push(Shown::Info {
            text: text.to_string(),
            title: title.map(str::to_string),
        })
    }

    async fn warn(&self, text: &str) -> Result<(), ChannelError> {
        if let Some(card) = &self.detach_on_warn {
            card.detach();
        }
        self.push(Shown::Warn(text.to_string()))
    }

    async fn error(&self, text: &str) -> Result<(), ChannelError> {
        self.push(Shown::Error(text.to_string()))
    }
}

#[derive(Default)]
pub struct FakeEmployees {
    records: HashMap<EmployeeId, Employee>,
    failure: Option<ServiceError>,
    lookups: Mutex<Vec<EmployeeId>>,
}

impl FakeEmployees {
    pub fn with(mut self, employee: Employee) -> Self {
        self.records.insert(employee.id, employee);
        self
    }

    pub fn failing(error: ServiceError) -> Self {
        Self {
            failure: Some(error),
            ..Self::default()
        }
    }

    pub fn lookups(&self) -> Vec<EmployeeId> {
        self.lookups.lock().unwrap().clone()
    }
}

#[async_trait]
impl EmployeeDirectory for FakeEmployees {
    async fn employee(&self, id: EmployeeId) -> Result<Option<Employee>, ServiceError> {
        self.lookups.lock().unwrap().push(id);
        if let Some(err) = &self.failure {
            return Err(err.clone());
        }
        Ok(self.records.get(&id).cloned())
    }
}

#[derive(Default)]
pub struct FakeDepartments {
    records: HashMap<DepartmentId, Department>,
    failure: Option<ServiceError>,
}

impl FakeDepartments {
    pub fn with(mut self, department: Department) -> Self {
        self.records.insert(department.id, department);
        self
    }

    pub fn failing(error: ServiceError) -> Self {
        Self {
            failure: Some(error),
            ..Self::default()
        }
    }
}

#[async_trait]
impl DepartmentDirectory for FakeDepartments {
    async fn department(&self, id: DepartmentId) -> Result<Option<Department>, ServiceError> {
        if let Some(err) = &self.failure {
            return Err(err.clone());
        }
        Ok(self.records.get(&id).cloned())
    }
}

/// Engine wired to fakes, with handles on each collaborator.
pub struct Harness {
    pub engine: FormRuleEngine,
    pub messages: Arc<RecordingMessageBox>,
    pub employees: Arc<FakeEmployees>,
    pub diagnostics: Arc<MemorySink>,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_parts(
            RecordingMessageBox::default(),
            FakeEmployees::default(),
            FakeDepartments::default(),
        )
    }

    pub fn with_messages(messages: RecordingMessageBox) -> Self {
        Self::with_parts(messages, FakeEmployees::default(), FakeDepartments::default())
    }

    pub fn with_parts(
        messages: RecordingMessageBox,
        employees: FakeEmployees,
        departments: FakeDepartments,
    ) -> Self {
        let messages = Arc::new(messages);
        let employees = Arc::new(employees);
        let diagnostics = Arc::new(MemorySink::new());
        let engine = FormRuleEngine::new(
            messages.clone(),
            employees.clone(),
            Arc::new(departments),
        )
        .with_diagnostics(diagnostics.clone());
        Self {
            engine,
            messages,
            employees,
            diagnostics,
        }
    }
}

pub fn date(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 9, 30, 0).unwrap()
}

pub fn equipment_type(name: &str, description: &str) -> DirectoryItem {
    DirectoryItem::new(DirectoryItemId::new(), name, DirectoryDataType::DesignerRow)
        .with_description(description)
}

pub fn city(name: &str) -> DirectoryItem {
    DirectoryItem::new(DirectoryItemId::new(), name, DirectoryDataType::DesignerRow)
}
