//! Read-only summaries shown to the user.

use chrono::{DateTime, Utc};

use crate::card::{CardLayout, CardLayoutExt, LayoutError};
use crate::config::EngineConfig;
use crate::directory::{Department, Employee, EmployeeStatus};
use crate::field::{CITY, DATE_OF_CREATE, END_DATE, NAME, PURPOSE, START_DATE};
use crate::messages::text;

/// Snapshot of the card fields shown by "show summary".
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CardSummary {
    pub name: Option<String>,
    pub created: Option<DateTime<Utc>>,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
    pub purpose: Option<String>,
    pub city: Option<String>,
}

impl CardSummary {
    /// Reads every summary field; empty text and an unset city count as absent.
    pub fn read<L: CardLayout + ?Sized>(card: &L) -> Result<Self, LayoutError> {
        Ok(Self {
            name: non_empty(card.get(NAME)?),
            created: card.get(DATE_OF_CREATE)?,
            start: card.get(START_DATE)?,
            end: card.get(END_DATE)?,
            purpose: non_empty(card.get(PURPOSE)?),
            city: non_empty(
                card.get(CITY)?
                    .filter(|item| !item.is_unset())
                    .map(|item| item.name),
            ),
        })
    }

    /// Dates are shown as the calendar day in the configured offset.
    pub fn lines(&self, config: &EngineConfig) -> Vec<String> {
        let date = |value: Option<DateTime<Utc>>| match value {
            Some(d) => d
                .with_timezone(&config.utc_offset)
                .date_naive()
                .format(&config.date_format)
                .to_string(),
            None => text::DATE_NOT_SPECIFIED.to_string(),
        };
        vec![
            format!("Name: {}", self.name.as_deref().unwrap_or(text::NOT_SPECIFIED)),
            format!("Created: {}", date(self.created)),
            format!("From: {}", date(self.start)),
            format!("To: {}", date(self.end)),
            format!(
                "Purpose: {}",
                self.purpose.as_deref().unwrap_or(text::NOT_SPECIFIED)
            ),
            format!(
                "City: {}",
                self.city.as_deref().unwrap_or(text::CITY_NOT_SPECIFIED)
            ),
        ]
    }

    pub fn render(&self, config: &EngineConfig) -> String {
        self.lines(config).join("\n")
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Summary of the employee picked in a staff directory field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeSummary {
    pub full_name: String,
    pub position: Option<String>,
    pub status: EmployeeStatus,
    pub department: Option<String>,
}

impl EmployeeSummary {
    pub fn new(employee: &Employee, department: Option<&Department>) -> Self {
        // Missing name parts stay as empty slots: "Petrov Ivan " keeps its spacing.
        let full_name = format!(
            "{} {} {}",
            employee.last_name,
            employee.first_name.as_deref().unwrap_or_default(),
            employee.middle_name.as_deref().unwrap_or_default(),
        );
        Self {
            full_name,
            position: employee.position.clone().filter(|p| !p.is_empty()),
            status: employee.status,
            department: department.map(|d| d.name.clone()),
        }
    }

    pub fn lines(&self) -> Vec<String> {
        [
            Some(format!("Full name: {}", self.full_name)),
            self.position.as_ref().map(|p| format!("Position: {p}")),
            Some(format!("Status: {}", self.status.label())),
            self.department.as_ref().map(|d| format!("Department: {d}")),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    pub fn render(&self) -> String {
        self.lines().join("\n")
    }
}
