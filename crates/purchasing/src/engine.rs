//! Business rules of the equipment purchase request card.
//!
//! The host calls one operation per trigger and awaits it before dispatching the
//! next. Operations never fail towards the host: every problem is shown to the
//! user and/or recorded on the diagnostic sink, and the operation falls back to
//! a safe outcome.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use equipreq_core::{RuleError, RuleErrorKind};
use equipreq_observability::{Diagnostic, DiagnosticSink, Level, TracingSink};

use crate::card::{CardLayout, CardLayoutExt, LayoutError};
use crate::config::EngineConfig;
use crate::directory::{
    DepartmentDirectory, DirectoryDataType, DirectoryItem, EmployeeDirectory, ServiceError,
};
use crate::field::{EQUIPMENT_TYPE, END_DATE, Field, FieldKey, NAME, PRICE, START_DATE};
use crate::messages::{ChannelError, ConfirmOutcome, MessageBox, text};
use crate::price::{NumberFormatError, parse_integer};
use crate::summary::{CardSummary, EmployeeSummary};

/// The date field a change event came from.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum DateEndpoint {
    Start,
    End,
}

impl DateEndpoint {
    pub fn field(self) -> Field<DateTime<Utc>> {
        match self {
            DateEndpoint::Start => START_DATE,
            DateEndpoint::End => END_DATE,
        }
    }

    pub fn from_key(key: FieldKey) -> Option<Self> {
        match key {
            FieldKey::StartDate => Some(DateEndpoint::Start),
            FieldKey::EndDate => Some(DateEndpoint::End),
            _ => None,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum DateRangeCheck {
    /// At least one date is empty; nothing to compare yet.
    Incomplete,
    Valid,
    /// The range was inverted and the edited endpoint was cleared.
    Corrected(DateEndpoint),
    /// The card could not be read or written.
    Failed,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PriceDerivation {
    Set(i64),
    /// No equipment type selected; the price was cleared.
    Cleared,
    /// The type's description is not an integer; the price was left untouched.
    Rejected,
    /// A control the derivation needs is missing from the layout.
    Misconfigured(FieldKey),
    /// The card could not be read or written.
    Failed,
}

impl From<LayoutError> for RuleError {
    fn from(err: LayoutError) -> Self {
        match err {
            LayoutError::MissingControl(key) => {
                RuleError::configuration(text::control_missing(key.layout_name()))
            }
            other => RuleError::collaborator(other.to_string()),
        }
    }
}

impl From<ChannelError> for RuleError {
    fn from(err: ChannelError) -> Self {
        RuleError::collaborator(err.to_string())
    }
}

impl From<ServiceError> for RuleError {
    fn from(err: ServiceError) -> Self {
        RuleError::collaborator(err.to_string())
    }
}

impl From<NumberFormatError> for RuleError {
    fn from(err: NumberFormatError) -> Self {
        RuleError::input(err.to_string())
    }
}

/// Form rule engine for one card type.
///
/// Holds no per-card state; one instance can serve every open card.
pub struct FormRuleEngine {
    messages: Arc<dyn MessageBox>,
    employees: Arc<dyn EmployeeDirectory>,
    departments: Arc<dyn DepartmentDirectory>,
    diagnostics: Arc<dyn DiagnosticSink>,
    config: EngineConfig,
}

impl FormRuleEngine {
    pub fn new(
        messages: Arc<dyn MessageBox>,
        employees: Arc<dyn EmployeeDirectory>,
        departments: Arc<dyn DepartmentDirectory>,
    ) -> Self {
        Self {
            messages,
            employees,
            departments,
            diagnostics: Arc::new(TracingSink),
            config: EngineConfig::default(),
        }
    }

    pub fn with_diagnostics(mut self, diagnostics: Arc<dyn DiagnosticSink>) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Asks the user whether to save and reports the raw answer.
    pub async fn confirm_save_outcome(&self) -> ConfirmOutcome {
        let outcome = self.messages.confirm(text::CONFIRM_SAVE).await;
        if outcome == ConfirmOutcome::ChannelFailure {
            self.record(
                Diagnostic::warn("message.channel_failed", "save confirmation could not be shown")
                    .with_field("operation", "confirm_save"),
            );
        }
        outcome
    }

    /// `true` only on an explicit confirmation.
    pub async fn confirm_save(&self) -> bool {
        self.confirm_save_outcome().await.is_confirmed()
    }

    /// Shows the card summary; `None` when the card could not be read.
    pub async fn summarize_card<L: CardLayout + ?Sized>(&self, card: &L) -> Option<CardSummary> {
        let summary = match CardSummary::read(card) {
            Ok(summary) => summary,
            Err(err) => {
                self.layout_failure("summarize_card", err);
                self.show_error(text::CARD_READ_FAILED).await;
                return None;
            }
        };

        self.show_info(&summary.render(&self.config), None)
            .await;
        Some(summary)
    }

    /// Keeps the start date strictly before the end date.
    ///
    /// On an inverted range the user is warned and the field that was just
    /// edited is cleared; the other endpoint is left alone.
    pub async fn validate_date_range<L: CardLayout + ?Sized>(
        &self,
        card: &L,
        changed: DateEndpoint,
    ) -> DateRangeCheck {
        let dates = card
            .get(START_DATE)
            .and_then(|start| card.get(END_DATE).map(|end| (start, end)));
        let (start, end) = match dates {
            Ok((Some(start), Some(end))) => (start, end),
            Ok(_) => return DateRangeCheck::Incomplete,
            Err(err) => {
                self.layout_failure("validate_date_range", err);
                return DateRangeCheck::Failed;
            }
        };

        if start < end {
            return DateRangeCheck::Valid;
        }

        self.show_warning(text::DATE_ORDER).await;

        // The form may have been closed while the warning was up.
        if let Err(err) = card.set(changed.field(), None) {
            self.layout_failure("validate_date_range", err);
            return DateRangeCheck::Failed;
        }

        self.record(
            Diagnostic::info("dates.corrected", "inverted date range, edited date cleared")
                .with_field("field", changed.field().key())
                .with_field("start", start.to_rfc3339())
                .with_field("end", end.to_rfc3339()),
        );
        DateRangeCheck::Corrected(changed)
    }

    /// Gate the host calls before persisting; `false` blocks the save.
    pub async fn pre_save_validate<L: CardLayout + ?Sized>(&self, card: &L) -> bool {
        let name = match card.get(NAME) {
            Ok(name) => name,
            Err(err) => {
                self.layout_failure("pre_save_validate", err);
                None
            }
        };

        if name.as_deref().is_some_and(|n| !n.trim().is_empty()) {
            return true;
        }

        self.record(
            Diagnostic::warn("save.blocked", "required field is blank")
                .with_field("field", FieldKey::Name),
        );
        self.show_warning(text::NAME_REQUIRED).await;
        false
    }

    pub async fn notify_saving(&self) {
        self.show_info(text::SAVING, None).await;
    }

    pub async fn notify_saved(&self) {
        self.show_info(text::SAVED, None).await;
    }

    /// Explicit price recompute: checks the type selector is on the form first.
    pub async fn derive_price_from_type<L: CardLayout + ?Sized>(
        &self,
        card: &L,
    ) -> PriceDerivation {
        match card.has(EQUIPMENT_TYPE) {
            Ok(true) => self.on_equipment_type_changed(card).await,
            Ok(false) => self.control_missing(FieldKey::EquipmentType).await,
            Err(err) => {
                self.layout_failure("derive_price_from_type", err);
                PriceDerivation::Failed
            }
        }
    }

    /// Change handler of the equipment type selector.
    ///
    /// Copies the integer price encoded in the selected type's description into
    /// the price field, or clears the price when nothing is selected.
    pub async fn on_equipment_type_changed<L: CardLayout + ?Sized>(
        &self,
        card: &L,
    ) -> PriceDerivation {
        match card.has(PRICE) {
            Ok(true) => {}
            Ok(false) => return self.control_missing(FieldKey::Price).await,
            Err(err) => {
                self.layout_failure("derive_price", err);
                return PriceDerivation::Failed;
            }
        }

        let selected = match card.get(EQUIPMENT_TYPE) {
            Ok(selected) => selected.filter(|item| !item.is_unset()),
            Err(err) => {
                self.layout_failure("derive_price", err);
                return PriceDerivation::Failed;
            }
        };

        let Some(item) = selected else {
            return match card.set(PRICE, None) {
                Ok(()) => PriceDerivation::Cleared,
                Err(err) => {
                    self.layout_failure("derive_price", err);
                    PriceDerivation::Failed
                }
            };
        };

        let raw = item.description.as_deref().unwrap_or_default();
        let price = match parse_integer(raw) {
            Ok(price) => price,
            Err(err) => {
                self.rule_failure(
                    "price.invalid_description",
                    &err.into(),
                    &[("item", item.name.clone()), ("raw", raw.to_string())],
                );
                self.show_error(&text::price_not_a_number(&item.name, raw))
                    .await;
                return PriceDerivation::Rejected;
            }
        };

        match card.set(PRICE, Some(price)) {
            Ok(()) => {
                tracing::debug!(price, item = %item.name, "price derived from equipment type");
                PriceDerivation::Set(price)
            }
            Err(err) => {
                self.layout_failure("derive_price", err);
                PriceDerivation::Failed
            }
        }
    }

    /// Shows the employee behind a staff directory selection.
    ///
    /// Returns the summary that was displayed, `None` when nothing was shown.
    pub async fn show_employee_summary(
        &self,
        item: Option<&DirectoryItem>,
    ) -> Option<EmployeeSummary> {
        let item = item?;

        // Diagnostic only: the lookup below still runs for any row kind.
        if item.data_type != DirectoryDataType::Employee {
            self.show_error(text::INVALID_OBJECT_TYPE).await;
            self.record(
                Diagnostic::error("employee.type_mismatch", "directory row is not an employee")
                    .with_field("id", item.id)
                    .with_field("name", &item.name)
                    .with_field("data_type", format!("{:?}", item.data_type)),
            );
        }

        let employee = match self.employees.employee(item.id.into()).await {
            Ok(Some(employee)) => employee,
            Ok(None) => return None,
            Err(err) => {
                self.rule_failure(
                    "employee.fetch_failed",
                    &err.into(),
                    &[("id", item.id.to_string())],
                );
                self.show_error(text::EMPLOYEE_READ_FAILED).await;
                return None;
            }
        };

        let department = match self.departments.department(employee.unit_id).await {
            Ok(department) => department,
            Err(err) => {
                self.rule_failure(
                    "department.fetch_failed",
                    &err.into(),
                    &[("unit_id", employee.unit_id.to_string())],
                );
                None
            }
        };

        let summary = EmployeeSummary::new(&employee, department.as_ref());
        self.show_info(&summary.render(), Some(text::EMPLOYEE_TITLE))
            .await;
        Some(summary)
    }

    async fn control_missing(&self, key: FieldKey) -> PriceDerivation {
        let err = RuleError::from(LayoutError::MissingControl(key));
        self.rule_failure("layout.control_missing", &err, &[("control", key.to_string())]);
        self.show_error(&text::control_missing(key.layout_name()))
            .await;
        PriceDerivation::Misconfigured(key)
    }

    async fn show_info(&self, text: &str, title: Option<&str>) {
        let result = self.messages.info(text, title).await;
        self.check_delivered("info", result);
    }

    async fn show_warning(&self, text: &str) {
        let result = self.messages.warn(text).await;
        self.check_delivered("warn", result);
    }

    async fn show_error(&self, text: &str) {
        let result = self.messages.error(text).await;
        self.check_delivered("error", result);
    }

    fn check_delivered(&self, channel: &'static str, result: Result<(), ChannelError>) {
        if let Err(err) = result {
            self.rule_failure(
                "message.channel_failed",
                &err.into(),
                &[("channel", channel.to_string())],
            );
        }
    }

    fn layout_failure(&self, operation: &'static str, err: LayoutError) {
        let event = match err {
            LayoutError::Detached | LayoutError::Access(_) | LayoutError::TypeMismatch { .. } => {
                "card.access_failed"
            }
            LayoutError::MissingControl(_) => "layout.control_missing",
        };
        self.rule_failure(event, &err.into(), &[("operation", operation.to_string())]);
    }

    fn rule_failure(
        &self,
        event: &'static str,
        err: &RuleError,
        fields: &[(&'static str, String)],
    ) {
        let level = match err.kind() {
            RuleErrorKind::Input => Level::Warn,
            RuleErrorKind::Configuration | RuleErrorKind::Collaborator => Level::Error,
        };
        let diagnostic = fields.iter().fold(
            Diagnostic::new(level, event, err.to_string()).with_field("kind", err.kind()),
            |d, (key, value)| d.with_field(*key, value),
        );
        self.record(diagnostic);
    }

    fn record(&self, diagnostic: Diagnostic) {
        self.diagnostics.emit(diagnostic);
    }
}
