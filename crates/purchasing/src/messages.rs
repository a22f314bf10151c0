//! The host's message box and the fixed texts the rules show through it.

use async_trait::async_trait;
use thiserror::Error;

/// Result of asking the user a yes/no question.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ConfirmOutcome {
    Confirmed,
    Declined,
    /// The prompt could not be shown (or its answer could not be read).
    ChannelFailure,
}

impl ConfirmOutcome {
    pub fn is_confirmed(self) -> bool {
        matches!(self, ConfirmOutcome::Confirmed)
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ChannelError {
    #[error("message was dismissed")]
    Dismissed,

    #[error("message service unavailable: {0}")]
    Unavailable(String),
}

/// Modal notifications shown by the host.
#[async_trait]
pub trait MessageBox: Send + Sync {
    async fn confirm(&self, text: &str) -> ConfirmOutcome;

    async fn info(&self, text: &str, title: Option<&str>) -> Result<(), ChannelError>;

    async fn warn(&self, text: &str) -> Result<(), ChannelError>;

    async fn error(&self, text: &str) -> Result<(), ChannelError>;
}

pub mod text {
    pub const CONFIRM_SAVE: &str = "Save the card?";
    pub const SAVING: &str = "The card is being saved!";
    pub const SAVED: &str = "The card has been saved!";

    pub const NAME_REQUIRED: &str = "Fill in the 'Name' field";
    pub const DATE_ORDER: &str = "The 'from' date must be earlier than the 'to' date!";

    pub const CARD_READ_FAILED: &str = "Could not retrieve card data";
    pub const EMPLOYEE_READ_FAILED: &str = "Could not retrieve employee data";
    pub const INVALID_OBJECT_TYPE: &str = "Invalid object type";
    pub const EMPLOYEE_TITLE: &str = "Selected employee";

    pub const NOT_SPECIFIED: &str = "not specified";
    pub const DATE_NOT_SPECIFIED: &str = "not specified";
    pub const CITY_NOT_SPECIFIED: &str = "not specified";

    pub fn control_missing(control: &str) -> String {
        format!("Control {control} is missing from the layout!")
    }

    pub fn price_not_a_number(item_name: &str, raw: &str) -> String {
        format!("The description of directory row {item_name} is not a number! Value: {raw}")
    }
}
