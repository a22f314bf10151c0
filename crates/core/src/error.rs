//! Rule error model.

use thiserror::Error;

/// Coarse classification of a [`RuleError`], used as a diagnostic field.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum RuleErrorKind {
    Input,
    Configuration,
    Collaborator,
}

impl RuleErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            RuleErrorKind::Input => "input",
            RuleErrorKind::Configuration => "configuration",
            RuleErrorKind::Collaborator => "collaborator",
        }
    }
}

impl core::fmt::Display for RuleErrorKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure raised while evaluating a form rule.
///
/// None of these ever reach the host: every operation reports them through the
/// message channel and/or the diagnostic sink and falls back to a safe outcome.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RuleError {
    /// The user entered something the rules reject (missing required field,
    /// unordered dates, unparseable derived value).
    #[error("invalid input: {0}")]
    Input(String),

    /// The form layout is missing a control the rules depend on.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A host service (card, message channel, directory) failed.
    #[error("collaborator failure: {0}")]
    Collaborator(String),
}

impl RuleError {
    pub fn input(msg: impl Into<String>) -> Self {
        Self::Input(msg.into())
    }

    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    pub fn collaborator(msg: impl Into<String>) -> Self {
        Self::Collaborator(msg.into())
    }

    pub fn kind(&self) -> RuleErrorKind {
        match self {
            RuleError::Input(_) => RuleErrorKind::Input,
            RuleError::Configuration(_) => RuleErrorKind::Configuration,
            RuleError::Collaborator(_) => RuleErrorKind::Collaborator,
        }
    }
}
