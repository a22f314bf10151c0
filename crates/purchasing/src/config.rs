use chrono::{FixedOffset, Offset, Utc};

/// Env var overriding the summary date format.
pub const DATE_FORMAT_ENV: &str = "EQUIPREQ_DATE_FORMAT";

/// Env var holding the users' UTC offset, e.g. `+03:00`.
pub const UTC_OFFSET_ENV: &str = "EQUIPREQ_UTC_OFFSET";

/// Day/month/year, as the card's users read dates.
pub const DEFAULT_DATE_FORMAT: &str = "%d.%m.%Y";

/// Rule engine settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// `chrono` strftime pattern for dates in the card summary.
    pub date_format: String,
    /// Offset the users' calendar days are taken in.
    pub utc_offset: FixedOffset,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            utc_offset: Utc.fix(),
        }
    }
}

impl EngineConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let date_format = lookup(DATE_FORMAT_ENV)
            .filter(|v| is_valid_date_format(v))
            .unwrap_or_else(|| DEFAULT_DATE_FORMAT.to_string());
        let utc_offset = lookup(UTC_OFFSET_ENV)
            .and_then(|v| v.trim().parse::<FixedOffset>().ok())
            .unwrap_or_else(|| Self::default().utc_offset);
        Self {
            date_format,
            utc_offset,
        }
    }
}

/// Rejects blank patterns and ones `chrono` cannot render.
fn is_valid_date_format(pattern: &str) -> bool {
    use chrono::format::{Item, StrftimeItems};

    !pattern.trim().is_empty()
        && StrftimeItems::new(pattern).all(|item| !matches!(item, Item::Error))
}
