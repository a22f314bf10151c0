//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Field values and directory snapshots handed over by the host are values:
/// two snapshots with the same attributes are interchangeable, and the rules
/// never keep one past a single invocation.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}

impl ValueObject for String {}
impl ValueObject for i64 {}
impl ValueObject for chrono::DateTime<chrono::Utc> {}
