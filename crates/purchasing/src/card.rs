//! Access to the card the rules run against.

use std::collections::HashMap;
use std::sync::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};

use thiserror::Error;

use crate::field::{Field, FieldKey, FieldKind, FieldValue, ValueKind};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LayoutError {
    /// The field's control is not part of the form layout.
    #[error("control {0} is missing from the layout")]
    MissingControl(FieldKey),

    #[error("field {field} holds a {found} value, expected {expected}")]
    TypeMismatch {
        field: FieldKey,
        expected: ValueKind,
        found: ValueKind,
    },

    /// The host closed or navigated away from the card.
    #[error("card is no longer attached to a form")]
    Detached,

    #[error("card access failed: {0}")]
    Access(String),
}

/// Host-side form layout of one card.
///
/// A control that is not part of the layout reads as `Ok(None)`; use
/// [`CardLayout::contains`] to tell "absent control" from "empty value".
pub trait CardLayout: Send + Sync {
    fn contains(&self, key: FieldKey) -> Result<bool, LayoutError>;

    fn value(&self, key: FieldKey) -> Result<Option<FieldValue>, LayoutError>;

    /// Writes (or, with `None`, clears) the value of an existing control.
    fn set_value(&self, key: FieldKey, value: Option<FieldValue>) -> Result<(), LayoutError>;
}

/// Typed reads and writes on top of [`CardLayout`].
pub trait CardLayoutExt: CardLayout {
    fn get<T: FieldKind>(&self, field: Field<T>) -> Result<Option<T>, LayoutError> {
        let Some(value) = self.value(field.key())? else {
            return Ok(None);
        };
        T::from_value(value).map(Some).map_err(|found| LayoutError::TypeMismatch {
            field: field.key(),
            expected: T::KIND,
            found: found.kind(),
        })
    }

    fn set<T: FieldKind>(&self, field: Field<T>, value: Option<T>) -> Result<(), LayoutError> {
        self.set_value(field.key(), value.map(FieldKind::into_value))
    }

    fn has<T: FieldKind>(&self, field: Field<T>) -> Result<bool, LayoutError> {
        self.contains(field.key())
    }
}

impl<L: CardLayout + ?Sized> CardLayoutExt for L {}

/// In-memory card snapshot.
///
/// Every control added through the builder methods is part of the layout,
/// whether or not it holds a value.
#[derive(Debug, Default)]
pub struct InMemoryCard {
    controls: RwLock<HashMap<FieldKey, Option<FieldValue>>>,
    detached: AtomicBool,
}

impl InMemoryCard {
    pub fn new() -> Self {
        Self::default()
    }

    /// A card whose layout contains every known control, all empty.
    pub fn with_all_controls() -> Self {
        let card = Self::new();
        if let Ok(mut controls) = card.controls.write() {
            for key in FieldKey::ALL {
                controls.insert(key, None);
            }
        }
        card
    }

    pub fn with_control(self, key: FieldKey) -> Self {
        if let Ok(mut controls) = self.controls.write() {
            controls.entry(key).or_insert(None);
        }
        self
    }

    pub fn with_value<T: FieldKind>(self, field: Field<T>, value: T) -> Self {
        if let Ok(mut controls) = self.controls.write() {
            controls.insert(field.key(), Some(value.into_value()));
        }
        self
    }

    pub fn without_control(self, key: FieldKey) -> Self {
        if let Ok(mut controls) = self.controls.write() {
            controls.remove(&key);
        }
        self
    }

    /// Simulates the host tearing the form down.
    pub fn detach(&self) {
        self.detached.store(true, Ordering::SeqCst);
    }

    fn ensure_attached(&self) -> Result<(), LayoutError> {
        if self.detached.load(Ordering::SeqCst) {
            return Err(LayoutError::Detached);
        }
        Ok(())
    }
}

impl CardLayout for InMemoryCard {
    fn contains(&self, key: FieldKey) -> Result<bool, LayoutError> {
        self.ensure_attached()?;
        let controls = self
            .controls
            .read()
            .map_err(|_| LayoutError::Access("lock poisoned".to_string()))?;
        Ok(controls.contains_key(&key))
    }

    fn value(&self, key: FieldKey) -> Result<Option<FieldValue>, LayoutError> {
        self.ensure_attached()?;
        let controls = self
            .controls
            .read()
            .map_err(|_| LayoutError::Access("lock poisoned".to_string()))?;
        Ok(controls.get(&key).cloned().flatten())
    }

    fn set_value(&self, key: FieldKey, value: Option<FieldValue>) -> Result<(), LayoutError> {
        self.ensure_attached()?;
        let mut controls = self
            .controls
            .write()
            .map_err(|_| LayoutError::Access("lock poisoned".to_string()))?;
        let slot = controls
            .get_mut(&key)
            .ok_or(LayoutError::MissingControl(key))?;
        *slot = value;
        Ok(())
    }
}
