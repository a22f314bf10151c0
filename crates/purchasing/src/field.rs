//! Card fields: enumerated keys, dynamic values and typed accessors.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use equipreq_core::ValueObject;

use crate::directory::DirectoryItem;

/// The fields of the equipment purchase request card the rules know about.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldKey {
    #[serde(rename = "name")]
    Name,
    #[serde(rename = "dateOfCreate")]
    DateOfCreate,
    #[serde(rename = "startDate")]
    StartDate,
    #[serde(rename = "endDate")]
    EndDate,
    #[serde(rename = "purpose")]
    Purpose,
    #[serde(rename = "directoryDesignerRowCity")]
    City,
    #[serde(rename = "directoryDesignerRowTechType")]
    EquipmentType,
    #[serde(rename = "numberPrice")]
    Price,
}

impl FieldKey {
    pub const ALL: [FieldKey; 8] = [
        FieldKey::Name,
        FieldKey::DateOfCreate,
        FieldKey::StartDate,
        FieldKey::EndDate,
        FieldKey::Purpose,
        FieldKey::City,
        FieldKey::EquipmentType,
        FieldKey::Price,
    ];

    /// Control name in the host layout.
    pub fn layout_name(self) -> &'static str {
        match self {
            FieldKey::Name => "name",
            FieldKey::DateOfCreate => "dateOfCreate",
            FieldKey::StartDate => "startDate",
            FieldKey::EndDate => "endDate",
            FieldKey::Purpose => "purpose",
            FieldKey::City => "directoryDesignerRowCity",
            FieldKey::EquipmentType => "directoryDesignerRowTechType",
            FieldKey::Price => "numberPrice",
        }
    }

    pub fn from_layout_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.layout_name() == name)
    }

    pub fn kind(self) -> ValueKind {
        match self {
            FieldKey::Name | FieldKey::Purpose => ValueKind::Text,
            FieldKey::DateOfCreate | FieldKey::StartDate | FieldKey::EndDate => ValueKind::Date,
            FieldKey::City | FieldKey::EquipmentType => ValueKind::Directory,
            FieldKey::Price => ValueKind::Number,
        }
    }
}

impl core::fmt::Display for FieldKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.layout_name())
    }
}

/// Semantic type of a field value.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    Text,
    Date,
    Number,
    Directory,
}

impl core::fmt::Display for ValueKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let s = match self {
            ValueKind::Text => "text",
            ValueKind::Date => "date",
            ValueKind::Number => "number",
            ValueKind::Directory => "directory",
        };
        f.write_str(s)
    }
}

/// A value as stored on the host card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum FieldValue {
    Text(String),
    Date(DateTime<Utc>),
    Number(i64),
    Directory(DirectoryItem),
}

impl FieldValue {
    pub fn kind(&self) -> ValueKind {
        match self {
            FieldValue::Text(_) => ValueKind::Text,
            FieldValue::Date(_) => ValueKind::Date,
            FieldValue::Number(_) => ValueKind::Number,
            FieldValue::Directory(_) => ValueKind::Directory,
        }
    }
}

impl ValueObject for FieldValue {}

/// Rust type carried by a field of a given [`ValueKind`].
pub trait FieldKind: ValueObject + Sized {
    const KIND: ValueKind;

    /// Unwraps a dynamic value, handing it back untouched on a kind mismatch.
    fn from_value(value: FieldValue) -> Result<Self, FieldValue>;

    fn into_value(self) -> FieldValue;
}

impl FieldKind for String {
    const KIND: ValueKind = ValueKind::Text;

    fn from_value(value: FieldValue) -> Result<Self, FieldValue> {
        match value {
            FieldValue::Text(v) => Ok(v),
            other => Err(other),
        }
    }

    fn into_value(self) -> FieldValue {
        FieldValue::Text(self)
    }
}

impl FieldKind for DateTime<Utc> {
    const KIND: ValueKind = ValueKind::Date;

    fn from_value(value: FieldValue) -> Result<Self, FieldValue> {
        match value {
            FieldValue::Date(v) => Ok(v),
            other => Err(other),
        }
    }

    fn into_value(self) -> FieldValue {
        FieldValue::Date(self)
    }
}

impl FieldKind for i64 {
    const KIND: ValueKind = ValueKind::Number;

    fn from_value(value: FieldValue) -> Result<Self, FieldValue> {
        match value {
            FieldValue::Number(v) => Ok(v),
            other => Err(other),
        }
    }

    fn into_value(self) -> FieldValue {
        FieldValue::Number(self)
    }
}

impl FieldKind for DirectoryItem {
    const KIND: ValueKind = ValueKind::Directory;

    fn from_value(value: FieldValue) -> Result<Self, FieldValue> {
        match value {
            FieldValue::Directory(v) => Ok(v),
            other => Err(other),
        }
    }

    fn into_value(self) -> FieldValue {
        FieldValue::Directory(self)
    }
}

/// A field key bound to the Rust type its value must have.
#[derive(Debug)]
pub struct Field<T> {
    key: FieldKey,
    _kind: core::marker::PhantomData<fn() -> T>,
}

impl<T> Clone for Field<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Field<T> {}

impl<T: FieldKind> Field<T> {
    const fn new(key: FieldKey) -> Self {
        Self {
            key,
            _kind: core::marker::PhantomData,
        }
    }

    pub fn key(self) -> FieldKey {
        self.key
    }
}

pub const NAME: Field<String> = Field::new(FieldKey::Name);
pub const DATE_OF_CREATE: Field<DateTime<Utc>> = Field::new(FieldKey::DateOfCreate);
pub const START_DATE: Field<DateTime<Utc>> = Field::new(FieldKey::StartDate);
pub const END_DATE: Field<DateTime<Utc>> = Field::new(FieldKey::EndDate);
pub const PURPOSE: Field<String> = Field::new(FieldKey::Purpose);
pub const CITY: Field<DirectoryItem> = Field::new(FieldKey::City);
pub const EQUIPMENT_TYPE: Field<DirectoryItem> = Field::new(FieldKey::EquipmentType);
pub const PRICE: Field<i64> = Field::new(FieldKey::Price);
