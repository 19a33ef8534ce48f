//! Command parameters and the naming scheme that derives them from columns.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use crate::error::DataError;

/// Storage type hint attached to a [`Parameter`].
///
/// Drivers that do not distinguish storage types may ignore the hint; it
/// exists so a transport can be described once and bound against stores
/// that do care.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum ParamType {
    /// Boolean flag.
    Bool,
    /// 32-bit signed integer.
    Int,
    /// 64-bit signed integer.
    BigInt,
    /// 64-bit float.
    Double,
    /// Exact decimal, sized via [`Parameter::with_size`].
    Decimal,
    /// Character data, sized via [`Parameter::with_size`].
    Text,
    /// Calendar date without a time component.
    Date,
    /// Date and time of day.
    Timestamp,
    /// Raw bytes.
    Binary,
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Bool => "bool",
            Self::Int => "int",
            Self::BigInt => "big_int",
            Self::Double => "double",
            Self::Decimal => "decimal",
            Self::Text => "text",
            Self::Date => "date",
            Self::Timestamp => "timestamp",
            Self::Binary => "binary",
        };
        f.write_str(name)
    }
}

/// Sigil scheme a provider uses to derive parameter names from column
/// names.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum ParamStyle {
    /// `@column` placeholders.
    #[default]
    AtPrefix,
    /// `:column` placeholders.
    ColonPrefix,
    /// `$column` placeholders.
    DollarPrefix,
}

impl ParamStyle {
    /// Derives the parameter name for `column`.
    #[must_use]
    pub fn decorate(self, column: &str) -> String {
        match self {
            Self::AtPrefix => format!("@{column}"),
            Self::ColonPrefix => format!(":{column}"),
            Self::DollarPrefix => format!("${column}"),
        }
    }
}

/// A named command parameter associated with a source column.
///
/// The association is what lets a binding handler move a value from a
/// record straight into the right placeholder of the destination command.
/// The value starts as [`Value::Null`] and is overwritten per record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    column: String,
    name: String,
    ty: Option<ParamType>,
    size: Option<u32>,
    value: Value,
}

impl Parameter {
    /// Creates a parameter bound to `column`, addressable as `name`.
    pub fn new(column: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            name: name.into(),
            ty: None,
            size: None,
            value: Value::Null,
        }
    }

    /// Attaches a storage type hint.
    #[must_use]
    pub fn with_type(mut self, ty: ParamType) -> Self {
        self.ty = Some(ty);
        self
    }

    /// Attaches a size hint (length for text, precision for decimals).
    #[must_use]
    pub fn with_size(mut self, size: u32) -> Self {
        self.size = Some(size);
        self
    }

    /// The source column this parameter is associated with.
    #[must_use]
    pub fn column(&self) -> &str {
        &self.column
    }

    /// The placeholder name used to address this parameter.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The storage type hint, if any.
    #[must_use]
    pub fn ty(&self) -> Option<ParamType> {
        self.ty
    }

    /// The size hint, if any.
    #[must_use]
    pub fn size(&self) -> Option<u32> {
        self.size
    }

    /// The current value.
    #[must_use]
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Replaces the current value.
    pub fn set_value(&mut self, value: Value) {
        self.value = value;
    }
}

/// Ordered, name-unique parameter collection.
///
/// Drivers embed one per command so the addressing rules (no duplicate
/// names, loud lookup misses) are identical across stores.
#[derive(Debug, Clone, Default)]
pub struct ParamSet {
    params: Vec<Parameter>,
}

impl ParamSet {
    /// Empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a parameter.
    ///
    /// # Errors
    ///
    /// Returns [`DataError::DuplicateParameter`] when a parameter with the
    /// same name is already present.
    pub fn add(&mut self, param: Parameter) -> Result<(), DataError> {
        if self.params.iter().any(|p| p.name() == param.name()) {
            return Err(DataError::duplicate_parameter(param.name()));
        }
        self.params.push(param);
        Ok(())
    }

    /// Sets the value of the parameter addressed by `name`.
    ///
    /// # Errors
    ///
    /// Returns [`DataError::UnknownParameter`] when no parameter has that
    /// name.
    pub fn set(&mut self, name: &str, value: Value) -> Result<(), DataError> {
        match self.params.iter_mut().find(|p| p.name() == name) {
            Some(param) => {
                param.set_value(value);
                Ok(())
            }
            None => Err(DataError::unknown_parameter(name)),
        }
    }

    /// Sets the value of the parameter at `index`, in insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`DataError::IndexOutOfRange`] when the index is past the
    /// end of the set.
    pub fn set_at(&mut self, index: usize, value: Value) -> Result<(), DataError> {
        let len = self.params.len();
        match self.params.get_mut(index) {
            Some(param) => {
                param.set_value(value);
                Ok(())
            }
            None => Err(DataError::IndexOutOfRange { index, len }),
        }
    }

    /// Looks up a parameter by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Parameter> {
        self.params.iter().find(|p| p.name() == name)
    }

    /// Parameters in insertion order.
    #[must_use]
    pub fn as_slice(&self) -> &[Parameter] {
        &self.params
    }

    /// Number of parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Returns `true` when no parameters are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}
