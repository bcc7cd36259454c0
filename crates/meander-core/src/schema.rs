//! Structural schema descriptors.
//!
//! The engine reads descriptors through exactly two capability queries,
//! captured by the [`Introspect`] trait: does the descriptor expose named
//! sub-fields, and if not, what primitive kind tag does it report. Any
//! schema library answering those two questions can back Meander contracts.
//!
//! [`Schema`] is the default descriptor shipped with the crate. It is a
//! plain tagged enum, cheap to construct in tests and small services that
//! do not carry a full schema system.
//!
//! # Example
//!
//! ```
//! use meander_core::Schema;
//!
//! let user = Schema::object([
//!     ("name", Schema::string()),
//!     ("age", Schema::integer()),
//! ]);
//!
//! assert_eq!(user.kind(), "object");
//! assert!(user.conforms(&serde_json::json!({"name": "Alice", "age": 30})).is_ok());
//! ```

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Capability interface through which the engine introspects descriptors.
///
/// The compatibility checker in `meander-compat` is written entirely
/// against this trait, so it can be retargeted to any schema library that
/// exposes a named-field mapping for object-like descriptors and a kind
/// tag for everything else.
pub trait Introspect {
    /// Named sub-fields when this descriptor is object-like, `None`
    /// otherwise.
    fn fields(&self) -> Option<&IndexMap<String, Self>>
    where
        Self: Sized;

    /// The primitive kind tag this descriptor reports.
    ///
    /// Returning `None` means the tag is unreadable; the compatibility
    /// checker treats such descriptors as incompatible with everything
    /// rather than failing.
    fn kind_tag(&self) -> Option<&str>;
}

/// The default structural descriptor.
///
/// A descriptor either exposes named fields ([`Schema::Object`]) or reports
/// a primitive kind tag. Note that [`Schema::Array`] exposes no named
/// fields, so two array descriptors compare by kind tag alone under the
/// compatibility algorithm; item shapes are not recursed into.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Schema {
    /// UTF-8 string.
    String,
    /// Integral number.
    Integer,
    /// Floating-point number.
    Number,
    /// Boolean.
    Boolean,
    /// The null value.
    Null,
    /// Accepts any value.
    Any,
    /// Homogeneous list.
    Array {
        /// Descriptor for the list items.
        items: Box<Schema>,
    },
    /// Named-field record.
    Object {
        /// Field descriptors, in declaration order.
        fields: IndexMap<String, Schema>,
    },
}

impl Schema {
    /// Creates a string descriptor.
    #[must_use]
    pub fn string() -> Self {
        Self::String
    }

    /// Creates an integer descriptor.
    #[must_use]
    pub fn integer() -> Self {
        Self::Integer
    }

    /// Creates a number descriptor.
    #[must_use]
    pub fn number() -> Self {
        Self::Number
    }

    /// Creates a boolean descriptor.
    #[must_use]
    pub fn boolean() -> Self {
        Self::Boolean
    }

    /// Creates a null descriptor.
    #[must_use]
    pub fn null() -> Self {
        Self::Null
    }

    /// Creates a descriptor that accepts any value.
    #[must_use]
    pub fn any() -> Self {
        Self::Any
    }

    /// Creates an array descriptor with the given item descriptor.
    #[must_use]
    pub fn array(items: Schema) -> Self {
        Self::Array {
            items: Box::new(items),
        }
    }

    /// Creates an object descriptor from `(name, descriptor)` pairs.
    ///
    /// Field order is preserved.
    ///
    /// # Example
    ///
    /// ```
    /// use meander_core::Schema;
    ///
    /// let point = Schema::object([
    ///     ("x", Schema::number()),
    ///     ("y", Schema::number()),
    /// ]);
    /// ```
    #[must_use]
    pub fn object<K, I>(fields: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Schema)>,
    {
        Self::Object {
            fields: fields
                .into_iter()
                .map(|(name, schema)| (name.into(), schema))
                .collect(),
        }
    }

    /// Returns the kind tag for this descriptor.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Null => "null",
            Self::Any => "any",
            Self::Array { .. } => "array",
            Self::Object { .. } => "object",
        }
    }

    /// Checks a JSON value against this descriptor.
    ///
    /// Declared object fields must be present and conform; fields not
    /// declared are ignored. This is a convenience for middleware that want
    /// to validate their own inputs - the composition and validation engine
    /// never calls it.
    ///
    /// # Errors
    ///
    /// Returns a [`ConformanceError`] locating the first mismatch.
    pub fn conforms(&self, value: &Value) -> Result<(), ConformanceError> {
        self.conforms_at(value, "$")
    }

    fn conforms_at(&self, value: &Value, path: &str) -> Result<(), ConformanceError> {
        match self {
            Self::Any => Ok(()),
            Self::Null => {
                if value.is_null() {
                    Ok(())
                } else {
                    Err(ConformanceError::mismatch(path, "null", value))
                }
            }
            Self::String => {
                if value.is_string() {
                    Ok(())
                } else {
                    Err(ConformanceError::mismatch(path, "string", value))
                }
            }
            Self::Integer => {
                if value.is_i64() || value.is_u64() {
                    Ok(())
                } else {
                    Err(ConformanceError::mismatch(path, "integer", value))
                }
            }
            Self::Number => {
                if value.is_number() {
                    Ok(())
                } else {
                    Err(ConformanceError::mismatch(path, "number", value))
                }
            }
            Self::Boolean => {
                if value.is_boolean() {
                    Ok(())
                } else {
                    Err(ConformanceError::mismatch(path, "boolean", value))
                }
            }
            Self::Array { items } => {
                let array = value
                    .as_array()
                    .ok_or_else(|| ConformanceError::mismatch(path, "array", value))?;
                for (index, item) in array.iter().enumerate() {
                    items.conforms_at(item, &format!("{path}[{index}]"))?;
                }
                Ok(())
            }
            Self::Object { fields } => {
                let object = value
                    .as_object()
                    .ok_or_else(|| ConformanceError::mismatch(path, "object", value))?;
                for (name, field_schema) in fields {
                    let field_path = format!("{path}.{name}");
                    match object.get(name) {
                        Some(field_value) => field_schema.conforms_at(field_value, &field_path)?,
                        None => {
                            return Err(ConformanceError {
                                path: field_path,
                                message: format!("missing field '{name}'"),
                            })
                        }
                    }
                }
                Ok(())
            }
        }
    }
}

impl Introspect for Schema {
    fn fields(&self) -> Option<&IndexMap<String, Self>> {
        match self {
            Self::Object { fields } => Some(fields),
            _ => None,
        }
    }

    fn kind_tag(&self) -> Option<&str> {
        Some(self.kind())
    }
}

/// A data mismatch found by [`Schema::conforms`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConformanceError {
    /// JSON path where the mismatch occurred.
    pub path: String,
    /// What went wrong there.
    pub message: String,
}

impl ConformanceError {
    fn mismatch(path: &str, expected: &str, value: &Value) -> Self {
        Self {
            path: path.to_string(),
            message: format!("expected {expected}, got {}", value_type_name(value)),
        }
    }
}

impl fmt::Display for ConformanceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "value does not conform at '{}': {}", self.path, self.message)
    }
}

impl std::error::Error for ConformanceError {}

/// Returns a human-readable name for a JSON value type.
fn value_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
