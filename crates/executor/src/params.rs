//! Loosely typed request parameters with typed, validating accessors.
//!
//! A [`ParameterBag`] is built once per request and never mutated afterwards.
//! Handlers read it through [`ParameterBag::get_required`],
//! [`ParameterBag::get_optional`] and [`ParameterBag::get`], which convert
//! the stored [`Value`] to the requested Rust type via [`FromParam`].
//!
//! Absent and `null` are the same thing. A present value of the wrong type is
//! an [`Error::InvalidParameterType`], never a silent default.

use std::collections::HashMap;

use scribe_core::Value;

use crate::{Error, Result};

/// Conversion from a parameter [`Value`] to a typed Rust value.
pub trait FromParam: Sized {
    /// Human-readable description of the accepted shape, used in errors.
    const EXPECTED: &'static str;

    /// Convert, or `None` if `value` has the wrong shape.
    fn from_param(value: &Value) -> Option<Self>;
}

/// Immutable mapping from parameter name to value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParameterBag {
    values: HashMap<String, Value>,
    prefix: Option<String>,
}

impl ParameterBag {
    /// Empty bag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bag over an existing map.
    pub fn from_map(values: HashMap<String, Value>) -> Self {
        Self {
            values,
            prefix: None,
        }
    }

    /// Bag over a JSON object. Anything else is rejected.
    pub fn from_json(value: serde_json::Value) -> Result<Self> {
        match Value::from(value) {
            Value::Object(values) => Ok(Self::from_map(values)),
            Value::Null => Ok(Self::new()),
            other => Err(Error::InvalidParameterType {
                name: "params".to_string(),
                expected: "an object".to_string(),
                actual: describe(&other),
            }),
        }
    }

    /// Add a parameter while building the bag.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.values.insert(name.into(), value.into());
        self
    }

    /// Whether `name` is present with a non-null value.
    pub fn contains(&self, name: &str) -> bool {
        self.raw(name).is_some()
    }

    /// The stored value, if present and non-null.
    pub fn raw(&self, name: &str) -> Option<&Value> {
        self.values.get(name).filter(|v| !v.is_null())
    }

    /// Parameter names, in no particular order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Number of stored parameters (including null ones).
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the bag holds no parameters.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// `Ok(None)` when absent, `Ok(Some(v))` when convertible, error when
    /// present with the wrong type.
    pub fn get<T: FromParam>(&self, name: &str) -> Result<Option<T>> {
        match self.raw(name) {
            None => Ok(None),
            Some(value) => T::from_param(value)
                .map(Some)
                .ok_or_else(|| Error::InvalidParameterType {
                    name: self.qualified(name),
                    expected: T::EXPECTED.to_string(),
                    actual: describe(value),
                }),
        }
    }

    /// The converted value, or `MissingParameter` when absent.
    pub fn get_required<T: FromParam>(&self, name: &str) -> Result<T> {
        self.get(name)?
            .ok_or_else(|| Error::missing(self.qualified(name)))
    }

    /// The converted value, or `default` when absent. A present value of the
    /// wrong type is still an error.
    pub fn get_optional<T: FromParam>(&self, name: &str, default: T) -> Result<T> {
        Ok(self.get(name)?.unwrap_or(default))
    }

    /// Required non-empty string.
    pub fn get_non_empty(&self, name: &str) -> Result<String> {
        let value: String = self.get_required(name)?;
        if value.is_empty() {
            return Err(Error::invalid(self.qualified(name), "must not be empty"));
        }
        Ok(value)
    }

    /// Required array of objects, each exposed as a nested bag whose errors
    /// name the element (`cells[2].row`).
    pub fn get_objects(&self, name: &str) -> Result<Vec<ParameterBag>> {
        let qualified = self.qualified(name);
        let items = match self.raw(name) {
            None => return Err(Error::missing(qualified)),
            Some(Value::Array(items)) => items,
            Some(other) => {
                return Err(Error::InvalidParameterType {
                    name: qualified,
                    expected: "an array of objects".to_string(),
                    actual: describe(other),
                })
            }
        };

        items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                let element = format!("{}[{}]", qualified, i);
                match item {
                    Value::Object(fields) => Ok(ParameterBag {
                        values: fields.clone(),
                        prefix: Some(element),
                    }),
                    other => Err(Error::InvalidParameterType {
                        name: element,
                        expected: "an object".to_string(),
                        actual: describe(other),
                    }),
                }
            })
            .collect()
    }

    fn qualified(&self, name: &str) -> String {
        match &self.prefix {
            Some(prefix) => format!("{}.{}", prefix, name),
            None => name.to_string(),
        }
    }
}

impl From<HashMap<String, Value>> for ParameterBag {
    fn from(values: HashMap<String, Value>) -> Self {
        Self::from_map(values)
    }
}

/// Short description of a value for type errors: scalars show their
/// content, containers only their type.
fn describe(value: &Value) -> String {
    match value {
        Value::Array(_) | Value::Object(_) => value.type_name().to_string(),
        scalar => format!("{:?}", scalar),
    }
}

// =============================================================================
// FromParam impls
// =============================================================================

impl FromParam for Value {
    const EXPECTED: &'static str = "any value";

    fn from_param(value: &Value) -> Option<Self> {
        Some(value.clone())
    }
}

impl FromParam for String {
    const EXPECTED: &'static str = "a string";

    fn from_param(value: &Value) -> Option<Self> {
        value.as_str().map(str::to_string)
    }
}

impl FromParam for bool {
    const EXPECTED: &'static str = "a boolean";

    fn from_param(value: &Value) -> Option<Self> {
        value.as_bool()
    }
}

/// Integral view of a value: Int, or a Float with no fractional part that
/// fits in an i64.
fn integral(value: &Value) -> Option<i64> {
    match value {
        Value::Int(i) => Some(*i),
        Value::Float(f) if f.is_finite() && f.fract() == 0.0 => {
            // i64::MAX is not exactly representable; compare against 2^63
            if *f >= -9_223_372_036_854_775_808.0 && *f < 9_223_372_036_854_775_808.0 {
                Some(*f as i64)
            } else {
                None
            }
        }
        _ => None,
    }
}

impl FromParam for i64 {
    const EXPECTED: &'static str = "an integer";

    fn from_param(value: &Value) -> Option<Self> {
        integral(value)
    }
}

macro_rules! unsigned_param {
    ($($ty:ty),*) => {
        $(
            impl FromParam for $ty {
                const EXPECTED: &'static str = "a non-negative integer";

                fn from_param(value: &Value) -> Option<Self> {
                    integral(value).and_then(|i| <$ty>::try_from(i).ok())
                }
            }
        )*
    };
}

unsigned_param!(u32, u64, usize);

impl FromParam for f64 {
    const EXPECTED: &'static str = "a number";

    fn from_param(value: &Value) -> Option<Self> {
        match value {
            Value::Int(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }
}

impl<T: FromParam> FromParam for Vec<T> {
    const EXPECTED: &'static str = "an array";

    fn from_param(value: &Value) -> Option<Self> {
        value.as_array()?.iter().map(T::from_param).collect()
    }
}

impl FromParam for HashMap<String, Value> {
    const EXPECTED: &'static str = "an object";

    fn from_param(value: &Value) -> Option<Self> {
        value.as_object().cloned()
    }
}
