//! Deferred drawing commands.
//!
//! A [`Command`] is an operation name plus a dynamically typed argument bag:
//! ordered positional arguments and named keyword arguments, each an
//! [`ArgValue`]. Commands are recorded long before any surface exists and are
//! handed to a [`Region`](crate::Region) when the figure is materialized.
//!
//! # Example
//!
//! ```
//! use plot_lattice_render::{ArgValue, Command};
//!
//! let cmd = Command::new("plot")
//!     .arg(vec![1.0, 2.0, 3.0])
//!     .kwarg("color", "red")
//!     .kwarg("linewidth", 2);
//!
//! assert_eq!(cmd.operation(), "plot");
//! assert_eq!(cmd.kwargs()["linewidth"], ArgValue::Int(2));
//! assert_eq!(cmd.to_string(), r#"plot([1.0, 2.0, 3.0], color="red", linewidth=2)"#);
//! ```

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A single argument value carried by a [`Command`].
///
/// The payload is opaque to the compositor; only the region that finally
/// executes the command interprets it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(untagged)]
pub enum ArgValue {
    /// An explicit "no value".
    #[default]
    Null,
    /// A boolean flag.
    Bool(bool),
    /// A 64-bit signed integer.
    Int(i64),
    /// A 64-bit floating point number.
    Float(f64),
    /// A string value.
    Str(String),
    /// A sequence of values (data series, tick lists, ...).
    List(Vec<ArgValue>),
}

impl ArgValue {
    /// Returns true if this value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, ArgValue::Null)
    }

    /// Returns this value as a boolean, if it is one.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ArgValue::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns this value as an integer, if it is one.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            ArgValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns this value as a float.
    /// Also converts integers to floats.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            ArgValue::Float(v) => Some(*v),
            ArgValue::Int(v) => Some(*v as f64),
            _ => None,
        }
    }

    /// Returns this value as a string slice, if it is one.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ArgValue::Str(v) => Some(v),
            _ => None,
        }
    }

    /// Returns this value as a list, if it is one.
    pub fn as_list(&self) -> Option<&[ArgValue]> {
        match self {
            ArgValue::List(v) => Some(v),
            _ => None,
        }
    }
}

impl fmt::Display for ArgValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgValue::Null => write!(f, "None"),
            ArgValue::Bool(v) => write!(f, "{v}"),
            ArgValue::Int(v) => write!(f, "{v}"),
            ArgValue::Float(v) => write!(f, "{v:?}"),
            ArgValue::Str(v) => write!(f, "{v:?}"),
            ArgValue::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
        }
    }
}

impl From<bool> for ArgValue {
    fn from(v: bool) -> Self {
        ArgValue::Bool(v)
    }
}

impl From<i32> for ArgValue {
    fn from(v: i32) -> Self {
        ArgValue::Int(v as i64)
    }
}

impl From<i64> for ArgValue {
    fn from(v: i64) -> Self {
        ArgValue::Int(v)
    }
}

impl From<u32> for ArgValue {
    fn from(v: u32) -> Self {
        ArgValue::Int(v as i64)
    }
}

impl From<usize> for ArgValue {
    fn from(v: usize) -> Self {
        ArgValue::Int(v as i64)
    }
}

impl From<f32> for ArgValue {
    fn from(v: f32) -> Self {
        ArgValue::Float(v as f64)
    }
}

impl From<f64> for ArgValue {
    fn from(v: f64) -> Self {
        ArgValue::Float(v)
    }
}

impl From<String> for ArgValue {
    fn from(v: String) -> Self {
        ArgValue::Str(v)
    }
}

impl From<&str> for ArgValue {
    fn from(v: &str) -> Self {
        ArgValue::Str(v.to_string())
    }
}

impl<T: Into<ArgValue>> From<Vec<T>> for ArgValue {
    fn from(v: Vec<T>) -> Self {
        ArgValue::List(v.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<ArgValue>> From<Option<T>> for ArgValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(ArgValue::Null, Into::into)
    }
}

/// A named drawing operation with its recorded arguments.
///
/// The operation name is not checked against any known set when the command
/// is built; an unsupported name is only rejected by the region that
/// eventually executes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Command {
    operation: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    args: Vec<ArgValue>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    kwargs: BTreeMap<String, ArgValue>,
}

impl Command {
    /// Create a command with no arguments.
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            args: Vec::new(),
            kwargs: BTreeMap::new(),
        }
    }

    /// Append a positional argument.
    pub fn arg(mut self, value: impl Into<ArgValue>) -> Self {
        self.args.push(value.into());
        self
    }

    /// Append several positional arguments in order.
    pub fn args<I, V>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<ArgValue>,
    {
        self.args.extend(values.into_iter().map(Into::into));
        self
    }

    /// Set a keyword argument. A repeated name replaces the earlier value.
    pub fn kwarg(mut self, name: impl Into<String>, value: impl Into<ArgValue>) -> Self {
        self.kwargs.insert(name.into(), value.into());
        self
    }

    /// The operation name.
    #[inline]
    pub fn operation(&self) -> &str {
        &self.operation
    }

    /// Positional arguments in recording order.
    #[inline]
    pub fn positional(&self) -> &[ArgValue] {
        &self.args
    }

    /// Keyword arguments, sorted by name.
    #[inline]
    pub fn kwargs(&self) -> &BTreeMap<String, ArgValue> {
        &self.kwargs
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.operation)?;
        let mut first = true;
        for arg in &self.args {
            if !first {
                write!(f, ", ")?;
            }
            write!(f, "{arg}")?;
            first = false;
        }
        for (name, value) in &self.kwargs {
            if !first {
                write!(f, ", ")?;
            }
            write!(f, "{name}={value}")?;
            first = false;
        }
        write!(f, ")")
    }
}

static_assertions::assert_impl_all!(Command: Send, Sync);
