//! Route parameter values and maps.
//!
//! A [`ParameterMap`] is what callers hand to a `route-to:<name>` event or to
//! reverse lookup. A route firing receives the values positionally, ordered the
//! way the template declares its placeholders.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A single route parameter value.
///
/// `Null` and the empty string count as *absent* for reverse lookup; every
/// other value, including `0` and `false`, is present.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
	/// No value.
	#[default]
	Null,
	/// Boolean value.
	Bool(bool),
	/// Integer value.
	Int(i64),
	/// Floating point value.
	Float(f64),
	/// String value.
	Str(String),
}

impl ParamValue {
	/// Whether the value takes part in reverse lookup.
	pub fn is_present(&self) -> bool {
		match self {
			Self::Null => false,
			Self::Str(s) => !s.is_empty(),
			_ => true,
		}
	}

	/// Whether the value is `Null`.
	pub fn is_null(&self) -> bool {
		matches!(self, Self::Null)
	}

	/// Borrow the string if this is a `Str` value.
	pub fn as_str(&self) -> Option<&str> {
		match self {
			Self::Str(s) => Some(s),
			_ => None,
		}
	}

	/// Parse the URL form of the value, `None` when absent or unparsable.
	///
	/// ```
	/// use shasta_urls::ParamValue;
	///
	/// assert_eq!(ParamValue::from("42").parse::<u32>(), Some(42));
	/// assert_eq!(ParamValue::Null.parse::<u32>(), None);
	/// ```
	pub fn parse<T: FromStr>(&self) -> Option<T> {
		if !self.is_present() {
			return None;
		}
		self.to_string().parse().ok()
	}

	/// Convert a JSON scalar. Arrays and objects have no URL form.
	pub fn from_json(value: &serde_json::Value) -> Option<Self> {
		use serde_json::Value;

		match value {
			Value::Null => Some(Self::Null),
			Value::Bool(b) => Some(Self::Bool(*b)),
			Value::Number(n) => n
				.as_i64()
				.map(Self::Int)
				.or_else(|| n.as_f64().map(Self::Float)),
			Value::String(s) => Some(Self::Str(s.clone())),
			Value::Array(_) | Value::Object(_) => None,
		}
	}
}

impl fmt::Display for ParamValue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Null => Ok(()),
			Self::Bool(b) => write!(f, "{}", b),
			Self::Int(i) => write!(f, "{}", i),
			Self::Float(x) => write!(f, "{}", x),
			Self::Str(s) => f.write_str(s),
		}
	}
}

impl From<&str> for ParamValue {
	fn from(value: &str) -> Self {
		Self::Str(value.to_string())
	}
}

impl From<String> for ParamValue {
	fn from(value: String) -> Self {
		Self::Str(value)
	}
}

impl From<bool> for ParamValue {
	fn from(value: bool) -> Self {
		Self::Bool(value)
	}
}

impl From<i64> for ParamValue {
	fn from(value: i64) -> Self {
		Self::Int(value)
	}
}

impl From<i32> for ParamValue {
	fn from(value: i32) -> Self {
		Self::Int(i64::from(value))
	}
}

impl From<u32> for ParamValue {
	fn from(value: u32) -> Self {
		Self::Int(i64::from(value))
	}
}

impl From<f64> for ParamValue {
	fn from(value: f64) -> Self {
		Self::Float(value)
	}
}

impl<T: Into<ParamValue>> From<Option<T>> for ParamValue {
	fn from(value: Option<T>) -> Self {
		value.map_or(Self::Null, Into::into)
	}
}

/// Named route parameters, kept in insertion order.
///
/// # Examples
///
/// ```
/// use shasta_urls::{ParamValue, ParameterMap};
///
/// let params = ParameterMap::new().with("id", 12345).with("name", "leland");
/// let ordered = params.values_in(&["name".to_string(), "id".to_string(), "page".to_string()]);
///
/// assert_eq!(
///     ordered,
///     vec![ParamValue::from("leland"), ParamValue::Int(12345), ParamValue::Null]
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParameterMap {
	values: IndexMap<String, ParamValue>,
}

impl ParameterMap {
	/// Create an empty map.
	pub fn new() -> Self {
		Self::default()
	}

	/// Builder-style insert.
	pub fn with(mut self, name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
		self.insert(name, value);
		self
	}

	/// Insert or overwrite a parameter, returning the previous value.
	pub fn insert(
		&mut self,
		name: impl Into<String>,
		value: impl Into<ParamValue>,
	) -> Option<ParamValue> {
		self.values.insert(name.into(), value.into())
	}

	/// Look up a parameter by name.
	pub fn get(&self, name: &str) -> Option<&ParamValue> {
		self.values.get(name)
	}

	/// Look up a parameter that is present in the reverse-lookup sense.
	pub fn get_present(&self, name: &str) -> Option<&ParamValue> {
		self.get(name).filter(|value| value.is_present())
	}

	/// Remove a parameter, keeping the order of the others.
	pub fn remove(&mut self, name: &str) -> Option<ParamValue> {
		self.values.shift_remove(name)
	}

	/// Number of entries, present or not.
	pub fn len(&self) -> usize {
		self.values.len()
	}

	/// Whether the map has no entries.
	pub fn is_empty(&self) -> bool {
		self.values.is_empty()
	}

	/// Iterate entries in insertion order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
		self.values.iter().map(|(k, v)| (k.as_str(), v))
	}

	/// Values for `order`, one per name; names not in the map yield `Null`.
	pub fn values_in(&self, order: &[String]) -> Vec<ParamValue> {
		order
			.iter()
			.map(|name| self.get(name).cloned().unwrap_or_default())
			.collect()
	}

	/// Pair positional values with `names`.
	///
	/// Extra values without a name are dropped.
	pub fn from_values(names: &[String], values: &[ParamValue]) -> Self {
		names
			.iter()
			.cloned()
			.zip(values.iter().cloned())
			.collect()
	}
}

impl<K, V> FromIterator<(K, V)> for ParameterMap
where
	K: Into<String>,
	V: Into<ParamValue>,
{
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		Self {
			values: iter
				.into_iter()
				.map(|(k, v)| (k.into(), v.into()))
				.collect(),
		}
	}
}
