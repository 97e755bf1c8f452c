//! Insertion-ordered query option bag.

use super::value::QueryValue;
use crate::error::{LinkError, LinkResult};
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value as JsonValue;

/// Mapping of query keys to values, kept in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryMap {
	entries: IndexMap<String, QueryValue>,
}

impl QueryMap {
	pub fn new() -> Self {
		Self::default()
	}

	/// Adds an entry, builder style. Re-inserting a key keeps its original
	/// position and replaces its value.
	pub fn with(mut self, key: impl Into<String>, value: impl Into<QueryValue>) -> Self {
		self.insert(key, value);
		self
	}

	pub fn insert(&mut self, key: impl Into<String>, value: impl Into<QueryValue>) {
		self.entries.insert(key.into(), value.into());
	}

	pub fn get(&self, key: &str) -> Option<&QueryValue> {
		self.entries.get(key)
	}

	pub fn contains_key(&self, key: &str) -> bool {
		self.entries.contains_key(key)
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	pub fn iter(&self) -> impl Iterator<Item = (&str, &QueryValue)> {
		self.entries.iter().map(|(k, v)| (k.as_str(), v))
	}

	/// Builds a map from a JSON object, keeping the object's key order.
	///
	/// # Errors
	///
	/// Fails when `value` is not an object or holds a value a query string
	/// cannot represent.
	pub fn from_json(value: JsonValue) -> LinkResult<Self> {
		let JsonValue::Object(fields) = value else {
			return Err(LinkError::InvalidQueryValue {
				key: String::new(),
				reason: "query options must be an object".to_string(),
			});
		};

		fields
			.into_iter()
			.map(|(key, value)| QueryValue::from_json(&key, value).map(|v| (key, v)))
			.collect::<LinkResult<IndexMap<_, _>>>()
			.map(|entries| Self { entries })
	}

	/// Builds a map from any serializable struct or map, in field order.
	pub fn from_serialize<T: Serialize + ?Sized>(value: &T) -> LinkResult<Self> {
		Self::from_json(serde_json::to_value(value)?)
	}
}

impl<K: Into<String>, V: Into<QueryValue>> FromIterator<(K, V)> for QueryMap {
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		let mut map = Self::new();
		for (key, value) in iter {
			map.insert(key, value);
		}
		map
	}
}

impl<K: Into<String>, V: Into<QueryValue>, const N: usize> From<[(K, V); N]> for QueryMap {
	fn from(entries: [(K, V); N]) -> Self {
		entries.into_iter().collect()
	}
}

impl<'a> IntoIterator for &'a QueryMap {
	type Item = (&'a String, &'a QueryValue);
	type IntoIter = indexmap::map::Iter<'a, String, QueryValue>;

	fn into_iter(self) -> Self::IntoIter {
		self.entries.iter()
	}
}
