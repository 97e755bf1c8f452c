//! Values accepted in query options.

use crate::error::{LinkError, LinkResult};
use indexmap::IndexMap;
use serde_json::Value as JsonValue;

/// A single query value.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryScalar {
	String(String),
	Int(i64),
	Float(f64),
	Bool(bool),
}

impl QueryScalar {
	/// Renders the scalar as it appears in a query string.
	///
	/// Booleans render as `1` / `0`. Non-finite floats have no textual form
	/// a server would parse back, so they are rejected.
	pub fn render(&self, key: &str) -> LinkResult<String> {
		match self {
			QueryScalar::String(s) => Ok(s.clone()),
			QueryScalar::Int(i) => Ok(i.to_string()),
			QueryScalar::Float(f) if f.is_finite() => Ok(f.to_string()),
			QueryScalar::Float(f) => Err(LinkError::InvalidQueryValue {
				key: key.to_string(),
				reason: format!("non-finite number {}", f),
			}),
			QueryScalar::Bool(true) => Ok("1".to_string()),
			QueryScalar::Bool(false) => Ok("0".to_string()),
		}
	}

	fn from_json(key: &str, value: JsonValue) -> LinkResult<Self> {
		match value {
			JsonValue::String(s) => Ok(QueryScalar::String(s)),
			JsonValue::Bool(b) => Ok(QueryScalar::Bool(b)),
			JsonValue::Number(n) => {
				if let Some(i) = n.as_i64() {
					Ok(QueryScalar::Int(i))
				} else if let Some(f) = n.as_f64() {
					Ok(QueryScalar::Float(f))
				} else {
					// u64 beyond i64::MAX
					Ok(QueryScalar::String(n.to_string()))
				}
			}
			other => Err(LinkError::InvalidQueryValue {
				key: key.to_string(),
				reason: format!("expected a scalar, found {}", json_kind(&other)),
			}),
		}
	}
}

macro_rules! scalar_from {
	($variant:ident: $($ty:ty),+ => $conv:expr) => {
		$(
			impl From<$ty> for QueryScalar {
				fn from(value: $ty) -> Self {
					QueryScalar::$variant(($conv)(value))
				}
			}

			impl From<$ty> for QueryValue {
				fn from(value: $ty) -> Self {
					QueryValue::Scalar(value.into())
				}
			}
		)+
	};
}

scalar_from!(String: String, &str, &String => |v: _| String::from(v));
scalar_from!(Int: i8, i16, i32, i64, u8, u16, u32 => i64::from);
scalar_from!(Float: f32, f64 => f64::from);
scalar_from!(Bool: bool => |v| v);

// Wider integers stay numeric while they fit in an i64 and fall back to
// their decimal text otherwise, which renders identically.
macro_rules! wide_int_from {
	($($ty:ty),+) => {
		$(
			impl From<$ty> for QueryScalar {
				fn from(value: $ty) -> Self {
					i64::try_from(value)
						.map(QueryScalar::Int)
						.unwrap_or_else(|_| QueryScalar::String(value.to_string()))
				}
			}

			impl From<$ty> for QueryValue {
				fn from(value: $ty) -> Self {
					QueryValue::Scalar(value.into())
				}
			}
		)+
	};
}

wide_int_from!(u64, usize, isize, i128, u128);

/// Value of one query option entry.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryValue {
	/// `key=value`
	Scalar(QueryScalar),
	/// `key[]=a&key[]=b`. Empty lists render nothing.
	List(Vec<QueryScalar>),
	/// `key[sub]=value`. Empty maps render nothing.
	Map(IndexMap<String, QueryScalar>),
	/// Removes the key (and its bracketed forms) from a merged query.
	Null,
}

impl QueryValue {
	/// Converts a JSON value, failing on shapes a query string cannot carry.
	pub fn from_json(key: &str, value: JsonValue) -> LinkResult<Self> {
		match value {
			JsonValue::Null => Ok(QueryValue::Null),
			JsonValue::Array(items) => items
				.into_iter()
				.map(|item| QueryScalar::from_json(key, item))
				.collect::<LinkResult<Vec<_>>>()
				.map(QueryValue::List),
			JsonValue::Object(fields) => fields
				.into_iter()
				.map(|(sub, item)| {
					let nested = format!("{}[{}]", key, sub);
					QueryScalar::from_json(&nested, item).map(|scalar| (sub, scalar))
				})
				.collect::<LinkResult<IndexMap<_, _>>>()
				.map(QueryValue::Map),
			scalar => QueryScalar::from_json(key, scalar).map(QueryValue::Scalar),
		}
	}
}

impl From<QueryScalar> for QueryValue {
	fn from(value: QueryScalar) -> Self {
		QueryValue::Scalar(value)
	}
}

impl<T: Into<QueryScalar>> From<Vec<T>> for QueryValue {
	fn from(values: Vec<T>) -> Self {
		QueryValue::List(values.into_iter().map(Into::into).collect())
	}
}

impl<T: Into<QueryScalar>, const N: usize> From<[T; N]> for QueryValue {
	fn from(values: [T; N]) -> Self {
		QueryValue::List(values.into_iter().map(Into::into).collect())
	}
}

impl<T: Into<QueryValue>> From<Option<T>> for QueryValue {
	fn from(value: Option<T>) -> Self {
		value.map(Into::into).unwrap_or(QueryValue::Null)
	}
}

fn json_kind(value: &JsonValue) -> &'static str {
	match value {
		JsonValue::Null => "null",
		JsonValue::Bool(_) => "boolean",
		JsonValue::Number(_) => "number",
		JsonValue::String(_) => "string",
		JsonValue::Array(_) => "nested array",
		JsonValue::Object(_) => "nested object",
	}
}
