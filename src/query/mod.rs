//! Query options and their serialization.

mod ambient;
mod map;
mod serializer;
mod value;

pub use ambient::AmbientQuery;
pub use map::QueryMap;
pub use serializer::{parse_query, render_query};
pub use value::{QueryScalar, QueryValue};

pub(crate) use serializer::{ensure_no_reserved_keys, render_unchecked};

/// How caller-supplied query options relate to the ambient query.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum QueryMode {
	/// No query options; the URL carries no query string.
	#[default]
	None,
	/// Serialize the map as-is, discarding any ambient query.
	Replace(QueryMap),
	/// Override the ambient query key by key.
	Merge(QueryMap),
}

/// Options accepted by every URL and form helper.
///
/// `query` and `merge` are mutually exclusive by construction. Passing
/// `query` silently drops the ambient query, so pick `merge` whenever the
/// current location's parameters should survive.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RouteOptions {
	mode: QueryMode,
}

impl RouteOptions {
	pub fn new() -> Self {
		Self::default()
	}

	/// Replace semantics.
	pub fn query(map: impl Into<QueryMap>) -> Self {
		Self {
			mode: QueryMode::Replace(map.into()),
		}
	}

	/// Merge semantics.
	pub fn merge(map: impl Into<QueryMap>) -> Self {
		Self {
			mode: QueryMode::Merge(map.into()),
		}
	}

	pub fn mode(&self) -> &QueryMode {
		&self.mode
	}

	pub fn is_merge(&self) -> bool {
		matches!(self.mode, QueryMode::Merge(_))
	}

	/// Returns a copy with `key` placed before the caller's entries, keeping
	/// the caller's mode. With no options the entry is rendered in replace
	/// mode.
	pub(crate) fn with_leading(&self, key: &str, value: QueryValue) -> Self {
		let leading = |map: Option<&QueryMap>| {
			let mut combined = QueryMap::new().with(key, value.clone());
			if let Some(map) = map {
				for (k, v) in map.iter() {
					combined.insert(k, v.clone());
				}
			}
			combined
		};

		let mode = match &self.mode {
			QueryMode::None => QueryMode::Replace(leading(None)),
			QueryMode::Replace(map) => QueryMode::Replace(leading(Some(map))),
			QueryMode::Merge(map) => QueryMode::Merge(leading(Some(map))),
		};
		Self { mode }
	}
}

impl From<QueryMode> for RouteOptions {
	fn from(mode: QueryMode) -> Self {
		Self { mode }
	}
}
