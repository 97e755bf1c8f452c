//! The caller-visible base query merged into `merge` options.

use url::form_urlencoded;

/// Query of the current location, passed in explicitly by the caller.
///
/// Resolution never reads it from global state; a route only sees it when
/// the caller attaches it with [`Route::with_ambient`](crate::Route::with_ambient).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AmbientQuery {
	pairs: Vec<(String, String)>,
}

impl AmbientQuery {
	pub fn new() -> Self {
		Self::default()
	}

	/// Parses a query string, with or without its leading `?`.
	pub fn parse(query: &str) -> Self {
		let query = query.strip_prefix('?').unwrap_or(query);
		let pairs = form_urlencoded::parse(query.as_bytes())
			.map(|(k, v)| (k.into_owned(), v.into_owned()))
			.collect();
		Self { pairs }
	}

	pub fn from_pairs<K: Into<String>, V: Into<String>>(
		pairs: impl IntoIterator<Item = (K, V)>,
	) -> Self {
		Self {
			pairs: pairs
				.into_iter()
				.map(|(k, v)| (k.into(), v.into()))
				.collect(),
		}
	}

	pub fn pairs(&self) -> &[(String, String)] {
		&self.pairs
	}

	pub fn is_empty(&self) -> bool {
		self.pairs.is_empty()
	}
}
