//! Query string rendering with replace and merge semantics.
//!
//! Multi-valued entries always use the bracket-suffix convention:
//! `tags[]=a&tags[]=b` for lists and `filter[status]=open` for maps.

use super::ambient::AmbientQuery;
use super::map::QueryMap;
use super::value::{QueryScalar, QueryValue};
use super::{QueryMode, RouteOptions};
use crate::error::{LinkError, LinkResult};
use crate::method::METHOD_OVERRIDE_KEY;
use indexmap::IndexMap;
use url::form_urlencoded;

/// Ordered list of query pairs, edited the way a browser's
/// `URLSearchParams` is.
#[derive(Debug, Default)]
struct QueryPairs {
	pairs: Vec<(String, String)>,
}

impl QueryPairs {
	/// Seeds merge output from the ambient query. A `_method` left there by
	/// a previous spoofed submission is dropped; only the form adapter emits it.
	fn from_ambient(ambient: &AmbientQuery) -> Self {
		Self {
			pairs: ambient
				.pairs()
				.iter()
				.filter(|(k, _)| k != METHOD_OVERRIDE_KEY)
				.cloned()
				.collect(),
		}
	}

	/// Replaces the first `key` in place and drops later duplicates, or
	/// appends when absent.
	fn set(&mut self, key: &str, value: String) {
		match self.pairs.iter().position(|(k, _)| k == key) {
			Some(first) => {
				self.pairs[first].1 = value;
				let mut index = 0;
				self.pairs.retain(|(k, _)| {
					let keep = index <= first || k != key;
					index += 1;
					keep
				});
			}
			None => self.pairs.push((key.to_string(), value)),
		}
	}

	fn append(&mut self, key: String, value: String) {
		self.pairs.push((key, value));
	}

	fn remove_where(&mut self, predicate: impl Fn(&str) -> bool) {
		self.pairs.retain(|(k, _)| !predicate(k));
	}

	/// Removes the bracketed forms of `key` (`key[]`, `key[sub]`).
	fn remove_bracketed(&mut self, key: &str) {
		self.remove_where(|k| is_bracketed_form(k, key));
	}

	/// Removes `key` in every form.
	fn remove_all(&mut self, key: &str) {
		self.remove_where(|k| k == key || is_bracketed_form(k, key));
	}

	/// Writes one entry. Any earlier form of the same key is replaced, so a
	/// list overrides a scalar and the other way round.
	fn apply(&mut self, key: &str, value: &QueryValue) -> LinkResult<()> {
		ensure_plain_key(key, key)?;
		match value {
			QueryValue::Scalar(scalar) => {
				let rendered = scalar.render(key)?;
				self.remove_bracketed(key);
				self.set(key, rendered);
			}
			QueryValue::List(items) => {
				let list_key = format!("{}[]", key);
				let rendered = items
					.iter()
					.map(|item| item.render(key))
					.collect::<LinkResult<Vec<_>>>()?;
				self.remove_all(key);
				for value in rendered {
					self.append(list_key.clone(), value);
				}
			}
			QueryValue::Map(entries) => {
				let mut rendered = Vec::with_capacity(entries.len());
				for (sub, item) in entries {
					ensure_plain_key(sub, key)?;
					let sub_key = format!("{}[{}]", key, sub);
					let value = item.render(&sub_key)?;
					rendered.push((sub_key, value));
				}
				self.remove_all(key);
				for (sub_key, value) in rendered {
					self.append(sub_key, value);
				}
			}
			QueryValue::Null => self.remove_all(key),
		}
		Ok(())
	}

	fn finish(self) -> String {
		if self.pairs.is_empty() {
			return String::new();
		}
		let encoded = form_urlencoded::Serializer::new(String::new())
			.extend_pairs(self.pairs.iter())
			.finish();
		format!("?{}", encoded)
	}
}

fn is_bracketed_form(candidate: &str, key: &str) -> bool {
	candidate
		.strip_prefix(key)
		.is_some_and(|rest| rest.starts_with('[') && rest.ends_with(']'))
}

/// Keys and map sub-keys must be non-empty and free of brackets, which are
/// reserved for the list and map encodings.
fn ensure_plain_key(key: &str, owner: &str) -> LinkResult<()> {
	if key.is_empty() || key.contains(['[', ']']) {
		return Err(LinkError::InvalidQueryValue {
			key: owner.to_string(),
			reason: format!("key '{}' must be non-empty and must not contain '[' or ']'", key),
		});
	}
	Ok(())
}

/// Rejects caller options that try to set the method override themselves.
pub(crate) fn ensure_no_reserved_keys(options: &RouteOptions) -> LinkResult<()> {
	match options.mode() {
		QueryMode::Replace(map) | QueryMode::Merge(map)
			if map.contains_key(METHOD_OVERRIDE_KEY) =>
		{
			Err(LinkError::ReservedQueryKey(METHOD_OVERRIDE_KEY.to_string()))
		}
		_ => Ok(()),
	}
}

/// Renders options without the reserved-key check. Used directly by the
/// form adapter once it has injected `_method`.
pub(crate) fn render_unchecked(
	options: &RouteOptions,
	ambient: Option<&AmbientQuery>,
) -> LinkResult<String> {
	let (mut pairs, map) = match options.mode() {
		QueryMode::None => return Ok(String::new()),
		QueryMode::Replace(map) => (QueryPairs::default(), map),
		QueryMode::Merge(map) => (
			ambient.map(QueryPairs::from_ambient).unwrap_or_default(),
			map,
		),
	};

	for (key, value) in map.iter() {
		pairs.apply(key, value)?;
	}

	Ok(pairs.finish())
}

/// Renders query options into a query string.
///
/// Returns an empty string when there is nothing to render, otherwise the
/// encoded query including its leading `?`. In replace mode the ambient
/// query is ignored; in merge mode the options override it key by key, a
/// new value replacing the key in whichever form (`k`, `k[]`, `k[sub]`) the
/// ambient query carried it. An ambient `_method` is never carried over.
///
/// An empty list or map produces no pairs, so it does not survive a
/// round trip through [`parse_query`]; in merge mode it clears the key.
///
/// # Errors
///
/// Fails on the reserved `_method` key, on keys that are empty or contain
/// brackets, and on values that have no textual form (non-finite floats).
///
/// # Examples
///
/// ```
/// use reinhardt_links::{AmbientQuery, QueryMap, RouteOptions, render_query};
///
/// let ambient = AmbientQuery::parse("?a=0&b=2");
/// let options = RouteOptions::merge(QueryMap::new().with("a", 1));
/// assert_eq!(render_query(&options, Some(&ambient)).unwrap(), "?a=1&b=2");
///
/// let options = RouteOptions::query(QueryMap::new().with("a", 1));
/// assert_eq!(render_query(&options, Some(&ambient)).unwrap(), "?a=1");
/// ```
pub fn render_query(options: &RouteOptions, ambient: Option<&AmbientQuery>) -> LinkResult<String> {
	ensure_no_reserved_keys(options)?;
	render_unchecked(options, ambient)
}

/// Parses a query string back into a [`QueryMap`], undoing the bracket
/// convention. Values come back as strings.
pub fn parse_query(query: &str) -> QueryMap {
	let query = query.strip_prefix('?').unwrap_or(query);
	let mut entries: IndexMap<String, QueryValue> = IndexMap::new();

	for (raw_key, value) in form_urlencoded::parse(query.as_bytes()) {
		let value = QueryScalar::String(value.into_owned());

		if let Some(key) = raw_key.strip_suffix("[]") {
			match entries.entry(key.to_string()).or_insert_with(|| QueryValue::List(Vec::new())) {
				QueryValue::List(items) => items.push(value),
				other => *other = QueryValue::List(vec![value]),
			}
		} else if let Some((key, sub)) = split_map_key(&raw_key) {
			match entries
				.entry(key.to_string())
				.or_insert_with(|| QueryValue::Map(IndexMap::new()))
			{
				QueryValue::Map(fields) => {
					fields.insert(sub.to_string(), value);
				}
				other => *other = QueryValue::Map(IndexMap::from([(sub.to_string(), value)])),
			}
		} else {
			entries.insert(raw_key.into_owned(), QueryValue::Scalar(value));
		}
	}

	entries.into_iter().collect()
}

fn split_map_key(raw: &str) -> Option<(&str, &str)> {
	let inner = raw.strip_suffix(']')?;
	let (key, sub) = inner.split_once('[')?;
	if key.is_empty() || sub.is_empty() || sub.contains('[') {
		return None;
	}
	Some((key, sub))
}
