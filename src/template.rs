//! URL templates and path parameter substitution.
//!
//! Templates use the same placeholder syntax as server-side route patterns:
//! `/posts/{post}/comments/{comment?}`. `{name}` is required, `{name?}` may
//! be omitted, in which case the placeholder and the `/` before it vanish.

use crate::error::{LinkError, LinkResult};
use indexmap::IndexMap;
use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Bytes escaped in a substituted path parameter, on top of non-ASCII.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
	.add(b' ')
	.add(b'"')
	.add(b'%')
	.add(b'<')
	.add(b'>')
	.add(b'`')
	.add(b'{')
	.add(b'}')
	.add(b'|')
	.add(b'^')
	.add(b'[')
	.add(b']');

/// A value usable as a path parameter.
///
/// Implement this for model types so they can be passed directly, the way a
/// server binds `{post}` to a `Post` by its key.
///
/// Return the raw value. It is percent-encoded when substituted, so a
/// space becomes `%20` and a literal `%` becomes `%25`; values that are
/// already encoded get encoded a second time.
pub trait RouteParam {
	fn to_route_param(&self) -> String;
}

macro_rules! display_route_param {
	($($ty:ty),+) => {
		$(
			impl RouteParam for $ty {
				fn to_route_param(&self) -> String {
					self.to_string()
				}
			}
		)+
	};
}

display_route_param!(str, String, i8, i16, i32, i64, i128, u8, u16, u32, u64, u128, usize);

impl RouteParam for bool {
	fn to_route_param(&self) -> String {
		if *self { "1" } else { "0" }.to_string()
	}
}

impl<T: RouteParam + ?Sized> RouteParam for &T {
	fn to_route_param(&self) -> String {
		(**self).to_route_param()
	}
}

/// Path parameters supplied for one call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RouteArgs {
	#[default]
	None,
	/// Bound by placeholder name.
	Named(IndexMap<String, String>),
	/// Bound to placeholders in template order.
	Positional(Vec<String>),
}

impl RouteArgs {
	pub fn named<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
	where
		K: Into<String>,
		V: RouteParam,
	{
		RouteArgs::Named(
			pairs
				.into_iter()
				.map(|(k, v)| (k.into(), v.to_route_param()))
				.collect(),
		)
	}

	pub fn positional<V: RouteParam>(values: impl IntoIterator<Item = V>) -> Self {
		RouteArgs::Positional(values.into_iter().map(|v| v.to_route_param()).collect())
	}

	/// A single value, bound to the first placeholder.
	pub fn one(value: impl RouteParam) -> Self {
		RouteArgs::Positional(vec![value.to_route_param()])
	}
}

impl From<()> for RouteArgs {
	fn from(_: ()) -> Self {
		RouteArgs::None
	}
}

impl<K: Into<String>, V: RouteParam, const N: usize> From<[(K, V); N]> for RouteArgs {
	fn from(pairs: [(K, V); N]) -> Self {
		RouteArgs::named(pairs)
	}
}

impl From<IndexMap<String, String>> for RouteArgs {
	fn from(map: IndexMap<String, String>) -> Self {
		RouteArgs::Named(map)
	}
}

macro_rules! single_route_arg {
	($($ty:ty),+) => {
		$(
			impl From<$ty> for RouteArgs {
				fn from(value: $ty) -> Self {
					RouteArgs::one(value)
				}
			}
		)+
	};
}

single_route_arg!(&str, String, &String, i32, i64, u32, u64, usize);

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
	Literal(String),
	Param { name: String, optional: bool },
}

/// Parsed URL template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UrlTemplate {
	raw: String,
	segments: Vec<Segment>,
}

impl UrlTemplate {
	/// Parses a template string.
	///
	/// # Errors
	///
	/// Returns [`LinkError::InvalidTemplate`] for unbalanced braces, empty or
	/// malformed placeholder names, and duplicated placeholders.
	pub fn parse(template: &str) -> LinkResult<Self> {
		let invalid = |reason: String| LinkError::InvalidTemplate {
			template: template.to_string(),
			reason,
		};

		let mut segments = Vec::new();
		let mut literal = String::new();
		let mut chars = template.chars();

		while let Some(ch) = chars.next() {
			match ch {
				'{' => {
					let mut name = String::new();
					let mut closed = false;
					for c in chars.by_ref() {
						match c {
							'}' => {
								closed = true;
								break;
							}
							'{' => return Err(invalid("nested '{'".to_string())),
							_ => name.push(c),
						}
					}
					if !closed {
						return Err(invalid("unterminated placeholder".to_string()));
					}

					let (name, optional) = match name.strip_suffix('?') {
						Some(stripped) => (stripped.to_string(), true),
						None => (name, false),
					};
					if name.is_empty() {
						return Err(invalid("empty placeholder name".to_string()));
					}
					if !name
						.chars()
						.all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
					{
						return Err(invalid(format!("invalid placeholder name '{}'", name)));
					}
					if segments
						.iter()
						.any(|s| matches!(s, Segment::Param { name: n, .. } if *n == name))
					{
						return Err(invalid(format!("duplicate placeholder '{}'", name)));
					}

					if !literal.is_empty() {
						segments.push(Segment::Literal(std::mem::take(&mut literal)));
					}
					segments.push(Segment::Param { name, optional });
				}
				'}' => return Err(invalid("unmatched '}'".to_string())),
				_ => literal.push(ch),
			}
		}

		if !literal.is_empty() {
			segments.push(Segment::Literal(literal));
		}

		Ok(Self {
			raw: template.to_string(),
			segments,
		})
	}

	pub fn as_str(&self) -> &str {
		&self.raw
	}

	/// Placeholder names in template order.
	pub fn param_names(&self) -> impl Iterator<Item = &str> {
		self.segments.iter().filter_map(|s| match s {
			Segment::Param { name, .. } => Some(name.as_str()),
			Segment::Literal(_) => None,
		})
	}

	/// Names of placeholders that must be supplied.
	pub fn required_params(&self) -> impl Iterator<Item = &str> {
		self.segments.iter().filter_map(|s| match s {
			Segment::Param {
				name,
				optional: false,
			} => Some(name.as_str()),
			_ => None,
		})
	}

	pub fn has_params(&self) -> bool {
		self.param_names().next().is_some()
	}

	/// Substitutes placeholders.
	///
	/// Positional arguments bind in template order to the placeholders
	/// `defaults` does not cover. `defaults` fill any placeholder the
	/// arguments leave unset. Named arguments without a matching placeholder
	/// are ignored.
	pub fn expand(&self, args: &RouteArgs, defaults: &IndexMap<String, String>) -> LinkResult<String> {
		let mut values = self.bind(args, defaults)?;
		for name in self.param_names() {
			if !values.contains_key(name)
				&& let Some(default) = defaults.get(name)
			{
				values.insert(name.to_string(), default.clone());
			}
		}

		let mut url = String::with_capacity(self.raw.len());
		for segment in &self.segments {
			match segment {
				Segment::Literal(text) => url.push_str(text),
				Segment::Param { name, optional } => match values.get(name.as_str()) {
					Some(value) => {
						validate_param(name, value)?;
						url.extend(utf8_percent_encode(value, PATH_SEGMENT));
					}
					None if *optional => {
						if url.ends_with('/') {
							url.pop();
						}
					}
					None => {
						return Err(LinkError::MissingParameter {
							name: name.clone(),
							template: self.raw.clone(),
						});
					}
				},
			}
		}

		if url.is_empty() && self.raw.starts_with('/') {
			url.push('/');
		}

		Ok(url)
	}

	fn bind(
		&self,
		args: &RouteArgs,
		defaults: &IndexMap<String, String>,
	) -> LinkResult<IndexMap<String, String>> {
		match args {
			RouteArgs::None => Ok(IndexMap::new()),
			RouteArgs::Named(named) => {
				for key in named.keys() {
					if !self.param_names().any(|n| n == key) {
						tracing::debug!(
							template = %self.raw,
							param = %key,
							"ignoring argument without placeholder"
						);
					}
				}
				Ok(named.clone())
			}
			RouteArgs::Positional(values) => {
				let names: Vec<&str> = self
					.param_names()
					.filter(|name| !defaults.contains_key(*name))
					.collect();
				if values.len() > names.len() {
					return Err(LinkError::TooManyParameters {
						template: self.raw.clone(),
						expected: names.len(),
						actual: values.len(),
					});
				}
				Ok(names
					.into_iter()
					.zip(values)
					.map(|(name, value)| (name.to_string(), value.clone()))
					.collect())
			}
		}
	}
}

impl fmt::Display for UrlTemplate {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.raw)
	}
}

impl TryFrom<String> for UrlTemplate {
	type Error = LinkError;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		Self::parse(&value)
	}
}

impl From<UrlTemplate> for String {
	fn from(value: UrlTemplate) -> Self {
		value.raw
	}
}

/// Rejects values that would alter the URL structure once substituted:
/// path separators, query or fragment delimiters, their encoded forms and
/// parent-directory segments.
fn validate_param(name: &str, value: &str) -> LinkResult<()> {
	let invalid = |reason: &str| LinkError::InvalidParameter {
		name: name.to_string(),
		reason: reason.to_string(),
	};

	if value.is_empty() {
		return Err(invalid("empty value"));
	}
	if value.contains(['/', '\\', '?', '#']) {
		return Err(invalid("contains a path separator or URL delimiter"));
	}
	let lower = value.to_ascii_lowercase();
	if ["%2f", "%5c", "%3f", "%23", "%2e%2e"]
		.iter()
		.any(|seq| lower.contains(seq))
	{
		return Err(invalid("contains an encoded separator or delimiter"));
	}
	if value == ".." || value == "." {
		return Err(invalid("is a relative path segment"));
	}
	Ok(())
}
