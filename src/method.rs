//! HTTP verbs, declared method sets and the verbs HTML forms can submit.
//!
//! Two platform conventions are fixed here rather than per route:
//! a route declaring `get` is always fetchable with `head`, and an HTML form
//! can only submit `get` or `post`.

use crate::error::{LinkError, LinkResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Query key used to carry the intended verb when a form has to spoof it.
pub const METHOD_OVERRIDE_KEY: &str = "_method";

/// HTTP method a route can be reached with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum HttpMethod {
	Get,
	Head,
	Post,
	Put,
	Patch,
	Delete,
	Options,
}

impl HttpMethod {
	/// All verbs in canonical order.
	pub const ALL: [HttpMethod; 7] = [
		HttpMethod::Get,
		HttpMethod::Head,
		HttpMethod::Post,
		HttpMethod::Put,
		HttpMethod::Patch,
		HttpMethod::Delete,
		HttpMethod::Options,
	];

	/// Returns the lowercase name used in route definitions and descriptors.
	pub fn as_str(&self) -> &'static str {
		match self {
			HttpMethod::Get => "get",
			HttpMethod::Head => "head",
			HttpMethod::Post => "post",
			HttpMethod::Put => "put",
			HttpMethod::Patch => "patch",
			HttpMethod::Delete => "delete",
			HttpMethod::Options => "options",
		}
	}

	/// Returns the uppercase wire name, as carried by `_method`.
	pub fn as_upper_str(&self) -> &'static str {
		match self {
			HttpMethod::Get => "GET",
			HttpMethod::Head => "HEAD",
			HttpMethod::Post => "POST",
			HttpMethod::Put => "PUT",
			HttpMethod::Patch => "PATCH",
			HttpMethod::Delete => "DELETE",
			HttpMethod::Options => "OPTIONS",
		}
	}

	/// Returns the verb an HTML form submits for this method.
	pub fn form_method(&self) -> FormMethod {
		match self {
			// HTML forms cannot issue HEAD, the closest safe verb is GET
			HttpMethod::Get | HttpMethod::Head => FormMethod::Get,
			HttpMethod::Post
			| HttpMethod::Put
			| HttpMethod::Patch
			| HttpMethod::Delete
			| HttpMethod::Options => FormMethod::Post,
		}
	}

	/// Returns true if a form must add `_method` to express this verb.
	pub fn requires_spoofing(&self) -> bool {
		!matches!(self, HttpMethod::Get | HttpMethod::Post)
	}
}

impl fmt::Display for HttpMethod {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for HttpMethod {
	type Err = LinkError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		HttpMethod::ALL
			.into_iter()
			.find(|m| m.as_str().eq_ignore_ascii_case(s))
			.ok_or_else(|| LinkError::UnknownMethod(s.to_string()))
	}
}

impl TryFrom<String> for HttpMethod {
	type Error = LinkError;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		value.parse()
	}
}

/// Verb used by the HTML `<form method>` attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FormMethod {
	Get,
	Post,
}

impl FormMethod {
	/// Returns the lowercase attribute value.
	pub fn as_str(&self) -> &'static str {
		match self {
			FormMethod::Get => "get",
			FormMethod::Post => "post",
		}
	}
}

impl fmt::Display for FormMethod {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Ordered, duplicate-free, non-empty set of declared verbs.
///
/// The first entry is the primary verb. `head` is inserted right after
/// `get` whenever a route declares `get` without it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<HttpMethod>", into = "Vec<HttpMethod>")]
pub struct MethodSet {
	methods: Vec<HttpMethod>,
}

impl MethodSet {
	/// Builds a method set from declared verbs.
	///
	/// # Errors
	///
	/// Returns [`LinkError::EmptyMethods`] when no verb is declared.
	pub fn new(declared: impl IntoIterator<Item = HttpMethod>) -> LinkResult<Self> {
		let mut methods: Vec<HttpMethod> = Vec::new();
		for method in declared {
			if !methods.contains(&method) {
				methods.push(method);
			}
		}

		if methods.is_empty() {
			return Err(LinkError::EmptyMethods(String::new()));
		}

		if !methods.contains(&HttpMethod::Head)
			&& let Some(get) = methods.iter().position(|m| *m == HttpMethod::Get)
		{
			methods.insert(get + 1, HttpMethod::Head);
		}

		Ok(Self { methods })
	}

	/// Parses verbs from their names, case-insensitively.
	pub fn parse<S: AsRef<str>>(names: &[S]) -> LinkResult<Self> {
		let methods = names
			.iter()
			.map(|name| name.as_ref().parse())
			.collect::<LinkResult<Vec<HttpMethod>>>()?;
		Self::new(methods)
	}

	/// Returns the primary verb (the first declared one).
	pub fn primary(&self) -> HttpMethod {
		self.methods[0]
	}

	/// Returns true if the verb is in the effective set.
	pub fn contains(&self, method: HttpMethod) -> bool {
		self.methods.contains(&method)
	}

	/// Iterates the verbs in declaration order.
	pub fn iter(&self) -> impl Iterator<Item = HttpMethod> + '_ {
		self.methods.iter().copied()
	}

	pub fn as_slice(&self) -> &[HttpMethod] {
		&self.methods
	}

	pub fn len(&self) -> usize {
		self.methods.len()
	}

	/// Always false: a method set holds at least one verb.
	pub fn is_empty(&self) -> bool {
		self.methods.is_empty()
	}
}

impl fmt::Display for MethodSet {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let names: Vec<&str> = self.methods.iter().map(HttpMethod::as_str).collect();
		f.write_str(&names.join(", "))
	}
}

impl TryFrom<Vec<HttpMethod>> for MethodSet {
	type Error = LinkError;

	fn try_from(value: Vec<HttpMethod>) -> Result<Self, Self::Error> {
		Self::new(value)
	}
}

impl From<MethodSet> for Vec<HttpMethod> {
	fn from(value: MethodSet) -> Self {
		value.methods
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case("get", HttpMethod::Get)]
	#[case("HEAD", HttpMethod::Head)]
	#[case("Post", HttpMethod::Post)]
	#[case("put", HttpMethod::Put)]
	#[case("PATCH", HttpMethod::Patch)]
	#[case("delete", HttpMethod::Delete)]
	#[case("options", HttpMethod::Options)]
	fn test_parse_method(#[case] name: &str, #[case] expected: HttpMethod) {
		assert_eq!(name.parse::<HttpMethod>().unwrap(), expected);
	}

	#[rstest]
	fn test_parse_unknown_method() {
		let result = "trace".parse::<HttpMethod>();
		assert!(matches!(result, Err(LinkError::UnknownMethod(m)) if m == "trace"));
	}

	#[rstest]
	#[case(HttpMethod::Get, FormMethod::Get, false)]
	#[case(HttpMethod::Head, FormMethod::Get, true)]
	#[case(HttpMethod::Post, FormMethod::Post, false)]
	#[case(HttpMethod::Put, FormMethod::Post, true)]
	#[case(HttpMethod::Patch, FormMethod::Post, true)]
	#[case(HttpMethod::Delete, FormMethod::Post, true)]
	fn test_form_method_mapping(
		#[case] method: HttpMethod,
		#[case] form: FormMethod,
		#[case] spoofed: bool,
	) {
		assert_eq!(method.form_method(), form);
		assert_eq!(method.requires_spoofing(), spoofed);
	}

	#[rstest]
	fn test_get_implies_head() {
		let set = MethodSet::new([HttpMethod::Get]).unwrap();
		assert_eq!(set.as_slice(), &[HttpMethod::Get, HttpMethod::Head]);
	}

	#[rstest]
	fn test_head_inserted_after_get() {
		let set = MethodSet::new([HttpMethod::Post, HttpMethod::Get, HttpMethod::Put]).unwrap();
		assert_eq!(
			set.as_slice(),
			&[
				HttpMethod::Post,
				HttpMethod::Get,
				HttpMethod::Head,
				HttpMethod::Put
			]
		);
		assert_eq!(set.primary(), HttpMethod::Post);
	}

	#[rstest]
	fn test_explicit_head_is_kept_in_place() {
		let set = MethodSet::new([HttpMethod::Head, HttpMethod::Get]).unwrap();
		assert_eq!(set.as_slice(), &[HttpMethod::Head, HttpMethod::Get]);
	}

	#[rstest]
	fn test_duplicates_are_dropped() {
		let set = MethodSet::parse(&["delete", "DELETE", "delete"]).unwrap();
		assert_eq!(set.as_slice(), &[HttpMethod::Delete]);
	}

	#[rstest]
	fn test_empty_set_is_rejected() {
		let result = MethodSet::new(Vec::new());
		assert!(matches!(result, Err(LinkError::EmptyMethods(_))));
	}

	#[rstest]
	fn test_post_only_has_no_head() {
		let set = MethodSet::new([HttpMethod::Post]).unwrap();
		assert!(!set.contains(HttpMethod::Head));
		assert!(!set.contains(HttpMethod::Get));
	}

	#[rstest]
	fn test_deserialize_normalizes() {
		let set: MethodSet = serde_json::from_str(r#"["GET", "post"]"#).unwrap();
		assert_eq!(set.to_string(), "get, head, post");
	}
}
