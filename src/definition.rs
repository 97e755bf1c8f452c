//! Static description of one backend endpoint.

use crate::error::{LinkError, LinkResult};
use crate::method::{HttpMethod, MethodSet};
use crate::template::UrlTemplate;
use serde::{Deserialize, Serialize};

/// Allowed verbs and URL template of a route.
///
/// Immutable once built. The method set always contains `head` when it
/// contains `get`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteDefinition {
	methods: MethodSet,
	url: UrlTemplate,
}

impl RouteDefinition {
	/// Creates a definition from a static route table entry.
	///
	/// # Panics
	///
	/// Panics if `methods` is empty or `url` is not a valid template; both
	/// are mistakes in the route table itself. Use [`RouteDefinition::try_new`]
	/// for fallible construction.
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_links::{HttpMethod, RouteDefinition};
	///
	/// let definition = RouteDefinition::new(&[HttpMethod::Get], "/posts/{post}");
	/// assert_eq!(definition.methods().as_slice(), &[HttpMethod::Get, HttpMethod::Head]);
	/// assert_eq!(definition.url().as_str(), "/posts/{post}");
	/// ```
	pub fn new(methods: &[HttpMethod], url: &str) -> Self {
		Self::try_new(methods.iter().copied(), url)
			.unwrap_or_else(|e| panic!("Invalid route definition '{}': {}", url, e))
	}

	/// Fallible constructor, used for manifests.
	pub fn try_new(methods: impl IntoIterator<Item = HttpMethod>, url: &str) -> LinkResult<Self> {
		let methods = MethodSet::new(methods).map_err(|e| match e {
			LinkError::EmptyMethods(_) => LinkError::EmptyMethods(url.to_string()),
			other => other,
		})?;
		let url = UrlTemplate::parse(url)?;
		Ok(Self { methods, url })
	}

	pub fn methods(&self) -> &MethodSet {
		&self.methods
	}

	pub fn url(&self) -> &UrlTemplate {
		&self.url
	}

	/// The verb the bare route and its default form use.
	pub fn primary_method(&self) -> HttpMethod {
		self.methods.primary()
	}

	/// Checks that `method` is in the effective method set.
	///
	/// # Errors
	///
	/// Returns [`LinkError::MethodNotAllowed`] otherwise.
	pub fn ensure_allows(&self, method: HttpMethod) -> LinkResult<()> {
		if self.methods.contains(method) {
			Ok(())
		} else {
			Err(LinkError::MethodNotAllowed {
				method: method.as_upper_str(),
				url: self.url.as_str().to_string(),
				allowed: self.methods.to_string(),
			})
		}
	}
}
