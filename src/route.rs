//! Named route views and per-verb accessors.

use crate::definition::RouteDefinition;
use crate::error::LinkResult;
use crate::form::RouteForm;
use crate::method::HttpMethod;
use crate::query::{AmbientQuery, RouteOptions};
use crate::resolver::resolve;
use crate::settings::LinkSettings;
use crate::template::RouteArgs;
use serde::Serialize;
use std::fmt;

/// A URL paired with the verb it is meant to be requested with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedRoute {
	pub url: String,
	pub method: HttpMethod,
}

impl fmt::Display for ResolvedRoute {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{} {}", self.method.as_upper_str(), self.url)
	}
}

/// Borrowed view of one registered route.
///
/// Obtained from [`RouteRegistry::route`](crate::RouteRegistry::route).
/// Every accessor checks the verb against the route's method set before
/// resolving, so asking for an undeclared verb is an error rather than a
/// silently wrong link.
#[derive(Debug, Clone, Copy)]
pub struct Route<'a> {
	name: &'a str,
	definition: &'a RouteDefinition,
	settings: &'a LinkSettings,
	ambient: Option<&'a AmbientQuery>,
}

macro_rules! verb_accessors {
	($($(#[$doc:meta])* $fn_name:ident => $method:expr;)+) => {
		$(
			$(#[$doc])*
			pub fn $fn_name(
				&self,
				args: impl Into<RouteArgs>,
				options: &RouteOptions,
			) -> LinkResult<ResolvedRoute> {
				self.with_method($method, args, options)
			}
		)+
	};
}

impl<'a> Route<'a> {
	pub fn new(name: &'a str, definition: &'a RouteDefinition, settings: &'a LinkSettings) -> Self {
		Self {
			name,
			definition,
			settings,
			ambient: None,
		}
	}

	/// Attaches the query of the current location, used by merge options.
	pub fn with_ambient(mut self, ambient: &'a AmbientQuery) -> Self {
		self.ambient = Some(ambient);
		self
	}

	pub fn name(&self) -> &'a str {
		self.name
	}

	pub fn definition(&self) -> &'a RouteDefinition {
		self.definition
	}

	pub(crate) fn settings(&self) -> &'a LinkSettings {
		self.settings
	}

	pub(crate) fn ambient(&self) -> Option<&'a AmbientQuery> {
		self.ambient
	}

	/// Resolves the URL alone, without any verb check.
	pub fn url(&self, args: impl Into<RouteArgs>, options: &RouteOptions) -> LinkResult<String> {
		resolve(
			self.definition,
			&args.into(),
			options,
			self.settings,
			self.ambient,
		)
	}

	/// Resolves the route for its primary verb.
	pub fn call(&self, args: impl Into<RouteArgs>, options: &RouteOptions) -> LinkResult<ResolvedRoute> {
		self.with_method(self.definition.primary_method(), args, options)
	}

	/// Resolves the route for `method`.
	///
	/// # Errors
	///
	/// Returns [`LinkError::MethodNotAllowed`](crate::LinkError::MethodNotAllowed)
	/// when the route does not declare `method`.
	pub fn with_method(
		&self,
		method: HttpMethod,
		args: impl Into<RouteArgs>,
		options: &RouteOptions,
	) -> LinkResult<ResolvedRoute> {
		self.definition.ensure_allows(method)?;
		let url = self.url(args, options)?;
		tracing::debug!(route = %self.name, method = %method, url = %url, "resolved link");
		Ok(ResolvedRoute { url, method })
	}

	verb_accessors! {
		get => HttpMethod::Get;
		/// Available whenever the route declares `get`; resolves to the same URL.
		head => HttpMethod::Head;
		post => HttpMethod::Post;
		put => HttpMethod::Put;
		patch => HttpMethod::Patch;
		delete => HttpMethod::Delete;
		options => HttpMethod::Options;
	}

	/// Form descriptors for this route.
	pub fn form(&self) -> RouteForm<'a> {
		RouteForm::new(*self)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::error::LinkError;
	use crate::query::QueryMap;
	use rstest::{fixture, rstest};

	#[fixture]
	fn settings() -> LinkSettings {
		LinkSettings::default()
	}

	#[rstest]
	fn test_head_matches_get(settings: LinkSettings) {
		let definition = RouteDefinition::new(&[HttpMethod::Get], "/posts/{post}");
		let route = Route::new("posts.show", &definition, &settings);
		let options = RouteOptions::query(QueryMap::new().with("tab", "comments"));

		let get = route.get(5, &options).unwrap();
		let head = route.head(5, &options).unwrap();
		assert_eq!(get.url, head.url);
		assert_eq!(get.method, HttpMethod::Get);
		assert_eq!(head.method, HttpMethod::Head);
	}

	#[rstest]
	fn test_call_uses_primary_verb(settings: LinkSettings) {
		let definition = RouteDefinition::new(&[HttpMethod::Put, HttpMethod::Patch], "/posts/{post}");
		let route = Route::new("posts.update", &definition, &settings);

		let resolved = route.call(3, &RouteOptions::default()).unwrap();
		assert_eq!(resolved.method, HttpMethod::Put);
		assert_eq!(resolved.to_string(), "PUT /posts/3");
	}

	#[rstest]
	fn test_undeclared_verb_is_rejected(settings: LinkSettings) {
		let definition = RouteDefinition::new(&[HttpMethod::Post], "/posts");
		let route = Route::new("posts.store", &definition, &settings);

		assert!(route.post((), &RouteOptions::default()).is_ok());
		let result = route.get((), &RouteOptions::default());
		assert!(matches!(
			result,
			Err(LinkError::MethodNotAllowed { method: "GET", .. })
		));
		let result = route.head((), &RouteOptions::default());
		assert!(matches!(
			result,
			Err(LinkError::MethodNotAllowed { method: "HEAD", .. })
		));
	}

	#[rstest]
	fn test_url_skips_verb_check(settings: LinkSettings) {
		let definition = RouteDefinition::new(&[HttpMethod::Delete], "/posts/{post}");
		let route = Route::new("posts.destroy", &definition, &settings);
		assert_eq!(route.url(9, &RouteOptions::default()).unwrap(), "/posts/9");
	}

	#[rstest]
	fn test_ambient_is_used_for_merge(settings: LinkSettings) {
		let definition = RouteDefinition::new(&[HttpMethod::Get], "/posts");
		let ambient = AmbientQuery::parse("page=3&sort=new");
		let route = Route::new("posts.index", &definition, &settings).with_ambient(&ambient);

		let merged = route.get((), &RouteOptions::merge([("page", 4)])).unwrap();
		assert_eq!(merged.url, "/posts?page=4&sort=new");

		let replaced = route.get((), &RouteOptions::query([("page", 4)])).unwrap();
		assert_eq!(replaced.url, "/posts?page=4");
	}

	#[rstest]
	fn test_resolved_route_serializes(settings: LinkSettings) {
		let definition = RouteDefinition::new(&[HttpMethod::Get], "/posts");
		let route = Route::new("posts.index", &definition, &settings);
		let json = serde_json::to_value(route.head((), &RouteOptions::default()).unwrap()).unwrap();
		assert_eq!(json, serde_json::json!({"url": "/posts", "method": "head"}));
	}
}
