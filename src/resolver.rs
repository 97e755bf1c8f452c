//! URL resolution: template substitution, script prefix and query string.

use crate::definition::RouteDefinition;
use crate::error::LinkResult;
use crate::query::{AmbientQuery, RouteOptions, ensure_no_reserved_keys, render_unchecked};
use crate::settings::LinkSettings;
use crate::template::RouteArgs;

/// Resolves a definition to a URL.
///
/// Path parameters are substituted first (falling back to
/// `settings.url_defaults`), the script prefix is applied, then the
/// rendered query is appended. Resolution is pure: the same inputs always
/// give the same string.
///
/// # Examples
///
/// ```
/// use reinhardt_links::{HttpMethod, LinkSettings, RouteArgs, RouteDefinition, RouteOptions, QueryMap, resolve};
///
/// let definition = RouteDefinition::new(&[HttpMethod::Get], "/posts/{post}");
/// let options = RouteOptions::query(QueryMap::new().with("page", 2));
/// let url = resolve(&definition, &RouteArgs::one(7), &options, &LinkSettings::default(), None).unwrap();
/// assert_eq!(url, "/posts/7?page=2");
/// ```
pub fn resolve(
	definition: &RouteDefinition,
	args: &RouteArgs,
	options: &RouteOptions,
	settings: &LinkSettings,
	ambient: Option<&AmbientQuery>,
) -> LinkResult<String> {
	ensure_no_reserved_keys(options)?;
	resolve_unchecked(definition, args, options, settings, ambient)
}

/// Same as [`resolve`] without the reserved-key check, for options the
/// form adapter has already extended with `_method`.
pub(crate) fn resolve_unchecked(
	definition: &RouteDefinition,
	args: &RouteArgs,
	options: &RouteOptions,
	settings: &LinkSettings,
	ambient: Option<&AmbientQuery>,
) -> LinkResult<String> {
	let path = definition.url().expand(args, &settings.url_defaults)?;
	let path = settings.apply_prefix(path);
	let query = render_unchecked(options, ambient)?;

	tracing::trace!(template = %definition.url(), path = %path, query = %query, "resolved route");

	Ok(path + &query)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::error::LinkError;
	use crate::method::HttpMethod;
	use crate::query::QueryMap;
	use rstest::{fixture, rstest};

	#[fixture]
	fn show() -> RouteDefinition {
		RouteDefinition::new(&[HttpMethod::Get], "/posts/{post}")
	}

	#[rstest]
	fn test_resolve_without_options(show: RouteDefinition) {
		let url = resolve(
			&show,
			&RouteArgs::one(1),
			&RouteOptions::default(),
			&LinkSettings::default(),
			None,
		)
		.unwrap();
		assert_eq!(url, "/posts/1");
	}

	#[rstest]
	fn test_resolve_applies_prefix_before_query(show: RouteDefinition) {
		let settings = LinkSettings::new().with_script_prefix("/app");
		let options = RouteOptions::query([("page", 2)]);
		let url = resolve(&show, &RouteArgs::one(1), &options, &settings, None).unwrap();
		assert_eq!(url, "/app/posts/1?page=2");
	}

	#[rstest]
	fn test_resolve_uses_url_defaults() {
		let definition = RouteDefinition::new(&[HttpMethod::Get], "/{locale}/posts");
		let settings = LinkSettings::new().with_url_default("locale", "en");
		let url = resolve(
			&definition,
			&RouteArgs::None,
			&RouteOptions::default(),
			&settings,
			None,
		)
		.unwrap();
		assert_eq!(url, "/en/posts");

		let url = resolve(
			&definition,
			&RouteArgs::named([("locale", "fr")]),
			&RouteOptions::default(),
			&settings,
			None,
		)
		.unwrap();
		assert_eq!(url, "/fr/posts");
	}

	#[rstest]
	fn test_resolve_merges_ambient(show: RouteDefinition) {
		let ambient = AmbientQuery::parse("?a=0&b=2");
		let options = RouteOptions::merge(QueryMap::new().with("a", 1));
		let url = resolve(
			&show,
			&RouteArgs::one(1),
			&options,
			&LinkSettings::default(),
			Some(&ambient),
		)
		.unwrap();
		assert_eq!(url, "/posts/1?a=1&b=2");
	}

	#[rstest]
	fn test_resolve_rejects_reserved_key(show: RouteDefinition) {
		let options = RouteOptions::query([("_method", "PUT")]);
		let result = resolve(
			&show,
			&RouteArgs::one(1),
			&options,
			&LinkSettings::default(),
			None,
		);
		assert!(matches!(result, Err(LinkError::ReservedQueryKey(_))));
	}

	#[rstest]
	fn test_resolve_missing_parameter(show: RouteDefinition) {
		let result = resolve(
			&show,
			&RouteArgs::None,
			&RouteOptions::default(),
			&LinkSettings::default(),
			None,
		);
		assert!(matches!(result, Err(LinkError::MissingParameter { name, .. }) if name == "post"));
	}
}
