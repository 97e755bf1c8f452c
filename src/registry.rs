//! Named route table.

use crate::definition::RouteDefinition;
use crate::error::{LinkError, LinkResult};
use crate::manifest::RouteManifest;
use crate::route::Route;
use crate::settings::LinkSettings;
use crate::static_route::StaticRoute;
use indexmap::IndexMap;

/// Registry of route definitions by name.
///
/// Filled once at startup, from [`StaticRoute`] items or a manifest, then
/// only read. Lookups hand out borrowed [`Route`] views.
///
/// # Examples
///
/// ```
/// use reinhardt_links::{HttpMethod, QueryMap, RouteDefinition, RouteOptions, RouteRegistry};
///
/// let mut registry = RouteRegistry::new();
/// registry
/// 	.register("posts.show", RouteDefinition::new(&[HttpMethod::Get], "/posts/{post}"))
/// 	.unwrap();
///
/// let route = registry.route("posts.show").unwrap();
/// let resolved = route.head(1, &RouteOptions::query(QueryMap::new().with("tab", "info"))).unwrap();
/// assert_eq!(resolved.url, "/posts/1?tab=info");
/// ```
#[derive(Debug, Clone, Default)]
pub struct RouteRegistry {
	routes: IndexMap<String, RouteDefinition>,
	settings: LinkSettings,
}

impl RouteRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_settings(settings: LinkSettings) -> Self {
		Self {
			routes: IndexMap::new(),
			settings,
		}
	}

	/// Builds a registry from a TOML manifest.
	pub fn from_toml_str(source: &str) -> LinkResult<Self> {
		Self::from_manifest(RouteManifest::from_toml_str(source)?)
	}

	/// Builds a registry from a JSON manifest.
	pub fn from_json_str(source: &str) -> LinkResult<Self> {
		Self::from_manifest(RouteManifest::from_json_str(source)?)
	}

	pub fn from_manifest(manifest: RouteManifest) -> LinkResult<Self> {
		let mut registry = Self::with_settings(manifest.settings);
		for (name, definition) in manifest.routes {
			registry.register(name, definition)?;
		}
		tracing::debug!(routes = registry.len(), "loaded route manifest");
		Ok(registry)
	}

	/// Registers a definition under `name`.
	///
	/// # Errors
	///
	/// Returns [`LinkError::DuplicateRoute`] if the name is taken.
	pub fn register(&mut self, name: impl Into<String>, definition: RouteDefinition) -> LinkResult<()> {
		let name = name.into();
		if self.routes.contains_key(&name) {
			return Err(LinkError::DuplicateRoute(name));
		}
		tracing::debug!(
			route = %name,
			methods = %definition.methods(),
			url = %definition.url(),
			"registered route"
		);
		self.routes.insert(name, definition);
		Ok(())
	}

	/// Registers a route declared with [`StaticRoute`].
	pub fn register_static<R: StaticRoute>(&mut self) -> LinkResult<()> {
		let definition = RouteDefinition::try_new(R::METHODS.iter().copied(), R::URL)?;
		self.register(R::NAME, definition)
	}

	/// Looks up a route by name.
	///
	/// # Errors
	///
	/// Returns [`LinkError::RouteNotFound`] for unknown names.
	pub fn route(&self, name: &str) -> LinkResult<Route<'_>> {
		let (name, definition) = self
			.routes
			.get_key_value(name)
			.ok_or_else(|| LinkError::RouteNotFound(name.to_string()))?;
		Ok(Route::new(name, definition, &self.settings))
	}

	pub fn definition(&self, name: &str) -> Option<&RouteDefinition> {
		self.routes.get(name)
	}

	pub fn has_route(&self, name: &str) -> bool {
		self.routes.contains_key(name)
	}

	/// Route names in registration order.
	pub fn route_names(&self) -> impl Iterator<Item = &str> {
		self.routes.keys().map(String::as_str)
	}

	pub fn iter(&self) -> impl Iterator<Item = (&str, &RouteDefinition)> {
		self.routes.iter().map(|(name, definition)| (name.as_str(), definition))
	}

	pub fn settings(&self) -> &LinkSettings {
		&self.settings
	}

	pub fn len(&self) -> usize {
		self.routes.len()
	}

	pub fn is_empty(&self) -> bool {
		self.routes.is_empty()
	}
}
