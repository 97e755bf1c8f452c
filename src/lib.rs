//! Typed URL and form action helpers for Reinhardt routes.
//!
//! This crate mirrors server-side route definitions on the client and turns
//! them into request URLs and HTML form targets:
//!
//! - **Route registry**: routes by name, declared in Rust or loaded from a
//!   manifest exported by the backend
//! - **Method negotiation**: per-verb accessors, with `head` implied by `get`
//! - **Query serialization**: replace or merge semantics against the query of
//!   the current location
//! - **Form adapter**: `_method` spoofing for verbs HTML forms cannot submit
//!
//! # Quick Start
//!
//! ```rust
//! use reinhardt_links::{AmbientQuery, FormMethod, QueryMap, RouteOptions, RouteRegistry};
//!
//! let registry = RouteRegistry::from_toml_str(r#"
//! [routes."posts.index"]
//! methods = ["get"]
//! url = "/posts"
//!
//! [routes."posts.destroy"]
//! methods = ["delete"]
//! url = "/posts/{post}"
//! "#).unwrap();
//!
//! let ambient = AmbientQuery::parse("?page=2&sort=new");
//! let index = registry.route("posts.index").unwrap().with_ambient(&ambient);
//! let next = index.get((), &RouteOptions::merge(QueryMap::new().with("page", 3))).unwrap();
//! assert_eq!(next.url, "/posts?page=3&sort=new");
//!
//! let destroy = registry.route("posts.destroy").unwrap().form();
//! let form = destroy.delete(42, &RouteOptions::default()).unwrap();
//! assert_eq!(form.method, FormMethod::Post);
//! assert_eq!(form.action, "/posts/42?_method=DELETE");
//! ```

pub mod definition;
pub mod error;
pub mod form;
pub mod manifest;
pub mod method;
pub mod query;
pub mod registry;
pub mod resolver;
pub mod route;
pub mod settings;
pub mod static_route;
pub mod template;

// Re-export main types for convenience
pub use definition::RouteDefinition;
pub use error::{LinkError, LinkResult};
pub use form::{FormDescriptor, RouteForm};
pub use manifest::RouteManifest;
pub use method::{FormMethod, HttpMethod, METHOD_OVERRIDE_KEY, MethodSet};
pub use query::{
	AmbientQuery, QueryMap, QueryMode, QueryScalar, QueryValue, RouteOptions, parse_query,
	render_query,
};
pub use registry::RouteRegistry;
pub use resolver::resolve;
pub use route::{ResolvedRoute, Route};
pub use settings::LinkSettings;
pub use static_route::StaticRoute;
pub use template::{RouteArgs, RouteParam, UrlTemplate};

/// Commonly used types.
pub mod prelude {
	pub use crate::{
		AmbientQuery, FormDescriptor, FormMethod, HttpMethod, LinkError, LinkResult, LinkSettings,
		QueryMap, ResolvedRoute, RouteArgs, RouteDefinition, RouteOptions, RouteParam,
		RouteRegistry, StaticRoute, define_routes,
	};
}
