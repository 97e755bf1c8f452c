//! Compile-time route tables.

use crate::method::HttpMethod;

/// A route declared as a Rust item.
///
/// # Example
///
/// ```rust
/// use reinhardt_links::{HttpMethod, RouteRegistry, StaticRoute};
///
/// pub struct PostShow;
/// impl StaticRoute for PostShow {
///     const NAME: &'static str = "posts.show";
///     const METHODS: &'static [HttpMethod] = &[HttpMethod::Get];
///     const URL: &'static str = "/posts/{post}";
/// }
///
/// let mut registry = RouteRegistry::new();
/// registry.register_static::<PostShow>().unwrap();
/// assert!(registry.has_route("posts.show"));
/// ```
pub trait StaticRoute {
	/// Unique route name.
	const NAME: &'static str;

	/// Declared verbs; `head` is implied by `get`.
	const METHODS: &'static [HttpMethod];

	/// URL template.
	const URL: &'static str;
}

/// Declares unit types implementing [`StaticRoute`].
///
/// ```rust
/// use reinhardt_links::{RouteRegistry, define_routes};
///
/// define_routes! {
///     /// Post listing.
///     pub PostIndex = "posts.index" => [get] "/posts";
///     pub PostDestroy = "posts.destroy" => [delete] "/posts/{post}";
/// }
///
/// let mut registry = RouteRegistry::new();
/// registry.register_static::<PostIndex>().unwrap();
/// registry.register_static::<PostDestroy>().unwrap();
/// assert_eq!(registry.len(), 2);
/// ```
#[macro_export]
macro_rules! define_routes {
	(@method get) => { $crate::HttpMethod::Get };
	(@method head) => { $crate::HttpMethod::Head };
	(@method post) => { $crate::HttpMethod::Post };
	(@method put) => { $crate::HttpMethod::Put };
	(@method patch) => { $crate::HttpMethod::Patch };
	(@method delete) => { $crate::HttpMethod::Delete };
	(@method options) => { $crate::HttpMethod::Options };
	($(
		$(#[$attr:meta])*
		$vis:vis $ty:ident = $name:literal => [$($method:ident),+ $(,)?] $url:literal;
	)*) => {
		$(
			$(#[$attr])*
			#[derive(Debug, Clone, Copy, Default)]
			$vis struct $ty;

			impl $crate::StaticRoute for $ty {
				const NAME: &'static str = $name;
				const METHODS: &'static [$crate::HttpMethod] = &[
					$($crate::define_routes!(@method $method)),+
				];
				const URL: &'static str = $url;
			}
		)*
	};
}
