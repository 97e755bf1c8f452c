//! HTML form descriptors with method spoofing.
//!
//! Forms can only submit `get` or `post`. Any other verb is expressed by
//! submitting the nearest supported one and carrying the intended verb in
//! the `_method` query key, which the backend reads back:
//!
//! | verb                          | form method | `_method` |
//! |-------------------------------|-------------|-----------|
//! | `get`, `post`                 | same        | none      |
//! | `head`                        | `get`       | `HEAD`    |
//! | `put`, `patch`, `delete`, `options` | `post` | verb     |

use crate::error::LinkResult;
use crate::method::{FormMethod, HttpMethod, METHOD_OVERRIDE_KEY};
use crate::query::{QueryValue, RouteOptions, ensure_no_reserved_keys};
use crate::resolver::resolve_unchecked;
use crate::route::Route;
use crate::template::RouteArgs;
use serde::Serialize;

/// Target of an HTML `<form>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormDescriptor {
	pub action: String,
	pub method: FormMethod,
}

/// Form view of a [`Route`].
#[derive(Debug, Clone, Copy)]
pub struct RouteForm<'a> {
	route: Route<'a>,
}

macro_rules! form_accessors {
	($($fn_name:ident => $method:expr;)+) => {
		$(
			pub fn $fn_name(
				&self,
				args: impl Into<RouteArgs>,
				options: &RouteOptions,
			) -> LinkResult<FormDescriptor> {
				self.with_method($method, args, options)
			}
		)+
	};
}

impl<'a> RouteForm<'a> {
	pub(crate) fn new(route: Route<'a>) -> Self {
		Self { route }
	}

	/// Descriptor for the route's primary verb.
	pub fn call(&self, args: impl Into<RouteArgs>, options: &RouteOptions) -> LinkResult<FormDescriptor> {
		self.with_method(self.route.definition().primary_method(), args, options)
	}

	/// Descriptor submitting `method`, spoofed when forms cannot send it.
	///
	/// # Errors
	///
	/// Fails with `MethodNotAllowed` for undeclared verbs and with
	/// `ReservedQueryKey` when `options` already carries `_method`.
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_links::{FormMethod, HttpMethod, RouteDefinition, RouteOptions, RouteRegistry};
	///
	/// let mut registry = RouteRegistry::new();
	/// registry
	/// 	.register("posts.destroy", RouteDefinition::new(&[HttpMethod::Delete], "/posts/{post}"))
	/// 	.unwrap();
	///
	/// let form = registry.route("posts.destroy").unwrap().form();
	/// let descriptor = form.delete(12, &RouteOptions::default()).unwrap();
	/// assert_eq!(descriptor.method, FormMethod::Post);
	/// assert_eq!(descriptor.action, "/posts/12?_method=DELETE");
	/// ```
	pub fn with_method(
		&self,
		method: HttpMethod,
		args: impl Into<RouteArgs>,
		options: &RouteOptions,
	) -> LinkResult<FormDescriptor> {
		let definition = self.route.definition();
		definition.ensure_allows(method)?;
		ensure_no_reserved_keys(options)?;

		let args = args.into();
		let action = if method.requires_spoofing() {
			let spoofed = options.with_leading(
				METHOD_OVERRIDE_KEY,
				QueryValue::from(method.as_upper_str()),
			);
			resolve_unchecked(
				definition,
				&args,
				&spoofed,
				self.route.settings(),
				self.route.ambient(),
			)?
		} else {
			resolve_unchecked(
				definition,
				&args,
				options,
				self.route.settings(),
				self.route.ambient(),
			)?
		};

		let descriptor = FormDescriptor {
			action,
			method: method.form_method(),
		};
		tracing::debug!(
			route = %self.route.name(),
			verb = %method,
			form_method = %descriptor.method,
			action = %descriptor.action,
			"built form descriptor"
		);
		Ok(descriptor)
	}

	form_accessors! {
		get => HttpMethod::Get;
		head => HttpMethod::Head;
		post => HttpMethod::Post;
		put => HttpMethod::Put;
		patch => HttpMethod::Patch;
		delete => HttpMethod::Delete;
		options => HttpMethod::Options;
	}
}
