//! Error types for route resolution and form generation.
//!
//! Every variant describes a programming mistake at the call site (an unknown
//! route, an undeclared verb, a missing placeholder). None of them is
//! retryable; callers are expected to fix the offending call.

use thiserror::Error;

/// Errors that can occur while building URLs or form descriptors.
#[derive(Debug, Error)]
pub enum LinkError {
	/// No route is registered under the requested name.
	#[error("route not found: {0}")]
	RouteNotFound(String),

	/// A route with the same name is already registered.
	#[error("route already registered: {0}")]
	DuplicateRoute(String),

	/// A route definition declares no HTTP methods.
	#[error("route definition for '{0}' declares no methods")]
	EmptyMethods(String),

	/// A method name could not be parsed.
	#[error("unknown HTTP method: {0}")]
	UnknownMethod(String),

	/// The requested verb is not part of the route's effective method set.
	#[error("method {method} not allowed for '{url}' (allowed: {allowed})")]
	MethodNotAllowed {
		method: &'static str,
		url: String,
		allowed: String,
	},

	/// The URL template is malformed.
	#[error("invalid url template '{template}': {reason}")]
	InvalidTemplate { template: String, reason: String },

	/// A required path placeholder was not supplied.
	#[error("missing required parameter '{name}' for '{template}'")]
	MissingParameter { name: String, template: String },

	/// A path parameter value would change the structure of the URL.
	#[error("invalid parameter '{name}': {reason}")]
	InvalidParameter { name: String, reason: String },

	/// More positional parameters were supplied than the template declares.
	#[error("too many parameters for '{template}': expected at most {expected}, got {actual}")]
	TooManyParameters {
		template: String,
		expected: usize,
		actual: usize,
	},

	/// Caller options used a key reserved for method spoofing.
	#[error("query key '{0}' is reserved for form method spoofing")]
	ReservedQueryKey(String),

	/// A query value cannot be represented in a query string.
	#[error("invalid query value for '{key}': {reason}")]
	InvalidQueryValue { key: String, reason: String },

	/// A route manifest is structurally valid but semantically wrong.
	#[error("invalid route manifest: {0}")]
	Manifest(String),

	/// TOML manifest or settings failed to parse.
	#[error("failed to parse TOML: {0}")]
	Toml(#[from] toml::de::Error),

	/// JSON manifest or query payload failed to parse.
	#[error("failed to parse JSON: {0}")]
	Json(#[from] serde_json::Error),
}

/// Result type alias for link operations.
pub type LinkResult<T> = Result<T, LinkError>;

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_method_not_allowed_display() {
		let err = LinkError::MethodNotAllowed {
			method: "GET",
			url: "/posts".to_string(),
			allowed: "post".to_string(),
		};
		assert_eq!(
			err.to_string(),
			"method GET not allowed for '/posts' (allowed: post)"
		);
	}

	#[rstest]
	fn test_missing_parameter_display() {
		let err = LinkError::MissingParameter {
			name: "id".to_string(),
			template: "/posts/{id}".to_string(),
		};
		assert!(err.to_string().contains("'id'"));
		assert!(err.to_string().contains("/posts/{id}"));
	}

	#[rstest]
	fn test_route_not_found_display() {
		assert_eq!(
			LinkError::RouteNotFound("posts.show".to_string()).to_string(),
			"route not found: posts.show"
		);
	}
}
