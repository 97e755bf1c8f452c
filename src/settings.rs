//! Link generation settings.

use crate::error::LinkResult;
use indexmap::IndexMap;
use serde::Deserialize;

/// Settings shared by every route of a registry.
///
/// Loaded from the `[settings]` table of a route manifest or on its own:
///
/// ```toml
/// script_prefix = "/app"
///
/// [url_defaults]
/// locale = "en"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LinkSettings {
	/// Path the application is mounted under, prepended to root-relative URLs.
	pub script_prefix: Option<String>,
	/// Values for placeholders the caller leaves unset.
	pub url_defaults: IndexMap<String, String>,
}

impl LinkSettings {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_script_prefix(mut self, prefix: impl Into<String>) -> Self {
		self.script_prefix = Some(prefix.into());
		self
	}

	pub fn with_url_default(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.url_defaults.insert(name.into(), value.into());
		self
	}

	pub fn from_toml_str(source: &str) -> LinkResult<Self> {
		Ok(toml::from_str(source)?)
	}

	/// Prepends the script prefix to a root-relative path.
	pub(crate) fn apply_prefix(&self, path: String) -> String {
		match self.script_prefix.as_deref().map(|p| p.trim_end_matches('/')) {
			Some(prefix) if !prefix.is_empty() && path.starts_with('/') && !path.starts_with("//") => {
				format!("{}{}", prefix, path)
			}
			_ => path,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_from_toml() {
		let settings = LinkSettings::from_toml_str(
			r#"
script_prefix = "/app"

[url_defaults]
locale = "en"
"#,
		)
		.unwrap();
		assert_eq!(settings.script_prefix.as_deref(), Some("/app"));
		assert_eq!(settings.url_defaults.get("locale").map(String::as_str), Some("en"));
	}

	#[rstest]
	fn test_unknown_field_rejected() {
		assert!(LinkSettings::from_toml_str("prefix = \"/app\"").is_err());
	}

	#[rstest]
	#[case(Some("/app"), "/posts", "/app/posts")]
	#[case(Some("/app/"), "/posts", "/app/posts")]
	#[case(Some("/"), "/posts", "/posts")]
	#[case(None, "/posts", "/posts")]
	#[case(Some("/app"), "//cdn.example.com/x", "//cdn.example.com/x")]
	#[case(Some("/app"), "https://example.com/x", "https://example.com/x")]
	fn test_apply_prefix(#[case] prefix: Option<&str>, #[case] path: &str, #[case] expected: &str) {
		let settings = LinkSettings {
			script_prefix: prefix.map(str::to_string),
			..Default::default()
		};
		assert_eq!(settings.apply_prefix(path.to_string()), expected);
	}
}
