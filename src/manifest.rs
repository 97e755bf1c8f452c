//! Route manifests exported by the backend.
//!
//! A manifest is a TOML or JSON document holding optional settings and the
//! route table:
//!
//! ```toml
//! [settings]
//! script_prefix = "/app"
//!
//! [routes."posts.show"]
//! methods = ["get"]
//! url = "/posts/{post}"
//! ```

use crate::definition::RouteDefinition;
use crate::error::{LinkError, LinkResult};
use crate::settings::LinkSettings;
use indexmap::IndexMap;
use serde::Deserialize;

/// Deserialized manifest, routes kept in document order.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RouteManifest {
	#[serde(default)]
	pub settings: LinkSettings,
	#[serde(default)]
	pub routes: IndexMap<String, RouteDefinition>,
}

impl RouteManifest {
	pub fn from_toml_str(source: &str) -> LinkResult<Self> {
		let manifest: Self = toml::from_str(source)?;
		manifest.validate()
	}

	pub fn from_json_str(source: &str) -> LinkResult<Self> {
		let manifest: Self = serde_json::from_str(source)?;
		manifest.validate()
	}

	fn validate(self) -> LinkResult<Self> {
		if let Some(name) = self.routes.keys().find(|name| name.trim().is_empty()) {
			return Err(LinkError::Manifest(format!(
				"route name '{}' must not be blank",
				name
			)));
		}
		Ok(self)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::method::HttpMethod;
	use rstest::rstest;

	const TOML_MANIFEST: &str = r#"
[settings]
script_prefix = "/app"

[routes."posts.store"]
methods = ["post"]
url = "/posts"

[routes."posts.index"]
methods = ["GET"]
url = "/posts"
"#;

	#[rstest]
	fn test_toml_manifest_keeps_order() {
		let manifest = RouteManifest::from_toml_str(TOML_MANIFEST).unwrap();
		let names: Vec<&str> = manifest.routes.keys().map(String::as_str).collect();
		assert_eq!(names, vec!["posts.store", "posts.index"]);
		assert_eq!(manifest.settings.script_prefix.as_deref(), Some("/app"));
		assert_eq!(
			manifest.routes["posts.index"].methods().as_slice(),
			&[HttpMethod::Get, HttpMethod::Head]
		);
	}

	#[rstest]
	fn test_json_manifest_without_settings() {
		let manifest = RouteManifest::from_json_str(
			r#"{"routes": {"posts.destroy": {"methods": ["delete"], "url": "/posts/{post}"}}}"#,
		)
		.unwrap();
		assert_eq!(manifest.settings, LinkSettings::default());
		assert_eq!(manifest.routes.len(), 1);
	}

	#[rstest]
	#[case(r#"{"routes": {"a": {"methods": [], "url": "/a"}}}"#)]
	#[case(r#"{"routes": {"a": {"methods": ["trace"], "url": "/a"}}}"#)]
	#[case(r#"{"routes": {"a": {"methods": ["get"], "url": "/a/{id"}}}"#)]
	#[case(r#"{"routes": {}, "extra": true}"#)]
	fn test_invalid_json_manifest(#[case] source: &str) {
		assert!(matches!(
			RouteManifest::from_json_str(source),
			Err(LinkError::Json(_))
		));
	}

	#[rstest]
	fn test_blank_route_name_rejected() {
		let result = RouteManifest::from_json_str(r#"{"routes": {" ": {"methods": ["get"], "url": "/"}}}"#);
		assert!(matches!(result, Err(LinkError::Manifest(_))));
	}

	#[rstest]
	fn test_invalid_toml_manifest() {
		assert!(matches!(
			RouteManifest::from_toml_str("[routes"),
			Err(LinkError::Toml(_))
		));
	}
}
