use std::{
	path::{Path, PathBuf},
	time::Duration,
};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use fs_err as fs;
use graphql_http_client::ClientConfig;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::cli::Cli;

pub trait JsonContent
where
	Self: DeserializeOwned + Serialize + Default,
{
	fn load(file_path: &Path) -> Result<Self> {
		if file_path.exists() {
			let content = fs::read_to_string(file_path)?;
			if !content.trim().is_empty() {
				let value: Self = serde_json::from_str(&content).with_context(
					|| format!("Invalid settings file `{}`", file_path.display()),
				)?;
				return Ok(value);
			}
		}

		Ok(Self::default())
	}
}

#[derive(Deserialize, Serialize, Default, Debug, PartialEq)]
#[serde(default)]
pub struct Settings {
	pub url: Option<String>,
	pub token: Option<String>,
	pub headers: Map<String, Value>,
	/// Seconds
	pub timeout: Option<u64>,
}

impl JsonContent for Settings {}

impl Settings {
	pub fn default_path() -> Option<PathBuf> {
		ProjectDirs::from("", "", "gqlq")
			.map(|dirs| dirs.config_dir().join("config.json"))
	}

	/// Command-line values take precedence over the file.
	pub fn merge(self, cli: &Cli) -> Self {
		let mut headers = self.headers;

		for (name, value) in &cli.headers {
			headers.insert(name.clone(), Value::String(value.clone()));
		}

		Self {
			url: cli.url.clone().or(self.url),
			token: cli.token.clone().or(self.token),
			headers,
			timeout: cli.timeout.or(self.timeout),
		}
	}

	pub fn client_config(&self) -> Result<ClientConfig> {
		let mut config = ClientConfig::new()
			.with_user_agent(&format!("gqlq/{}", env!("CARGO_PKG_VERSION")));

		if let Some(token) = &self.token {
			config = config.with_bearer_token(token);
		}

		for (name, value) in &self.headers {
			let Some(value) = value.as_str() else {
				anyhow::bail!("Header `{}` must be a string", name);
			};
			config = config.with_header(name, value);
		}

		if let Some(timeout) = self.timeout {
			config = config.with_timeout(Duration::from_secs(timeout));
		}

		Ok(config)
	}
}

#[cfg(test)]
mod tests {
	use std::{fs, time::Duration};

	use anyhow::Result;
	use clap::Parser;
	use serde_json::json;
	use similar_asserts::assert_eq;
	use tempfile::tempdir;

	use super::{JsonContent, Settings};
	use crate::cli::Cli;

	#[test]
	fn test_settings_load_file_not_exists() -> Result<()> {
		let dir = tempdir()?;
		let settings = Settings::load(&dir.path().join("config.json"))?;

		assert_eq!(settings, Settings::default());

		Ok(())
	}

	#[test]
	fn test_settings_load_empty_content() -> Result<()> {
		let dir = tempdir()?;
		let path = dir.path().join("config.json");
		fs::write(&path, "\n")?;

		assert_eq!(Settings::load(&path)?, Settings::default());

		Ok(())
	}

	#[test]
	fn test_settings_load_file() -> Result<()> {
		let dir = tempdir()?;
		let path = dir.path().join("config.json");
		fs::write(
			&path,
			r#"{"url":"http://localhost/graphql","headers":{"x-a":"1"},"timeout":5}"#,
		)?;

		let settings = Settings::load(&path)?;

		assert_eq!(settings.url.as_deref(), Some("http://localhost/graphql"));
		assert_eq!(settings.token, None);
		assert_eq!(settings.headers.get("x-a"), Some(&json!("1")));
		assert_eq!(settings.timeout, Some(5));

		Ok(())
	}

	#[test]
	fn test_settings_load_invalid() -> Result<()> {
		let dir = tempdir()?;
		let path = dir.path().join("config.json");
		fs::write(&path, "{ url")?;

		assert!(Settings::load(&path).is_err());

		Ok(())
	}

	#[test]
	fn test_settings_merge_cli_wins() -> Result<()> {
		let settings: Settings = serde_json::from_value(json!({
			"url": "http://file/graphql",
			"token": "file-token",
			"headers": { "x-a": "1", "x-b": "2" },
			"timeout": 5,
		}))?;
		let cli = Cli::try_parse_from([
			"gqlq",
			"--url",
			"http://cli/graphql",
			"-H",
			"x-b: 3",
		])?;

		let settings = settings.merge(&cli);

		assert_eq!(settings.url.as_deref(), Some("http://cli/graphql"));
		assert_eq!(settings.token.as_deref(), Some("file-token"));
		assert_eq!(
			serde_json::Value::Object(settings.headers.clone()),
			json!({ "x-a": "1", "x-b": "3" })
		);
		assert_eq!(settings.timeout, Some(5));

		let config = settings.client_config()?;

		assert_eq!(config.token(), Some("file-token"));
		assert_eq!(config.timeout(), Some(Duration::from_secs(5)));
		assert_eq!(config.headers().len(), 2);
		assert!(config.user_agent().starts_with("gqlq/"));

		Ok(())
	}

	#[test]
	fn test_settings_non_string_header() {
		let settings = Settings {
			headers: json!({ "x-a": 1 }).as_object().cloned().unwrap(),
			..Settings::default()
		};

		assert!(settings.client_config().is_err());
	}
}
