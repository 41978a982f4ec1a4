use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use graphql_http_client::Variables;
use serde_json::Value;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
	/// Query text, `@path` to read it from a file, `-` or nothing for stdin
	pub query: Option<String>,

	/// GraphQL endpoint
	#[arg(short, long)]
	pub url: Option<String>,

	/// Set a variable, the value is parsed as JSON and falls back to a string
	#[arg(long = "var", value_name = "KEY=VALUE", value_parser = parse_var)]
	pub vars: Vec<(String, Value)>,

	/// All variables as a JSON object, `--var` entries are merged over it
	#[arg(long, value_name = "JSON")]
	pub variables: Option<String>,

	/// Extra request header
	#[arg(
		short = 'H',
		long = "header",
		value_name = "NAME: VALUE",
		value_parser = parse_header
	)]
	pub headers: Vec<(String, String)>,

	/// Bearer token sent in the authorization header
	#[arg(long)]
	pub token: Option<String>,

	/// Request timeout in seconds
	#[arg(long, value_name = "SECS")]
	pub timeout: Option<u64>,

	/// Print the whole response envelope instead of failing on errors
	#[arg(long)]
	pub raw: bool,

	/// Settings file
	#[arg(long, value_name = "PATH")]
	pub config: Option<PathBuf>,

	/// Use debug output
	#[arg(long)]
	pub debug: bool,
}

impl Cli {
	/// `--variables` with every `--var` merged over it.
	pub fn variables(&self) -> Result<Variables> {
		let mut variables = match &self.variables {
			Some(json) => {
				let value: Value = serde_json::from_str(json)
					.context("`--variables` is not valid JSON")?;
				match value {
					Value::Object(variables) => variables,
					_ => anyhow::bail!("`--variables` must be a JSON object"),
				}
			}
			None => Variables::new(),
		};

		for (key, value) in &self.vars {
			variables.insert(key.clone(), value.clone());
		}

		Ok(variables)
	}
}

fn parse_var(input: &str) -> Result<(String, Value), String> {
	let Some((key, value)) = input.split_once('=') else {
		return Err(format!("expected KEY=VALUE, got `{}`", input));
	};

	if key.is_empty() {
		return Err(format!("missing variable name in `{}`", input));
	}

	let value = serde_json::from_str(value)
		.unwrap_or_else(|_| Value::String(value.to_string()));

	Ok((key.to_string(), value))
}

fn parse_header(input: &str) -> Result<(String, String), String> {
	let Some((name, value)) = input.split_once(':') else {
		return Err(format!("expected `NAME: VALUE`, got `{}`", input));
	};

	let name = name.trim();

	if name.is_empty() {
		return Err(format!("missing header name in `{}`", input));
	}

	Ok((name.to_string(), value.trim().to_string()))
}

#[cfg(test)]
mod tests {
	use anyhow::Result;
	use clap::{CommandFactory, Parser};
	use serde_json::{json, Value};
	use similar_asserts::assert_eq;

	use super::{parse_header, parse_var, Cli};

	#[test]
	fn verify_cli() {
		Cli::command().debug_assert();
	}

	#[test]
	fn test_parse_var() {
		assert_eq!(parse_var("id=1"), Ok(("id".to_string(), json!(1))));
		assert_eq!(
			parse_var("tags=[\"a\"]"),
			Ok(("tags".to_string(), json!(["a"])))
		);
		assert_eq!(
			parse_var("name=foo=bar"),
			Ok(("name".to_string(), json!("foo=bar")))
		);
		assert!(parse_var("name").is_err());
		assert!(parse_var("=1").is_err());
	}

	#[test]
	fn test_parse_header() {
		assert_eq!(
			parse_header("X-Request-Id:  abc "),
			Ok(("X-Request-Id".to_string(), "abc".to_string()))
		);
		assert_eq!(
			parse_header("x-url: http://a"),
			Ok(("x-url".to_string(), "http://a".to_string()))
		);
		assert!(parse_header("x-request-id").is_err());
		assert!(parse_header(": abc").is_err());
	}

	#[test]
	fn test_cli_variables_merge() -> Result<()> {
		let cli = Cli::try_parse_from([
			"gqlq",
			"{ a }",
			"--variables",
			r#"{"id": 1, "name": "foo"}"#,
			"--var",
			"name=bar",
		])?;

		assert_eq!(
			Value::Object(cli.variables()?),
			json!({ "id": 1, "name": "bar" })
		);

		Ok(())
	}

	#[test]
	fn test_cli_variables_not_object() -> Result<()> {
		let cli = Cli::try_parse_from(["gqlq", "--variables", "[1]"])?;

		assert!(cli.variables().is_err());

		Ok(())
	}
}
