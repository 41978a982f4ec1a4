mod cli;
mod colorize;
mod settings;

use std::io::{self, Read};

use anyhow::{Context, Result};
use clap::Parser;
use cli::Cli;
use fs_err as fs;
use graphql_http_client::{GraphQLClient, JsonObject};
use settings::{JsonContent, Settings};
use tracing::debug;
use tracing_subscriber::EnvFilter;

fn main() {
	let cli = Cli::parse();

	init_tracing(cli.debug);

	if let Err(err) = run(cli) {
		eprintln!("{}", colorize::error(&format!("{:#}", err)));
		std::process::exit(1);
	}
}

fn init_tracing(debug: bool) {
	let level = if debug { "debug" } else { "warn" };

	tracing_subscriber::fmt()
		.with_env_filter(EnvFilter::new(level))
		.with_writer(io::stderr)
		.with_target(false)
		.init();
}

fn run(cli: Cli) -> Result<()> {
	let settings = load_settings(&cli)?.merge(&cli);

	let Some(url) = settings.url.as_deref() else {
		anyhow::bail!(
			"No endpoint configured, pass `--url` or set `url` in the settings file"
		);
	};

	debug!(url, raw = cli.raw, "running query");

	let query = read_query(cli.query.as_deref())?;
	let variables = cli.variables()?;
	let client = GraphQLClient::with_config(url, settings.client_config()?);

	let output = if cli.raw {
		let response = client
			.query_for_result::<JsonObject>(&query, &variables)
			.with_context(|| format!("Query to `{}` failed", url))?;

		if response.has_errors() {
			eprintln!("{}", colorize::warning("The response contains errors"));
		}

		serde_json::to_string_pretty(&response)?
	} else {
		let data: JsonObject = client
			.query(&query, &variables)
			.with_context(|| format!("Query to `{}` failed", url))?;

		serde_json::to_string_pretty(&data)?
	};

	println!("{}", output);

	Ok(())
}

fn load_settings(cli: &Cli) -> Result<Settings> {
	let path = match &cli.config {
		Some(path) => path.clone(),
		None => match Settings::default_path() {
			Some(path) => path,
			None => return Ok(Settings::default()),
		},
	};

	debug!("settings file: {}", path.display());

	Settings::load(&path)
}

fn read_query(arg: Option<&str>) -> Result<String> {
	match arg {
		None | Some("-") => {
			let mut query = String::new();
			io::stdin()
				.read_to_string(&mut query)
				.context("Could not read the query from stdin")?;
			Ok(query)
		}
		Some(arg) => match arg.strip_prefix('@') {
			Some(path) => Ok(fs::read_to_string(path)?),
			None => Ok(arg.to_string()),
		},
	}
}
