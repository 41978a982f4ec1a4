use std::io::Read;

use serde::de::DeserializeOwned;
use tracing::debug;
use ureq::{Agent, Response};

use crate::{
	config::{build_proxy_agent, ClientConfig},
	error::{Error, Result},
	gql::{GraphQLQuery, GraphQLResponse, RawResponse, Variables},
};

/// A blocking GraphQL client bound to a single endpoint.
///
/// Cloning is cheap and clones share the connection pool of the
/// underlying agent.
#[derive(Clone)]
pub struct GraphQLClient {
	endpoint: String,
	config: ClientConfig,
	agent: Agent,
}

impl GraphQLClient {
	pub fn new(endpoint: &str) -> Self {
		Self::with_config(endpoint, ClientConfig::default())
	}

	pub fn with_config(endpoint: &str, config: ClientConfig) -> Self {
		Self::with_agent(endpoint, config, build_proxy_agent())
	}

	/// Use a caller-built agent. It should be built with `redirects(0)`,
	/// otherwise a redirect is followed and its target's answer is taken
	/// as the response instead of failing on the non-200 status.
	pub fn with_agent(
		endpoint: &str,
		config: ClientConfig,
		agent: Agent,
	) -> Self {
		Self {
			endpoint: endpoint.to_string(),
			config,
			agent,
		}
	}

	pub fn endpoint(&self) -> &str {
		&self.endpoint
	}

	pub fn config(&self) -> &ClientConfig {
		&self.config
	}

	/// Send `text` with `variables` and return both `data` and `errors`.
	///
	/// Only transport failures, a status other than `200` and undecodable
	/// bodies are errors here, GraphQL errors are left in the response.
	pub fn query_for_result<T>(
		&self,
		text: &str,
		variables: &Variables,
	) -> Result<GraphQLResponse<T>>
	where
		T: DeserializeOwned,
	{
		let body = GraphQLQuery::new(text, variables).to_json()?;

		debug!(endpoint = %self.endpoint, "sending GraphQL request");

		let resp = self.send(&body)?;
		let status = resp.status();

		debug!(status, "received GraphQL response");

		if status != 200 {
			let mut body = Vec::new();
			resp.into_reader().read_to_end(&mut body)?;
			return Err(Error::Status {
				status,
				body: String::from_utf8_lossy(&body).into_owned(),
			});
		}

		let raw: RawResponse = serde_json::from_reader(resp.into_reader())?;

		debug!("response: {:?}", raw);

		raw.convert()
	}

	/// Send `text` with `variables` and return `data` alone.
	///
	/// Any reported GraphQL error fails the call, even when `data` is also
	/// present.
	pub fn query<T>(&self, text: &str, variables: &Variables) -> Result<T>
	where
		T: DeserializeOwned,
	{
		self.query_for_result(text, variables)?.into_data()
	}

	fn send(&self, body: &str) -> Result<Response> {
		let req = self.config.apply(self.agent.post(&self.endpoint));

		match req.send_string(body) {
			Ok(resp) => Ok(resp),
			Err(ureq::Error::Status(_, resp)) => Ok(resp),
			Err(ureq::Error::Transport(transport)) => {
				Err(Error::Transport(Box::new(transport)))
			}
		}
	}
}

impl std::fmt::Debug for GraphQLClient {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("GraphQLClient")
			.field("endpoint", &self.endpoint)
			.field("config", &self.config)
			.finish_non_exhaustive()
	}
}
