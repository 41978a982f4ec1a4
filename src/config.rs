use std::{env, time::Duration};

use tracing::warn;
use ureq::{Agent, AgentBuilder, Proxy, Request};

pub const SELF_VERSION: &str = env!("CARGO_PKG_VERSION");

fn default_user_agent() -> String {
	format!("graphql-http-client/{}", SELF_VERSION)
}

/// Settings applied to every request a client sends.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
	token: Option<String>,
	headers: Vec<(String, String)>,
	timeout: Option<Duration>,
	user_agent: String,
}

impl Default for ClientConfig {
	fn default() -> Self {
		Self {
			token: None,
			headers: Vec::new(),
			timeout: None,
			user_agent: default_user_agent(),
		}
	}
}

impl ClientConfig {
	pub fn new() -> Self {
		Self::default()
	}

	/// Send `authorization: Bearer <token>` with every request.
	pub fn with_bearer_token(self, token: &str) -> Self {
		Self {
			token: Some(token.to_string()),
			..self
		}
	}

	/// Add an extra header. Headers are sent in the order they were added.
	pub fn with_header(mut self, name: &str, value: &str) -> Self {
		self.headers.push((name.to_string(), value.to_string()));
		self
	}

	/// Overall timeout of a single request, from connect to reading the body.
	pub fn with_timeout(self, timeout: Duration) -> Self {
		Self {
			timeout: Some(timeout),
			..self
		}
	}

	pub fn with_user_agent(self, user_agent: &str) -> Self {
		Self {
			user_agent: user_agent.to_string(),
			..self
		}
	}

	pub fn token(&self) -> Option<&str> {
		self.token.as_deref()
	}

	pub fn headers(&self) -> &[(String, String)] {
		&self.headers
	}

	pub fn timeout(&self) -> Option<Duration> {
		self.timeout
	}

	pub fn user_agent(&self) -> &str {
		&self.user_agent
	}

	pub(crate) fn apply(&self, mut req: Request) -> Request {
		req = req
			.set("content-type", "application/json")
			.set("user-agent", &self.user_agent);

		if let Some(token) = &self.token {
			req = req.set("authorization", &format!("Bearer {}", token));
		}

		for (name, value) in &self.headers {
			req = req.set(name, value);
		}

		if let Some(timeout) = self.timeout {
			req = req.timeout(timeout);
		}

		req
	}
}

pub(crate) fn build_proxy_agent() -> Agent {
	let proxy = env::var("https_proxy").or_else(|_| env::var("http_proxy"));
	let agent_builder = AgentBuilder::new().redirects(0);

	if let Ok(env_proxy) = proxy {
		match Proxy::new(&env_proxy) {
			Ok(proxy) => return agent_builder.proxy(proxy).build(),
			Err(err) => warn!("Ignoring proxy `{}`: {}", env_proxy, err),
		}
	}

	agent_builder.build()
}
