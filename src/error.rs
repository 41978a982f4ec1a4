use std::{fmt, io};

use serde_json::Value;
use thiserror::Error;

use crate::gql::ErrorObject;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Error, Debug)]
pub enum Error {
	#[error("Non-OK status code ({status}): {body}")]
	Status { status: u16, body: String },
	#[error("HTTP transport failure: {0}")]
	Transport(Box<ureq::Transport>),
	#[error(transparent)]
	GraphQL(#[from] GraphQLError),
	#[error("No errors found but data section was still empty")]
	InvalidResponse,
	#[error("Invalid JSON: {0}")]
	Json(#[from] serde_json::Error),
	#[error("Could not read the response body: {0}")]
	Io(#[from] io::Error),
	#[error("Variables must serialize to a JSON object")]
	InvalidVariables,
}

/// The `errors` list of an envelope, raised by
/// [`GraphQLClient::query`](crate::GraphQLClient::query).
#[derive(Debug, Clone, PartialEq)]
pub struct GraphQLError {
	pub errors: Vec<ErrorObject>,
}

impl GraphQLError {
	pub fn new(errors: Vec<ErrorObject>) -> Self {
		Self { errors }
	}

	/// The `message` field of every error that has one.
	pub fn messages(&self) -> impl Iterator<Item = &str> {
		self.errors
			.iter()
			.filter_map(|err| err.get("message").and_then(Value::as_str))
	}
}

impl fmt::Display for GraphQLError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let rendered = self
			.errors
			.iter()
			.map(|err| Value::Object(err.clone()).to_string())
			.collect::<Vec<_>>();

		write!(f, "{}", rendered.join(", "))
	}
}

impl std::error::Error for GraphQLError {}
