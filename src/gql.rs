use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{Error, GraphQLError, Result};

/// An untyped JSON object, the default shape for `data`.
pub type JsonObject = Map<String, Value>;

/// Query variables, always a JSON object on the wire.
pub type Variables = JsonObject;

/// A single entry of the envelope's `errors` list, kept as sent.
pub type ErrorObject = JsonObject;

/// Convert any serializable value into [`Variables`].
///
/// `null` (e.g. `()` or `None`) becomes the empty object.
pub fn to_variables<V>(value: &V) -> Result<Variables>
where
	V: Serialize + ?Sized,
{
	match serde_json::to_value(value)? {
		Value::Object(variables) => Ok(variables),
		Value::Null => Ok(Variables::new()),
		_ => Err(Error::InvalidVariables),
	}
}

#[derive(Serialize)]
pub(crate) struct GraphQLQuery<'a> {
	query: &'a str,
	variables: &'a Variables,
}

impl<'a> GraphQLQuery<'a> {
	pub(crate) fn new(query: &'a str, variables: &'a Variables) -> Self {
		Self { query, variables }
	}

	pub(crate) fn to_json(&self) -> Result<String> {
		let json = serde_json::to_string(self)?;

		debug!(payload = %json, "GraphQL request payload");

		Ok(json)
	}
}

/// The envelope exactly as decoded, before `data` is converted.
#[derive(Deserialize, Debug)]
pub(crate) struct RawResponse {
	data: Option<JsonObject>,
	errors: Option<Vec<ErrorObject>>,
}

impl RawResponse {
	pub(crate) fn convert<T>(self) -> Result<GraphQLResponse<T>>
	where
		T: DeserializeOwned,
	{
		let data = self
			.data
			.map(|data| serde_json::from_value(Value::Object(data)))
			.transpose()?;

		Ok(GraphQLResponse {
			data,
			errors: self.errors,
		})
	}
}

/// Typed `data` alongside the untouched `errors` of a GraphQL response.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct GraphQLResponse<T> {
	pub data: Option<T>,
	pub errors: Option<Vec<ErrorObject>>,
}

impl<T> GraphQLResponse<T> {
	pub fn has_errors(&self) -> bool {
		self.errors.as_ref().is_some_and(|errors| !errors.is_empty())
	}

	/// Unwrap `data`, failing on any reported error or on missing data.
	///
	/// Partial results (data alongside errors) are treated as failures.
	pub fn into_data(self) -> Result<T> {
		let Self { data, errors } = self;

		if let Some(errors) = errors {
			if !errors.is_empty() {
				return Err(GraphQLError::new(errors).into());
			}
		}

		data.ok_or(Error::InvalidResponse)
	}
}
