use mockito::{Mock, ServerGuard};
use serde_json::Value;

use crate::gql::JsonObject;

/// A `POST /` mock answering with a JSON `body`. Call `create` on it.
pub fn mock_graphql(
	server: &mut ServerGuard,
	status: usize,
	body: &str,
) -> Mock {
	server
		.mock("POST", "/")
		.with_status(status)
		.with_header("content-type", "application/json")
		.with_body(body)
}

pub fn object(value: Value) -> JsonObject {
	match value {
		Value::Object(object) => object,
		other => panic!("not a JSON object: {}", other),
	}
}
