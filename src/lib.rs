//! A small blocking GraphQL over HTTP client.
//!
//! ```no_run
//! use graphql_http_client::{ClientConfig, GraphQLClient, JsonObject, Variables};
//!
//! let client = GraphQLClient::with_config(
//!     "https://api.github.com/graphql",
//!     ClientConfig::new().with_bearer_token("token"),
//! );
//! let data: JsonObject = client.query("{ viewer { login } }", &Variables::new())?;
//! # Ok::<(), graphql_http_client::Error>(())
//! ```

mod client;
mod config;
mod error;
mod gql;
#[cfg(test)]
mod testing;

pub use client::GraphQLClient;
pub use config::ClientConfig;
pub use error::{Error, GraphQLError, Result};
pub use gql::{to_variables, ErrorObject, GraphQLResponse, JsonObject, Variables};
