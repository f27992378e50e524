mod error;
mod graphql;

pub use error::TransportError;
pub use graphql::{parse_headers, GraphQLClient};

use async_trait::async_trait;
use serde_json::{Map, Value};

/// Trait for executing a single GraphQL query against a backend.
///
/// This abstraction keeps the runner independent of the wire protocol;
/// tests substitute a stub implementation.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Executes the query with optional variables and returns the raw
    /// response payload.
    async fn execute(
        &self,
        query: &str,
        variables: Option<Map<String, Value>>,
    ) -> Result<Vec<u8>, TransportError>;
}
