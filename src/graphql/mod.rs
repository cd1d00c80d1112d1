//! GraphQL transports: an HTTP query executor and a websocket subscriber.
//!
//! The accessor layer only sees the [`Executor`] and [`Subscriber`] traits,
//! so either side can be swapped for an in-memory fake in tests.

mod error;
pub mod queries;
mod types;
mod ws;

pub use error::{ErrorEntry, GraphqlError};
pub use queries::Operation;
pub use types::*;
pub use ws::WsTransport;

use async_trait::async_trait;
use futures::stream::BoxStream;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

/// A stream of `data` payloads pushed by the server.
pub type PushStream = BoxStream<'static, Result<Value, GraphqlError>>;

/// Executes one query and resolves to the response's `data` object.
#[async_trait]
pub trait Executor: Send + Sync {
    async fn execute(&self, request: GraphqlRequest) -> Result<Value, GraphqlError>;
}

/// Opens a server-push channel for a subscription operation.
///
/// Dropping the returned stream ends the subscription.
#[async_trait]
pub trait Subscriber: Send + Sync {
    async fn subscribe(&self, request: GraphqlRequest) -> Result<PushStream, GraphqlError>;
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphqlRequest {
    pub query: &'static str,
    pub operation_name: &'static str,
    #[serde(skip_serializing_if = "Value::is_null")]
    pub variables: Value,
}

impl GraphqlRequest {
    pub fn new(operation: Operation, variables: Value) -> Self {
        Self {
            query: operation.document,
            operation_name: operation.name,
            variables,
        }
    }

    pub fn without_variables(operation: Operation) -> Self {
        Self::new(operation, Value::Null)
    }
}

/// The `{data, errors}` envelope shared by HTTP responses and `next` frames.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GraphqlResponse {
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub errors: Option<Vec<ErrorEntry>>,
}

impl GraphqlResponse {
    pub fn into_result(self) -> Result<Value, GraphqlError> {
        if let Some(errors) = self.errors.filter(|e| !e.is_empty()) {
            return Err(ErrorEntry::into_error(errors));
        }
        match self.data {
            Some(data) if !data.is_null() => Ok(data),
            _ => Err(GraphqlError::MissingData),
        }
    }
}

/// Pulls `field` out of a `data` object. Absent and `null` both mean `None`.
pub fn decode_field<T: DeserializeOwned>(mut data: Value, field: &str) -> Result<Option<T>, GraphqlError> {
    match data.get_mut(field).map(Value::take) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => serde_json::from_value(value).map(Some).map_err(Into::into),
    }
}

/// Executes `request` and decodes one top-level field of the result.
pub async fn fetch_field<T: DeserializeOwned>(
    executor: &dyn Executor,
    request: GraphqlRequest,
    field: &str,
) -> Result<Option<T>, GraphqlError> {
    let data = executor.execute(request).await?;
    decode_field(data, field)
}

/// Query executor over HTTP POST.
///
/// No response cache and no retries: every call reaches the server, and a
/// failure is reported to the caller as-is.
pub struct HttpTransport {
    http: reqwest::Client,
    endpoint: reqwest::Url,
}

impl HttpTransport {
    pub fn new(endpoint: &str) -> Result<Self, GraphqlError> {
        let endpoint = reqwest::Url::parse(endpoint)
            .map_err(|e| GraphqlError::Transport(format!("Invalid endpoint URL {endpoint:?}: {e}")))?;
        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(GraphqlError::Transport(format!(
                "Unsupported endpoint scheme: {}",
                endpoint.scheme()
            )));
        }

        Ok(Self {
            http: reqwest::Client::new(),
            endpoint,
        })
    }

    pub fn endpoint(&self) -> &str {
        self.endpoint.as_str()
    }
}

#[async_trait]
impl Executor for HttpTransport {
    async fn execute(&self, request: GraphqlRequest) -> Result<Value, GraphqlError> {
        debug!(operation = request.operation_name, "sending query");

        let response = self
            .http
            .post(self.endpoint.clone())
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        match serde_json::from_str::<GraphqlResponse>(&body) {
            Ok(parsed) => parsed.into_result(),
            Err(e) if status.is_success() => Err(GraphqlError::Decode(e.to_string())),
            Err(_) => Err(GraphqlError::Status {
                status: status.as_u16(),
                body: body.chars().take(200).collect(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use serde_json::json;

    #[test]
    fn test_request_serializes_operation_name() {
        let request = GraphqlRequest::new(queries::GET_BLOCKS, json!({ "limit": 5 }));
        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body["operationName"], "GetBlocks");
        assert_eq!(body["variables"]["limit"], 5);
        assert!(body["query"].as_str().unwrap().contains("blocks(limit"));
    }

    #[test]
    fn test_request_without_variables_omits_field() {
        let request = GraphqlRequest::without_variables(queries::GET_STATS);
        let body = serde_json::to_value(&request).unwrap();
        assert!(body.get("variables").is_none());
    }

    #[test]
    fn test_response_errors_take_precedence() {
        let response: GraphqlResponse = serde_json::from_value(json!({
            "data": { "stats": null },
            "errors": [{ "message": "boom" }]
        }))
        .unwrap();
        assert_eq!(
            response.into_result(),
            Err(GraphqlError::Server(vec!["boom".into()]))
        );
    }

    #[test]
    fn test_response_without_data_is_missing() {
        let response: GraphqlResponse = serde_json::from_value(json!({})).unwrap();
        assert_eq!(response.into_result(), Err(GraphqlError::MissingData));
    }

    #[test]
    fn test_decode_field_null_is_none() {
        let block: Option<Block> = decode_field(json!({ "block": null }), "block").unwrap();
        assert!(block.is_none());
        let block: Option<Block> = decode_field(json!({}), "block").unwrap();
        assert!(block.is_none());
    }

    #[test]
    fn test_decode_field_type_mismatch_is_decode_error() {
        let result: Result<Option<Block>, _> = decode_field(json!({ "block": 5 }), "block");
        assert!(matches!(result, Err(GraphqlError::Decode(_))));
    }

    #[test]
    fn test_transport_rejects_bad_urls() {
        assert!(HttpTransport::new("not a url").is_err());
        assert!(HttpTransport::new("ftp://example.com/graphql").is_err());
        assert!(HttpTransport::new("http://localhost:8000/graphql").is_ok());
    }

    #[tokio::test]
    async fn test_http_transport_returns_data() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/graphql")
            .match_body(Matcher::PartialJson(json!({ "operationName": "GetStats" })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"data":{"stats":{"currentBlockHeight":100,"totalTransactions":5000,"totalAddresses":42}}}"#,
            )
            .create_async()
            .await;

        let transport = HttpTransport::new(&format!("{}/graphql", server.url())).unwrap();
        let stats: Option<Stats> = fetch_field(
            &transport,
            GraphqlRequest::without_variables(queries::GET_STATS),
            "stats",
        )
        .await
        .unwrap();

        mock.assert_async().await;
        assert_eq!(
            stats,
            Some(Stats {
                current_block_height: 100,
                total_transactions: 5000,
                total_addresses: 42,
            })
        );
    }

    #[tokio::test]
    async fn test_http_transport_surfaces_graphql_errors() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/")
            .with_status(400)
            .with_header("content-type", "application/json")
            .with_body(r#"{"errors":[{"message":"Unknown argument \"foo\""}]}"#)
            .create_async()
            .await;

        let transport = HttpTransport::new(&server.url()).unwrap();
        let err = transport
            .execute(GraphqlRequest::without_variables(queries::GET_STATS))
            .await
            .unwrap_err();

        assert_eq!(
            err,
            GraphqlError::Server(vec!["Unknown argument \"foo\"".into()])
        );
    }

    #[tokio::test]
    async fn test_http_transport_non_graphql_failure() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/")
            .with_status(502)
            .with_body("Bad Gateway")
            .create_async()
            .await;

        let transport = HttpTransport::new(&server.url()).unwrap();
        let err = transport
            .execute(GraphqlRequest::without_variables(queries::GET_STATS))
            .await
            .unwrap_err();

        assert_eq!(
            err,
            GraphqlError::Status {
                status: 502,
                body: "Bad Gateway".into(),
            }
        );
    }

    #[tokio::test]
    async fn test_http_transport_malformed_success_body() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/")
            .with_status(200)
            .with_body("<html>")
            .create_async()
            .await;

        let transport = HttpTransport::new(&server.url()).unwrap();
        let err = transport
            .execute(GraphqlRequest::without_variables(queries::GET_STATS))
            .await
            .unwrap_err();

        assert!(matches!(err, GraphqlError::Decode(_)));
    }
}
