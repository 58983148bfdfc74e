//! Prometheus Query Tool
//!
//! Lets the agent run PromQL instant queries and read the results as text.

use super::ToolError;
use reqwest::Client;
use rig::completion::ToolDefinition;
use rig::tool::Tool as RigTool;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

/// Run a single instant query against `{base_url}/api/v1/query` and
/// format the response as text. One attempt, no retry, no timeout.
///
/// Every failure mode comes back as a string: transport errors and non-2xx
/// statuses as `"Error connecting to Prometheus: ..."`, an unsuccessful
/// query status as `"Query failed: ..."`, and a body that cannot be parsed
/// as `"Error processing query: ..."`. An empty result set is the literal
/// `"Query returned no data"`.
pub async fn query_prometheus(client: &Client, query: &str, base_url: &str) -> String {
    let url = format!("{}/api/v1/query", base_url);

    debug!(url = %url, query = %query, "sending instant query");

    let response = match client.get(&url).query(&[("query", query)]).send().await {
        Ok(response) => response,
        Err(e) => return format!("Error connecting to Prometheus: {}", e),
    };

    let response = match response.error_for_status() {
        Ok(response) => response,
        Err(e) => return format!("Error connecting to Prometheus: {}", e),
    };

    let body: Value = match response.json().await {
        Ok(body) => body,
        Err(e) => return format!("Error processing query: {}", e),
    };

    format_instant_response(&body)
}

/// Format an instant-query (vector) response body. Range-query (matrix)
/// responses are not supported.
fn format_instant_response(body: &Value) -> String {
    if body.get("status").and_then(Value::as_str) != Some("success") {
        let reason = body
            .get("error")
            .and_then(Value::as_str)
            .unwrap_or("Unknown error");
        return format!("Query failed: {}", reason);
    }

    let result = match body.pointer("/data/result").and_then(Value::as_array) {
        Some(result) => result,
        None => return "Error processing query: response body missing data.result".to_string(),
    };

    if result.is_empty() {
        return "Query returned no data".to_string();
    }

    let mut output = Vec::with_capacity(result.len());
    for item in result {
        let labels = item
            .get("metric")
            .and_then(Value::as_object)
            .map(|metric| {
                metric
                    .iter()
                    .map(|(k, v)| format!("{}={}", k, label_value(v)))
                    .collect::<Vec<_>>()
                    .join(", ")
            })
            .unwrap_or_default();

        // value is a [timestamp, value] pair; the timestamp is discarded
        let value = item
            .get("value")
            .and_then(Value::as_array)
            .and_then(|pair| pair.get(1))
            .map(label_value)
            .unwrap_or_else(|| "N/A".to_string());

        output.push(format!("[{}] Value: {}", labels, value));
    }

    output.join("\n")
}

fn label_value(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Prometheus tool exposed to the agent as `query_prometheus`.
#[derive(Clone)]
pub struct PrometheusTool {
    default_url: String,
    client: Client,
}

impl PrometheusTool {
    pub fn new(default_url: String) -> Self {
        Self {
            default_url,
            client: Client::new(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct PrometheusArgs {
    /// The PromQL expression to evaluate.
    pub query: String,
    /// Base URL of the Prometheus server, overriding the configured default.
    pub prometheus_url: Option<String>,
}

impl RigTool for PrometheusTool {
    const NAME: &'static str = "query_prometheus";

    type Error = ToolError;
    type Args = PrometheusArgs;
    type Output = String;

    async fn definition(&self, _prompt: String) -> ToolDefinition {
        ToolDefinition {
            name: Self::NAME.to_string(),
            description: "Run a PromQL instant query against Prometheus, e.g. \
                         'rate(apiserver_request_duration_seconds_count[5m])'. \
                         Returns one '[labels] Value: v' line per series."
                .to_string(),
            parameters: serde_json::json!({
                "type": "object",
                "properties": {
                    "query": {
                        "type": "string",
                        "description": "The PromQL query to execute"
                    },
                    "prometheus_url": {
                        "type": "string",
                        "description": "Base URL of the Prometheus server (default: http://localhost:9090)"
                    }
                },
                "required": ["query"]
            }),
        }
    }

    async fn call(&self, args: Self::Args) -> Result<Self::Output, Self::Error> {
        let base_url = args.prometheus_url.as_deref().unwrap_or(&self.default_url);
        Ok(query_prometheus(&self.client, &args.query, base_url).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::Query;
    use axum::response::IntoResponse;
    use axum::routing::get;
    use axum::{Json, Router};
    use std::collections::HashMap;

    /// Serve a fixed response on /api/v1/query from an ephemeral port.
    async fn serve(response: Value) -> String {
        let app = Router::new().route(
            "/api/v1/query",
            get(move || {
                let response = response.clone();
                async move { Json(response) }
            }),
        );
        spawn_server(app).await
    }

    async fn spawn_server(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    #[tokio::test]
    async fn single_series_is_formatted_as_labels_and_value() {
        let base_url = serve(serde_json::json!({
            "status": "success",
            "data": {
                "resultType": "vector",
                "result": [
                    {"metric": {"job": "api"}, "value": [1700000000, "12.5"]}
                ]
            }
        }))
        .await;

        let result = query_prometheus(&Client::new(), "up", &base_url).await;
        assert_eq!(result, "[job=api] Value: 12.5");
    }

    #[tokio::test]
    async fn multiple_series_are_newline_joined_with_sorted_labels() {
        let base_url = serve(serde_json::json!({
            "status": "success",
            "data": {
                "resultType": "vector",
                "result": [
                    {"metric": {"job": "api", "instance": "n1"}, "value": [1700000000, "1"]},
                    {"metric": {"job": "db"}, "value": [1700000000, "0"]}
                ]
            }
        }))
        .await;

        let result = query_prometheus(&Client::new(), "up", &base_url).await;
        assert_eq!(
            result,
            "[instance=n1, job=api] Value: 1\n[job=db] Value: 0"
        );
    }

    #[tokio::test]
    async fn empty_result_returns_no_data_literal() {
        let base_url = serve(serde_json::json!({
            "status": "success",
            "data": {"resultType": "vector", "result": []}
        }))
        .await;

        let result = query_prometheus(&Client::new(), "up", &base_url).await;
        assert_eq!(result, "Query returned no data");
    }

    #[tokio::test]
    async fn error_status_returns_query_failed() {
        let base_url = serve(serde_json::json!({
            "status": "error",
            "error": "bad query"
        }))
        .await;

        let result = query_prometheus(&Client::new(), "up{", &base_url).await;
        assert_eq!(result, "Query failed: bad query");
    }

    #[tokio::test]
    async fn error_status_without_reason_is_unknown() {
        let base_url = serve(serde_json::json!({"status": "error"})).await;

        let result = query_prometheus(&Client::new(), "up", &base_url).await;
        assert_eq!(result, "Query failed: Unknown error");
    }

    #[tokio::test]
    async fn missing_value_pair_renders_as_na() {
        let base_url = serve(serde_json::json!({
            "status": "success",
            "data": {
                "resultType": "vector",
                "result": [{"metric": {"job": "api"}}]
            }
        }))
        .await;

        let result = query_prometheus(&Client::new(), "up", &base_url).await;
        assert_eq!(result, "[job=api] Value: N/A");
    }

    #[tokio::test]
    async fn non_2xx_status_reports_connection_error() {
        let app = Router::new().route(
            "/api/v1/query",
            get(|| async {
                (axum::http::StatusCode::INTERNAL_SERVER_ERROR, "boom").into_response()
            }),
        );
        let base_url = spawn_server(app).await;

        let result = query_prometheus(&Client::new(), "up", &base_url).await;
        assert!(
            result.starts_with("Error connecting to Prometheus: "),
            "got: {}",
            result
        );
    }

    #[tokio::test]
    async fn unreachable_host_reports_connection_error() {
        // Bind then drop a listener so the port is closed
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let base_url = format!("http://{}", addr);
        let result = query_prometheus(&Client::new(), "up", &base_url).await;
        assert!(
            result.starts_with("Error connecting to Prometheus: "),
            "got: {}",
            result
        );
    }

    #[tokio::test]
    async fn non_json_body_reports_processing_error() {
        let app = Router::new().route("/api/v1/query", get(|| async { "not json" }));
        let base_url = spawn_server(app).await;

        let result = query_prometheus(&Client::new(), "up", &base_url).await;
        assert!(
            result.starts_with("Error processing query: "),
            "got: {}",
            result
        );
    }

    #[tokio::test]
    async fn success_body_missing_result_reports_processing_error() {
        let base_url = serve(serde_json::json!({"status": "success"})).await;

        let result = query_prometheus(&Client::new(), "up", &base_url).await;
        assert!(
            result.starts_with("Error processing query: "),
            "got: {}",
            result
        );
    }

    #[tokio::test]
    async fn query_expression_is_sent_as_url_parameter() {
        // Echo the received query expression back as a label value
        let app = Router::new().route(
            "/api/v1/query",
            get(|Query(params): Query<HashMap<String, String>>| async move {
                let expr = params.get("query").cloned().unwrap_or_default();
                Json(serde_json::json!({
                    "status": "success",
                    "data": {
                        "resultType": "vector",
                        "result": [{"metric": {"expr": expr}, "value": [0, "1"]}]
                    }
                }))
            }),
        );
        let base_url = spawn_server(app).await;

        let expr = "rate(http_requests_total{job=\"api\"}[5m])";
        let result = query_prometheus(&Client::new(), expr, &base_url).await;
        assert_eq!(result, format!("[expr={}] Value: 1", expr));
    }

    #[tokio::test]
    async fn tool_call_uses_configured_default_url() {
        let base_url = serve(serde_json::json!({
            "status": "success",
            "data": {"resultType": "vector", "result": []}
        }))
        .await;

        let tool = PrometheusTool::new(base_url);
        let output = tool
            .call(PrometheusArgs {
                query: "up".to_string(),
                prometheus_url: None,
            })
            .await
            .unwrap();
        assert_eq!(output, "Query returned no data");
    }
}
