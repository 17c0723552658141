//! Typed query tools exposed to the database agent.
//!
//! Each tool is a narrow, independently documented capability: its
//! arguments are validated against a declared schema, an out-of-schema
//! value from the model comes back as a structured error payload the
//! agent can recover from conversationally, and an empty result set is
//! reported as an explicit no-data signal distinct from an error.

use crate::Handler;
use llm::Tool;
use schemars::{JsonSchema, schema_for};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use store::AssetStore;

/// Build the query tool set over the asset store.
pub fn query_tools(store: Arc<AssetStore>) -> Vec<(Tool, Handler)> {
    vec![
        search_tool(Arc::clone(&store)),
        list_tool(Arc::clone(&store)),
        stats_tool(store),
    ]
}

/// Arguments for the asset search tool.
#[derive(Debug, Deserialize, JsonSchema)]
struct SearchArgs {
    /// Text matched case-insensitively against asset names and categories.
    query: String,
}

/// Arguments for the list-all tool.
#[derive(Debug, Deserialize, JsonSchema)]
struct ListArgs {}

/// Arguments for the value statistics tool.
#[derive(Debug, Deserialize, JsonSchema)]
struct StatsArgs {
    /// The statistic to compute over asset values.
    metric: Metric,
}

/// Statistics metrics over asset values.
#[derive(Debug, Clone, Copy, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
enum Metric {
    /// The most valuable asset.
    Max,
    /// The least valuable asset.
    Min,
    /// The average asset value.
    Mean,
}

fn search_tool(store: Arc<AssetStore>) -> (Tool, Handler) {
    let tool = Tool {
        name: "search_assets".into(),
        description: "Search the asset ledger for partial matches in name or category. \
                      Example: search_assets(query=\"macbook\")"
            .into(),
        parameters: schema_for!(SearchArgs),
        strict: false,
    };
    let handler: Handler = Arc::new(move |args| {
        let store = Arc::clone(&store);
        Box::pin(async move { run_search(&store, &args) })
    });
    (tool, handler)
}

fn list_tool(store: Arc<AssetStore>) -> (Tool, Handler) {
    let tool = Tool {
        name: "get_all_assets".into(),
        description: "Fetch all assets stored in the ledger.".into(),
        parameters: schema_for!(ListArgs),
        strict: false,
    };
    let handler: Handler = Arc::new(move |_args| {
        let store = Arc::clone(&store);
        Box::pin(async move { run_list(&store) })
    });
    (tool, handler)
}

fn stats_tool(store: Arc<AssetStore>) -> (Tool, Handler) {
    let tool = Tool {
        name: "get_asset_value_statistics".into(),
        description: "Get statistics over asset values. \
                      metric: \"max\" -> most valuable asset, \
                      \"min\" -> least valuable asset, \
                      \"mean\" -> average asset value."
            .into(),
        parameters: schema_for!(StatsArgs),
        strict: true,
    };
    let handler: Handler = Arc::new(move |args| {
        let store = Arc::clone(&store);
        Box::pin(async move { run_stats(&store, &args) })
    });
    (tool, handler)
}

fn run_search(store: &AssetStore, args: &str) -> String {
    let args: SearchArgs = match serde_json::from_str(args) {
        Ok(args) => args,
        Err(e) => {
            tracing::error!(tool = "search_assets", "invalid arguments: {e}");
            return json!({"error": "invalid arguments, expected a 'query' string"}).to_string();
        }
    };

    tracing::info!(tool = "search_assets", query = %args.query, "agent used the asset search tool");
    match store.search(&args.query) {
        Ok(assets) if assets.is_empty() => {
            tracing::info!(tool = "search_assets", "no assets matched");
            json!({"message": "no assets found"}).to_string()
        }
        Ok(assets) => {
            tracing::info!(tool = "search_assets", hits = assets.len(), "search succeeded");
            json!({"assets": assets}).to_string()
        }
        Err(e) => {
            tracing::error!(tool = "search_assets", "search failed: {e}");
            json!({"error": "storage failure while searching assets"}).to_string()
        }
    }
}

fn run_list(store: &AssetStore) -> String {
    tracing::info!(tool = "get_all_assets", "agent used the list-all tool");
    match store.page(0, 100) {
        Ok(assets) if assets.is_empty() => {
            tracing::info!(tool = "get_all_assets", "ledger is empty");
            json!({"message": "no assets found"}).to_string()
        }
        Ok(assets) => {
            tracing::info!(tool = "get_all_assets", count = assets.len(), "list succeeded");
            json!({"assets": assets}).to_string()
        }
        Err(e) => {
            tracing::error!(tool = "get_all_assets", "list failed: {e}");
            json!({"error": "storage failure while listing assets"}).to_string()
        }
    }
}

fn run_stats(store: &AssetStore, args: &str) -> String {
    // An out-of-enum metric is a model hallucination: answer with a
    // structured error payload so the agent can recover.
    let args: StatsArgs = match serde_json::from_str(args) {
        Ok(args) => args,
        Err(e) => {
            tracing::error!(tool = "get_asset_value_statistics", "invalid metric: {e}");
            return json!({"error": "invalid metric, allowed values are: max, min, mean"})
                .to_string();
        }
    };

    tracing::info!(tool = "get_asset_value_statistics", metric = ?args.metric, "agent requested asset value statistics");
    let result = match args.metric {
        Metric::Max => store.max_value().map(|a| a.map(|a| json!(a))),
        Metric::Min => store.min_value().map(|a| a.map(|a| json!(a))),
        Metric::Mean => store.mean_value().map(|m| m.map(|m| json!(m))),
    };

    match result {
        Ok(Some(value)) => {
            tracing::info!(tool = "get_asset_value_statistics", "statistics retrieved");
            json!({"metric": metric_name(args.metric), "result": value}).to_string()
        }
        Ok(None) => {
            tracing::info!(tool = "get_asset_value_statistics", "no asset records found");
            json!({"error": "no asset records found"}).to_string()
        }
        Err(e) => {
            tracing::error!(tool = "get_asset_value_statistics", "statistics failed: {e}");
            json!({"error": "storage failure while computing asset statistics"}).to_string()
        }
    }
}

fn metric_name(metric: Metric) -> &'static str {
    match metric {
        Metric::Max => "max",
        Metric::Min => "min",
        Metric::Mean => "mean",
    }
}
