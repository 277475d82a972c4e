//! Deployment information page.

use axum::extract::{OriginalUri, State};

use crate::config::KubernetesConfig;
use crate::state::AppState;

/// Echo the requested URL followed by the deployment labels as plain text.
pub async fn index(State(state): State<AppState>, OriginalUri(uri): OriginalUri) -> String {
    let requested = uri
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or_else(|| uri.path());

    render(requested, &state.config.kubernetes)
}

/// Field names are padded so the values line up; scrapers depend on the exact layout.
pub fn render(requested: &str, labels: &KubernetesConfig) -> String {
    format!(
        "Requested URL: {}\nKubernetes:\n  Namespace: {}\n  Node:      {}\n  Pod:       {}\n",
        requested, labels.namespace, labels.node, labels.pod
    )
}
