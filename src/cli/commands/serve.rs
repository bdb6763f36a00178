//! Single-page web UI and its HTTP API.
//!
//! One form, one submit, one endpoint: `POST /api/ask` runs the same
//! orchestration as the CLI loop and returns the serialized answer, which
//! the page renders as tool-call JSON, raw search results, the interaction
//! log, and the numbered answer list.

use crate::assistant::Assistant;
use crate::cli::{preflight, Output};
use crate::config::Settings;
use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

/// Shared application state.
struct AppState {
    assistant: Assistant,
}

/// Run the web server.
pub async fn run_serve(
    host: Option<String>,
    port: Option<u16>,
    settings: Settings,
) -> anyhow::Result<()> {
    let api_key = preflight::require_api_key()?;

    let host = host.unwrap_or_else(|| settings.server.host.clone());
    let port = port.unwrap_or(settings.server.port);

    let state = Arc::new(AppState {
        assistant: Assistant::new(&settings, &api_key),
    });

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/api/ask", post(ask))
        .layer(cors)
        .with_state(state);

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    Output::header("Svar Web UI");
    println!();
    Output::success(&format!("Listening on http://{}", addr));
    println!();
    println!("Endpoints:");
    Output::kv("Web UI", "GET  /");
    Output::kv("Health", "GET  /health");
    Output::kv("Ask", "POST /api/ask");
    println!();
    Output::info("Press Ctrl+C to stop the server.");

    axum::serve(listener, app).await?;

    Ok(())
}

// === Request/Response Types ===

#[derive(Deserialize)]
struct AskRequest {
    question: String,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

// === Handlers ===

async fn index() -> impl IntoResponse {
    Html(INDEX_HTML)
}

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn ask(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AskRequest>,
) -> impl IntoResponse {
    if req.question.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "Please enter a question.".to_string(),
            }),
        )
            .into_response();
    }

    info!("Web question: {}", req.question.trim());

    match state.assistant.answer(&req.question).await {
        Ok(answer) => Json(answer).into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: e.to_string(),
            }),
        )
            .into_response(),
    }
}

/// The embedded single-page UI.
const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Svar</title>
<style>
  body { font-family: system-ui, sans-serif; max-width: 760px; margin: 2rem auto; padding: 0 1rem; color: #222; }
  h1 { font-size: 1.5rem; }
  form { display: flex; gap: 0.5rem; margin: 1rem 0; }
  input[type=text] { flex: 1; padding: 0.5rem; font-size: 1rem; }
  button { padding: 0.5rem 1.25rem; font-size: 1rem; cursor: pointer; }
  h2 { font-size: 1.1rem; margin-top: 1.5rem; }
  pre { background: #f5f5f5; padding: 0.75rem; overflow-x: auto; border-radius: 4px; }
  ol li { margin-bottom: 0.5rem; }
  .error { color: #b00020; }
  .muted { color: #666; }
</style>
</head>
<body>
<h1>Svar &mdash; web search assistant</h1>
<p class="muted">Ask me anything. Factual questions are answered with live web search.</p>
<form id="ask-form">
  <input type="text" id="question" placeholder="Enter your question" autocomplete="off">
  <button type="submit">Ask</button>
</form>
<div id="output"></div>
<script>
const form = document.getElementById('ask-form');
const output = document.getElementById('output');

form.addEventListener('submit', async (e) => {
  e.preventDefault();
  const question = document.getElementById('question').value;
  output.innerHTML = '<p class="muted">Thinking...</p>';

  let data;
  try {
    const res = await fetch('/api/ask', {
      method: 'POST',
      headers: { 'Content-Type': 'application/json' },
      body: JSON.stringify({ question }),
    });
    data = await res.json();
    if (!res.ok) {
      output.innerHTML = '<p class="error">' + esc(data.error) + '</p>';
      return;
    }
  } catch (err) {
    output.innerHTML = '<p class="error">Request failed: ' + esc(String(err)) + '</p>';
    return;
  }

  render(data);
});

function render(data) {
  let html = '';
  if (data.type === 'tool_call') {
    html += section('Tool call detected', data.tool_call);
    html += section('Search result', data.search_result);
    html += section('Full interaction log', data.conversation_log);
    const answers = data.search_result.answers || [];
    if (answers.length === 1 && answers[0].indexOf('No relevant') !== -1) {
      html += '<h2>Assistant</h2><p>' + esc(answers[0]) + '</p>';
    } else {
      html += '<h2>Assistant</h2><p>Here are the top results:</p><ol>';
      for (const ans of answers) html += '<li>' + esc(ans) + '</li>';
      html += '</ol>';
    }
  } else if (data.type === 'no_tool_call') {
    html += '<h2>Model output (no tool call)</h2><p>' + esc(data.response) + '</p>';
  } else {
    html += '<h2>Model output</h2><p>' + esc(data.response) + '</p>';
  }
  output.innerHTML = html;
}

function section(title, obj) {
  return '<h2>' + title + '</h2><pre>' + esc(JSON.stringify(obj, null, 2)) + '</pre>';
}

function esc(s) {
  return String(s).replace(/[&<>"]/g, (c) => ({ '&': '&amp;', '<': '&lt;', '>': '&gt;', '"': '&quot;' }[c]));
}
</script>
</body>
</html>
"#;
