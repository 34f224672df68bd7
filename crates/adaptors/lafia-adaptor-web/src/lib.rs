use axum::extract::State as AxumState;
use axum::http::{header, Method, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use lafia_core::{get_env_int, get_env_or, ChatConfig, ReplySource, Resolver, Result};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

mod widget;

pub use widget::WIDGET_HTML;

#[derive(Clone, Debug)]
pub struct WebChatConfig {
    pub host: String,
    pub port: u16,
    pub chat: ChatConfig,
}

impl Default for WebChatConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 4000,
            chat: ChatConfig::default(),
        }
    }
}

impl WebChatConfig {
    /// Read `LAFIA_WEB_HOST`, `LAFIA_WEB_PORT` and the chat settings
    pub fn from_env() -> Self {
        Self {
            host: get_env_or("LAFIA_WEB_HOST", "127.0.0.1"),
            port: get_env_int("LAFIA_WEB_PORT", 4000u16),
            chat: ChatConfig::from_env(),
        }
    }
}

#[derive(Clone)]
pub struct WebChatServer {
    pub config: Arc<WebChatConfig>,
    pub resolver: Arc<Resolver>,
}

#[derive(Deserialize)]
pub struct ChatInput {
    pub text: String,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct ChatOutput {
    pub reply: String,
    pub source: ReplySource,
}

impl WebChatServer {
    pub fn new(config: WebChatConfig, resolver: Arc<Resolver>) -> Self {
        Self {
            config: Arc::new(config),
            resolver,
        }
    }

    pub fn router(&self) -> Router {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::POST])
            .allow_headers([header::CONTENT_TYPE]);

        Router::new()
            .route("/", get(index))
            .route("/health", get(health))
            .route("/api/chat", post(chat))
            .layer(cors)
            .layer(TraceLayer::new_for_http())
            .with_state(self.clone())
    }

    /// Serve until Ctrl-C
    pub async fn serve(&self) -> Result<()> {
        let addr = format!("{}:{}", self.config.host, self.config.port);
        let listener = tokio::net::TcpListener::bind(&addr).await?;
        tracing::info!("Chat widget listening on http://{}", addr);
        axum::serve(listener, self.router())
            .with_graceful_shutdown(async {
                let _ = tokio::signal::ctrl_c().await;
            })
            .await?;
        Ok(())
    }
}

async fn index() -> Html<&'static str> {
    Html(WIDGET_HTML)
}

async fn health() -> &'static str {
    "ok"
}

async fn chat(AxumState(state): AxumState<WebChatServer>, Json(input): Json<ChatInput>) -> Response {
    let text = input.text.trim();
    if text.is_empty() {
        return StatusCode::NO_CONTENT.into_response();
    }

    let reply = match state.resolver.resolve(text).await {
        Ok(reply) => reply,
        Err(e) => {
            tracing::warn!("Chat request dropped: {}", e);
            return StatusCode::NO_CONTENT.into_response();
        }
    };

    let delay = state.config.chat.reply_delay;
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }

    Json(ChatOutput {
        reply: reply.text,
        source: reply.source,
    })
    .into_response()
}
