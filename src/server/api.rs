use crate::agent::{ ChatAgent, ChatError };
use crate::cli::Args;
use crate::models::chat::ChatRequest;
use std::error::Error;
use std::net::SocketAddr;
use std::sync::Arc;
use axum::{
    routing::{ get, post },
    Router,
    extract::State,
    response::IntoResponse,
    http::StatusCode,
    Json,
};
use serde::Serialize;
use tower_http::cors::{ Any, CorsLayer };
use log::{ info, error };

#[derive(Serialize)]
struct StatusResponse {
    status: &'static str,
    service: &'static str,
    version: &'static str,
    message: &'static str,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

#[derive(Clone)]
struct AppState {
    agent: Arc<ChatAgent>,
}

pub async fn start_http_server(
    addr: &str,
    agent: Arc<ChatAgent>,
    args: Args,
) -> Result<(), Box<dyn Error + Send + Sync>> {
    let addr = addr.parse::<SocketAddr>()?;

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/", get(status_handler))
        .route("/api/chat", post(chat_handler))
        .layer(cors)
        .with_state(AppState { agent });

    if args.enable_tls && args.tls_cert_path.is_some() && args.tls_key_path.is_some() {
        let cert_path = args.tls_cert_path.as_ref().unwrap();
        let key_path = args.tls_key_path.as_ref().unwrap();

        let tls_config = axum_server::tls_rustls::RustlsConfig::from_pem_file(
            cert_path,
            key_path
        ).await?;

        info!("Starting HTTPS server on: https://{}", addr);
        axum_server::bind_rustls(addr, tls_config)
            .serve(app.into_make_service())
            .await?;
    } else {
        info!("Starting HTTP server on: http://{}", addr);
        let listener = tokio::net::TcpListener::bind(addr).await
            .map_err(|e| format!("Failed to bind HTTP server to {}: {}. Try a different port.", addr, e))?;
        axum::serve(listener, app.into_make_service()).await?;
    }

    Ok(())
}

async fn status_handler() -> impl IntoResponse {
    Json(StatusResponse {
        status: "online",
        service: "NutriLeaf Malunggay Chatbot API",
        version: env!("CARGO_PKG_VERSION"),
        message: "API is running. Use POST /api/chat to talk to Molly.",
    })
}

async fn chat_handler(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> impl IntoResponse {
    match state.agent.handle_chat(request).await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(ChatError::MissingMessage) =>
            (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: "Message is required".into(),
                    details: None,
                }),
            ).into_response(),
        Err(ChatError::Completion(e)) => {
            error!("Chat completion failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Chat failed".into(),
                    details: Some(e.detail()),
                }),
            ).into_response()
        }
    }
}
