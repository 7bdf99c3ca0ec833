//! Session gate in front of the dashboard routes
//!
//! Session handling itself lives outside this service; all the API needs is
//! a yes/no answer for the credentials presented with a request.

use std::collections::HashSet;
use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::{IntoResponse, Response},
};

use tracing::warn;

use crate::config::{AppConfig, SessionGateMode};
use crate::error::ApiError;
use crate::state::AppState;

/// Answers whether a request carries an authenticated session
pub trait SessionGate: Send + Sync {
    fn is_authenticated(&self, bearer_token: Option<&str>) -> bool;
}

/// Accepts a fixed set of bearer tokens; an empty set accepts nothing
#[derive(Debug, Clone, Default)]
pub struct BearerTokenGate {
    tokens: HashSet<String>,
}

impl BearerTokenGate {
    pub fn new<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tokens: tokens.into_iter().map(Into::into).collect(),
        }
    }
}

impl SessionGate for BearerTokenGate {
    fn is_authenticated(&self, bearer_token: Option<&str>) -> bool {
        bearer_token.is_some_and(|token| self.tokens.contains(token))
    }
}

/// Lets every request through. Only selected with `SESSION_GATE=open`.
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenGate;

impl SessionGate for OpenGate {
    fn is_authenticated(&self, _bearer_token: Option<&str>) -> bool {
        true
    }
}

/// Build the gate selected by the configuration
pub fn gate_from_config(config: &AppConfig) -> Arc<dyn SessionGate> {
    match config.session_gate {
        SessionGateMode::Open => {
            warn!("session gate is OPEN: dashboard routes accept unauthenticated requests");
            Arc::new(OpenGate)
        }
        SessionGateMode::Tokens => {
            if config.session_tokens.is_empty() {
                warn!("SESSION_TOKENS is empty: every dashboard request will be rejected");
            }
            Arc::new(BearerTokenGate::new(config.session_tokens.iter().cloned()))
        }
    }
}

fn bearer_token(request: &Request) -> Option<&str> {
    request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
}

pub async fn require_session(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let token = bearer_token(&request);
    if !state.sessions.is_authenticated(token) {
        let reason = if token.is_some() {
            "invalid_session"
        } else {
            "missing_bearer_token"
        };
        warn!(uri = %request.uri(), reason, "request rejected by session gate");
        return ApiError::unauthorized(reason).into_response();
    }

    next.run(request).await
}
