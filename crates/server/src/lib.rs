//! Campus FAQ Server
//!
//! Serves the chat widget endpoint plus health, readiness and metrics.

pub mod http;
pub mod metrics;
pub mod state;

pub use http::create_router;
pub use metrics::{
    init_metrics, record_empty_request, record_fallback, record_latency, record_reply,
    record_request,
};
pub use state::AppState;

use std::net::SocketAddr;

use campus_faq_config::ServerConfig;
use thiserror::Error;

/// Server errors
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Invalid listen address: {0}")]
    InvalidAddress(String),

    #[error("Metrics are disabled")]
    MetricsDisabled,
}

impl From<ServerError> for axum::http::StatusCode {
    fn from(err: ServerError) -> Self {
        match err {
            ServerError::InvalidAddress(_) => axum::http::StatusCode::INTERNAL_SERVER_ERROR,
            ServerError::MetricsDisabled => axum::http::StatusCode::NOT_FOUND,
        }
    }
}

/// Socket address the server listens on
pub fn bind_address(config: &ServerConfig) -> Result<SocketAddr, ServerError> {
    format!("{}:{}", config.host, config.port)
        .parse()
        .map_err(|e| ServerError::InvalidAddress(format!("{}:{} ({})", config.host, config.port, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bind_address() {
        let config = ServerConfig::default();
        let addr = bind_address(&config).unwrap();
        assert_eq!(addr.port(), 5000);

        let bad = ServerConfig {
            host: "not a host".to_string(),
            ..ServerConfig::default()
        };
        assert!(matches!(bind_address(&bad), Err(ServerError::InvalidAddress(_))));
    }

    #[test]
    fn test_status_codes() {
        let code: axum::http::StatusCode = ServerError::MetricsDisabled.into();
        assert_eq!(code, axum::http::StatusCode::NOT_FOUND);
        let code: axum::http::StatusCode = ServerError::InvalidAddress("x".into()).into();
        assert_eq!(code, axum::http::StatusCode::INTERNAL_SERVER_ERROR);
    }
}
