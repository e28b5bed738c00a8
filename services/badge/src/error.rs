use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Badge service error variants.
///
/// An unregistered badge is NOT an error; it is an ordinary outcome
/// carried in response values, so there is no variant for it.
#[derive(Debug, thiserror::Error)]
pub enum BadgeServiceError {
    #[error("registration code issuance exhausted")]
    CodeIssuanceExhausted,
    #[error("data access error")]
    DataAccess(#[from] anyhow::Error),
}

impl BadgeServiceError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::CodeIssuanceExhausted => "CODE_ISSUANCE_EXHAUSTED",
            Self::DataAccess(_) => "DATA_ACCESS",
        }
    }
}

impl IntoResponse for BadgeServiceError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::CodeIssuanceExhausted => StatusCode::SERVICE_UNAVAILABLE,
            Self::DataAccess(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        // Log 5xx with the anyhow chain so the root cause is traceable;
        // tower-http TraceLayer already records method/uri/status.
        if let Self::DataAccess(ref e) = self {
            tracing::error!(error = %e, kind = "DATA_ACCESS", "data access error");
        }
        let body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        (status, axum::Json(body)).into_response()
    }
}
