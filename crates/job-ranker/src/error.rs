use crate::config::ConfigError;
use crate::telemetry::TelemetryError;
use crate::workflows::ranking::{AcquisitionError, PipelineError, RulesError};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Serialization(serde_json::Error),
    Rules(RulesError),
    Workflow(PipelineError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Serialization(err) => write!(f, "serialization error: {}", err),
            AppError::Rules(err) => write!(f, "rubric error: {}", err),
            AppError::Workflow(err) => write!(f, "{}: {}", err.kind(), err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Serialization(err) => Some(err),
            AppError::Rules(err) => Some(err),
            AppError::Workflow(err) => Some(err),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Workflow(PipelineError::Acquisition(AcquisitionError::Source(_))) => {
                StatusCode::BAD_GATEWAY
            }
            AppError::Workflow(PipelineError::Acquisition(_)) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Rules(_) => StatusCode::BAD_REQUEST,
            AppError::Workflow(PipelineError::StageFailure { .. })
            | AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::Io(_)
            | AppError::Serialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = match &self {
            AppError::Workflow(err) => json!({
                "kind": err.kind(),
                "stage": err.stage(),
                "error": self.to_string(),
            }),
            _ => json!({ "error": self.to_string() }),
        };
        (status, Json(body)).into_response()
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialization(value)
    }
}

impl From<RulesError> for AppError {
    fn from(value: RulesError) -> Self {
        Self::Rules(value)
    }
}

impl From<PipelineError> for AppError {
    fn from(value: PipelineError) -> Self {
        Self::Workflow(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_acquisition_maps_to_unprocessable() {
        let err = AppError::from(PipelineError::from(AcquisitionError::Empty));
        assert!(err.to_string().starts_with("AcquisitionFailure"));
        assert_eq!(
            err.into_response().status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }

    #[test]
    fn stage_failure_maps_to_internal_error() {
        let err = AppError::from(PipelineError::StageFailure {
            stage: crate::workflows::ranking::Stage::Scoring,
            detail: "bad score".to_string(),
        });
        assert_eq!(
            err.to_string(),
            "StageFailure: scoring stage failed: bad score"
        );
        assert_eq!(
            err.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
