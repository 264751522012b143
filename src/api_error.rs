//! HTTP error mapping for the JSON API.

use crate::models::TournamentError;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Tournament(#[from] TournamentError),

    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Shared state lock was poisoned.
    #[error("lock error")]
    Lock,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    code: u16,
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        use TournamentError::*;
        match self {
            ApiError::Tournament(e) => match e {
                MatchNotFound(_) | TournamentNotFound(_) | MemberNotFound(_) => {
                    StatusCode::NOT_FOUND
                }
                AlreadyGenerated | DuplicateMember(_) | DuplicateParticipant(_) => {
                    StatusCode::CONFLICT
                }
                InsufficientParticipants { .. } | InvalidScore | EmptyName => {
                    StatusCode::BAD_REQUEST
                }
            },
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Lock => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        HttpResponse::build(status).json(ErrorResponse {
            error: self.to_string(),
            code: status.as_u16(),
        })
    }
}
