use std::io;

use axum::{http::StatusCode, response::IntoResponse};

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Reqwest(#[from] reqwest::Error),

    #[error(transparent)]
    Decode(#[from] serde_json::Error),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("{0}")]
    FormatError(&'static str),

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl IntoResponse for Error {
    fn into_response(self) -> axum::response::Response {
        match self {
            Error::Reqwest(e) => {
                tracing::error!(%e, "content backend request failed");
                (StatusCode::BAD_GATEWAY, "Bad Gateway")
            }
            .into_response(),
            Error::Decode(e) => {
                tracing::error!(%e, "content backend returned an unexpected shape");
                (StatusCode::BAD_GATEWAY, "Bad Gateway")
            }
            .into_response(),
            Error::FormatError(s) => (StatusCode::BAD_REQUEST, s.to_string()).into_response(),
            Error::Config(e) => {
                tracing::error!(%e, "configuration error");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
            }
            .into_response(),
            Error::Io(e) => {
                tracing::error!(%e, "io error");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
            }
            .into_response(),
        }
    }
}
