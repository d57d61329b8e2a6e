use {
    crate::domain::{dish, order, validation},
    axum::{Json, http::StatusCode},
    serde::Serialize,
};

/// The body of every error response. `status` repeats the HTTP status code.
#[derive(Debug, Serialize)]
pub struct Error {
    status: u16,
    message: String,
}

pub type Rejection = (StatusCode, Json<Error>);

pub fn rejection(status: StatusCode, message: impl Into<String>) -> Rejection {
    (
        status,
        Json(Error {
            status: status.as_u16(),
            message: message.into(),
        }),
    )
}

fn internal(err: &dyn std::error::Error) -> Rejection {
    tracing::error!(%err, "storage failure");
    rejection(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
}

impl From<validation::Error> for (StatusCode, Json<Error>) {
    fn from(value: validation::Error) -> Self {
        let status = match value {
            validation::Error::BadRequest(_) => StatusCode::BAD_REQUEST,
            validation::Error::NotFound(_) => StatusCode::NOT_FOUND,
        };
        rejection(status, value.to_string())
    }
}

impl From<dish::Error> for (StatusCode, Json<Error>) {
    fn from(value: dish::Error) -> Self {
        match value {
            dish::Error::Validation(err) => err.into(),
            dish::Error::Storage(err) => internal(&err),
        }
    }
}

impl From<order::Error> for (StatusCode, Json<Error>) {
    fn from(value: order::Error) -> Self {
        match value {
            order::Error::Validation(err) => err.into(),
            order::Error::Storage(err) => internal(&err),
        }
    }
}
