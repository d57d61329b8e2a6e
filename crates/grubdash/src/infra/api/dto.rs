use {
    crate::{
        domain::validation::Payload,
        infra::api::error::{Rejection, rejection},
    },
    axum::{
        body::Bytes,
        extract::{FromRequest, Request},
        http::StatusCode,
    },
    serde::Serialize,
};

/// Envelope of every successful response body.
#[derive(Debug, Serialize)]
pub struct Data<T> {
    pub data: T,
}

impl<T> Data<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// The request body as seen by the validation chains. Bodies over the size
/// limit and malformed JSON are rejected with the usual error body.
#[derive(Debug)]
pub struct Body(pub Payload);

impl<S: Send + Sync> FromRequest<S> for Body {
    type Rejection = Rejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let body = Bytes::from_request(req, state)
            .await
            .map_err(|err| rejection(err.status(), err.body_text()))?;
        payload(&body).map(Self)
    }
}

/// Decodes a request body. An empty body is treated like `{}`.
fn payload(body: &[u8]) -> Result<Payload, Rejection> {
    if body.is_empty() {
        return Ok(Payload::default());
    }
    serde_json::from_slice(body)
        .map(Payload::from_body)
        .map_err(|err| rejection(StatusCode::BAD_REQUEST, err.to_string()))
}
