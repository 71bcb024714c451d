//! Lenient JSON body extractor.
//!
//! `web::Json` answers 400 for an empty body or a missing content type.
//! Here an empty body is the default value, so missing fields surface as
//! validation errors (422), and an unparseable body is a 422 on `body`.

use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures::future::LocalBoxFuture;
use inkwell_core::ValidationErrors;
use serde::de::DeserializeOwned;

use super::error::AppError;

#[derive(Debug)]
pub struct JsonInput<T>(pub T);

impl<T> JsonInput<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> FromRequest for JsonInput<T>
where
    T: DeserializeOwned + Default + 'static,
{
    type Error = AppError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let body = web::Bytes::from_request(req, payload);

        Box::pin(async move {
            let body = body
                .await
                .map_err(|e| AppError::from(ValidationErrors::single("body", e.to_string())))?;

            if body.iter().all(u8::is_ascii_whitespace) {
                return Ok(JsonInput(T::default()));
            }

            serde_json::from_slice(&body).map(JsonInput).map_err(|e| {
                tracing::debug!("Rejected request body: {}", e);
                AppError::from(ValidationErrors::single(
                    "body",
                    format!("malformed JSON: {e}"),
                ))
            })
        })
    }
}
