//! Blog API client.
//!
//! Endpoints: `GET /posts`, `GET /posts/{id}`, `POST /posts`,
//! `PUT /posts/{id}`, `DELETE /posts/{id}` and the credential exchange at
//! the configured login path. Responses wrap entities in `posts` / `post`.
//!
//! Status contract: 2xx is success, 401 is `ApiErrorKind::Unauthorized`,
//! anything else is `ApiErrorKind::HttpStatus`.

mod client;
mod error;

pub use client::{ApiClient, DeleteOutcome, USER_AGENT};
pub use error::{ApiError, ApiErrorKind};
