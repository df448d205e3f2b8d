//! Shared response envelope.
//!
//! Every API response body is `{ "data": ... }`; handlers wrap payloads in
//! [`DataResponse`] rather than building the envelope with `json!`.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}
