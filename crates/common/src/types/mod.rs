use serde::{Deserialize, Serialize};

#[derive(Serialize, Debug)]
pub struct Health {
    pub status: &'static str,
}

/// JSON acknowledgement returned by mutating endpoints on success:
/// `{"success": true, "message": "..."}`. Failures never use this shape;
/// they carry a 4xx/5xx status and an `{"error", "detail"}` body built by
/// the server's error type.
#[derive(Serialize, Deserialize, Debug)]
pub struct ApiMessage {
    pub success: bool,
    pub message: String,
}

impl ApiMessage {
    pub fn ok(message: impl Into<String>) -> Self {
        Self { success: true, message: message.into() }
    }
}
