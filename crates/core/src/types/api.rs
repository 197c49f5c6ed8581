//! JSON bodies exchanged between the catalog API and its clients.

use serde::{Deserialize, Serialize};

use super::id::ProductId;

/// Error body: `{"error": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Confirmation body: `{"message": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageBody {
    pub message: String,
}

/// Creation body: `{"message": "...", "id": n}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedBody {
    pub message: String,
    pub id: ProductId,
}

/// A stored upload: `{"filename": "...", "url": "/uploads/..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedFile {
    pub filename: String,
    pub url: String,
}
