//! OpenAPI-only schemas.

use serde::Serialize;
use utoipa::ToSchema;

/// Failed envelope as rendered for every error status.
#[derive(Debug, Serialize, ToSchema)]
#[schema(example = json!({"success": false, "error": "Unauthorized access"}))]
pub struct ErrorEnvelope {
    /// Always `false`.
    pub success: bool,
    pub error: String,
}
