//! Wire types shared with the painting store.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One row of a user's painting list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaintingSummary {
    pub id: Uuid,
    pub name: String,
}

/// Response body of a painting create.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedPainting {
    pub id: Uuid,
}

/// Request body of a user create.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateUserBody {
    pub username: String,
}
