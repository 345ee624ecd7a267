use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identity supplied by the hosted auth provider. Read-only on this side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub email: String,
}
