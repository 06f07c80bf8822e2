use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{RestaurantId, UserId};

/// A restaurant managed through the admin dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Restaurant {
    pub id: RestaurantId,
    /// Display name; this is what the delete confirmation asks the owner to retype
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub owner_id: UserId,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl Restaurant {
    pub fn new(name: impl Into<String>, owner_id: UserId) -> Self {
        Self {
            id: RestaurantId::generate(),
            name: name.into(),
            description: None,
            owner_id,
            created_at: Utc::now(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}
