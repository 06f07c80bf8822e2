//! Delete-restaurant dialog
//!
//! Binds the confirmation gate to a concrete restaurant and dispatches the
//! delete to the restaurant directory once both confirmations match.

use std::sync::Arc;

use menutree_confirm::{
    ActionError, ConfirmationGate, DestructiveAction, GateConfig, GateHandle, NotificationSink,
};
use menutree_types::{Restaurant, RestaurantId};
use tracing::info;

use crate::directory::RestaurantDirectory;

/// Static text of the dialog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogCopy {
    pub trigger_label: String,
    pub title: String,
    pub description: String,
    pub name_label: String,
    pub phrase_label: String,
    pub cancel_label: String,
    pub submit_label: String,
}

impl DialogCopy {
    fn new(restaurant: &Restaurant, config: &GateConfig) -> Self {
        let kind = &config.entity_kind;
        Self {
            trigger_label: "Delete".to_string(),
            title: format!("Delete {}", title_case(kind)),
            description: format!(
                "This action cannot be undone. This will permanently delete your {kind} from our servers."
            ),
            name_label: format!(
                "Enter the {kind} name {} to continue:",
                restaurant.name
            ),
            phrase_label: format!(
                "To verify, type {} below:",
                config.required_phrase()
            ),
            cancel_label: "Cancel".to_string(),
            submit_label: "Delete".to_string(),
        }
    }
}

fn title_case(words: &str) -> String {
    words
        .split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// The gate's action: delete one restaurant by id
struct DeleteRestaurantAction {
    id: RestaurantId,
    directory: Arc<dyn RestaurantDirectory>,
}

#[async_trait::async_trait]
impl DestructiveAction for DeleteRestaurantAction {
    async fn execute(&self) -> Result<(), ActionError> {
        self.directory
            .delete_restaurant_by_id(&self.id)
            .await
            .map_err(|e| ActionError::failed(e.to_string()))
    }
}

/// Delete confirmation for one restaurant
pub struct DeleteRestaurantDialog {
    restaurant: Restaurant,
    directory: Arc<dyn RestaurantDirectory>,
    notifier: Arc<dyn NotificationSink>,
    config: GateConfig,
    copy: DialogCopy,
}

impl DeleteRestaurantDialog {
    pub fn new(
        restaurant: Restaurant,
        directory: Arc<dyn RestaurantDirectory>,
        notifier: Arc<dyn NotificationSink>,
        config: GateConfig,
    ) -> Self {
        let copy = DialogCopy::new(&restaurant, &config);
        Self {
            restaurant,
            directory,
            notifier,
            config,
            copy,
        }
    }

    pub fn copy(&self) -> &DialogCopy {
        &self.copy
    }

    /// Open a fresh confirmation gate for this restaurant.
    pub fn open(&self) -> GateHandle {
        info!(
            restaurant_id = %self.restaurant.id,
            name = %self.restaurant.name,
            "Opening delete confirmation"
        );
        let action = DeleteRestaurantAction {
            id: self.restaurant.id,
            directory: Arc::clone(&self.directory),
        };
        ConfirmationGate::open(
            self.restaurant.name.clone(),
            Arc::new(action),
            Arc::clone(&self.notifier),
            self.config.clone(),
        )
    }
}
