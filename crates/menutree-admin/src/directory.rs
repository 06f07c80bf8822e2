//! Restaurant directory: the collaborator the delete mutation is sent to

use async_trait::async_trait;
use menutree_types::{Restaurant, RestaurantId};
use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::error::{AdminError, AdminResult, DirectoryError};

/// Result type for directory operations
pub type DirectoryResult<T> = Result<T, DirectoryError>;

/// Read and delete access to restaurants
#[async_trait]
pub trait RestaurantDirectory: Send + Sync {
    /// Get a restaurant by ID
    async fn get_restaurant(&self, id: &RestaurantId) -> DirectoryResult<Option<Restaurant>>;

    /// List all restaurants, ordered by name
    async fn list_restaurants(&self) -> DirectoryResult<Vec<Restaurant>>;

    /// Delete a restaurant permanently
    async fn delete_restaurant_by_id(&self, id: &RestaurantId) -> DirectoryResult<()>;
}

/// In-memory directory for development and testing
#[derive(Debug, Default, Clone)]
pub struct InMemoryRestaurantDirectory {
    restaurants: Arc<RwLock<HashMap<RestaurantId, Restaurant>>>,
}

impl InMemoryRestaurantDirectory {
    /// Create an empty directory
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a directory holding the given restaurants
    pub fn with_restaurants(restaurants: impl IntoIterator<Item = Restaurant>) -> Self {
        let map = restaurants.into_iter().map(|r| (r.id, r)).collect();
        Self {
            restaurants: Arc::new(RwLock::new(map)),
        }
    }

    /// Seed a directory from a JSON array of restaurants
    pub async fn from_catalog_file(path: &Path) -> AdminResult<Self> {
        let raw = tokio::fs::read_to_string(path).await?;
        let restaurants: Vec<Restaurant> = serde_json::from_str(&raw)?;

        let mut seen = HashSet::with_capacity(restaurants.len());
        if let Some(dup) = restaurants.iter().find(|r| !seen.insert(r.id)) {
            return Err(AdminError::Catalog(format!(
                "restaurant {} is listed more than once",
                dup.id
            )));
        }

        info!(
            path = %path.display(),
            count = restaurants.len(),
            "Loaded restaurant catalog"
        );
        Ok(Self::with_restaurants(restaurants))
    }

    pub async fn len(&self) -> usize {
        self.restaurants.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.restaurants.read().await.is_empty()
    }
}

#[async_trait]
impl RestaurantDirectory for InMemoryRestaurantDirectory {
    async fn get_restaurant(&self, id: &RestaurantId) -> DirectoryResult<Option<Restaurant>> {
        let restaurants = self.restaurants.read().await;
        Ok(restaurants.get(id).cloned())
    }

    async fn list_restaurants(&self) -> DirectoryResult<Vec<Restaurant>> {
        let restaurants = self.restaurants.read().await;
        let mut all: Vec<_> = restaurants.values().cloned().collect();
        all.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(all)
    }

    async fn delete_restaurant_by_id(&self, id: &RestaurantId) -> DirectoryResult<()> {
        let mut restaurants = self.restaurants.write().await;
        match restaurants.remove(id) {
            Some(removed) => {
                debug!(restaurant_id = %id, name = %removed.name, "Restaurant removed");
                Ok(())
            }
            None => Err(DirectoryError::NotFound(*id)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use menutree_types::UserId;

    fn restaurant(name: &str) -> Restaurant {
        Restaurant::new(name, UserId::new("owner-1"))
    }

    #[tokio::test]
    async fn list_is_sorted_by_name() {
        let dir = InMemoryRestaurantDirectory::with_restaurants([
            restaurant("Zuni"),
            restaurant("Joe's Diner"),
        ]);
        let names: Vec<_> = dir
            .list_restaurants()
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.name)
            .collect();
        assert_eq!(names, vec!["Joe's Diner", "Zuni"]);
    }

    #[tokio::test]
    async fn delete_removes_restaurant() {
        let joes = restaurant("Joe's Diner");
        let id = joes.id;
        let dir = InMemoryRestaurantDirectory::with_restaurants([joes]);

        dir.delete_restaurant_by_id(&id).await.unwrap();
        assert!(dir.get_restaurant(&id).await.unwrap().is_none());
        assert!(dir.is_empty().await);
    }

    #[tokio::test]
    async fn delete_missing_restaurant_is_not_found() {
        let dir = InMemoryRestaurantDirectory::new();
        let id = RestaurantId::generate();
        let err = dir.delete_restaurant_by_id(&id).await.unwrap_err();
        assert!(matches!(err, DirectoryError::NotFound(missing) if missing == id));
    }

    #[tokio::test]
    async fn loads_catalog_file() {
        let joes = restaurant("Joe's Diner").with_description("Burgers and shakes");
        let file = tempfile::NamedTempFile::new().unwrap();
        let json = serde_json::to_string(&vec![joes.clone()]).unwrap();
        std::fs::write(file.path(), json).unwrap();

        let dir = InMemoryRestaurantDirectory::from_catalog_file(file.path())
            .await
            .unwrap();
        assert_eq!(dir.len().await, 1);
        assert_eq!(dir.get_restaurant(&joes.id).await.unwrap(), Some(joes));
    }

    #[tokio::test]
    async fn catalog_with_repeated_id_is_rejected() {
        let joes = restaurant("Joe's Diner");
        let file = tempfile::NamedTempFile::new().unwrap();
        let json = serde_json::to_string(&vec![joes.clone(), joes.clone()]).unwrap();
        std::fs::write(file.path(), json).unwrap();

        let err = InMemoryRestaurantDirectory::from_catalog_file(file.path())
            .await
            .unwrap_err();
        assert!(matches!(err, AdminError::Catalog(_)));
        assert!(err.to_string().contains(&joes.id.to_string()));
    }
}
