//! The ordered in-memory resource collection.
//!
//! [`ResourceStore`] exclusively owns the canonical list. Records keep
//! insertion order; deletions close the gap without renumbering what
//! came before. The store knows nothing about caching -- invalidation
//! after a mutation is the calling handler's responsibility.

use serde_json::{Map, Value};

use crate::error::StoreError;
use crate::resource::Resource;

/// Ordered collection of resources with unique `id` values.
#[derive(Debug, Clone, Default)]
pub struct ResourceStore {
    resources: Vec<Resource>,
}

impl ResourceStore {
    /// Create an empty store.
    pub const fn new() -> Self {
        Self {
            resources: Vec::new(),
        }
    }

    /// Append a resource, rejecting duplicate ids.
    ///
    /// Duplicate detection compares full `id` values, so `"7"` and `7`
    /// are distinct at create time.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::DuplicateId`] when any stored resource has
    /// an equal `id` value.
    pub fn create(&mut self, resource: Resource) -> Result<Resource, StoreError> {
        if self.resources.iter().any(|r| r.id() == resource.id()) {
            return Err(StoreError::DuplicateId {
                id: resource.id().clone(),
            });
        }
        self.resources.push(resource.clone());
        Ok(resource)
    }

    /// All resources in insertion order.
    pub fn list_all(&self) -> &[Resource] {
        &self.resources
    }

    /// Shallow-merge partial fields into the resource with the given id.
    ///
    /// Returns the merged record.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] when no resource matches.
    pub fn update_by_id(
        &mut self,
        id: &str,
        partial: Map<String, Value>,
    ) -> Result<Resource, StoreError> {
        let found = self
            .resources
            .iter_mut()
            .find(|r| r.matches_id(id))
            .ok_or_else(|| StoreError::NotFound { id: id.to_owned() })?;
        found.merge(partial);
        Ok(found.clone())
    }

    /// Remove the resource with the given id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] when no resource matches.
    pub fn delete_by_id(&mut self, id: &str) -> Result<(), StoreError> {
        let position = self
            .resources
            .iter()
            .position(|r| r.matches_id(id))
            .ok_or_else(|| StoreError::NotFound { id: id.to_owned() })?;
        self.resources.remove(position);
        Ok(())
    }

    /// Number of stored resources.
    pub fn len(&self) -> usize {
        self.resources.len()
    }

    /// Whether the store holds no resources.
    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}
