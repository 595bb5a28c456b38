//! Entity registry: the read-only table of queryable entities.
//!
//! Built once at startup and handed to the engine; there is no
//! process-global registry.

use crate::backend::SearchIndex;
use std::collections::HashMap;
use std::sync::Arc;

/// One queryable entity: its permission subject and its index.
#[derive(Clone)]
pub struct EntityHandle {
    pub(crate) subject: String,
    pub(crate) index: Arc<dyn SearchIndex>,
}

impl EntityHandle {
    pub fn new(subject: impl Into<String>, index: Arc<dyn SearchIndex>) -> Self {
        Self {
            subject: subject.into(),
            index,
        }
    }
}

/// Read-only table mapping entity names to their handles.
#[derive(Clone, Default)]
pub struct Registry {
    entities: HashMap<String, EntityHandle>,
}

impl Registry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder {
            entities: HashMap::new(),
        }
    }

    /// Reference wiring: the `users`, `roles` and `permissions`
    /// entities with their singular permission subjects.
    pub fn directory(
        users: Arc<dyn SearchIndex>,
        roles: Arc<dyn SearchIndex>,
        permissions: Arc<dyn SearchIndex>,
    ) -> Self {
        Self::builder()
            .entity("users", "user", users)
            .entity("roles", "role", roles)
            .entity("permissions", "permission", permissions)
            .build()
    }

    pub(crate) fn get(&self, name: &str) -> Option<&EntityHandle> {
        self.entities.get(name)
    }

    pub fn entity_names(&self) -> impl Iterator<Item = &str> {
        self.entities.keys().map(String::as_str)
    }
}

pub struct RegistryBuilder {
    entities: HashMap<String, EntityHandle>,
}

impl RegistryBuilder {
    pub fn entity(
        mut self,
        name: impl Into<String>,
        subject: impl Into<String>,
        index: Arc<dyn SearchIndex>,
    ) -> Self {
        self.entities
            .insert(name.into(), EntityHandle::new(subject, index));
        self
    }

    pub fn build(self) -> Registry {
        Registry {
            entities: self.entities,
        }
    }
}
