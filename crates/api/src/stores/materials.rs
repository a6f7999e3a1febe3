//! Material catalog records.

use std::collections::HashMap;
use std::sync::RwLock;

use serde::Serialize;

use matreq_core::{DomainError, MaterialId, UserId};

#[derive(Debug, Clone, Serialize)]
pub struct Material {
    pub id: MaterialId,
    pub name: String,
    pub quantity: i64,
    pub created_by: UserId,
}

#[derive(Default)]
pub struct MaterialStore {
    inner: RwLock<HashMap<MaterialId, Material>>,
}

impl MaterialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create(
        &self,
        name: &str,
        quantity: i64,
        created_by: UserId,
    ) -> Result<Material, DomainError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DomainError::validation("material name cannot be empty"));
        }
        if quantity < 0 {
            return Err(DomainError::validation("quantity cannot be negative"));
        }

        let material = Material {
            id: MaterialId::new(),
            name: name.to_string(),
            quantity,
            created_by,
        };
        self.inner
            .write()
            .expect("material store lock poisoned")
            .insert(material.id, material.clone());
        Ok(material)
    }

    pub fn get(&self, id: MaterialId) -> Option<Material> {
        self.inner
            .read()
            .expect("material store lock poisoned")
            .get(&id)
            .cloned()
    }

    pub fn list(&self) -> Vec<Material> {
        let mut all: Vec<_> = self
            .inner
            .read()
            .expect("material store lock poisoned")
            .values()
            .cloned()
            .collect();
        all.sort_by(|a, b| a.name.cmp(&b.name));
        all
    }
}
