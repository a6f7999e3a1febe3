//! Material requests and their approval state.

use std::collections::HashMap;
use std::sync::RwLock;

use chrono::{DateTime, Utc};
use serde::Serialize;

use matreq_core::{DomainError, MaterialId, RequestId, UserId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    Pending,
    Approved,
}

#[derive(Debug, Clone, Serialize)]
pub struct MaterialRequest {
    pub id: RequestId,
    pub material_id: MaterialId,
    pub quantity: i64,
    pub requested_by: UserId,
    pub status: RequestStatus,
    pub decided_by: Option<UserId>,
    pub created_at: DateTime<Utc>,
}

#[derive(Default)]
pub struct RequestStore {
    inner: RwLock<HashMap<RequestId, MaterialRequest>>,
}

impl RequestStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create(
        &self,
        material_id: MaterialId,
        quantity: i64,
        requested_by: UserId,
        now: DateTime<Utc>,
    ) -> Result<MaterialRequest, DomainError> {
        if quantity <= 0 {
            return Err(DomainError::validation("quantity must be positive"));
        }

        let request = MaterialRequest {
            id: RequestId::new(),
            material_id,
            quantity,
            requested_by,
            status: RequestStatus::Pending,
            decided_by: None,
            created_at: now,
        };
        self.inner
            .write()
            .expect("request store lock poisoned")
            .insert(request.id, request.clone());
        Ok(request)
    }

    pub fn approve(
        &self,
        id: RequestId,
        decided_by: UserId,
    ) -> Result<MaterialRequest, DomainError> {
        let mut inner = self.inner.write().expect("request store lock poisoned");
        let request = inner.get_mut(&id).ok_or(DomainError::NotFound)?;

        if request.status != RequestStatus::Pending {
            return Err(DomainError::conflict("request already decided"));
        }

        request.status = RequestStatus::Approved;
        request.decided_by = Some(decided_by);
        Ok(request.clone())
    }

    pub fn list_all(&self) -> Vec<MaterialRequest> {
        let mut all: Vec<_> = self
            .inner
            .read()
            .expect("request store lock poisoned")
            .values()
            .cloned()
            .collect();
        all.sort_by_key(|r| r.created_at);
        all
    }

    pub fn list_for(&self, user_id: UserId) -> Vec<MaterialRequest> {
        self.list_all()
            .into_iter()
            .filter(|r| r.requested_by == user_id)
            .collect()
    }
}
