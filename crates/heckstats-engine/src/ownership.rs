use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use heckstats_core::hit::ObjectId;
use heckstats_core::player::PlayerId;

/// Who launched each live projectile.
#[derive(Default)]
pub struct OwnershipRegistry {
    owners: Mutex<HashMap<ObjectId, PlayerId>>,
}

impl OwnershipRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn owners(&self) -> MutexGuard<'_, HashMap<ObjectId, PlayerId>> {
        self.owners
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Record a spawn. A reused object id takes the newest owner.
    pub fn register(&self, object_id: ObjectId, owner: PlayerId) {
        if let Some(previous) = self.owners().insert(object_id, owner)
            && previous != owner
        {
            tracing::debug!(object_id, previous, owner, "Projectile id reused");
        }
    }

    /// Record a despawn.
    pub fn unregister(&self, object_id: ObjectId) -> Option<PlayerId> {
        self.owners().remove(&object_id)
    }

    pub fn owner_of(&self, object_id: ObjectId) -> Option<PlayerId> {
        self.owners().get(&object_id).copied()
    }

    /// Forget every projectile launched by `owner`. Returns how many.
    pub fn remove_owner(&self, owner: PlayerId) -> usize {
        let mut owners = self.owners();
        let before = owners.len();
        owners.retain(|_, o| *o != owner);
        before - owners.len()
    }

    pub fn len(&self) -> usize {
        self.owners().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
