//! # Client Operations
//!
//! Create-or-update for the client collection.

use std::sync::Arc;

use tracing::debug;

use tillbook_core::ids::{allocate_in, EntityKind};
use tillbook_core::patch::ClientPatch;
use tillbook_core::types::Client;

use crate::document::DocumentStore;
use crate::error::StoreResult;

/// Operation facade for clients.
#[derive(Clone)]
pub struct ClientOps {
    store: Arc<DocumentStore>,
}

impl ClientOps {
    /// Creates a new ClientOps over the given store.
    pub(crate) fn new(store: Arc<DocumentStore>) -> Self {
        ClientOps { store }
    }

    /// Creates or patches a client.
    ///
    /// ## Behavior
    /// - No id on the patch: allocates the next id/code, fills defaults,
    ///   inserts, returns the created client.
    /// - Id present and found: shallow-merges the patch over the stored
    ///   client and returns the updated record.
    /// - Id present but unknown: silent no-op, returns `Ok(None)`.
    pub fn upsert(&self, patch: ClientPatch) -> StoreResult<Option<Client>> {
        debug!(id = ?patch.id, "Upserting client");

        self.store.update(|doc| match &patch.id {
            None => {
                let created = patch.create(allocate_in(EntityKind::Client, doc));
                doc.clients.push(created.clone());
                Some(created)
            }
            Some(id) => doc.clients.iter().position(|c| &c.id == id).map(|idx| {
                let updated = patch.apply(&doc.clients[idx]);
                doc.clients[idx] = updated.clone();
                updated
            }),
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tillbook_core::types::Document;

    use crate::storage::{shared, MemoryStorage};

    fn ops() -> ClientOps {
        let store = DocumentStore::open(shared(MemoryStorage::new()), Document::default()).unwrap();
        ClientOps::new(Arc::new(store))
    }

    #[test]
    fn test_create_assigns_sequential_codes() {
        let clients = ops();

        let first = clients
            .upsert(ClientPatch {
                name: Some("Acme Corp".to_string()),
                ..Default::default()
            })
            .unwrap()
            .unwrap();
        let second = clients.upsert(ClientPatch::default()).unwrap().unwrap();

        assert_eq!(first.id, "c1");
        assert_eq!(first.code, "C1");
        assert_eq!(second.id, "c2");
        assert_eq!(second.code, "C2");
        assert_eq!(second.name, "New Client");
        assert_ne!(first.code, second.code);
    }

    #[test]
    fn test_update_merges_patch_over_existing() {
        let clients = ops();
        let created = clients
            .upsert(ClientPatch {
                name: Some("Acme Corp".to_string()),
                ..Default::default()
            })
            .unwrap()
            .unwrap();

        let updated = clients
            .upsert(ClientPatch {
                id: Some(created.id.clone()),
                name: Some("Acme Corporation".to_string()),
            })
            .unwrap()
            .unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.code, created.code);
        assert_eq!(updated.name, "Acme Corporation");

        // Fields absent from the patch are preserved
        let untouched = clients
            .upsert(ClientPatch {
                id: Some(created.id.clone()),
                name: None,
            })
            .unwrap()
            .unwrap();
        assert_eq!(untouched.name, "Acme Corporation");
    }

    #[test]
    fn test_unknown_id_is_a_silent_no_op() {
        let clients = ops();
        let result = clients
            .upsert(ClientPatch {
                id: Some("ghost".to_string()),
                name: Some("Nobody".to_string()),
            })
            .unwrap();
        assert!(result.is_none());
    }
}
