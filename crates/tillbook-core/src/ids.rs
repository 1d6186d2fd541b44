//! # Identifier/Code Allocator
//!
//! Produces internal ids and human-facing sequential codes for new records.
//!
//! ## Allocation Contract
//! Given a collection's live length `n` at the moment of insertion:
//! - internal id = `<kind-prefix><n+1>` (`c3`, `p4`, `o2`, `e1`)
//! - display code = `<KIND><n+1>` (`C3`, `P4`, `O2`, `E1`)
//!
//! There is no uniqueness check beyond the live length, and codes are never
//! reused after a reset. This is an explicit simplification that relies on
//! the single-writer execution model, not a guarantee.

use crate::types::Document;

// =============================================================================
// Entity Kind
// =============================================================================

/// The four record collections held by the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Client,
    Product,
    Order,
    Expense,
}

impl EntityKind {
    /// Lowercase prefix used for internal ids.
    #[inline]
    pub const fn id_prefix(&self) -> &'static str {
        match self {
            EntityKind::Client => "c",
            EntityKind::Product => "p",
            EntityKind::Order => "o",
            EntityKind::Expense => "e",
        }
    }

    /// Uppercase prefix used for display codes.
    #[inline]
    pub const fn code_prefix(&self) -> &'static str {
        match self {
            EntityKind::Client => "C",
            EntityKind::Product => "P",
            EntityKind::Order => "O",
            EntityKind::Expense => "E",
        }
    }

    /// Current length of this kind's collection in `doc`.
    pub fn collection_len(&self, doc: &Document) -> usize {
        match self {
            EntityKind::Client => doc.clients.len(),
            EntityKind::Product => doc.products.len(),
            EntityKind::Order => doc.orders.len(),
            EntityKind::Expense => doc.expenses.len(),
        }
    }
}

// =============================================================================
// Allocation
// =============================================================================

/// An allocated (internal id, display code) pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Allocation {
    pub id: String,
    pub code: String,
}

/// Allocates the id/code pair for the next record of `kind`.
///
/// ## Example
/// ```rust
/// use tillbook_core::ids::{allocate, EntityKind};
///
/// let a = allocate(EntityKind::Client, 2);
/// assert_eq!(a.id, "c3");
/// assert_eq!(a.code, "C3");
/// ```
pub fn allocate(kind: EntityKind, collection_len: usize) -> Allocation {
    let n = collection_len + 1;
    Allocation {
        id: format!("{}{}", kind.id_prefix(), n),
        code: format!("{}{}", kind.code_prefix(), n),
    }
}

/// Allocates against the live collection in `doc`.
pub fn allocate_in(kind: EntityKind, doc: &Document) -> Allocation {
    allocate(kind, kind.collection_len(doc))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefixes() {
        assert_eq!(EntityKind::Client.id_prefix(), "c");
        assert_eq!(EntityKind::Product.code_prefix(), "P");
        assert_eq!(EntityKind::Order.id_prefix(), "o");
        assert_eq!(EntityKind::Expense.code_prefix(), "E");
    }

    #[test]
    fn test_allocate_uses_length_plus_one() {
        let a = allocate(EntityKind::Expense, 0);
        assert_eq!(a.id, "e1");
        assert_eq!(a.code, "E1");

        let a = allocate(EntityKind::Order, 7);
        assert_eq!(a.id, "o8");
        assert_eq!(a.code, "O8");
    }

    #[test]
    fn test_sequential_creates_never_collide() {
        let first = allocate(EntityKind::Client, 4);
        let second = allocate(EntityKind::Client, 5);
        assert_ne!(first.code, second.code);
        assert_ne!(first.id, second.id);
    }

    #[test]
    fn test_allocate_in_tracks_live_collection() {
        let mut doc = Document::default();
        assert_eq!(allocate_in(EntityKind::Client, &doc).id, "c1");

        doc.clients.push(crate::types::Client {
            id: "c1".to_string(),
            code: "C1".to_string(),
            name: "Acme Corp".to_string(),
        });
        assert_eq!(allocate_in(EntityKind::Client, &doc).id, "c2");
        // Other collections are unaffected
        assert_eq!(allocate_in(EntityKind::Product, &doc).id, "p1");
    }
}
