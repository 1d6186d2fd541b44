//! # Expense Operations
//!
//! Expense creation. Expenses are add-only: the observed surface exposes
//! no update or delete, so neither exists here.

use std::sync::Arc;

use chrono::Utc;
use tracing::debug;

use tillbook_core::ids::{allocate_in, EntityKind};
use tillbook_core::patch::ExpenseDraft;
use tillbook_core::types::Expense;

use crate::document::DocumentStore;
use crate::error::StoreResult;

/// Operation facade for expenses.
#[derive(Clone)]
pub struct ExpenseOps {
    store: Arc<DocumentStore>,
}

impl ExpenseOps {
    /// Creates a new ExpenseOps over the given store.
    pub(crate) fn new(store: Arc<DocumentStore>) -> Self {
        ExpenseOps { store }
    }

    /// Records a new expense and returns it.
    ///
    /// Defaults: date `now`, category `"General"`, empty description,
    /// zero amount.
    pub fn add(&self, draft: ExpenseDraft) -> StoreResult<Expense> {
        let now = Utc::now();
        debug!(category = ?draft.category, "Adding expense");

        self.store.update(move |doc| {
            let expense = draft.create(allocate_in(EntityKind::Expense, doc), now);
            doc.expenses.push(expense.clone());
            expense
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
