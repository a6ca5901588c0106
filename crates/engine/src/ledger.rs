//! The ledger maps every known identity to its ordered sequence of
//! transactions.
//!
//! Insertion order is display order. A sequence exists for an identity as
//! soon as its account is provisioned; appending to an identity without one is
//! a contract violation and reported as [`EngineError::UnknownIdentity`].

use std::collections::HashMap;

use crate::{EngineError, Identity, ResultEngine, Transaction, TransactionDraft, summary::Totals};

/// Storage backend behind the ledger.
pub trait LedgerStore {
    /// Creates an empty sequence for `identity`. Existing sequences are kept.
    fn provision(&mut self, identity: &Identity);

    fn sequence(&self, identity: &Identity) -> Option<&[Transaction]>;

    fn sequence_mut(&mut self, identity: &Identity) -> Option<&mut Vec<Transaction>>;
}

/// Process-lifetime store. Everything is lost on exit.
#[derive(Debug, Default)]
pub struct MemoryStore {
    sequences: HashMap<Identity, Vec<Transaction>>,
}

impl LedgerStore for MemoryStore {
    fn provision(&mut self, identity: &Identity) {
        self.sequences.entry(identity.clone()).or_default();
    }

    fn sequence(&self, identity: &Identity) -> Option<&[Transaction]> {
        self.sequences.get(identity).map(Vec::as_slice)
    }

    fn sequence_mut(&mut self, identity: &Identity) -> Option<&mut Vec<Transaction>> {
        self.sequences.get_mut(identity)
    }
}

#[derive(Debug)]
pub struct Ledger<S = MemoryStore> {
    store: S,
}

impl<S: LedgerStore + Default> Default for Ledger<S> {
    fn default() -> Self {
        Self::with_store(S::default())
    }
}

impl<S: LedgerStore> Ledger<S> {
    pub fn with_store(store: S) -> Self {
        Self { store }
    }

    pub fn provision(&mut self, identity: &Identity) {
        self.store.provision(identity);
    }

    pub fn transactions(&self, identity: &Identity) -> ResultEngine<&[Transaction]> {
        self.store
            .sequence(identity)
            .ok_or_else(|| EngineError::UnknownIdentity(identity.to_string()))
    }

    /// Appends the draft if it is complete, otherwise leaves the sequence
    /// untouched. Returns the sequence and whether something was appended.
    ///
    /// A transaction that would push the income or expense total past `i64`
    /// cents is rejected with [`EngineError::InvalidAmount`] and not stored.
    pub fn append(
        &mut self,
        identity: &Identity,
        draft: TransactionDraft,
    ) -> ResultEngine<(&[Transaction], bool)> {
        let sequence = self
            .store
            .sequence_mut(identity)
            .ok_or_else(|| EngineError::UnknownIdentity(identity.to_string()))?;

        let appended = match draft.complete() {
            Some(tx) => {
                Totals::of(sequence)?.with(&tx)?;
                sequence.push(tx);
                true
            }
            None => false,
        };

        Ok((sequence.as_slice(), appended))
    }

    pub fn delete_row(
        &mut self,
        identity: &Identity,
        index: usize,
    ) -> ResultEngine<(&[Transaction], Option<Transaction>)> {
        let sequence = self
            .store
            .sequence_mut(identity)
            .ok_or_else(|| EngineError::UnknownIdentity(identity.to_string()))?;

        let removed = delete_row(sequence, index);
        Ok((sequence.as_slice(), removed))
    }
}

/// Removes the element at `index`, shifting the rest left. Out of range is a
/// no-op.
pub fn delete_row(sequence: &mut Vec<Transaction>, index: usize) -> Option<Transaction> {
    (index < sequence.len()).then(|| sequence.remove(index))
}
