//! In-memory store fakes shared by the engine tests.
//!
//! Each fake clones into a handle over the same state, mirroring how the
//! real repositories share one database connection, so tests can inspect
//! the stores after handing clones to the engine.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::dimension::{DimensionKind, DimensionRecord, NaturalKey};
use super::row::RawLedgerRecord;
use super::store::{
    DimensionStore, FactStore, LedgerSource, NewFact, Resolved, StoreError,
};

#[derive(Default)]
struct DimensionState {
    next_id: i64,
    rows: HashMap<NaturalKey, (i64, DimensionRecord)>,
}

/// In-memory dimension store.
#[derive(Clone, Default)]
pub struct MemoryDimensions {
    state: Arc<Mutex<DimensionState>>,
    fail: Arc<AtomicBool>,
}

impl MemoryDimensions {
    /// Makes every subsequent call fail, simulating an unreachable store.
    pub fn set_fail(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    /// Number of stored rows for one dimension.
    pub fn count(&self, kind: DimensionKind) -> usize {
        let state = self.state.lock().unwrap();
        state.rows.keys().filter(|key| key.kind() == kind).count()
    }

    /// The attributes stored for a natural key, if resolved.
    pub fn attributes(&self, key: &NaturalKey) -> Option<DimensionRecord> {
        let state = self.state.lock().unwrap();
        state.rows.get(key).map(|(_, record)| record.clone())
    }

    fn check(&self) -> Result<(), StoreError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(StoreError::new("dimension store offline"));
        }
        Ok(())
    }
}

#[async_trait]
impl DimensionStore for MemoryDimensions {
    async fn find(&self, key: &NaturalKey) -> Result<Option<i64>, StoreError> {
        self.check()?;
        let state = self.state.lock().unwrap();
        Ok(state.rows.get(key).map(|(id, _)| *id))
    }

    async fn insert_or_get(&self, record: &DimensionRecord) -> Result<Resolved, StoreError> {
        self.check()?;
        let mut state = self.state.lock().unwrap();
        let key = record.natural_key();

        if let Some((id, _)) = state.rows.get(&key) {
            return Ok(Resolved {
                id: *id,
                created: false,
            });
        }

        state.next_id += 1;
        let id = state.next_id;
        state.rows.insert(key, (id, record.clone()));
        Ok(Resolved { id, created: true })
    }
}

#[derive(Default)]
struct FactState {
    rows: HashMap<String, NewFact>,
    load_calls: usize,
}

/// In-memory fact store deduplicating on `row_hash`.
#[derive(Clone, Default)]
pub struct MemoryFacts {
    state: Arc<Mutex<FactState>>,
    fail_remaining: Arc<AtomicUsize>,
}

impl MemoryFacts {
    /// Makes the next `count` load calls fail before succeeding again.
    pub fn fail_next_loads(&self, count: usize) {
        self.fail_remaining.store(count, Ordering::SeqCst);
    }

    /// Number of distinct facts loaded.
    pub fn fact_count(&self) -> usize {
        self.state.lock().unwrap().rows.len()
    }

    /// Number of bulk load calls received, including failed ones.
    pub fn load_calls(&self) -> usize {
        self.state.lock().unwrap().load_calls
    }

    /// Every loaded fact.
    pub fn facts(&self) -> Vec<NewFact> {
        self.state.lock().unwrap().rows.values().cloned().collect()
    }
}

#[async_trait]
impl FactStore for MemoryFacts {
    async fn load(&self, facts: &[NewFact]) -> Result<(), StoreError> {
        let mut state = self.state.lock().unwrap();
        state.load_calls += 1;

        let failing = self
            .fail_remaining
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |remaining| {
                remaining.checked_sub(1)
            })
            .is_ok();
        if failing {
            return Err(StoreError::new("fact store offline"));
        }

        for fact in facts {
            // Repeated hashes mean "already loaded", never an error.
            state
                .rows
                .entry(fact.row_hash.clone())
                .or_insert_with(|| fact.clone());
        }
        Ok(())
    }
}

/// In-memory raw ledger source.
#[derive(Clone, Default)]
pub struct MemoryLedger {
    records: Arc<Mutex<Vec<RawLedgerRecord>>>,
    fail: Arc<AtomicBool>,
}

impl MemoryLedger {
    /// Appends a record to the source, preserving insertion order.
    pub fn push(&self, record: RawLedgerRecord) {
        self.records.lock().unwrap().push(record);
    }

    /// Makes every subsequent call fail, simulating an unreachable source.
    pub fn set_fail(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl LedgerSource for MemoryLedger {
    async fn list_rows(&self) -> Result<Vec<RawLedgerRecord>, StoreError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(StoreError::new("raw ledger source offline"));
        }
        Ok(self.records.lock().unwrap().clone())
    }
}
