//! In-memory analysis store
//!
//! Completed analyses are kept under a generated identifier so reports can
//! be rendered later without re-running the pipeline. Records are bounded
//! by a capacity cap and a TTL; the sharded map keeps lookups for different
//! identifiers from contending on one lock.

use crate::config::StoreConfig;
use crate::error::{AtsAnalyzerError, Result};
use crate::scoring::engine::AnalysisResult;
use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct AnalysisRecord {
    pub id: String,
    pub created_at: DateTime<Utc>,
    seq: u64,
    pub result: AnalysisResult,
}

pub struct AnalysisStore {
    records: DashMap<String, Arc<AnalysisRecord>>,
    max_records: usize,
    ttl: Duration,
    next_seq: AtomicU64,
}

impl AnalysisStore {
    pub fn new(config: &StoreConfig) -> Self {
        Self {
            records: DashMap::new(),
            max_records: config.max_records.max(1),
            ttl: Duration::minutes(config.ttl_minutes.max(1)),
            next_seq: AtomicU64::new(0),
        }
    }

    /// Inserts a completed analysis and returns the stored record, so
    /// callers can respond without a lookup that may already miss. Evicts
    /// the oldest record first when the store is at capacity. Insertion
    /// order is tracked with a counter so eviction does not depend on
    /// clock resolution.
    pub fn put(&self, result: AnalysisResult) -> Arc<AnalysisRecord> {
        while self.records.len() >= self.max_records {
            let oldest = self
                .records
                .iter()
                .min_by_key(|entry| entry.value().seq)
                .map(|entry| entry.key().clone());
            match oldest {
                Some(key) => {
                    tracing::debug!(id = %key, "evicting oldest analysis record");
                    self.records.remove(&key);
                }
                None => break,
            }
        }

        let id = Uuid::new_v4().to_string();
        let record = Arc::new(AnalysisRecord {
            id: id.clone(),
            created_at: Utc::now(),
            seq: self.next_seq.fetch_add(1, Ordering::Relaxed),
            result,
        });
        self.records.insert(id, Arc::clone(&record));
        record
    }

    /// Fetches a record by identifier. Expired records are removed on
    /// access and reported as not found.
    pub fn get(&self, id: &str) -> Result<Arc<AnalysisRecord>> {
        let record = self
            .records
            .get(id)
            .map(|entry| Arc::clone(entry.value()))
            .ok_or_else(|| AtsAnalyzerError::NotFound(format!("No analysis with id {}", id)))?;

        if Utc::now() - record.created_at > self.ttl {
            self.records.remove(id);
            return Err(AtsAnalyzerError::NotFound(format!(
                "Analysis {} has expired",
                id
            )));
        }
        Ok(record)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
