//! Batch orchestration for the dimensional ETL run.

use std::time::Instant;

use serde::Serialize;
use tracing::{debug, info, warn};

use finstar_shared::types::{AccountId, ClientId, PeriodId, ProjectId, ResourceId};

use super::defaults::DefaultPolicy;
use super::dimension::{DimensionRecord, NewAccount, NewClient, NewProject, NewResource};
use super::error::EtlError;
use super::hash::fact_hash;
use super::period::PeriodAttributes;
use super::row::SourceRow;
use super::stats::ProcessingStats;
use super::store::{DimensionStore, FactStore, LedgerSource, NewFact};

/// Default number of rows per bulk fact load.
pub const DEFAULT_BATCH_SIZE: usize = 100;

/// One engine invocation.
#[derive(Debug, Clone, Default)]
pub struct EtlRequest {
    /// Already-shaped rows; when empty, the raw ledger source is consulted.
    pub rows: Vec<SourceRow>,
    /// Label stored on each fact row naming the originating report.
    pub source_label: String,
    /// Report classification, used for run diagnostics only.
    pub report_label: String,
}

impl EtlRequest {
    /// A request that pulls every row from the raw ledger source.
    #[must_use]
    pub fn from_ledger(source_label: impl Into<String>, report_label: impl Into<String>) -> Self {
        Self {
            rows: Vec::new(),
            source_label: source_label.into(),
            report_label: report_label.into(),
        }
    }

    /// A request over inline, already-shaped rows.
    #[must_use]
    pub fn with_rows(
        rows: Vec<SourceRow>,
        source_label: impl Into<String>,
        report_label: impl Into<String>,
    ) -> Self {
        Self {
            rows,
            source_label: source_label.into(),
            report_label: report_label.into(),
        }
    }
}

/// Response envelope of an engine invocation.
#[derive(Debug, Clone, Serialize)]
pub struct EtlOutcome {
    /// False only when the run could not start at all.
    pub success: bool,
    /// Run statistics; absent when the run aborted before any batch.
    pub stats: Option<ProcessingStats>,
    /// Fatal error message when `success` is false.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Resolved surrogate ids for all five dimensions of one row.
#[derive(Debug, Clone, Copy)]
struct DimensionIds {
    project: ProjectId,
    client: ClientId,
    account: AccountId,
    period: PeriodId,
    resource: ResourceId,
}

/// The batch orchestrator.
///
/// Drives one run: accept inline rows or pull the raw ledger, partition
/// into fixed-size batches, run the per-row pipeline (validate, derive,
/// resolve, hash), and perform one idempotent bulk load per batch. Rows
/// and batches fail independently; only a failure to obtain source rows
/// aborts the run. Batches run strictly sequentially, as do rows within a
/// batch: there is no internal parallelism and no cancellation.
pub struct EtlEngine<D, F, L> {
    dimensions: D,
    facts: F,
    ledger: L,
    policy: DefaultPolicy,
    batch_size: usize,
}

impl<D, F, L> EtlEngine<D, F, L>
where
    D: DimensionStore,
    F: FactStore,
    L: LedgerSource,
{
    /// Creates an engine with the default batch size and policy table.
    pub fn new(dimensions: D, facts: F, ledger: L) -> Self {
        Self {
            dimensions,
            facts,
            ledger,
            policy: DefaultPolicy::default(),
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }

    /// Overrides the batch size. Values below 1 are clamped to 1.
    #[must_use]
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    /// Runs one invocation and wraps the result in the response envelope.
    ///
    /// Row- and batch-level failures are recovered locally and reported
    /// through the stats; they never produce `success: false`.
    pub async fn run(&self, request: EtlRequest) -> EtlOutcome {
        info!(
            source = %request.source_label,
            report = %request.report_label,
            "starting dimensional ETL run"
        );

        match self.execute(request).await {
            Ok(stats) => {
                info!(
                    seen = stats.rows_seen,
                    processed = stats.rows_processed,
                    failed = stats.rows_failed,
                    dimensions_created = stats.dimensions_created.total(),
                    elapsed_ms = stats.elapsed_ms,
                    "ETL run complete"
                );
                EtlOutcome {
                    success: true,
                    stats: Some(stats),
                    error: None,
                }
            }
            Err(error) => {
                warn!(%error, "ETL run aborted");
                EtlOutcome {
                    success: false,
                    stats: None,
                    error: Some(error.to_string()),
                }
            }
        }
    }

    /// Runs one invocation, returning stats or the fatal error.
    async fn execute(&self, request: EtlRequest) -> Result<ProcessingStats, EtlError> {
        let started = Instant::now();
        let rows = self.source_rows(request.rows).await?;

        let mut stats = ProcessingStats {
            rows_seen: rows.len(),
            ..ProcessingStats::default()
        };

        let total_batches = rows.len().div_ceil(self.batch_size);
        for (index, batch) in rows.chunks(self.batch_size).enumerate() {
            debug!(
                batch = index + 1,
                total = total_batches,
                rows = batch.len(),
                "processing batch"
            );
            self.process_batch(index, batch, &request.source_label, &mut stats)
                .await;
        }

        stats.elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
        debug_assert!(stats.is_conserved(), "row accounting must balance");
        Ok(stats)
    }

    /// Returns inline rows unchanged, or pulls and normalizes the raw ledger.
    async fn source_rows(&self, inline: Vec<SourceRow>) -> Result<Vec<SourceRow>, EtlError> {
        if !inline.is_empty() {
            return Ok(inline);
        }

        debug!("no inline rows supplied, reading raw ledger source");
        let records = self
            .ledger
            .list_rows()
            .await
            .map_err(|source| EtlError::SourceUnavailable { source })?;

        if records.is_empty() {
            return Err(EtlError::EmptySource);
        }

        Ok(records
            .iter()
            .map(|record| SourceRow::from_ledger(record, &self.policy))
            .collect())
    }

    /// Processes one batch: the per-row pipeline, then one bulk fact load.
    ///
    /// A failed load converts every buffered row of this batch into a
    /// failure (including rows that resolved cleanly) and the run moves
    /// on to the next batch. `rows_processed` is only incremented after a
    /// successful load, so `processed + failed == seen` holds regardless
    /// of where a batch dies.
    async fn process_batch(
        &self,
        index: usize,
        rows: &[SourceRow],
        source_label: &str,
        stats: &mut ProcessingStats,
    ) {
        let mut buffer = Vec::with_capacity(rows.len());
        for row in rows {
            match self.process_row(row, source_label, stats).await {
                Ok(fact) => buffer.push(fact),
                Err(error) => {
                    warn!(%error, "row skipped");
                    stats.record_failure(error.to_string());
                }
            }
        }

        if buffer.is_empty() {
            return;
        }

        let admitted = buffer.len();
        match self.facts.load(&buffer).await {
            Ok(()) => {
                debug!(batch = index + 1, facts = admitted, "batch loaded");
                stats.rows_processed += admitted;
            }
            Err(source) => {
                let error = EtlError::BatchLoad {
                    batch: index + 1,
                    source,
                };
                warn!(%error, rows = admitted, "batch load failed");
                stats.rows_failed += admitted;
                stats.errors.push(error.to_string());
            }
        }
    }

    /// Runs the per-row pipeline: validate, derive, resolve, hash.
    ///
    /// Dimension foreign keys are always resolved before the fact buffer
    /// admits the row.
    async fn process_row(
        &self,
        row: &SourceRow,
        source_label: &str,
        stats: &mut ProcessingStats,
    ) -> Result<NewFact, EtlError> {
        row.validate()?;
        let period = PeriodAttributes::parse(&row.period)?;
        let ids = self.resolve_dimensions(row, period, stats).await?;

        Ok(NewFact {
            project_id: ids.project,
            client_id: ids.client,
            account_id: ids.account,
            period_id: ids.period,
            resource_id: ids.resource,
            amount: row.amount,
            source_report: source_label.to_string(),
            row_hash: fact_hash(row),
        })
    }

    /// Resolves all five dimensions for a row, in fixed order.
    async fn resolve_dimensions(
        &self,
        row: &SourceRow,
        period: PeriodAttributes,
        stats: &mut ProcessingStats,
    ) -> Result<DimensionIds, EtlError> {
        let policy = &self.policy;

        let project = self
            .resolve(
                DimensionRecord::Project(NewProject::from_row(row, policy)),
                stats,
            )
            .await?;
        let client = self
            .resolve(
                DimensionRecord::Client(NewClient::from_row(row, policy)),
                stats,
            )
            .await?;
        let account = self
            .resolve(
                DimensionRecord::Account(NewAccount::from_row(row, policy)),
                stats,
            )
            .await?;
        let period = self.resolve(DimensionRecord::Period(period), stats).await?;
        let resource = self
            .resolve(
                DimensionRecord::Resource(NewResource::from_row(row, policy)),
                stats,
            )
            .await?;

        Ok(DimensionIds {
            project: ProjectId::new(project),
            client: ClientId::new(client),
            account: AccountId::new(account),
            period: PeriodId::new(period),
            resource: ResourceId::new(resource),
        })
    }

    /// Idempotent lookup-or-create for one dimension row.
    ///
    /// Find-or-create, never find-or-update: attributes of an existing row
    /// are left untouched. Creation counters are recorded here, on the
    /// orchestrator's stats; the store only reports `(id, created)`.
    async fn resolve(
        &self,
        record: DimensionRecord,
        stats: &mut ProcessingStats,
    ) -> Result<i64, EtlError> {
        let key = record.natural_key();

        if let Some(id) = self
            .dimensions
            .find(&key)
            .await
            .map_err(|source| EtlError::Resolution {
                kind: record.kind(),
                key: key.to_string(),
                source,
            })?
        {
            return Ok(id);
        }

        let resolved = self
            .dimensions
            .insert_or_get(&record)
            .await
            .map_err(|source| EtlError::Resolution {
                kind: record.kind(),
                key: key.to_string(),
                source,
            })?;

        if resolved.created {
            debug!(kind = %record.kind(), key = %key, id = resolved.id, "dimension row created");
            stats.dimensions_created.record(record.kind());
        }

        Ok(resolved.id)
    }
}
