//! Sync engine: fetch-merge-upload cycles against the remote feed.
//!
//! A cycle fetches the remote snapshot, reconciles it with the local
//! collection, persists the merged result, and only then uploads pending
//! records one at a time. Cycles are single-flight: a cycle that starts
//! while another is running is skipped, not queued.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::error::Result;
use crate::reconcile::reconcile;
use crate::remote::RemoteSource;
use crate::vault::QuoteVault;

/// What one sync cycle did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CycleReport {
    /// Remote records appended to the collection.
    pub added: usize,
    /// Local records marked synced by the merge.
    pub updated: usize,
    /// Pending records the remote accepted.
    pub uploaded: usize,
    /// Pending records that failed to upload and stay pending.
    pub upload_failures: usize,
    /// True when the cycle was skipped because another was in progress.
    pub skipped: bool,
}

impl CycleReport {
    #[must_use]
    pub const fn skipped() -> Self {
        Self {
            added: 0,
            updated: 0,
            uploaded: 0,
            upload_failures: 0,
            skipped: true,
        }
    }
}

/// Drives reconciliation cycles; generic over the remote seam.
pub struct SyncEngine<R: RemoteSource> {
    vault: QuoteVault,
    remote: R,
    in_flight: AtomicBool,
}

impl<R: RemoteSource> SyncEngine<R> {
    pub fn new(vault: QuoteVault, remote: R) -> Self {
        Self {
            vault,
            remote,
            in_flight: AtomicBool::new(false),
        }
    }

    /// Run one fetch-merge-upload cycle.
    ///
    /// A fetch failure degrades this cycle's remote contribution to an empty
    /// snapshot; an upload failure affects that record only.
    pub async fn run_cycle(&self) -> Result<CycleReport> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_err()
        {
            tracing::debug!("Sync cycle already in progress; skipping");
            return Ok(CycleReport::skipped());
        }

        let report = self.run_cycle_inner().await;
        self.in_flight.store(false, Ordering::Release);
        report
    }

    async fn run_cycle_inner(&self) -> Result<CycleReport> {
        let remote_quotes = match self.remote.fetch().await {
            Ok(quotes) => quotes,
            Err(error) => {
                tracing::warn!("Remote fetch failed: {error}; merging empty snapshot");
                Vec::new()
            }
        };

        let local = self.vault.quotes().await?;
        let outcome = reconcile(&local, &remote_quotes);
        // Merge is persisted before any upload is attempted
        self.vault.store_merged(&outcome.merged).await?;

        let pending = self.vault.pending().await?;
        let mut uploaded = 0;
        let mut upload_failures = 0;

        for quote in &pending {
            match self.remote.push(quote).await {
                Ok(()) => {
                    self.vault.mark_synced(&quote.id).await?;
                    uploaded += 1;
                }
                Err(error) => {
                    tracing::warn!(quote_id = %quote.id, "Upload failed: {error}");
                    upload_failures += 1;
                }
            }
        }

        let report = CycleReport {
            added: outcome.added,
            updated: outcome.updated,
            uploaded,
            upload_failures,
            skipped: false,
        };
        tracing::info!(
            added = report.added,
            updated = report.updated,
            uploaded = report.uploaded,
            upload_failures = report.upload_failures,
            "Sync cycle completed"
        );
        Ok(report)
    }
}

impl<R: RemoteSource + 'static> SyncEngine<R> {
    /// Start a periodic sync task firing every `every`, until stopped.
    ///
    /// The first cycle fires one full interval after the call; run an
    /// explicit startup cycle first if one is wanted immediately.
    pub fn spawn_periodic(self: Arc<Self>, every: Duration) -> SyncTask {
        let engine = self;
        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(every);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // The first tick completes immediately; consume it
            ticker.tick().await;

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        if let Err(error) = engine.run_cycle().await {
                            tracing::warn!("Periodic sync cycle failed: {error}");
                        }
                    }
                    changed = shutdown_rx.changed() => {
                        if changed.is_err() || *shutdown_rx.borrow() {
                            break;
                        }
                    }
                }
            }
            tracing::debug!("Periodic sync task stopped");
        });

        SyncTask {
            handle,
            shutdown: shutdown_tx,
        }
    }
}

/// Handle to a running periodic sync task.
pub struct SyncTask {
    handle: JoinHandle<()>,
    shutdown: watch::Sender<bool>,
}

impl SyncTask {
    /// Signal the task to stop and wait for it to wind down.
    ///
    /// An in-flight cycle finishes its current await point; in-flight HTTP
    /// requests are not cancelled.
    pub async fn stop(self) {
        let _ = self.shutdown.send(true);
        let _ = self.handle.await;
    }

    /// Abort the task without waiting.
    pub fn abort(&self) {
        self.handle.abort();
    }
}
