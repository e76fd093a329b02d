// ABOUTME: Write-behind persistence adapter for onboarding snapshots
// ABOUTME: Spawned task consuming a snapshot channel with last-write-wins coalescing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Write-behind persistence adapter
//!
//! The tracker never awaits storage I/O: each mutation dispatches the full
//! updated aggregate into an unbounded channel and a spawned task performs
//! the writes. Queued snapshots are coalesced so only the newest is written,
//! which preserves the last-write-wins contract of full-snapshot
//! serialization. Write failures are logged and never surface to the
//! mutating caller; the in-memory state stays authoritative.

use crate::constants::storage;
use crate::models::OnboardingState;
use crate::store::StoreProvider;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, warn};

enum Command {
    Persist(Box<OnboardingState>),
    Flush(oneshot::Sender<()>),
}

/// Handle to the write-behind persistence task
///
/// Cloning shares the same task. The task exits once every handle has been
/// dropped and the channel drains.
#[derive(Clone)]
pub struct PersistenceHandle {
    tx: mpsc::UnboundedSender<Command>,
}

impl PersistenceHandle {
    /// Spawn the write-behind task owning `store`
    pub fn spawn<S: StoreProvider + 'static>(store: S) -> Self {
        let (tx, mut rx) = mpsc::unbounded_channel();

        tokio::spawn(async move {
            while let Some(command) = rx.recv().await {
                match command {
                    Command::Persist(mut snapshot) => {
                        // Drain the queue: a newer full snapshot supersedes
                        // anything older, and flush acks collected here are
                        // only released after the write.
                        let mut pending_acks = Vec::new();
                        while let Ok(next) = rx.try_recv() {
                            match next {
                                Command::Persist(newer) => snapshot = newer,
                                Command::Flush(ack) => pending_acks.push(ack),
                            }
                        }

                        write_snapshot(&store, &snapshot).await;

                        for ack in pending_acks {
                            let _ = ack.send(());
                        }
                    }
                    Command::Flush(ack) => {
                        // Nothing queued ahead of this flush.
                        let _ = ack.send(());
                    }
                }
            }
            debug!("Persistence channel closed, write-behind task exiting");
        });

        Self { tx }
    }

    /// Dispatch a snapshot for asynchronous persistence
    ///
    /// Fire-and-forget: the caller's mutation is already applied in memory
    /// and is retained regardless of write success.
    pub fn dispatch(&self, snapshot: OnboardingState) {
        if self.tx.send(Command::Persist(Box::new(snapshot))).is_err() {
            warn!("Persistence task is gone, snapshot not written");
        }
    }

    /// Wait until every snapshot dispatched before this call is durable
    ///
    /// Used for graceful shutdown and by tests that assert on persisted
    /// state. Returns immediately if the persistence task has already
    /// exited.
    pub async fn flush(&self) {
        let (ack_tx, ack_rx) = oneshot::channel();
        if self.tx.send(Command::Flush(ack_tx)).is_err() {
            return;
        }
        let _ = ack_rx.await;
    }
}

async fn write_snapshot<S: StoreProvider>(store: &S, snapshot: &OnboardingState) {
    if let Err(err) = store.set(storage::SNAPSHOT_KEY, snapshot).await {
        warn!("Failed to persist onboarding snapshot: {}", err);
    }
}
