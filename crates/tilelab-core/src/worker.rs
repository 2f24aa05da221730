//! The single-threaded solver worker.
//!
//! One worker owns the [`GameSession`] and is the only writer of the
//! fusion trackers, subset cache, journal state, aggregator, and event
//! log. Ingress handlers enqueue [`WorkerRequest`]s on a FIFO channel
//! and suspend on a oneshot reply; exactly one request is in flight at
//! a time, so no solver state needs a lock. A client that disconnects
//! or times out merely abandons its reply -- the snapshot still
//! processes and every tracker still advances.
//!
//! The worker also owns the persistence cadence: the periodic tick
//! flushes the event-log buffer and rewrites the aggregate file, and
//! shutdown performs one final flush and save.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{RwLock, broadcast, mpsc, oneshot};
use tokio_util::sync::CancellationToken;

use tilelab_journal::{EventLog, VocabularyAggregator};
use tilelab_types::{BoardAnalytics, PushMessage, Snapshot, UpdatePayload};

use crate::session::GameSession;

/// Reply to one snapshot request.
#[derive(Debug, Clone, Copy)]
pub struct SnapshotReply {
    /// Number of push subscribers that received the `data` message.
    pub broadcast: usize,
}

/// A unit of work for the solver.
#[derive(Debug)]
pub enum WorkerRequest {
    /// Process one snapshot payload and reply with the fan-out count.
    Snapshot {
        /// The raw, unnormalized wire payload.
        payload: UpdatePayload,
        /// Where to send the reply; dropped receivers are ignored.
        reply: oneshot::Sender<SnapshotReply>,
    },
}

/// Drives one [`GameSession`] from a request queue.
pub struct SolverWorker {
    session: GameSession,
    previous_raw: Snapshot,
    push_tx: broadcast::Sender<PushMessage>,
    aggregator: Arc<RwLock<VocabularyAggregator>>,
    event_log: EventLog,
    aggregate_path: PathBuf,
    save_interval: Duration,
}

impl SolverWorker {
    /// Assemble a worker around its owned state.
    pub fn new(
        session: GameSession,
        push_tx: broadcast::Sender<PushMessage>,
        aggregator: Arc<RwLock<VocabularyAggregator>>,
        event_log: EventLog,
        aggregate_path: PathBuf,
        save_interval: Duration,
    ) -> Self {
        Self {
            session,
            previous_raw: Snapshot::default(),
            push_tx,
            aggregator,
            event_log,
            aggregate_path,
            save_interval,
        }
    }

    /// Run until the queue closes or the token cancels. Always performs
    /// a final flush and aggregate save before returning.
    pub async fn run(
        mut self,
        mut requests: mpsc::Receiver<WorkerRequest>,
        shutdown: CancellationToken,
    ) {
        let mut save_timer = tokio::time::interval(self.save_interval);
        save_timer.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
        // The first tick completes immediately; skip it.
        save_timer.tick().await;

        loop {
            tokio::select! {
                () = shutdown.cancelled() => {
                    tracing::info!("solver worker shutting down");
                    break;
                }
                _ = save_timer.tick() => {
                    self.persist().await;
                }
                request = requests.recv() => {
                    match request {
                        Some(request) => self.handle(request).await,
                        None => {
                            tracing::info!("request queue closed, solver worker stopping");
                            break;
                        }
                    }
                }
            }
        }

        self.persist().await;
    }

    async fn handle(&mut self, request: WorkerRequest) {
        match request {
            WorkerRequest::Snapshot { payload, reply } => {
                let snapshot = payload.normalize(&self.previous_raw);
                self.previous_raw = snapshot.clone();

                let outcome = self.session.process_snapshot(&snapshot);

                let vocabulary_stats = {
                    let mut aggregator = self.aggregator.write().await;
                    for event in &outcome.events {
                        aggregator.record(event);
                    }
                    aggregator.summary()
                };

                self.event_log.append(&outcome.events);

                let mut update = outcome.update;
                update.analytics = Some(BoardAnalytics {
                    changes: outcome.events.len(),
                    vocabulary_stats,
                });

                // `data` first, then `move-log`: subscribers must never
                // see events before the snapshot they derive from.
                let fan_out = self
                    .push_tx
                    .send(PushMessage::Data(update))
                    .unwrap_or(0);
                if !outcome.events.is_empty() {
                    let _ = self.push_tx.send(PushMessage::MoveLog {
                        entries: outcome.events,
                    });
                }

                // A dropped receiver means the client went away; the
                // state advance above is already committed.
                let _ = reply.send(SnapshotReply { broadcast: fan_out });
            }
        }
    }

    async fn persist(&mut self) {
        self.event_log.flush();
        let aggregator = self.aggregator.read().await;
        if let Err(e) = aggregator.save(&self.aggregate_path) {
            tracing::warn!(
                path = %self.aggregate_path.display(),
                error = %e,
                "aggregate save failed, will retry on next tick"
            );
        }
    }
}
