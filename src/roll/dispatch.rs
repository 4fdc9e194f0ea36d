//! Roll submission and completion delivery
//!
//! Workers run the HTTP cycle anywhere; completions cross back to the event
//! thread through one channel and are applied only inside [`RollDispatcher::drain`],
//! called from that thread. This keeps all chain mutation single-threaded.
//!
//! Delivery rules:
//! - per submitting control, completions apply in submission order; a
//!   completion that arrives early is parked until its predecessors land
//! - overlapping requests from one control are allowed to race on the wire
//!   (no single-flight suppression); ordering is restored at delivery
//! - a completion whose piece has left the registry is stale and is dropped
//!   without touching any chain

use crate::context::GameContext;
use crate::core::error::{Result, TabulaError};
use crate::core::types::{ControlId, PieceId};
use crate::piece::chain;
use crate::piece::traits::DiceResult;
use crate::piece::PieceRegistry;
use crate::roll::client::RollClient;
use crate::roll::report::{self, ReportFormat};
use crate::roll::RollSpec;
use ahash::AHashMap;
use std::collections::BTreeMap;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Handle for one submitted roll
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RollTicket {
    pub control: ControlId,
    pub seq: u64,
}

/// What came back from the worker
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RollOutcome {
    Success(Vec<i64>),
    Failure(String),
}

struct Completion {
    ticket: RollTicket,
    piece: PieceId,
    node_index: usize,
    spec: RollSpec,
    outcome: RollOutcome,
}

pub struct RollDispatcher {
    tx: mpsc::UnboundedSender<Completion>,
    rx: mpsc::UnboundedReceiver<Completion>,
    client: Option<Arc<RollClient>>,
    format: ReportFormat,
    next_seq: AHashMap<ControlId, u64>,
    next_deliver: AHashMap<ControlId, u64>,
    parked: AHashMap<ControlId, BTreeMap<u64, Completion>>,
}

impl RollDispatcher {
    pub fn new(client: RollClient, format: ReportFormat) -> Self {
        Self::build(Some(Arc::new(client)), format)
    }

    /// Dispatcher with no HTTP client; submissions must come through
    /// [`submit_with`](Self::submit_with)
    pub fn detached(format: ReportFormat) -> Self {
        Self::build(None, format)
    }

    fn build(client: Option<Arc<RollClient>>, format: ReportFormat) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            tx,
            rx,
            client,
            format,
            next_seq: AHashMap::new(),
            next_deliver: AHashMap::new(),
            parked: AHashMap::new(),
        }
    }

    fn allocate(&mut self, control: ControlId) -> RollTicket {
        let seq = self.next_seq.entry(control).or_insert(0);
        let ticket = RollTicket {
            control,
            seq: *seq,
        };
        *seq += 1;
        ticket
    }

    /// Submit a roll against the configured server. Returns immediately; the
    /// result arrives through [`drain`](Self::drain).
    pub fn submit(
        &mut self,
        control: ControlId,
        piece: PieceId,
        node_index: usize,
        spec: RollSpec,
    ) -> Result<RollTicket> {
        let client = self
            .client
            .clone()
            .ok_or_else(|| TabulaError::Config("dispatcher has no roll client".to_string()))?;
        let request = spec.clone();
        Ok(self.submit_with(control, piece, node_index, spec, async move {
            match client.roll(&request).await {
                Ok(values) => RollOutcome::Success(values),
                Err(e) => RollOutcome::Failure(e.to_string()),
            }
        }))
    }

    /// Submit with an explicit worker future producing the outcome. Used by
    /// `submit` and by tests that stand in for the network.
    pub fn submit_with(
        &mut self,
        control: ControlId,
        piece: PieceId,
        node_index: usize,
        spec: RollSpec,
        worker: impl Future<Output = RollOutcome> + Send + 'static,
    ) -> RollTicket {
        let ticket = self.allocate(control);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let outcome = worker.await;
            // Receiver gone means the application is shutting down
            let _ = tx.send(Completion {
                ticket,
                piece,
                node_index,
                spec,
                outcome,
            });
        });
        ticket
    }

    /// Completions submitted but not yet delivered
    pub fn pending(&self) -> u64 {
        self.next_seq
            .iter()
            .map(|(control, seq)| seq - self.next_deliver.get(control).copied().unwrap_or(0))
            .sum()
    }

    /// Pull in every completion that has arrived and deliver the in-order
    /// prefix per control. Returns the number of completions delivered,
    /// stale discards included. Must be called from the thread owning the
    /// registry; nothing else applies chain mutations.
    pub fn drain(&mut self, registry: &mut PieceRegistry, ctx: &mut GameContext) -> usize {
        while let Ok(completion) = self.rx.try_recv() {
            self.parked
                .entry(completion.ticket.control)
                .or_default()
                .insert(completion.ticket.seq, completion);
        }

        let mut delivered = 0;
        let controls: Vec<ControlId> = self.parked.keys().copied().collect();
        for control in controls {
            loop {
                let next = *self.next_deliver.entry(control).or_insert(0);
                let completion = match self.parked.get_mut(&control).and_then(|q| q.remove(&next)) {
                    Some(c) => c,
                    None => break,
                };
                *self.next_deliver.entry(control).or_insert(0) += 1;
                self.apply(completion, registry, ctx);
                delivered += 1;
            }
        }
        delivered
    }

    fn apply(&self, completion: Completion, registry: &mut PieceRegistry, ctx: &mut GameContext) {
        if !registry.contains(completion.piece) {
            tracing::debug!(piece = ?completion.piece, "discarding stale roll completion");
            return;
        }
        match completion.outcome {
            RollOutcome::Success(values) => {
                let state = DiceResult::encode_results(&values);
                let applied = registry
                    .get_mut(completion.piece)
                    .map(|piece| chain::apply_state(piece.as_mut(), completion.node_index, &state))
                    .unwrap_or(false);
                if !applied {
                    tracing::warn!(
                        index = completion.node_index,
                        "roll completion target node missing, state not applied"
                    );
                    return;
                }
                let result = report::result_text(&completion.spec, &values);
                ctx.reporter
                    .send(&self.format.format(&completion.spec.description, &result));
            }
            RollOutcome::Failure(reason) => {
                tracing::warn!(%reason, "internet roll failed");
                ctx.reporter.send(&report::failure_text(&completion.spec));
            }
        }
    }
}
