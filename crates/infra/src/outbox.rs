//! Ordered queue of gateway writes that have not been acknowledged yet.
//!
//! Writes are flushed strictly in the order they were queued. An
//! `Unavailable` failure stops the flush and leaves that write (and
//! everything after it) queued for the next attempt, so the durable store
//! never sees a later write before an earlier one. A write the store refuses
//! (`Rejected`, `Corrupt`) will not succeed on retry: it is moved to the
//! failed list and the flush carries on with the next write.

use std::collections::VecDeque;

use stocktrack_core::{Entity, ItemId};
use stocktrack_inventory::{HistoryEntry, StockItem};

use crate::gateway::{GatewayError, PersistenceGateway};

/// A single gateway call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingWrite {
    CreateItem(StockItem),
    DeleteItem(ItemId),
    UpdateQuantity { id: ItemId, quantity: u64 },
    AppendHistory(HistoryEntry),
}

impl PendingWrite {
    pub fn kind(&self) -> &'static str {
        match self {
            PendingWrite::CreateItem(_) => "create_item",
            PendingWrite::DeleteItem(_) => "delete_item",
            PendingWrite::UpdateQuantity { .. } => "update_item_quantity",
            PendingWrite::AppendHistory(_) => "append_history",
        }
    }

    pub fn item_id(&self) -> ItemId {
        match self {
            PendingWrite::CreateItem(item) => item.id(),
            PendingWrite::DeleteItem(id) => *id,
            PendingWrite::UpdateQuantity { id, .. } => *id,
            PendingWrite::AppendHistory(entry) => entry.item().id(),
        }
    }

    async fn send<G>(&self, gateway: &G) -> Result<(), GatewayError>
    where
        G: PersistenceGateway + ?Sized,
    {
        match self {
            PendingWrite::CreateItem(item) => gateway.create_item(item).await.map(drop),
            PendingWrite::DeleteItem(id) => gateway.delete_item(*id).await,
            PendingWrite::UpdateQuantity { id, quantity } => {
                gateway.update_item_quantity(*id, *quantity).await.map(drop)
            }
            PendingWrite::AppendHistory(entry) => gateway.append_history(entry).await,
        }
    }
}

/// A write the gateway refused, kept for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedWrite {
    pub write: PendingWrite,
    pub error: GatewayError,
}

#[derive(Debug, Clone, Default)]
pub struct Outbox {
    queue: VecDeque<PendingWrite>,
    failed: Vec<FailedWrite>,
}

impl Outbox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, write: PendingWrite) {
        self.queue.push_back(write);
    }

    /// Send queued writes in order until the queue is empty or the gateway
    /// is unavailable.
    ///
    /// Returns how many writes were acknowledged. Refused writes are moved to
    /// [`Outbox::failed`] and do not stop the flush.
    pub async fn flush<G>(&mut self, gateway: &G) -> Result<usize, GatewayError>
    where
        G: PersistenceGateway + ?Sized,
    {
        let mut sent = 0;
        while let Some(write) = self.queue.front() {
            match write.send(gateway).await {
                Ok(()) => sent += 1,
                Err(err) if err.is_retryable() => {
                    tracing::debug!(
                        write = write.kind(),
                        item_id = %write.item_id(),
                        acknowledged = sent,
                        remaining = self.queue.len(),
                        "outbox flush stopped"
                    );
                    return Err(err);
                }
                Err(err) => {
                    tracing::error!(
                        write = write.kind(),
                        item_id = %write.item_id(),
                        error = %err,
                        "gateway refused write; dropped from queue"
                    );
                    self.failed.push(FailedWrite {
                        write: write.clone(),
                        error: err,
                    });
                }
            }
            self.queue.pop_front();
        }
        if sent > 0 {
            tracing::debug!(acknowledged = sent, "outbox flushed");
        }
        Ok(sent)
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Writes the gateway refused, oldest first.
    pub fn failed(&self) -> &[FailedWrite] {
        &self.failed
    }
}
