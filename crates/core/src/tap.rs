// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Dispatch records for observers

use crate::event::EventName;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

/// Summary of one finished dispatch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchRecord {
    /// Monotonic per registry, starting at 1
    pub sequence: u64,
    /// The name the event was dispatched under
    pub name: EventName,
    /// Listeners registered when the dispatch started
    pub listeners: usize,
    /// Listeners actually invoked
    pub invoked: usize,
    /// Whether the event ended stopped
    pub stopped: bool,
}

/// Sender half of a tap
pub type DispatchSender = mpsc::UnboundedSender<DispatchRecord>;
/// Receiver half of a tap
pub type DispatchReceiver = mpsc::UnboundedReceiver<DispatchRecord>;
/// Receiver half of a bounded tap
pub type BoundedDispatchReceiver = mpsc::Receiver<DispatchRecord>;

/// A tap as held by the dispatcher
pub(crate) enum TapSender {
    Unbounded(DispatchSender),
    Bounded(mpsc::Sender<DispatchRecord>),
}

impl TapSender {
    /// Deliver a record; false once the receiver is gone
    ///
    /// A full bounded tap drops the record and stays attached.
    pub(crate) fn deliver(&self, record: DispatchRecord) -> bool {
        match self {
            TapSender::Unbounded(tx) => tx.send(record).is_ok(),
            TapSender::Bounded(tx) => match tx.try_send(record) {
                Ok(()) => true,
                Err(mpsc::error::TrySendError::Full(record)) => {
                    tracing::trace!(sequence = record.sequence, "tap full, record dropped");
                    true
                }
                Err(mpsc::error::TrySendError::Closed(_)) => false,
            },
        }
    }
}
