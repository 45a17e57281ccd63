//! Serialized cave generation worker.
//!
//! Requests arrive over a bounded crossbeam channel. Each call to
//! `process_pending` runs at most one full generation for the newest queued
//! request; older queued requests are reported as superseded.

use crossbeam::channel::{bounded, Receiver, Sender, TrySendError};
use tracing::{debug, warn};

use crate::config::{CaveConfig, CaveGenerator, CaveOutput};
use crate::error::CaveResult;

/// Default channel capacity for request/result channels.
const DEFAULT_CHANNEL_CAPACITY: usize = 64;

/// Request sent from the caller to the worker
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub id: u64,
    pub config: CaveConfig,
}

/// What became of a request.
#[derive(Debug)]
pub enum GenerationOutcome {
    /// A newer request was queued before this one started.
    Superseded { id: u64 },
    /// The whole pipeline ran; `result` is complete or an error.
    Finished {
        id: u64,
        result: CaveResult<CaveOutput>,
    },
}

impl GenerationOutcome {
    pub fn id(&self) -> u64 {
        match self {
            Self::Superseded { id } | Self::Finished { id, .. } => *id,
        }
    }
}

/// Single-flight generation worker
pub struct GenerationWorker {
    request_tx: Sender<GenerationRequest>,
    request_rx: Receiver<GenerationRequest>,
    result_tx: Sender<GenerationOutcome>,
    result_rx: Receiver<GenerationOutcome>,
}

impl GenerationWorker {
    pub fn new(channel_capacity: usize) -> Self {
        let (request_tx, request_rx) = bounded(channel_capacity);
        let (result_tx, result_rx) = bounded(channel_capacity);

        Self {
            request_tx,
            request_rx,
            result_tx,
            result_rx,
        }
    }

    pub fn request_sender(&self) -> Sender<GenerationRequest> {
        self.request_tx.clone()
    }

    pub fn result_receiver(&self) -> Receiver<GenerationOutcome> {
        self.result_rx.clone()
    }

    /// Drains queued requests and generates the newest one.
    ///
    /// Returns the id that was generated, or `None` if the queue was empty.
    pub fn process_pending(&mut self) -> Option<u64> {
        let mut latest: Option<GenerationRequest> = None;
        while let Ok(request) = self.request_rx.try_recv() {
            if let Some(older) = latest.replace(request) {
                debug!(id = older.id, "Generation request superseded");
                self.publish(GenerationOutcome::Superseded { id: older.id });
            }
        }

        let request = latest?;
        let result = CaveGenerator::from_config(request.config).generate();
        if let Err(err) = &result {
            warn!(id = request.id, error = %err, "Cave generation failed");
        }
        self.publish(GenerationOutcome::Finished {
            id: request.id,
            result,
        });
        Some(request.id)
    }

    pub fn shutdown(&mut self) {
        while self.request_rx.try_recv().is_ok() {}
        while self.result_rx.try_recv().is_ok() {}
    }

    fn publish(&self, outcome: GenerationOutcome) {
        match self.result_tx.try_send(outcome) {
            Ok(()) => {}
            Err(TrySendError::Full(outcome)) => {
                warn!(id = outcome.id(), "Result channel full, dropping outcome");
            }
            Err(TrySendError::Disconnected(_)) => {}
        }
    }
}

impl Default for GenerationWorker {
    fn default() -> Self {
        Self::new(DEFAULT_CHANNEL_CAPACITY)
    }
}
