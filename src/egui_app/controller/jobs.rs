use super::request_fence::RequestToken;
use crate::backend::{
    BackendError, MachineDetail, MachineSummary, MachineTypeInfo, PredictionHistoryEntry,
    PredictionResult,
};
use std::{
    sync::mpsc::{Receiver, Sender},
    thread,
};

type TryRecvError = std::sync::mpsc::TryRecvError;

/// Results reported by worker threads, drained on the UI thread.
#[derive(Debug)]
pub(crate) enum JobMessage {
    CatalogLoaded(CatalogResult),
    MachineOpened(MachineOpenResult),
    HistoryLoaded(HistoryResult),
    ReadingSubmitted(ReadingResult),
    MachineCreated(CreateResult),
    MachineTypeResolved(TypeResult),
}

#[derive(Debug)]
pub(crate) struct CatalogResult {
    pub(crate) token: RequestToken,
    /// Report the outcome in the status bar.
    pub(crate) announce: bool,
    pub(crate) result: Result<Vec<MachineSummary>, BackendError>,
}

/// Detail and history fetched back to back for one machine.
#[derive(Debug)]
pub(crate) struct OpenedMachine {
    pub(crate) detail: MachineDetail,
    pub(crate) history: Vec<PredictionHistoryEntry>,
}

#[derive(Debug)]
pub(crate) struct MachineOpenResult {
    pub(crate) token: RequestToken,
    pub(crate) machine_id: String,
    pub(crate) result: Result<OpenedMachine, BackendError>,
}

#[derive(Debug)]
pub(crate) struct HistoryResult {
    pub(crate) token: RequestToken,
    pub(crate) machine_id: String,
    pub(crate) result: Result<Vec<PredictionHistoryEntry>, BackendError>,
}

#[derive(Debug)]
pub(crate) struct ReadingResult {
    pub(crate) token: RequestToken,
    pub(crate) machine_id: String,
    pub(crate) result: Result<PredictionResult, BackendError>,
}

#[derive(Debug)]
pub(crate) struct CreateResult {
    pub(crate) token: RequestToken,
    pub(crate) machine_id: String,
    pub(crate) result: Result<(), BackendError>,
}

#[derive(Debug)]
pub(crate) struct TypeResult {
    pub(crate) token: RequestToken,
    pub(crate) machine_id: String,
    pub(crate) result: Result<MachineTypeInfo, BackendError>,
}

pub(crate) struct ControllerJobs {
    message_tx: Sender<JobMessage>,
    message_rx: Receiver<JobMessage>,
    in_flight: usize,
}

impl ControllerJobs {
    pub(super) fn new() -> Self {
        let (message_tx, message_rx) = std::sync::mpsc::channel::<JobMessage>();
        Self {
            message_tx,
            message_rx,
            in_flight: 0,
        }
    }

    /// Run `job` on a worker thread and queue its message for the next poll.
    pub(super) fn spawn<F>(&mut self, job: F)
    where
        F: FnOnce() -> JobMessage + Send + 'static,
    {
        self.in_flight += 1;
        let tx = self.message_tx.clone();
        thread::spawn(move || {
            let _ = tx.send(job());
        });
    }

    pub(super) fn try_recv_message(&mut self) -> Result<JobMessage, TryRecvError> {
        let message = self.message_rx.try_recv()?;
        self.in_flight = self.in_flight.saturating_sub(1);
        Ok(message)
    }

    pub(super) fn in_flight(&self) -> usize {
        self.in_flight
    }
}
