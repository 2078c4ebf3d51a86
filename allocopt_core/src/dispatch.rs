//! Running solves off the calling thread
//!
//! A [`BackgroundSolver`] runs every submitted job on its own worker thread and only ever
//! hands back the result of the most recently submitted job. Results of jobs superseded by
//! a later submission are dropped when they arrive. Jobs are not cancelled and have no
//! time limit.
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::mpsc::{channel, Receiver, Sender, TryRecvError};
use std::thread;

use log::debug;
use thiserror::Error;

type JobResult<T> = (u64, thread::Result<T>);

/// Dispatches blocking jobs to worker threads, keeping only the latest result
///
/// # Examples
/// ```rust
/// use allocopt_core::dispatch::BackgroundSolver;
/// use allocopt_core::io::RawSelectionInput;
/// use allocopt_core::variant::solve_selection;
///
/// let mut background = BackgroundSolver::new();
/// let raw = RawSelectionInput::from_values(&["10", "40"])
///     .with_constraint("weight", "4", &["5", "4"]);
/// background.submit(move || solve_selection(&raw));
/// let outcome = background.wait_latest().unwrap().unwrap();
/// assert_eq!(outcome.into_solution().unwrap().selected, vec![1]);
/// ```
#[derive(Debug)]
pub struct BackgroundSolver<T> {
    sender: Sender<JobResult<T>>,
    receiver: Receiver<JobResult<T>>,
    /// Generation of the last submitted job, 0 before any submission
    submitted: u64,
    /// Generation of the last result handed back
    delivered: u64,
}

impl<T: Send + 'static> Default for BackgroundSolver<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Send + 'static> BackgroundSolver<T> {
    pub fn new() -> Self {
        let (sender, receiver) = channel();
        BackgroundSolver {
            sender,
            receiver,
            submitted: 0,
            delivered: 0,
        }
    }

    /// Start a job on a new worker thread, superseding every earlier job
    pub fn submit<F>(&mut self, job: F) -> Ticket
    where
        F: FnOnce() -> T + Send + 'static,
    {
        self.submitted += 1;
        let generation = self.submitted;
        let sender = self.sender.clone();
        thread::spawn(move || {
            let result = catch_unwind(AssertUnwindSafe(job));
            // The receiver is gone once the BackgroundSolver is dropped
            let _ = sender.send((generation, result));
        });
        debug!("Submitted background job {}", generation);
        Ticket(generation)
    }

    /// Ticket of the most recently submitted job, if any
    pub fn latest_ticket(&self) -> Option<Ticket> {
        (self.submitted > 0).then_some(Ticket(self.submitted))
    }

    /// Whether the latest job's result has yet to be handed back
    pub fn is_pending(&self) -> bool {
        self.delivered < self.submitted
    }

    /// Result of the latest job if it has finished, without blocking
    ///
    /// Returns `Ok(None)` while the job runs, and also once its result has been handed
    /// back.
    pub fn try_latest(&mut self) -> Result<Option<T>, DispatchError> {
        while self.is_pending() {
            match self.receiver.try_recv() {
                Ok(message) => {
                    if let Some(result) = self.accept(message)? {
                        return Ok(Some(result));
                    }
                }
                Err(TryRecvError::Empty) => return Ok(None),
                // Unreachable while self holds a sender
                Err(TryRecvError::Disconnected) => return Err(DispatchError::Disconnected),
            }
        }
        Ok(None)
    }

    /// Block until the latest job finishes and return its result
    pub fn wait_latest(&mut self) -> Result<T, DispatchError> {
        if !self.is_pending() {
            return Err(DispatchError::NothingPending);
        }
        loop {
            let message = self
                .receiver
                .recv()
                .map_err(|_| DispatchError::Disconnected)?;
            if let Some(result) = self.accept(message)? {
                return Ok(result);
            }
        }
    }

    /// Keep the result of the latest job, drop anything older
    fn accept(&mut self, (generation, result): JobResult<T>) -> Result<Option<T>, DispatchError> {
        if generation != self.submitted {
            debug!(
                "Dropping result of superseded job {} (latest is {})",
                generation, self.submitted
            );
            return Ok(None);
        }
        self.delivered = generation;
        match result {
            Ok(value) => Ok(Some(value)),
            Err(_) => Err(DispatchError::JobPanicked(generation)),
        }
    }
}

/// Identifies a submitted job, later submissions have larger tickets
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

impl Ticket {
    pub fn generation(&self) -> u64 {
        self.0
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DispatchError {
    #[error("No submitted job is waiting to be collected")]
    NothingPending,
    #[error("Background job {0} panicked")]
    JobPanicked(u64),
    #[error("Background result channel disconnected")]
    Disconnected,
}
