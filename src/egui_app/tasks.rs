//! Background request plumbing
//!
//! egui redraws on the UI thread, so network calls run on a tokio runtime
//! and report back over a channel polled once per frame. A [`RequestSlot`]
//! allows one in-flight request per control and drops any result whose
//! generation is no longer current.

use std::future::Future;
use std::sync::mpsc::{channel, Receiver, TryRecvError};
use std::sync::Arc;

use tokio::runtime::{Builder, Runtime};

/// Shared multi-thread runtime for API calls
#[derive(Clone)]
pub struct TaskRunner {
    runtime: Arc<Runtime>,
}

impl TaskRunner {
    pub fn new() -> std::io::Result<Self> {
        let runtime = Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("synthesis-net")
            .enable_all()
            .build()?;
        Ok(Self {
            runtime: Arc::new(runtime),
        })
    }

    /// Run `future` in the background; its output arrives on the returned handle.
    pub fn spawn<T, F>(&self, future: F) -> Pending<T>
    where
        T: Send + 'static,
        F: Future<Output = T> + Send + 'static,
    {
        let (tx, rx) = channel();
        self.runtime.spawn(async move {
            // The receiver is gone when the view stopped caring.
            let _ = tx.send(future.await);
        });
        Pending { rx }
    }
}

/// Handle to a background result
pub struct Pending<T> {
    rx: Receiver<T>,
}

#[derive(Debug, PartialEq, Eq)]
pub enum Poll<T> {
    Ready(T),
    Waiting,
    /// The task ended without sending (panicked)
    Lost,
}

impl<T> Pending<T> {
    pub fn poll(&self) -> Poll<T> {
        match self.rx.try_recv() {
            Ok(value) => Poll::Ready(value),
            Err(TryRecvError::Empty) => Poll::Waiting,
            Err(TryRecvError::Disconnected) => Poll::Lost,
        }
    }
}

/// One control's in-flight request
pub struct RequestSlot<T> {
    generation: u64,
    pending: Option<(u64, Pending<T>)>,
}

impl<T> Default for RequestSlot<T> {
    fn default() -> Self {
        Self {
            generation: 0,
            pending: None,
        }
    }
}

impl<T> RequestSlot<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Busy flag used to disable the triggering control
    pub fn is_busy(&self) -> bool {
        self.pending.is_some()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Track a new request, superseding any previous one.
    pub fn start(&mut self, pending: Pending<T>) -> u64 {
        self.generation += 1;
        self.pending = Some((self.generation, pending));
        self.generation
    }

    /// Forget the in-flight request; a late result will be discarded.
    pub fn cancel(&mut self) {
        self.generation += 1;
        self.pending = None;
    }

    /// The result of the current request, once it has arrived.
    pub fn take_ready(&mut self) -> Option<T> {
        let (generation, poll) = match &self.pending {
            Some((generation, pending)) => (*generation, pending.poll()),
            None => return None,
        };
        match poll {
            Poll::Waiting => None,
            Poll::Ready(value) => {
                let current = generation == self.generation;
                self.pending = None;
                if current {
                    Some(value)
                } else {
                    tracing::debug!("Dropping stale response (generation {})", generation);
                    None
                }
            }
            Poll::Lost => {
                tracing::warn!("Background request ended without a result");
                self.pending = None;
                None
            }
        }
    }
}
