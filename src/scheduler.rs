// src/scheduler.rs
//! Fixed-size worker pool with single-shot result delivery
//!
//! Submitting never blocks: jobs go onto an unbounded crossbeam queue and a
//! fixed set of worker threads drains it. Each job produces exactly one
//! result, delivered either to a `Ticket` or to a callback on the worker.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam_channel::{Receiver, RecvTimeoutError, SendError, Sender, TryRecvError};
use tracing::{debug, error};

use crate::error::{BridgeError, Result};

type Job = Box<dyn FnOnce() + Send + 'static>;

pub struct WorkerPool {
    queue: Option<Sender<Job>>,
    workers: Vec<JoinHandle<()>>,
}

impl WorkerPool {
    pub fn new(size: usize) -> std::io::Result<Self> {
        let (queue, jobs) = crossbeam_channel::unbounded::<Job>();
        let workers = (0..size.max(1))
            .map(|i| {
                let jobs = jobs.clone();
                thread::Builder::new()
                    .name(format!("crypto-bridge-worker-{i}"))
                    .spawn(move || worker_loop(jobs))
            })
            .collect::<std::io::Result<Vec<_>>>()?;

        debug!(workers = workers.len(), "worker pool started");
        Ok(Self {
            queue: Some(queue),
            workers,
        })
    }

    pub fn size(&self) -> usize {
        self.workers.len()
    }

    /// Run `task` on a worker and pass its result to `deliver` on that worker.
    ///
    /// A panicking task still delivers, as `WorkerLost`. If the pool is gone
    /// `deliver` receives `Unavailable` immediately, on the calling thread.
    pub fn spawn<T, F, D>(&self, task: F, deliver: D)
    where
        T: Send + 'static,
        F: FnOnce() -> Result<T> + Send + 'static,
        D: FnOnce(Result<T>) + Send + 'static,
    {
        let Some(queue) = &self.queue else {
            deliver(Err(BridgeError::Unavailable));
            return;
        };

        let job: Job = Box::new(move || {
            let result = panic::catch_unwind(AssertUnwindSafe(task))
                .unwrap_or_else(|payload| Err(BridgeError::WorkerLost(panic_message(payload))));
            deliver(result);
        });

        // Workers outlive every job, so this only fails if they were all
        // killed. The job still runs, here, so `deliver` is called once.
        if let Err(SendError(job)) = queue.send(job) {
            error!("worker pool has no live workers; running job on the caller");
            job();
        }
    }

    /// Run `task` on a worker; the result is collected through the `Ticket`
    pub fn submit<T, F>(&self, task: F) -> Ticket<T>
    where
        T: Send + 'static,
        F: FnOnce() -> Result<T> + Send + 'static,
    {
        let (tx, rx) = crossbeam_channel::bounded(1);
        self.spawn(task, move |result| {
            // receiver may have been dropped; nobody is waiting then
            let _ = tx.send(result);
        });
        Ticket { rx }
    }

    /// Stop accepting work, let queued jobs finish, join the workers
    pub fn shutdown(mut self) {
        self.close();
    }

    fn close(&mut self) {
        drop(self.queue.take());
        for worker in self.workers.drain(..) {
            if worker.join().is_err() {
                error!("worker thread panicked outside a job");
            }
        }
    }
}

impl Drop for WorkerPool {
    fn drop(&mut self) {
        self.close();
    }
}

fn worker_loop(jobs: Receiver<Job>) {
    for job in jobs.iter() {
        // task panics are caught inside the job; this catches a panicking `deliver`
        if panic::catch_unwind(AssertUnwindSafe(job)).is_err() {
            error!("result delivery panicked");
        }
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_owned()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "handler panicked".to_owned()
    }
}

/// Single-shot handle to one result.
///
/// Every method consumes the ticket or hands it back, so a result can be
/// taken at most once.
#[must_use = "a ticket holds the only copy of its result"]
#[derive(Debug)]
pub struct Ticket<T> {
    rx: Receiver<Result<T>>,
}

impl<T> Ticket<T> {
    /// Block until the result arrives
    pub fn wait(self) -> Result<T> {
        self.rx.recv().unwrap_or_else(|_| {
            Err(BridgeError::WorkerLost(
                "result channel closed without a result".into(),
            ))
        })
    }

    /// Block for at most `timeout`; on expiry the ticket is handed back
    pub fn wait_timeout(self, timeout: Duration) -> std::result::Result<Result<T>, Self> {
        match self.rx.recv_timeout(timeout) {
            Ok(result) => Ok(result),
            Err(RecvTimeoutError::Timeout) => Err(self),
            Err(RecvTimeoutError::Disconnected) => Ok(Err(BridgeError::WorkerLost(
                "result channel closed without a result".into(),
            ))),
        }
    }

    /// Non-blocking poll; the ticket is handed back if nothing is ready yet
    pub fn try_wait(self) -> std::result::Result<Result<T>, Self> {
        match self.rx.try_recv() {
            Ok(result) => Ok(result),
            Err(TryRecvError::Empty) => Err(self),
            Err(TryRecvError::Disconnected) => Ok(Err(BridgeError::WorkerLost(
                "result channel closed without a result".into(),
            ))),
        }
    }
}
