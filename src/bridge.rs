// src/bridge.rs
//! Public dispatch entry point
//!
//! Transport → decode → worker → handler → encode → one result back.
//! Everything after the submit call, decoding included, happens on a worker.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, warn};

use crate::config::{self, Config};
use crate::core::{self, Context};
use crate::error::StartupError;
use crate::random::{OsRandom, RandomSource};
use crate::request::{self, Request};
use crate::response::{OperationResult, Output, Payload, Response};
use crate::scheduler::{Ticket, WorkerPool};

pub struct Bridge {
    pool: WorkerPool,
    context: Context,
    next_seq: AtomicU64,
}

impl Bridge {
    /// Bridge backed by the process CSPRNG
    pub fn new(config: Config) -> std::io::Result<Self> {
        Self::with_random(config, Arc::new(OsRandom))
    }

    pub fn with_random(config: Config, random: Arc<dyn RandomSource>) -> std::io::Result<Self> {
        let pool = WorkerPool::new(config.pool.workers)?;
        Ok(Self {
            pool,
            context: Context::new(config, random),
            next_seq: AtomicU64::new(0),
        })
    }

    /// Bridge configured from `CRYPTO_BRIDGE_CONFIG` (defaults if the file is absent)
    pub fn from_env() -> std::result::Result<Self, StartupError> {
        let config = config::load()?.clone();
        Ok(Self::new(config)?)
    }

    pub fn config(&self) -> &Config {
        &self.context.config
    }

    pub fn workers(&self) -> usize {
        self.pool.size()
    }

    /// Queue a command and return immediately with its ticket
    pub fn submit(&self, name: impl Into<String>, args: Vec<serde_json::Value>) -> Ticket<Payload> {
        self.pool.submit(self.task(name.into(), args))
    }

    /// Queue a command; `on_done` runs exactly once, on the worker
    pub fn submit_with<F>(&self, name: impl Into<String>, args: Vec<serde_json::Value>, on_done: F)
    where
        F: FnOnce(OperationResult) + Send + 'static,
    {
        self.pool.spawn(self.task(name.into(), args), on_done);
    }

    /// Envelope form of `submit_with`: the response carries the request id
    pub fn submit_request<F>(&self, request: Request, on_done: F)
    where
        F: FnOnce(Response) + Send + 'static,
    {
        let Request { id, name, args } = request;
        self.submit_with(name, args, move |result| on_done(Response::new(id, result)));
    }

    /// Submit and block the caller until the result is in
    pub fn call(&self, name: impl Into<String>, args: Vec<serde_json::Value>) -> OperationResult {
        self.submit(name, args).wait()
    }

    fn task(
        &self,
        name: String,
        args: Vec<serde_json::Value>,
    ) -> impl FnOnce() -> OperationResult + Send + 'static {
        let context = self.context.clone();
        let seq = self.next_seq.fetch_add(1, Ordering::Relaxed);
        debug!(seq, command = %name, "request queued");
        move || process(seq, &name, args, &context)
    }
}

fn process(seq: u64, name: &str, args: Vec<serde_json::Value>, context: &Context) -> OperationResult {
    let started = Instant::now();
    let result = request::decode(name, args, &context.config.random)
        .and_then(|op| core::execute(op, context))
        .map(Output::encode);

    let elapsed_ms = started.elapsed().as_millis() as u64;
    match &result {
        Ok(_) => debug!(seq, command = %name, elapsed_ms, "request completed"),
        Err(err) => warn!(seq, command = %name, kind = ?err.kind(), elapsed_ms, "request failed: {err}"),
    }
    result
}
