// src/bin/crypto_bridge.rs
//! JSON-lines transport: one request per stdin line, one response per stdout line
//!
//! Responses are written as they complete, so they may come back out of
//! order; callers correlate them by `id`.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use crypto_bridge::{Bridge, BridgeError, Request, Response};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let bridge = Bridge::from_env().context("Failed to start crypto-bridge")?;
    info!(workers = bridge.workers(), "crypto-bridge ready");

    let (tx, rx) = crossbeam_channel::unbounded::<Response>();

    let writer = std::thread::spawn(move || -> Result<()> {
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        for response in rx {
            serde_json::to_writer(&mut out, &response)?;
            out.write_all(b"\n")?;
            out.flush()?;
        }
        Ok(())
    });

    let mut submitted = 0u64;
    for line in std::io::stdin().lock().lines() {
        let line = line.context("Failed to read stdin")?;
        if line.trim().is_empty() {
            continue;
        }
        submitted += 1;

        match serde_json::from_str::<Request>(&line) {
            Ok(request) => {
                let tx = tx.clone();
                bridge.submit_request(request, move |response| {
                    // writer only goes away after every sender is dropped
                    let _ = tx.send(response);
                });
            }
            Err(err) => {
                warn!("malformed request line: {err}");
                let _ = tx.send(Response::new(None, Err(BridgeError::InvalidArguments)));
            }
        }
    }

    // wait for in-flight requests, then let the writer drain
    drop(bridge);
    drop(tx);
    writer
        .join()
        .map_err(|_| anyhow::anyhow!("writer thread panicked"))??;

    info!(submitted, "stdin closed, all responses written");
    Ok(())
}
