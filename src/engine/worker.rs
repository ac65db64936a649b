use std::sync::Arc;
use std::sync::mpsc::{Receiver, Sender};
use std::thread::{self, JoinHandle};
use std::time::Instant;

use super::core::Engine;
use super::messages::{JobRequest, JobResult};

use crate::config::DF;
use crate::domain::PriceSeries;

/// Spawns a background thread that evaluates jobs until the request channel closes.
pub fn spawn_worker_thread(rx: Receiver<JobRequest>, tx: Sender<JobResult>) -> JoinHandle<()> {
    thread::spawn(move || {
        let engine = Engine::new();
        while let Ok(req) = rx.recv() {
            let result = process_request_sync(&engine, req);
            if tx.send(result).is_err() {
                // Receiver gone, nobody is listening
                break;
            }
        }
    })
}

pub fn process_request_sync(engine: &Engine, req: JobRequest) -> JobResult {
    let start = Instant::now();
    let bar_count = req.bars.len();

    let result = PriceSeries::new(req.symbol.clone(), req.bars)
        .map(|series| Arc::new(engine.evaluate(&series, &req.macro_data)))
        .map_err(|e| format!("{e:#}"));

    let duration_ms = start.elapsed().as_millis();

    if DF.log_worker {
        match &result {
            Ok(eval) => log::info!(
                "Worker: {} evaluated in {}ms ({} bars, {})",
                req.symbol,
                duration_ms,
                bar_count,
                eval.trend.direction
            ),
            Err(e) => log::warn!("Worker: {} rejected: {}", req.symbol, e),
        }
    }

    JobResult {
        symbol: req.symbol,
        duration_ms,
        result,
        bar_count,
    }
}
