mod core;
mod messages;
mod worker;

pub use core::{Engine, EngineConfig, evaluate_asset, evaluate_batch};

pub use messages::{JobRequest, JobResult};

pub use worker::{process_request_sync, spawn_worker_thread};
