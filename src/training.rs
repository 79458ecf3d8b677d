//! Training driver: runs engine training iterations and records each
//! result in the session log.

use crate::engine::Engine;
use crate::event_log::EventLog;

/// Run exactly one training iteration and append its summary to the log.
pub fn train_once(engine: &mut dyn Engine, log: &mut EventLog) {
    let summary = engine.train();
    tracing::debug!(summary = %summary, "training iteration");
    log.push(summary);
}

/// Run `iterations` training iterations back to back.
///
/// Calls are strictly sequential: each `train()` has fully completed, and
/// its summary is in the log, before the next one starts. There is no
/// early exit; once started, all iterations run.
pub fn train_bulk(engine: &mut dyn Engine, log: &mut EventLog, iterations: u32) {
    for _ in 0..iterations {
        train_once(engine, log);
    }
    tracing::info!(iterations, "bulk training finished");
}
