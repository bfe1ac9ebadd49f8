mod aggregate;
mod scanner;

pub use aggregate::Outcome;

use futures_util::future::join_all;
use glint_common::config::DetectionConfig;
use glint_common::frame::Frame;
use std::ops::Range;
use std::sync::Arc;
use tracing::debug;

use crate::DetectorError;

/// Scan a live frame against the base frame and report one coordinate.
///
/// One blocking worker per column strip, spawned fresh for this request and
/// joined before returning, so detection is synchronous from the session's
/// point of view. The frame and base are shared read-only for the duration
/// of the scan.
pub async fn detect(
    frame: Frame,
    base: Option<Arc<Frame>>,
    config: &DetectionConfig,
) -> Result<Outcome, DetectorError> {
    let frame = Arc::new(frame);
    let ranges = strips(frame.width(), config.workers);

    let mut workers = Vec::with_capacity(ranges.len());
    for cols in ranges {
        let frame = Arc::clone(&frame);
        let base = base.clone();
        let threshold = config.threshold;
        let capacity = config.capacity;
        workers.push(tokio::task::spawn_blocking(move || {
            scanner::scan_strip(&frame, base.as_deref(), cols, threshold, capacity)
        }));
    }

    let mut lists = Vec::with_capacity(workers.len());
    for joined in join_all(workers).await {
        lists.push(joined.map_err(|e| DetectorError::Worker(e.to_string()))?);
    }
    debug!(
        occupied = lists.iter().filter(|l| !l.is_empty()).count(),
        "strip scans complete"
    );

    Ok(aggregate::merge(&lists, config.capacity))
}

/// Column ranges assigned to the scan workers.
///
/// Each strip gets `width / workers` columns; the final strip also takes the
/// remainder, so the ranges always tile `[0, width)` exactly, gap-free, for
/// any width including widths below the worker count.
fn strips(width: u32, workers: u32) -> Vec<Range<u32>> {
    let workers = workers.max(1);
    let base = width / workers;
    (0..workers)
        .map(|i| {
            let start = i * base;
            let end = if i == workers - 1 { width } else { start + base };
            start..end
        })
        .collect()
}
