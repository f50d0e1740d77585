//! Blended upload/download progress.
//!
//! A request has two progress event streams (bytes sent, bytes received).
//! `blend` maps either stream onto one 0-100 scale split at `upload_ratio`:
//! the upload phase fills `[0, ratio]`, the download phase `[ratio, 100]`,
//! so a caller can drive a single progress bar from both.

use std::fmt;
use std::sync::Arc;

/// Callback receiving blended percentages. Runs on the transport thread,
/// so it must be cheap and non-blocking.
pub type ProgressFn = Arc<dyn Fn(u8) + Send + Sync>;

/// Which half of the exchange an event belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Upload,
    Download,
}

/// Maps a raw `(loaded, total)` pair onto the blended 0-100 scale.
///
/// The raw phase percentage is `round(loaded / total * 100)`; a `total` of 0
/// counts as 100 for that phase (no division). Upload events are scaled into
/// `[0, upload_ratio]` and download events into `[upload_ratio, 100]`, both
/// with a ceiling so any movement is visible. `loaded > total` clamps to the
/// phase boundary.
pub fn blend(phase: Phase, loaded: u64, total: u64, upload_ratio: u8) -> u8 {
    let raw: u32 = if total == 0 {
        100
    } else {
        (((loaded as f64 / total as f64) * 100.0).round() as u32).min(100)
    };
    let ratio = u32::from(upload_ratio);
    let blended = match phase {
        Phase::Upload => (raw * ratio).div_ceil(100),
        Phase::Download => (raw * (100 - ratio)).div_ceil(100) + ratio,
    };
    blended.min(100) as u8
}

/// Routes raw progress events through `blend` into the caller's callback.
///
/// Emits only strictly increasing values: duplicates are suppressed, and a
/// late upload event observed after download values have been reported
/// (the two streams interleave on some transports) cannot drag the
/// percentage backwards. The callback therefore sees a monotonically
/// non-decreasing stream across the whole request lifecycle.
pub struct ProgressSink {
    upload_ratio: u8,
    callback: ProgressFn,
    last: Option<u8>,
}

impl ProgressSink {
    pub fn new(upload_ratio: u8, callback: ProgressFn) -> Self {
        Self {
            upload_ratio,
            callback,
            last: None,
        }
    }

    /// Feeds one raw event from either stream into the callback.
    pub fn observe(&mut self, phase: Phase, loaded: u64, total: u64) {
        let pct = blend(phase, loaded, total, self.upload_ratio);
        if self.last.map_or(true, |last| pct > last) {
            self.last = Some(pct);
            (self.callback)(pct);
        }
    }
}

impl fmt::Debug for ProgressSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProgressSink")
            .field("upload_ratio", &self.upload_ratio)
            .field("last", &self.last)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn upload_complete_hits_ratio_exactly() {
        for ratio in 0..=100u8 {
            assert_eq!(blend(Phase::Upload, 500, 500, ratio), ratio);
        }
    }

    #[test]
    fn download_complete_hits_one_hundred() {
        for ratio in 0..=100u8 {
            assert_eq!(blend(Phase::Download, 500, 500, ratio), 100);
        }
    }

    #[test]
    fn blended_values_stay_in_bounds() {
        for ratio in [0u8, 1, 37, 50, 90, 99, 100] {
            for loaded in 0..=64u64 {
                let up = blend(Phase::Upload, loaded, 64, ratio);
                let down = blend(Phase::Download, loaded, 64, ratio);
                assert!(up <= ratio, "upload {} exceeded ratio {}", up, ratio);
                assert!(down >= ratio, "download {} below ratio {}", down, ratio);
                assert!(down <= 100);
            }
        }
    }

    #[test]
    fn zero_total_counts_as_complete_phase() {
        assert_eq!(blend(Phase::Upload, 0, 0, 90), 90);
        assert_eq!(blend(Phase::Download, 0, 0, 90), 100);
    }

    #[test]
    fn ratio_zero_moves_only_in_download_range() {
        assert_eq!(blend(Phase::Upload, 50, 100, 0), 0);
        assert_eq!(blend(Phase::Download, 50, 100, 0), 50);
        assert_eq!(blend(Phase::Download, 100, 100, 0), 100);
    }

    #[test]
    fn ratio_one_hundred_leaves_no_download_movement() {
        assert_eq!(blend(Phase::Upload, 100, 100, 100), 100);
        assert_eq!(blend(Phase::Download, 1, 100, 100), 100);
        assert_eq!(blend(Phase::Download, 100, 100, 100), 100);
    }

    #[test]
    fn loaded_past_total_clamps() {
        assert_eq!(blend(Phase::Upload, 200, 100, 90), 90);
        assert_eq!(blend(Phase::Download, 200, 100, 90), 100);
    }

    #[test]
    fn sink_suppresses_duplicates_and_crosses_seam() {
        let seen: Arc<Mutex<Vec<u8>>> = Arc::new(Mutex::new(Vec::new()));
        let seen_cb = Arc::clone(&seen);
        let mut sink = ProgressSink::new(
            50,
            Arc::new(move |pct| seen_cb.lock().unwrap().push(pct)),
        );
        sink.observe(Phase::Upload, 0, 100);
        sink.observe(Phase::Upload, 1, 100);
        sink.observe(Phase::Upload, 1, 100);
        sink.observe(Phase::Upload, 100, 100);
        sink.observe(Phase::Download, 100, 100);
        let seen = seen.lock().unwrap();
        assert_eq!(*seen, vec![0, 1, 50, 100]);
        assert!(seen.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn sink_ignores_late_upload_events_after_download_begins() {
        let seen: Arc<Mutex<Vec<u8>>> = Arc::new(Mutex::new(Vec::new()));
        let seen_cb = Arc::clone(&seen);
        let mut sink = ProgressSink::new(
            50,
            Arc::new(move |pct| seen_cb.lock().unwrap().push(pct)),
        );
        sink.observe(Phase::Upload, 100, 100);
        sink.observe(Phase::Download, 50, 100);
        // Interleaved transports keep reporting completed upload totals.
        sink.observe(Phase::Upload, 100, 100);
        sink.observe(Phase::Download, 100, 100);
        assert_eq!(*seen.lock().unwrap(), vec![50, 75, 100]);
    }
}
