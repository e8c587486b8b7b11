//! Progress reporting for long connectivity passes.

/// Receives `current` out of `total` steps of the pass named `label`.
pub trait ProgressSink {
    fn report(&mut self, label: &str, current: usize, total: usize);
}

/// Emits a `log::debug!` line every time the percentage moves.
#[derive(Debug, Default, Clone)]
pub struct LogProgress {
    last_percent: Option<usize>,
}

impl LogProgress {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProgressSink for LogProgress {
    fn report(&mut self, label: &str, current: usize, total: usize) {
        let percent = if total == 0 {
            100
        } else {
            current.min(total) * 100 / total
        };
        if current <= 1 {
            self.last_percent = None;
        }
        if self.last_percent != Some(percent) {
            self.last_percent = Some(percent);
            log::debug!("{label}: {current}/{total} ({percent}%)");
        }
    }
}

/// Discards every report.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn report(&mut self, _label: &str, _current: usize, _total: usize) {}
}

impl<P: ProgressSink + ?Sized> ProgressSink for &mut P {
    fn report(&mut self, label: &str, current: usize, total: usize) {
        (**self).report(label, current, total)
    }
}
