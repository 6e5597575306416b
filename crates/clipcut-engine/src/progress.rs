//! Injectable progress reporting.

/// Observer for pipeline/scheduler progress updates.
///
/// Passed explicitly into entry points; the engine has no default sink.
pub trait ProgressObserver: Send + Sync {
    /// Report that `step` is underway at `percent` (0.0-100.0) completion.
    fn on_progress(&self, step: &str, percent: f32);
}

/// Observer that discards all updates. Useful for tests and batch callers
/// that do not surface progress.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl ProgressObserver for NoopObserver {
    fn on_progress(&self, _step: &str, _percent: f32) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recording {
        steps: Mutex<Vec<(String, f32)>>,
    }

    impl ProgressObserver for Recording {
        fn on_progress(&self, step: &str, percent: f32) {
            self.steps.lock().unwrap().push((step.to_string(), percent));
        }
    }

    #[test]
    fn test_observer_receives_updates() {
        let observer = Recording::default();
        observer.on_progress("ranking", 80.0);
        let steps = observer.steps.lock().unwrap();
        assert_eq!(steps.len(), 1);
        assert_eq!(steps[0].0, "ranking");
    }
}
