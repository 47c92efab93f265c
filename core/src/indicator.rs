//! Loading-indicator capability.
//!
//! # Design
//! The indicator is injected into `ApiManager` as an `IndicatorHandle`: a
//! shared `Indicator` plus its own enabled flag. Clones of the handle share
//! both, so a UI layer can toggle the flag while calls are in flight. The
//! flag is read once when a call starts.
//!
//! Overlapping calls each show and hide independently. An indicator that is
//! not reentrant has to coordinate that itself.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Fire-and-forget show/hide surface, typically a platform spinner.
pub trait Indicator: Send + Sync {
    fn show(&self, message: Option<&str>);
    fn hide(&self);
}

/// Logs instead of drawing. Useful for headless hosts and CLIs.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingIndicator;

impl Indicator for TracingIndicator {
    fn show(&self, message: Option<&str>) {
        tracing::debug!(message = message.unwrap_or(""), "indicator shown");
    }

    fn hide(&self) {
        tracing::debug!("indicator hidden");
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoopIndicator;

impl Indicator for NoopIndicator {
    fn show(&self, _message: Option<&str>) {}
    fn hide(&self) {}
}

struct Shared {
    indicator: Arc<dyn Indicator>,
    enabled: AtomicBool,
}

/// Shared indicator with an enable/disable flag (enabled by default).
#[derive(Clone)]
pub struct IndicatorHandle {
    shared: Arc<Shared>,
}

impl IndicatorHandle {
    pub fn new(indicator: Arc<dyn Indicator>) -> Self {
        Self {
            shared: Arc::new(Shared {
                indicator,
                enabled: AtomicBool::new(true),
            }),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.shared.enabled.load(Ordering::Acquire)
    }

    pub fn set_enabled(&self, enabled: bool) {
        self.shared.enabled.store(enabled, Ordering::Release);
    }

    /// Show the indicator directly, regardless of the flag.
    pub fn show(&self, message: Option<&str>) {
        self.shared.indicator.show(message);
    }

    /// Hide the indicator directly, regardless of the flag.
    pub fn hide(&self) {
        self.shared.indicator.hide();
    }

    /// Start a call: shows the indicator if enabled. The returned guard
    /// hides it exactly once when dropped.
    pub fn begin(&self) -> IndicatorGuard<'_> {
        let shown = self.is_enabled();
        if shown {
            self.show(None);
        }
        IndicatorGuard {
            handle: self,
            shown,
        }
    }
}

impl Default for IndicatorHandle {
    fn default() -> Self {
        Self::new(Arc::new(TracingIndicator))
    }
}

impl fmt::Debug for IndicatorHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IndicatorHandle")
            .field("enabled", &self.is_enabled())
            .finish_non_exhaustive()
    }
}

/// Hides the indicator on drop if `begin` showed it.
#[derive(Debug)]
#[must_use = "dropping the guard hides the indicator immediately"]
pub struct IndicatorGuard<'a> {
    handle: &'a IndicatorHandle,
    shown: bool,
}

impl Drop for IndicatorGuard<'_> {
    fn drop(&mut self) {
        if self.shown {
            self.handle.hide();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    #[derive(Default)]
    struct Recorder {
        events: Mutex<Vec<String>>,
    }

    impl Indicator for Recorder {
        fn show(&self, message: Option<&str>) {
            self.events
                .lock()
                .unwrap()
                .push(format!("show:{}", message.unwrap_or("-")));
        }

        fn hide(&self) {
            self.events.lock().unwrap().push("hide".to_string());
        }
    }

    #[test]
    fn guard_shows_then_hides_once() {
        let recorder = Arc::new(Recorder::default());
        let handle = IndicatorHandle::new(recorder.clone());
        {
            let _guard = handle.begin();
            assert_eq!(*recorder.events.lock().unwrap(), vec!["show:-"]);
        }
        assert_eq!(*recorder.events.lock().unwrap(), vec!["show:-", "hide"]);
    }

    #[test]
    fn disabled_handle_does_nothing() {
        let recorder = Arc::new(Recorder::default());
        let handle = IndicatorHandle::new(recorder.clone());
        handle.set_enabled(false);
        drop(handle.begin());
        assert!(recorder.events.lock().unwrap().is_empty());
    }

    #[test]
    fn clones_share_the_flag() {
        let handle = IndicatorHandle::default();
        let other = handle.clone();
        assert!(other.is_enabled());
        handle.set_enabled(false);
        assert!(!other.is_enabled());
    }

    #[test]
    fn flag_is_read_when_the_call_starts() {
        let recorder = Arc::new(Recorder::default());
        let handle = IndicatorHandle::new(recorder.clone());
        let guard = handle.begin();
        handle.set_enabled(false);
        drop(guard);
        assert_eq!(*recorder.events.lock().unwrap(), vec!["show:-", "hide"]);
    }

    #[test]
    fn direct_show_passes_message() {
        let recorder = Arc::new(Recorder::default());
        let handle = IndicatorHandle::new(recorder.clone());
        handle.show(Some("Uploading"));
        handle.hide();
        assert_eq!(*recorder.events.lock().unwrap(), vec!["show:Uploading", "hide"]);
    }
}
