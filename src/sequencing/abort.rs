use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

/// Cross-thread abort flag checked by the sequencer at every loop boundary.
///
/// Clones share the same flag, so one clone can live in a Ctrl+C handler or
/// a UI thread while the sequencer polls another.
#[derive(Debug, Clone, Default)]
pub struct AbortSignal {
    flag: Arc<AtomicBool>,
}

impl AbortSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn trigger(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    pub fn is_triggered(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_state() {
        let signal = AbortSignal::new();
        let remote = signal.clone();
        assert!(!signal.is_triggered());
        remote.trigger();
        assert!(signal.is_triggered());
    }

    #[test]
    fn test_trigger_from_other_thread() {
        let signal = AbortSignal::new();
        let remote = signal.clone();
        std::thread::spawn(move || remote.trigger())
            .join()
            .unwrap();
        assert!(signal.is_triggered());
    }
}
