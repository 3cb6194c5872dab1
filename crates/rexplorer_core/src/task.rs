use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Shared flag telling an in-flight request its reply is no longer wanted.
#[derive(Debug, Clone)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self {
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }
}

impl Default for CancelToken {
    fn default() -> Self {
        Self::new()
    }
}

/// Holds the token of the latest request of one kind.
///
/// Starting a request cancels the previous one, so only the newest reply is
/// ever applied.
#[derive(Debug, Default)]
pub struct RequestSlot {
    current: Option<CancelToken>,
}

impl RequestSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self) -> CancelToken {
        self.cancel();

        let token = CancelToken::new();
        self.current = Some(token.clone());
        token
    }

    pub fn cancel(&mut self) {
        if let Some(token) = self.current.take() {
            token.cancel();
        }
    }

    pub fn is_pending(&self) -> bool {
        self.current.as_ref().is_some_and(|t| !t.is_cancelled())
    }

    /// Mark `token`'s request as done. Returns false for a superseded request.
    pub fn finish(&mut self, token: &CancelToken) -> bool {
        if token.is_cancelled() {
            return false;
        }

        self.current = None;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newer_request_supersedes_older() {
        let mut slot = RequestSlot::new();

        let first = slot.start();
        let second = slot.start();

        assert!(first.is_cancelled());
        assert!(!second.is_cancelled());
        assert!(!slot.finish(&first));
        assert!(slot.is_pending());
        assert!(slot.finish(&second));
        assert!(!slot.is_pending());
    }

    #[test]
    fn cancel_drops_pending_request() {
        let mut slot = RequestSlot::new();
        let token = slot.start();

        slot.cancel();
        assert!(token.is_cancelled());
        assert!(!slot.finish(&token));
    }
}
