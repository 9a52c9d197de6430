pub mod approval;
pub mod attachments;
pub mod closing;
pub mod intake;
pub mod pager;
pub mod timeline;

use std::sync::atomic::{AtomicU64, Ordering};

/// Token identifying one open dialog. Mutations started from a dialog
/// are fire-and-forget: closing the dialog does not cancel them, but a
/// completion carrying a stale token must not produce UI effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionToken(u64);

/// Issues and checks dialog session tokens. Opening a dialog takes a
/// fresh token; closing it (or opening the next one) advances the
/// counter so older tokens go stale.
#[derive(Debug, Default)]
pub struct DialogSession {
    current: AtomicU64,
}

impl DialogSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a new dialog session, invalidating every prior token.
    pub fn open(&self) -> SessionToken {
        SessionToken(self.current.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Close the current session; completions after this are discarded.
    pub fn close(&self) {
        self.current.fetch_add(1, Ordering::SeqCst);
    }

    pub fn is_current(&self, token: SessionToken) -> bool {
        self.current.load(Ordering::SeqCst) == token.0
    }
}
