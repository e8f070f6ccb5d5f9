use std::sync::{Arc, PoisonError, RwLock};

/// Whether the local store schema is usable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreStatus {
    /// No readiness check has run yet.
    Idle,
    Ready,
    Unready,
}

impl StoreStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            StoreStatus::Idle => "idle",
            StoreStatus::Ready => "ready",
            StoreStatus::Unready => "unready",
        }
    }
}

/// Shared handle to the store status.
///
/// The store initializer writes it; checkout only reads it.
#[derive(Debug, Clone)]
pub struct Readiness {
    status: Arc<RwLock<StoreStatus>>,
}

impl Default for Readiness {
    fn default() -> Self {
        Self::new()
    }
}

impl Readiness {
    pub fn new() -> Self {
        Self {
            status: Arc::new(RwLock::new(StoreStatus::Idle)),
        }
    }

    pub fn status(&self) -> StoreStatus {
        *self.status.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn is_ready(&self) -> bool {
        self.status() == StoreStatus::Ready
    }

    pub fn set(&self, status: StoreStatus) {
        *self.status.write().unwrap_or_else(PoisonError::into_inner) = status;
    }
}
