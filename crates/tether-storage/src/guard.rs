use parking_lot::RwLock;

/// Shared/exclusive guard around a closure.
///
/// Not reentrant: an operation running under a guard must not acquire the
/// same guard again. Mutual exclusion only holds between callers that share
/// the *same* instance, so everything touching one file (or one tree) has to
/// go through one `RwGuard`.
#[derive(Debug, Default)]
pub struct RwGuard {
    lock: RwLock<()>,
}

impl RwGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `operation` in shared mode.
    pub fn read<T>(&self, operation: impl FnOnce() -> T) -> T {
        let _shared = self.lock.read();
        operation()
    }

    /// Run `operation` in exclusive mode, excluding every shared and exclusive holder.
    pub fn write<T>(&self, operation: impl FnOnce() -> T) -> T {
        let _exclusive = self.lock.write();
        operation()
    }
}
