use std::fmt;

/// Scoped pointer capture.
///
/// Holding the guard keeps pointer input routed to its owner. Dropping it,
/// on a normal release or because the gesture was cancelled, releases the
/// capture.
pub struct PointerCapture {
    owner: String,
    release: Option<Box<dyn FnOnce() + Send + Sync>>,
}

impl PointerCapture {
    /// A capture whose release runs `release`.
    pub fn new(owner: impl Into<String>, release: impl FnOnce() + Send + Sync + 'static) -> Self {
        Self {
            owner: owner.into(),
            release: Some(Box::new(release)),
        }
    }

    /// A capture with nothing to release.
    pub fn detached(owner: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            release: None,
        }
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }
}

impl fmt::Debug for PointerCapture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PointerCapture")
            .field("owner", &self.owner)
            .finish_non_exhaustive()
    }
}

impl Drop for PointerCapture {
    fn drop(&mut self) {
        if let Some(release) = self.release.take() {
            log::trace!("Releasing pointer capture held by {}", self.owner);
            release();
        }
    }
}
