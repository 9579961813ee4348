use std::sync::{Arc, Mutex};

/// Latest estimated horizontal offset of the tracked face, in degrees.
///
/// Positive angles mean the subject sits right of frame center. `None`
/// means no target is currently detected.
pub trait AngleSource: Send + Sync {
    fn latest(&self) -> Option<f64>;
}

/// Shared cell an external detector publishes angle estimates into.
#[derive(Clone, Default)]
pub struct SharedAngle {
    inner: Arc<Mutex<Option<f64>>>,
}

impl SharedAngle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Publish the newest estimate, or `None` when the target is lost.
    pub fn publish(&self, angle: Option<f64>) {
        *self.inner.lock().unwrap() = angle;
    }
}

impl AngleSource for SharedAngle {
    fn latest(&self) -> Option<f64> {
        *self.inner.lock().unwrap()
    }
}
