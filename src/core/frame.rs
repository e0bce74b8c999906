/// Frame timing handed to every per-frame operation.
///
/// `value` is the raw delta in milliseconds; `factor` scales per-frame
/// speeds so that a 60 fps frame has factor 1.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameDelta {
    pub value: f32,
    pub factor: f32,
}

impl FrameDelta {
    pub fn from_millis(ms: f32) -> Self {
        let value = if ms.is_finite() { ms.max(0.0) } else { 0.0 };
        Self { value, factor: value * 60.0 / 1000.0 }
    }

    pub fn seconds(&self) -> f32 {
        self.value / 1000.0
    }
}

impl Default for FrameDelta {
    fn default() -> Self {
        Self::from_millis(1000.0 / 60.0)
    }
}
