use foundation::time::Time;

/// Display refresh rate the render loop assumes between callbacks.
pub const DISPLAY_HZ: f64 = 60.0;

/// Position of one render callback in the loop's sequence.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Frame {
    pub index: u64,
    pub dt_s: f64,
    /// `index * dt_s`.
    pub time: Time,
}

impl Frame {
    pub fn new(index: u64, dt_s: f64) -> Self {
        Self {
            index,
            dt_s,
            time: Time(index as f64 * dt_s),
        }
    }

    pub fn first() -> Self {
        Self::new(0, 1.0 / DISPLAY_HZ)
    }

    pub fn next(self) -> Self {
        Self::new(self.index + 1, self.dt_s)
    }
}
