/// Engine time in seconds.
#[derive(Copy, Clone, Debug, PartialEq, PartialOrd, Default)]
pub struct Time(pub f64);

impl Time {
    pub fn seconds(self) -> f64 {
        self.0
    }

    pub fn advance(self, dt_s: f64) -> Self {
        Time(self.0 + dt_s)
    }
}

#[cfg(test)]
mod tests {
    use super::Time;

    #[test]
    fn advance_accumulates() {
        let t = Time::default().advance(0.5).advance(0.25);
        assert_eq!(t.seconds(), 0.75);
    }
}
