/// Per-frame time source.
///
/// Wraps the platform's elapsed-seconds counter and never reports a value smaller than the one
/// before it, even if the underlying timer stumbles.
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last: f64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn read(&mut self, elapsed: f64) -> f64 {
        if elapsed > self.last {
            self.last = elapsed;
        }

        self.last
    }

    pub fn last(&self) -> f64 {
        self.last
    }
}

#[cfg(test)]
mod test {
    use super::FrameClock;

    #[test]
    fn clock_never_goes_backward() {
        let mut clock = FrameClock::new();
        let readings: Vec<f64> = [0.0, 0.25, 0.1, 0.5, f64::NAN, 0.75]
            .iter()
            .map(|&t| clock.read(t))
            .collect();

        assert_eq!(readings, vec![0.0, 0.25, 0.25, 0.5, 0.5, 0.75]);
        assert_eq!(clock.last(), 0.75);
    }
}
