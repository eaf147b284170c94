/// Converts variable frame time into fixed simulation steps.
///
/// At most one step fires per frame. After a stall the leftover time is
/// reduced modulo the interval instead of being replayed as a burst.
#[derive(Clone, Debug)]
pub struct Ticker {
    interval: f64,
    accumulated: f64,
}

impl Ticker {
    pub fn new(interval: f64) -> Self {
        Self {
            interval,
            accumulated: 0.0,
        }
    }

    /// Feeds `elapsed_ms` of frame time and reports whether a step is due.
    pub fn advance(&mut self, elapsed_ms: f64) -> bool {
        self.accumulated += elapsed_ms / 1000.0;
        if self.accumulated >= self.interval {
            self.accumulated %= self.interval;
            true
        } else {
            false
        }
    }
}
