/// Counts simulation ticks. Tick 0 is the state before the first tick ran.
#[derive(Debug, Clone, Default)]
pub struct SimClock {
    tick: u64,
}

impl SimClock {
    /// A clock at tick 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start the next tick and return its number.
    pub fn advance(&mut self) -> u64 {
        self.tick += 1;
        self.tick
    }

    /// The last tick run, or 0 before the first.
    pub fn tick(&self) -> u64 {
        self.tick
    }
}
