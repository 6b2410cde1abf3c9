/// Source of uniform samples in `[0, 1)`
///
/// Every `rand` generator implements this, so production code passes
/// `rand::rng()` and tests pass a seeded `StdRng` or a scripted source.
pub trait RandomSource {
    fn next_unit(&mut self) -> f64;

    /// Uniform value in `[low, high)`
    fn uniform(&mut self, low: f64, high: f64) -> f64 {
        low + self.next_unit() * (high - low)
    }

    /// Uniform integer in `[low, high]`
    fn uniform_int(&mut self, low: i64, high: i64) -> i64 {
        let span = (high - low + 1) as f64;
        let offset = (self.next_unit() * span).floor() as i64;
        low + offset.min(high - low)
    }
}

impl<R: rand::RngCore> RandomSource for R {
    fn next_unit(&mut self) -> f64 {
        rand::Rng::random::<f64>(self)
    }
}
