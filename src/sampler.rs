use rand::Rng;

/// Source of uniform reals in [0,1) for the randomized 1-median solver.
pub trait UniformSampler {
    fn sample_uniform(&mut self, count: usize) -> Vec<f64>;
}

impl<R: Rng> UniformSampler for R {
    fn sample_uniform(&mut self, count: usize) -> Vec<f64> {
        (0..count).map(|_| self.gen::<f64>()).collect()
    }
}

/// Maps a uniform sample u in [0,1) to a curve index in 0..n.
pub(crate) fn scale_to_index(u: f64, n: usize) -> usize {
    let idx = (u * n as f64).floor() as usize;
    idx.min(n - 1)
}
