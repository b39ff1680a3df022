use harris_core::{default_threads, HarrisConfig};
use crate::config::DetectorConfig;
use crate::detector::HarrisDetector;
use crate::error::HarrisResult;

/// Builder for creating a `HarrisDetector`
#[derive(Debug, Clone)]
pub struct DetectorBuilder {
    config: HarrisConfig,
    width: usize,
    height: usize,
    n_threads: usize,
}

impl DetectorBuilder {
    /// Create a new builder with default settings
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            config: HarrisConfig::default(),
            width,
            height,
            n_threads: default_threads(),
        }
    }

    /// Set the Gaussian window size (odd)
    pub fn kernel_size(mut self, size: usize) -> Self {
        self.config.gaussian_kernel_size = size;
        self
    }

    /// Set the Gaussian sigma (0 derives it from the window size)
    pub fn sigma(mut self, sigma: f64) -> Self {
        self.config.gaussian_sigma = sigma;
        self
    }

    /// Set the Harris constant `a`
    pub fn harris_constant(mut self, a: f64) -> Self {
        self.config.harris_constant = a;
        self
    }

    /// Set the cornerness threshold
    pub fn threshold(mut self, threshold: f64) -> Self {
        self.config.cornerness_threshold = threshold;
        self
    }

    /// Set the maximum number of corners returned
    pub fn top_k(mut self, k: usize) -> Self {
        self.config.top_k = k;
        self
    }

    /// Set the worker count recorded in the resulting [`DetectorConfig`].
    ///
    /// The detector itself runs on whatever rayon pool is current; the
    /// count takes effect only when passed to
    /// [`harris_core::init_thread_pool`] (the `harris` binary does this).
    /// [`build`](Self::build) ignores it.
    pub fn threads(mut self, n_threads: usize) -> Self {
        self.n_threads = n_threads;
        self
    }

    /// Build the `HarrisDetector`
    pub fn build(self) -> HarrisResult<HarrisDetector> {
        HarrisDetector::new(self.config, self.width, self.height)
    }

    /// Generate a summary of the builder's configuration
    pub fn summary(&self) -> String {
        self.clone().to_config().summary()
    }

    /// Create a builder from an existing `DetectorConfig`
    pub fn from_config(config: DetectorConfig) -> Self {
        Self {
            config: config.core,
            width: config.width,
            height: config.height,
            n_threads: config.n_threads,
        }
    }

    /// Convert the builder into a `DetectorConfig`
    pub fn to_config(self) -> DetectorConfig {
        DetectorConfig {
            core: self.config,
            width: self.width,
            height: self.height,
            n_threads: self.n_threads,
            name: None,
            description: None,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }
}
