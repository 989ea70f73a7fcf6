//! Scroll interlude content and band arithmetic
//!
//! Segment `k` of `n` owns the band `[k/n, (k+1)/n)` of normalized scroll
//! progress, and peaks at the middle of its band.

use serde::{Deserialize, Serialize};

/// One block of the scroll-driven section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrollSegment {
    pub id: String,
    pub content: String,
    /// Normalized progress at which this block is meant to peak
    pub trigger_position: f64,
}

/// Visibility of a scroll block for a given progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScrollPhase {
    Hidden,
    Entering,
    Active,
    Fading,
}

/// Band boundaries of segment `k` of `n`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Band {
    pub start: f64,
    pub peak: f64,
    pub end: f64,
}

impl Band {
    pub fn of(k: usize, n: usize) -> Self {
        let n = n.max(1) as f64;
        let k = k as f64;
        Self {
            start: k / n,
            peak: (k + 0.5) / n,
            end: (k + 1.0) / n,
        }
    }
}

/// Phase of segment `k` of `n` at `progress`
pub fn phase_at(k: usize, n: usize, progress: f64) -> ScrollPhase {
    let band = Band::of(k, n);
    let is_last = k + 1 >= n;

    if progress < band.start {
        ScrollPhase::Hidden
    } else if progress < band.peak {
        ScrollPhase::Entering
    } else if progress < band.end || is_last {
        ScrollPhase::Active
    } else {
        ScrollPhase::Fading
    }
}

/// Index of the band containing `progress`
pub fn band_index(n: usize, progress: f64) -> usize {
    if n == 0 {
        return 0;
    }
    let index = (progress.clamp(0.0, 1.0) * n as f64).floor() as usize;
    index.min(n - 1)
}
