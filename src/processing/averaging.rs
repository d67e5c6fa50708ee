use std::num::NonZeroUsize;

use crate::data::series::{AveragedSeries, RawSeries};

/// Collapse consecutive blocks of `n` raw samples into their arithmetic mean.
///
/// A running sum is emitted every time the 1-indexed position is a multiple of
/// `n`; the emitted x is the block's center index `index + 1 - n/2`. A trailing
/// partial block is dropped, never partially averaged, so the result always has
/// exactly `floor(len/n)` points. `n` is `NonZeroUsize` so the degenerate
/// cluster size cannot reach the division below.
pub fn time_average(raw: &RawSeries, n: NonZeroUsize) -> AveragedSeries {
    let n = n.get();
    let mut averaged = AveragedSeries::default();

    let mut sum = 0.0;
    for (index, value) in raw.y.iter().enumerate() {
        sum += value;
        if (index + 1) % n == 0 {
            averaged.y.push(sum / n as f64);
            averaged.x.push(index as f64 + 1.0 - n as f64 / 2.0);
            sum = 0.0;
        }
    }

    averaged
}
