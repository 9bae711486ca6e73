//! Zero-crossing square wave built from the recording's own peaks.

use super::sample::PcmSample;

/// Global `(min, max)` of the stream, or `None` when it is empty.
///
/// Values that do not compare (float NaN) are skipped.
pub fn min_max<S: PcmSample>(samples: &[S]) -> Option<(S, S)> {
    let mut iter = samples.iter().copied().filter(|s| s.partial_cmp(s).is_some());
    let first = iter.next()?;
    let mut min = first;
    let mut max = first;
    for sample in iter {
        if sample < min {
            min = sample;
        }
        if sample > max {
            max = sample;
        }
    }
    Some((min, max))
}

/// Replace every sample with the global max when it is `>= 0`, otherwise the global min.
///
/// Zero counts as HIGH. The threshold never applies here.
pub fn extremize<S: PcmSample>(samples: &[S]) -> Vec<S> {
    let Some((min, max)) = min_max(samples) else {
        return Vec::new();
    };
    samples
        .iter()
        .map(|&sample| if sample >= S::ZERO { max } else { min })
        .collect()
}
