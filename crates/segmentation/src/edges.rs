//! Negative-To-Non-Negative Edge Detection

/// Indices `i` where `signal[i] < 0` and `signal[i + 1] >= 0`.
///
/// Returns an empty vector for signals shorter than two samples. Returned
/// indices are strictly increasing.
pub fn rising_edges(signal: &[i8]) -> Vec<usize> {
    signal
        .windows(2)
        .enumerate()
        .filter(|(_, pair)| pair[0] < 0 && pair[1] >= 0)
        .map(|(i, _)| i)
        .collect()
}
