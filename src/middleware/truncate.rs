//! Bounded-size payload summaries.

/// Separator placed between the kept head and tail.
pub const MARKER: &str = " ... ";

/// Default half-length threshold.
pub const DEFAULT_HALF_LENGTH: usize = 512;

/// Shorten `value` to at most `half` leading and `half` trailing characters.
///
/// Values of up to `2 * half` characters are returned unchanged. Anything
/// longer becomes `head + MARKER + tail`, so a value of `2 * half + 1`
/// characters comes out longer than it went in.
pub fn truncate(value: &str, half: usize) -> String {
    let len = value.chars().count();
    if len <= half.saturating_mul(2) {
        return value.to_string();
    }

    let head_end = value
        .char_indices()
        .nth(half)
        .map(|(i, _)| i)
        .unwrap_or(value.len());
    let tail_start = if half == 0 {
        value.len()
    } else {
        value
            .char_indices()
            .nth_back(half - 1)
            .map(|(i, _)| i)
            .unwrap_or(0)
    };

    let mut out = String::with_capacity(head_end + MARKER.len() + (value.len() - tail_start));
    out.push_str(&value[..head_end]);
    out.push_str(MARKER);
    out.push_str(&value[tail_start..]);
    out
}
