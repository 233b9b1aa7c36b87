//! Shared numeric and ordering helpers
//!
//! Every rate in the crate goes through [`percentage`], which is the only
//! place a zero denominator is handled.

/// Round `value` to `decimals` places
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// `part / whole * 100`, rounded; `0.0` when `whole` is zero
pub fn percentage(part: u64, whole: u64, decimals: u32) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    round_to(part as f64 / whole as f64 * 100.0, decimals)
}

/// Sort by `key` descending and keep the first `limit` items
///
/// The sort is stable, so items with equal keys keep their original relative
/// order.
pub fn rank_by<T, K, F>(items: &[T], limit: usize, key: F) -> Vec<&T>
where
    K: Ord,
    F: Fn(&T) -> K,
{
    let mut ranked: Vec<&T> = items.iter().collect();
    ranked.sort_by(|a, b| key(b).cmp(&key(a)));
    ranked.truncate(limit);
    ranked
}

/// The trailing `n` items in their original order
///
/// Sequences are chronological, so this is the "most recent N" view; callers
/// reverse it if they want newest first.
pub fn last_n<T>(items: &[T], n: usize) -> &[T] {
    &items[items.len().saturating_sub(n)..]
}
