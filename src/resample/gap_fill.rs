//! Forward-fill of missing sensor readings

/// Replace every `sentinel` with the most recent non-sentinel value
///
/// Sentinels that precede the first valid reading have nothing to carry
/// forward and are left as they are.
pub fn fill_gaps(values: &[i64], sentinel: i64) -> Vec<i64> {
    let mut carry: Option<i64> = None;
    values
        .iter()
        .map(|&value| {
            if value == sentinel {
                carry.unwrap_or(sentinel)
            } else {
                carry = Some(value);
                value
            }
        })
        .collect()
}
