pub(crate) fn human_bytes(size: f64) -> String {
    let units = ["B", "KB", "MB", "GB", "TB", "PB", "EB"];
    let mut size = size;
    let mut unit_index = 0;
    let k = 1024.;

    while size >= k && unit_index < units.len() - 1 {
        size /= k;
        unit_index += 1;
    }

    format!("{:.1} {}", size, units[unit_index])
}

/// Rounds `x` up to a multiple of `divisor`, `None` on overflow.
pub(crate) fn make_divisible(x: usize, divisor: usize) -> Option<usize> {
    x.div_ceil(divisor).checked_mul(divisor)
}

/// Number of elements of a tensor with dimensions `dims`, `None` on overflow.
pub(crate) fn element_count(dims: &[usize]) -> Option<usize> {
    dims.iter().try_fold(1usize, |acc, x| acc.checked_mul(*x))
}
