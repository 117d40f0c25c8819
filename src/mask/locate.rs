use crate::mask::grid::Mask;

/// Exclusive end column of the active run starting at `start` in `row`.
///
/// Returns `start` when that cell is not active; otherwise scans right to the first inactive
/// column or `row_width`.
pub fn locate_span(mask: &Mask, row: u32, start: u32, row_width: u32) -> u32 {
    if !mask.is_active(start, row) {
        return start;
    }
    (start..row_width)
        .find(|&x| !mask.is_active(x, row))
        .unwrap_or(row_width)
}

#[cfg(test)]
#[path = "../../tests/unit/mask/locate.rs"]
mod tests;
