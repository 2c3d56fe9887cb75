//! Multi-part byte-range layout.
//!
//! Ranges are computed up front from the total length and the fixed part
//! size, then consumed one at a time. Keeping the math separate from any
//! I/O makes the layout testable on its own.

/// One part's byte extent within the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PartRange {
    /// Zero-based part index; also the token's position at finalize.
    pub index: usize,
    pub offset: u64,
    pub length: u64,
}

impl PartRange {
    /// Offset one past this range's last byte.
    pub fn end(&self) -> u64 {
        self.offset + self.length
    }
}

/// Split `total` bytes into contiguous, non-overlapping ranges of
/// `part_size` bytes, the last range absorbing the remainder. Covers
/// `[0, total)` exactly.
pub fn part_ranges(total: u64, part_size: u64) -> Vec<PartRange> {
    debug_assert!(part_size > 0);
    let count = total.div_ceil(part_size) as usize;
    (0..count)
        .map(|index| {
            let offset = index as u64 * part_size;
            PartRange {
                index,
                offset,
                length: part_size.min(total - offset),
            }
        })
        .collect()
}
