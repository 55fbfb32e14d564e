//! Reusable row buffer for the mirrored-row pass
//!
//! Sized to the actual frame width on first use and kept across scans, so a
//! scanner that sees frames of one resolution allocates once.

/// Scratch buffer owned by a scanner
#[derive(Debug, Default)]
pub struct RowScratch {
    buffer: Vec<u8>,
    stats: AllocationStats,
}

impl RowScratch {
    /// Empty buffer; grows on first use
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-size for rows of `width` pixels
    pub fn with_capacity(width: usize) -> Self {
        Self {
            buffer: Vec::with_capacity(width),
            stats: AllocationStats::default(),
        }
    }

    /// Fill the buffer with `row` reversed and return it
    pub fn mirrored(&mut self, row: &[u8]) -> &[u8] {
        if row.len() > self.buffer.capacity() {
            self.stats.record_allocation();
        } else {
            self.stats.record_reuse(row.len());
        }
        self.buffer.clear();
        self.buffer.extend(row.iter().rev());
        &self.buffer
    }

    /// Current buffer capacity in bytes
    pub fn capacity(&self) -> usize {
        self.buffer.capacity()
    }

    /// Reuse and allocation counters so far
    pub fn stats(&self) -> &AllocationStats {
        &self.stats
    }
}

/// Counters for monitoring scratch reuse
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct AllocationStats {
    /// Fills served from existing capacity
    pub reuses: usize,
    /// Fills that had to grow the buffer
    pub allocations: usize,
    /// Bytes written without growing
    pub bytes_reused: usize,
}

impl AllocationStats {
    fn record_reuse(&mut self, bytes: usize) {
        self.reuses += 1;
        self.bytes_reused += bytes;
    }

    fn record_allocation(&mut self) {
        self.allocations += 1;
    }
}
