//! Resource spans claimed by a peripheral: register windows and interrupt lines.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Memory,
    Interrupt,
}

/// An inclusive `[start, end]` range of addresses, or a single interrupt line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceSpan {
    pub kind: ResourceKind,
    pub start: usize,
    pub end: usize,
}

impl ResourceSpan {
    /// A register window of `len` bytes at `start`. `len` must be non-zero.
    pub const fn memory(start: usize, len: usize) -> ResourceSpan {
        ResourceSpan {
            kind: ResourceKind::Memory,
            start,
            end: start + len - 1,
        }
    }

    pub const fn irq(line: usize) -> ResourceSpan {
        ResourceSpan {
            kind: ResourceKind::Interrupt,
            start: line,
            end: line,
        }
    }

    pub const fn len(&self) -> usize {
        self.end - self.start + 1
    }

    /// Check `end >= start`, and that interrupt spans name exactly one line.
    pub const fn is_valid(&self) -> bool {
        match self.kind {
            ResourceKind::Memory => self.end >= self.start,
            ResourceKind::Interrupt => self.end == self.start,
        }
    }

    /// Whether two spans of the same kind claim a common address or line.
    pub fn overlaps(&self, other: &ResourceSpan) -> bool {
        self.kind == other.kind && self.start <= other.end && other.start <= self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_span_is_inclusive() {
        let span = ResourceSpan::memory(0x5c00_0000, 0x1000);
        assert_eq!(span.end, 0x5c00_0fff);
        assert_eq!(span.len(), 0x1000);
        assert!(span.is_valid());
    }

    #[test]
    fn interrupt_span_must_be_single_valued() {
        assert!(ResourceSpan::irq(24).is_valid());
        let wide = ResourceSpan {
            kind: ResourceKind::Interrupt,
            start: 67,
            end: 70,
        };
        assert!(!wide.is_valid());
    }

    #[test]
    fn overlap_only_within_same_kind() {
        let a = ResourceSpan::memory(0x1000, 0x100);
        let b = ResourceSpan::memory(0x10ff, 0x10);
        let c = ResourceSpan::memory(0x1100, 0x10);
        assert!(a.overlaps(&b));
        assert!(!a.overlaps(&c));
        assert!(!ResourceSpan::irq(0x1000).overlaps(&a));
    }
}
