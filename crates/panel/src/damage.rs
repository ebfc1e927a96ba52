//! Damage accumulation
//!
//! Pending damage is a single bounding rectangle. Merging never shrinks
//! it, so a failed flush can leave it in place and the next flush still
//! covers everything that changed.

use platform::Rect;

/// Merge a new damage rectangle into the pending one.
///
/// - no pending region: `new` unchanged
/// - zero-area operand: the other operand
/// - otherwise: the bounding box of both
pub fn merge(old: Option<Rect>, new: Rect) -> Rect {
    match old {
        None => new,
        Some(old) if new.is_empty() => old,
        Some(old) if old.is_empty() => new,
        Some(old) => old.union(&new),
    }
}

/// Pending damage of one panel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DamageTracker {
    pending: Option<Rect>,
}

impl DamageTracker {
    /// Tracker with nothing pending.
    pub const fn new() -> Self {
        Self { pending: None }
    }

    /// Fold `rect` into the pending region.
    pub fn add(&mut self, rect: Rect) {
        self.pending = Some(merge(self.pending, rect));
    }

    /// Pending region, if it covers any pixel.
    pub fn pending(&self) -> Option<Rect> {
        self.pending.filter(|r| !r.is_empty())
    }

    /// Mark the whole `width × height` surface as damaged.
    pub fn mark_full(&mut self, width: u16, height: u16) {
        self.pending = Some(Rect::full(width, height));
    }

    /// Forget pending damage after a successful flush.
    pub fn clear(&mut self) {
        self.pending = None;
    }

    /// True when nothing needs to be sent.
    pub fn is_clean(&self) -> bool {
        self.pending().is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_damage_is_taken_as_is() {
        let r = Rect::new(3, 4, 10, 12);
        assert_eq!(merge(None, r), r);
    }

    #[test]
    fn merge_is_bounding_box() {
        let merged = merge(Some(Rect::new(0, 0, 10, 10)), Rect::new(50, 60, 70, 80));
        assert_eq!(merged, Rect::new(0, 0, 70, 80));
    }

    #[test]
    fn empty_operand_is_ignored() {
        let r = Rect::new(5, 5, 6, 6);
        assert_eq!(merge(Some(r), Rect::new(100, 100, 100, 120)), r);
        assert_eq!(merge(Some(Rect::new(9, 9, 9, 9)), r), r);
    }

    #[test]
    fn merge_with_self_is_identity() {
        let r = Rect::new(1, 2, 3, 4);
        assert_eq!(merge(Some(r), r), r);
    }

    #[test]
    fn tracker_lifecycle() {
        let mut t = DamageTracker::new();
        assert!(t.is_clean());
        t.add(Rect::new(0, 0, 0, 10));
        assert!(t.is_clean(), "zero-area damage is not pending");
        t.add(Rect::new(2, 2, 4, 4));
        t.add(Rect::new(10, 1, 12, 3));
        assert_eq!(t.pending(), Some(Rect::new(2, 1, 12, 4)));
        t.clear();
        assert!(t.is_clean());
        t.mark_full(320, 480);
        assert_eq!(t.pending(), Some(Rect::full(320, 480)));
    }
}
