/// Rotations performed by the rebalancing passes since the tree was built or
/// the counters were last reset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RotationStats {
    /// Left rotations done while repairing after an insertion
    pub insert_left: u64,
    /// Right rotations done while repairing after an insertion
    pub insert_right: u64,
    /// Left rotations done while repairing after a removal
    pub delete_left: u64,
    /// Right rotations done while repairing after a removal
    pub delete_right: u64,
}

impl RotationStats {
    /// Sum of all four counters.
    #[inline]
    pub fn total(&self) -> u64 {
        self.insert_left + self.insert_right + self.delete_left + self.delete_right
    }
}
