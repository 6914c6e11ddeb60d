use std::fmt;
use std::hash::Hash;

pub type DefaultIx = u32;

/// Integer type used to address nodes in the arena.
///
/// # Safety
///
/// `new(x).index()` must return `x` for every `x <= max().index()`.
pub unsafe trait IndexType: Copy + Default + Hash + Ord + fmt::Debug + 'static {
    fn new(x: usize) -> Self;
    fn index(&self) -> usize;
    fn max() -> Self;
}

unsafe impl IndexType for u32 {
    #[inline(always)]
    fn new(x: usize) -> Self {
        x as u32
    }
    #[inline(always)]
    fn index(&self) -> usize {
        *self as usize
    }
    #[inline(always)]
    fn max() -> Self {
        u32::MAX
    }
}

unsafe impl IndexType for u16 {
    #[inline(always)]
    fn new(x: usize) -> Self {
        x as u16
    }
    #[inline(always)]
    fn index(&self) -> usize {
        *self as usize
    }
    #[inline(always)]
    fn max() -> Self {
        u16::MAX
    }
}

unsafe impl IndexType for usize {
    #[inline(always)]
    fn new(x: usize) -> Self {
        x
    }
    #[inline(always)]
    fn index(&self) -> usize {
        *self
    }
    #[inline(always)]
    fn max() -> Self {
        usize::MAX
    }
}

/// Node identifier.
#[derive(Copy, Clone, Default, PartialEq, PartialOrd, Eq, Ord, Hash)]
pub struct NodeIndex<Ix = DefaultIx>(Ix);

impl<Ix: IndexType> NodeIndex<Ix> {
    /// The shared black node standing in for every missing child or parent.
    pub(crate) const SENTINEL_INDEX: usize = 0;
    /// The black node whose left child is the real root.
    pub(crate) const ROOT_STUB_INDEX: usize = 1;

    #[inline]
    pub fn new(x: usize) -> Self {
        NodeIndex(IndexType::new(x))
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0.index()
    }

    #[inline]
    pub(crate) fn sentinel() -> Self {
        NodeIndex::new(Self::SENTINEL_INDEX)
    }

    #[inline]
    pub(crate) fn root_stub() -> Self {
        NodeIndex::new(Self::ROOT_STUB_INDEX)
    }

    /// Whether this index names one of the two fixed bookkeeping nodes.
    #[inline]
    pub(crate) fn is_reserved(self) -> bool {
        self.index() <= Self::ROOT_STUB_INDEX
    }
}

impl<Ix: fmt::Debug> fmt::Debug for NodeIndex<Ix> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "NodeIndex({:?})", self.0)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn reserved_indices_are_sentinel_and_stub() {
        assert_eq!(NodeIndex::<u32>::sentinel().index(), 0);
        assert_eq!(NodeIndex::<u32>::root_stub().index(), 1);
        assert!(NodeIndex::<u32>::sentinel().is_reserved());
        assert!(NodeIndex::<u32>::root_stub().is_reserved());
        assert!(!NodeIndex::<u32>::new(2).is_reserved());
    }

    #[test]
    fn index_survives_conversion_up_to_max() {
        let max = <u16 as IndexType>::max().index();
        assert_eq!(max, u16::MAX as usize);
        assert_eq!(NodeIndex::<u16>::new(max).index(), max);
    }
}
