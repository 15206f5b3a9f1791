// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! # Strongly Typed Indices
//!
//! Decision variables, oracle constraint handles and monitor slots are all
//! plain positions, but mixing them up is a bug. [`TypedIndex`] tags a `usize`
//! with the space it indexes; the tag also names the index when printed.
//!
//! ```rust
//! use biobab_core::utils::index::{TypedIndex, TypedIndexTag};
//!
//! #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
//! struct RowTag;
//! impl TypedIndexTag for RowTag { const NAME: &'static str = "Row"; }
//!
//! let row = TypedIndex::<RowTag>::new(3);
//! assert_eq!(row.next().get(), 4);
//! assert_eq!(row.to_string(), "Row(3)");
//! ```

use std::{fmt, marker::PhantomData};

/// Marks an index space.
pub trait TypedIndexTag: Clone {
    const NAME: &'static str;
}

#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TypedIndex<T> {
    position: usize,
    space: PhantomData<T>,
}

impl<T> TypedIndex<T> {
    #[inline]
    pub const fn new(position: usize) -> Self {
        Self {
            position,
            space: PhantomData,
        }
    }

    #[inline]
    pub const fn get(&self) -> usize {
        self.position
    }

    /// Used to hand out fresh handles in order.
    #[inline]
    pub const fn next(&self) -> Self {
        Self::new(self.position + 1)
    }
}

impl<T: TypedIndexTag> fmt::Display for TypedIndex<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", T::NAME, self.position)
    }
}

impl<T: TypedIndexTag> fmt::Debug for TypedIndex<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
    struct HandleTag;

    impl TypedIndexTag for HandleTag {
        const NAME: &'static str = "Handle";
    }

    type Handle = TypedIndex<HandleTag>;

    #[test]
    fn test_handles_are_issued_in_order() {
        let first = Handle::new(0);
        let issued: Vec<usize> = std::iter::successors(Some(first), |h| Some(h.next()))
            .take(3)
            .map(|h| h.get())
            .collect();
        assert_eq!(issued, vec![0, 1, 2]);
    }

    #[test]
    fn test_printing_names_the_index_space() {
        assert_eq!(format!("{}", Handle::new(7)), "Handle(7)");
        assert_eq!(format!("{:?}", Handle::new(7)), "Handle(7)");
    }

    #[test]
    fn test_ordered_by_position() {
        let set: BTreeSet<Handle> = [5, 1, 3].into_iter().map(Handle::new).collect();
        assert_eq!(set.iter().map(Handle::get).collect::<Vec<_>>(), vec![1, 3, 5]);
    }
}
