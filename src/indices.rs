/// The position of a node in a sequential table.
///
/// See the `nodes` arena in the [`List`] structure for an example of this
/// construction. Nodes are never allocated or freed once the arena has been
/// built, so an index remains valid for the whole lifetime of the list.
///
/// [`List`]: `crate::list::List`
#[derive(Debug, Eq, PartialEq, Copy, Clone)]
#[repr(transparent)]
pub struct NodeIndex(usize);

impl NodeIndex {
    /// Creates a new index.
    #[must_use]
    pub const fn new(ix: usize) -> Self {
        Self(ix)
    }

    /// Returns the index value as a primitive type.
    #[must_use]
    pub const fn get(self) -> usize {
        self.0
    }

    /// Returns the position of the previous node in the table, or `None`
    /// if this index refers to the first record in the table.
    #[must_use]
    pub const fn decrement(self) -> Option<Self> {
        // Workaround for `Option::map` not being `const fn` in stable Rust.
        if let Some(ix) = self.0.checked_sub(1) {
            Some(Self(ix))
        } else {
            None
        }
    }
}
