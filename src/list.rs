use crate::indices::NodeIndex;

/// A small integer that identifies a distinct element of a multiset.
///
/// Equal elements share the same rank, and ranks double as indices into the
/// table of distinct elements kept by a [`Permutations`] session.
///
/// [`Permutations`]: `crate::Permutations`
pub type Rank = usize;

/// A node in the singly linked list that holds the current permutation.
#[derive(Debug, Eq, PartialEq, Copy, Clone)]
pub(crate) struct Node {
    /// The rank stored in this node.
    ///
    /// This field corresponds to the value field $v$ in Algorithm 1.
    rank: Rank,
    /// The node that follows this one in the current permutation, if any.
    ///
    /// This field corresponds to the next field $n$ in Algorithm 1, except
    /// that it equals [`None`] instead of the null pointer $\varphi$.
    next: Option<NodeIndex>,
}

/// The permutation that is being visited by a generation session, stored
/// as a linked list over a sequential table of nodes.
///
/// A. Williams showed in "Loopless generation of multiset permutations using
/// a constant number of variables by prefix shifts", _SODA_ (2009), 987–996,
/// that every distinct permutation of a multiset can be reached from its
/// predecessor by moving one element to the front. With a linked list, such
/// a prefix shift takes constant time provided that we keep references to the
/// nodes at the removal and insertion points. Those references are the three
/// markers `head`, `penult` and `last`.
///
/// No node is allocated or freed after [`List::new`]; a transition only
/// rewrites two `next` links and the markers. The nodes therefore live in a
/// flat arena, and the markers are indices into it.
///
/// # Invariants
///
/// - The chain that starts at `head` visits every node exactly once.
/// - The ranks of the nodes are a rearrangement of the ranks given to
///   [`List::new`].
/// - `penult == last` if and only if the list has a single node.
#[derive(Debug, Clone)]
pub(crate) struct List {
    /// The node arena. Node $k$ initially holds the $k$th smallest rank.
    nodes: Vec<Node>,
    /// The first node of the current permutation.
    ///
    /// This field corresponds to the pointer $h$ in Algorithm 1.
    head: NodeIndex,
    /// The node whose successor is moved to the front when the algorithm
    /// cannot shift the successor of `last`. Initially the second-to-last
    /// node of the chain.
    ///
    /// This field corresponds to the pointer $i$ in Algorithm 1.
    penult: NodeIndex,
    /// The successor of `penult`. Initially the last node of the chain.
    ///
    /// This field corresponds to the pointer $j$ in Algorithm 1.
    last: NodeIndex,
}

impl List {
    /// Creates a list that stores the given ranks in non-increasing order,
    /// which is the first permutation visited by Algorithm 1; or returns
    /// [`None`] if there are no ranks.
    ///
    /// The ranks must be sorted in ascending order. This function does not
    /// check that requirement; see [`generate`] for a validated entry point.
    ///
    /// [`generate`]: `crate::generate`
    pub fn new(ranks: &[Rank]) -> Option<Self> {
        let n = ranks.len();
        if n == 0 {
            return None;
        }
        // Prepend the ranks one at a time, in ascending order. Node $k$ is
        // then followed by node $k-1$, and node 0 ends the chain.
        let nodes = ranks
            .iter()
            .enumerate()
            .map(|(ix, &rank)| Node {
                rank,
                next: NodeIndex::new(ix).decrement(),
            })
            .collect();
        Some(Self {
            nodes,
            head: NodeIndex::new(n - 1),
            penult: NodeIndex::new(if n > 1 { 1 } else { 0 }),
            last: NodeIndex::new(0),
        })
    }

    /// Returns the number of nodes in the list.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Transforms the current permutation into its successor in the order
    /// of Algorithm 1, by moving a single node to the front of the list.
    ///
    /// Returns `false` and leaves the list untouched if and only if the
    /// current permutation is the last one.
    pub fn advance(&mut self) -> bool {
        let head_rank = self.node(self.head).rank;
        let last = self.node(self.last);
        // Choose the node $s$ whose successor is shifted to the front.
        let pivot_ix = match last.next {
            Some(after_last_ix) => {
                if self.node(self.penult).rank >= self.node(after_last_ix).rank {
                    self.last
                } else {
                    self.penult
                }
            }
            // `last` ends the chain, so its successor cannot be moved.
            None if last.rank < head_rank => self.penult,
            None => return false,
        };
        let moved_ix = self
            .node(pivot_ix)
            .next
            .expect("pivot node should have a successor");
        let moved = *self.node(moved_ix);
        // Unlink the node, and put it in front of the old head.
        self.node_mut(pivot_ix).next = moved.next;
        self.node_mut(moved_ix).next = Some(self.head);
        if moved.rank < head_rank {
            self.penult = moved_ix;
        }
        self.last = self
            .node(self.penult)
            .next
            .expect("penultimate node should have a successor");
        self.head = moved_ix;
        true
    }

    /// Overwrites the ranks of the list with the given ranks in
    /// non-increasing order, and places the markers as in [`List::new`].
    ///
    /// The links are left as they are: the chain is walked from `head` and
    /// the ranks are written along it, so no node is reallocated. Afterwards
    /// `head` is the first node of the chain, `penult` the second-to-last
    /// and `last` the last, exactly as in a freshly built list.
    ///
    /// # Panics
    ///
    /// This function panics if `ranks` does not have one rank per node.
    pub fn reset(&mut self, ranks: &[Rank]) {
        assert_eq!(ranks.len(), self.len(), "reset needs one rank per node");
        let mut cur_ix = self.head;
        for &rank in ranks[1..].iter().rev() {
            self.node_mut(cur_ix).rank = rank;
            self.penult = cur_ix;
            cur_ix = self
                .node(cur_ix)
                .next
                .expect("chain should have one node per rank");
        }
        self.node_mut(cur_ix).rank = ranks[0];
        self.last = cur_ix;
        if ranks.len() == 1 {
            self.penult = cur_ix;
        }
    }

    /// Returns an iterator over the ranks of the current permutation, from
    /// the head of the list to its tail.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            list: self,
            cur: Some(self.head),
        }
    }

    // Accessor methods.

    /// Returns a reference to the node at the given position.
    ///
    /// # Panics
    ///
    /// This function panics if the index is out of bounds.
    fn node(&self, ix: NodeIndex) -> &Node {
        &self.nodes[ix.get()]
    }

    /// Returns a mutable reference to the node at the given position.
    ///
    /// # Panics
    ///
    /// This function panics if the index is out of bounds.
    fn node_mut(&mut self, ix: NodeIndex) -> &mut Node {
        &mut self.nodes[ix.get()]
    }
}

/// An iterator over the ranks of the permutation stored in a [`List`].
pub(crate) struct Iter<'l> {
    list: &'l List,
    cur: Option<NodeIndex>,
}

impl Iterator for Iter<'_> {
    type Item = Rank;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.list.node(self.cur?);
        self.cur = node.next;
        Some(node.rank)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        // The chain has no cycles, so it never yields more than one rank
        // per node.
        (usize::from(self.cur.is_some()), Some(self.list.len()))
    }
}
