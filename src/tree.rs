use derivative::Derivative;
use log::{debug, trace};
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::collections::BinaryHeap;

use crate::error::{HuffmanError, Result};
use crate::freq::FrequencyTable;
use crate::{Frequency, Symbol, NUM_SYMBOLS};

/// A Huffman tree node. Each child is owned by exactly one parent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Node {
    Leaf {
        symbol: Symbol,
        frequency: Frequency,
    },
    Interior {
        frequency: Frequency,
        left: Box<Node>,
        right: Box<Node>,
    },
}

impl Node {
    pub fn leaf(symbol: Symbol, frequency: Frequency) -> Self {
        Self::Leaf { symbol, frequency }
    }

    /// Join two subtrees under a new interior node whose frequency is their sum.
    pub fn from_children(left: Node, right: Node) -> Self {
        Self::Interior {
            frequency: left.frequency() + right.frequency(),
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Build the Huffman tree for `table` by repeatedly merging the two
    /// lowest-frequency subtrees.
    ///
    /// The leaves are exactly the symbols with a nonzero count. Equal
    /// frequencies are resolved in insertion order: leaves enter in
    /// increasing symbol order and every merged node enters after all
    /// existing entries, so the resulting shape is reproducible.
    pub fn from_frequencies(table: &FrequencyTable) -> Result<Self> {
        let distinct = table.distinct();
        if distinct < 2 {
            return Err(HuffmanError::AlphabetTooSmall { distinct });
        }
        if table.checked_total().is_none() {
            return Err(HuffmanError::FrequencyOverflow);
        }

        let mut pq = Queue::with_capacity(NUM_SYMBOLS);
        for (s, count) in table.iter() {
            pq.push(Node::leaf(s, count));
        }
        debug!("building huffman tree from {} distinct symbols", distinct);

        while let Some(first) = pq.pop() {
            // the last remaining entry is the finished tree
            let Some(second) = pq.pop() else {
                return Ok(first);
            };

            trace!(
                "merging subtrees of frequency {} and {}",
                first.frequency(),
                second.frequency()
            );
            let merged = if first.frequency() <= second.frequency() {
                Node::from_children(first, second)
            } else {
                Node::from_children(second, first)
            };
            pq.push(merged);
        }

        unreachable!("queue emptied without yielding a tree")
    }

    pub fn frequency(&self) -> Frequency {
        match self {
            Self::Leaf { frequency, .. } | Self::Interior { frequency, .. } => *frequency,
        }
    }

    /// The symbol held by a leaf; interior nodes have none.
    pub fn symbol(&self) -> Option<Symbol> {
        match self {
            Self::Leaf { symbol, .. } => Some(*symbol),
            Self::Interior { .. } => None,
        }
    }

    pub fn children(&self) -> Option<(&Node, &Node)> {
        match self {
            Self::Leaf { .. } => None,
            Self::Interior { left, right, .. } => Some((left.as_ref(), right.as_ref())),
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Self::Leaf { .. })
    }

    /// Every leaf has a positive frequency and every interior node's
    /// frequency equals the sum of its children's, recursively.
    pub fn is_well_formed(&self) -> bool {
        match self {
            Self::Leaf { frequency, .. } => *frequency > 0,
            Self::Interior {
                frequency,
                left,
                right,
            } => {
                left.is_well_formed()
                    && right.is_well_formed()
                    && left.frequency().checked_add(right.frequency()) == Some(*frequency)
            }
        }
    }

    /// Number of nodes on the longest root-to-leaf path. A lone leaf has depth 1.
    pub fn depth(&self) -> usize {
        match self.children() {
            None => 1,
            Some((left, right)) => left.depth().max(right.depth()) + 1,
        }
    }

    pub fn leaf_count(&self) -> usize {
        match self.children() {
            None => 1,
            Some((left, right)) => left.leaf_count() + right.leaf_count(),
        }
    }
}

/// Queue entry; ordering looks at the frequency first and then the insertion
/// sequence, never at the node itself.
#[derive(Debug, Derivative)]
#[derivative(PartialEq, Eq, PartialOrd, Ord)]
struct Entry {
    frequency: Frequency,
    seq: u64,

    #[derivative(PartialEq = "ignore")]
    #[derivative(PartialOrd = "ignore")]
    #[derivative(Ord = "ignore")]
    node: Node,
}

/// Min-priority queue over subtrees.
struct Queue {
    heap: BinaryHeap<Reverse<Entry>>,
    next_seq: u64,
}

impl Queue {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            heap: BinaryHeap::with_capacity(capacity),
            next_seq: 0,
        }
    }

    fn push(&mut self, node: Node) {
        let entry = Entry {
            frequency: node.frequency(),
            seq: self.next_seq,
            node,
        };
        self.next_seq += 1;
        self.heap.push(Reverse(entry));
    }

    fn pop(&mut self) -> Option<Node> {
        self.heap.pop().map(|r| r.0.node)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::seq::SliceRandom;
    use rand::{Rng, SeedableRng};

    /// A table with between 2 and `NUM_SYMBOLS` nonzero entries.
    pub(crate) fn random_table(rng: &mut StdRng) -> FrequencyTable {
        let distinct = rng.gen_range(2..=NUM_SYMBOLS);
        let mut symbols: Vec<Symbol> = (0..=255).collect();
        symbols.shuffle(rng);

        FrequencyTable::from_pairs(
            symbols[..distinct]
                .iter()
                .map(|&s| (s, rng.gen_range(1..=1000))),
        )
    }

    fn leaves(node: &Node, out: &mut Vec<(Symbol, Frequency)>) {
        match node {
            Node::Leaf { symbol, frequency } => out.push((*symbol, *frequency)),
            Node::Interior { left, right, .. } => {
                leaves(left, out);
                leaves(right, out);
            }
        }
    }

    fn left_never_heavier(node: &Node) -> bool {
        match node.children() {
            None => true,
            Some((left, right)) => {
                left.frequency() <= right.frequency()
                    && left_never_heavier(left)
                    && left_never_heavier(right)
            }
        }
    }

    #[test]
    fn node_leaf() {
        let n = Node::leaf(b'x', 4);
        assert_eq!(n.frequency(), 4);
        assert_eq!(n.symbol(), Some(b'x'));
        assert_eq!(n.children(), None);
        assert!(n.is_leaf());
    }

    #[test]
    fn node_from_children() {
        let left = Node::leaf(b'a', 2);
        let right = Node::leaf(b'b', 5);

        let n = Node::from_children(left.clone(), right.clone());

        assert_eq!(n.frequency(), 7);
        assert_eq!(n.symbol(), None);
        assert_eq!(n.children(), Some((&left, &right)));
        assert!(n.is_well_formed());
    }

    #[test]
    fn malformed_trees_are_detected() {
        assert!(!Node::leaf(b'a', 0).is_well_formed());

        let bad_sum = Node::Interior {
            frequency: 10,
            left: Box::new(Node::leaf(b'a', 2)),
            right: Box::new(Node::leaf(b'b', 3)),
        };
        assert!(!bad_sum.is_well_formed());

        let bad_child = Node::Interior {
            frequency: 3,
            left: Box::new(Node::leaf(b'a', 0)),
            right: Box::new(Node::leaf(b'b', 3)),
        };
        assert!(!bad_child.is_well_formed());

        let overflow = Node::Interior {
            frequency: 0,
            left: Box::new(Node::leaf(b'a', Frequency::MAX)),
            right: Box::new(Node::leaf(b'b', 1)),
        };
        assert!(!overflow.is_well_formed());
    }

    #[test]
    fn single_symbol_is_rejected() {
        let table = FrequencyTable::from_pairs([(b'a', 5)]);
        assert_eq!(
            Node::from_frequencies(&table),
            Err(HuffmanError::AlphabetTooSmall { distinct: 1 })
        );
    }

    #[test]
    fn overflowing_counts_are_rejected() {
        let table = FrequencyTable::from_pairs([(b'a', Frequency::MAX), (b'b', 1)]);
        assert_eq!(
            Node::from_frequencies(&table),
            Err(HuffmanError::FrequencyOverflow)
        );
    }

    #[test]
    fn empty_table_is_rejected() {
        let table = FrequencyTable::from_symbols(std::iter::empty());
        assert_eq!(
            Node::from_frequencies(&table),
            Err(HuffmanError::AlphabetTooSmall { distinct: 0 })
        );
    }

    #[test]
    fn two_symbols_make_one_interior_node() {
        let table = FrequencyTable::from_pairs([(b'q', 9), (b'p', 1)]);
        let tree = Node::from_frequencies(&table).unwrap();

        assert_eq!(
            tree,
            Node::from_children(Node::leaf(b'p', 1), Node::leaf(b'q', 9))
        );
        assert_eq!(tree.depth(), 2);
    }

    #[test]
    fn aaabbc_shape() {
        let table = FrequencyTable::from_symbols("aaabbc".bytes());
        let tree = Node::from_frequencies(&table).unwrap();

        // c and b merge into 3, which ties with a; a was queued first so goes left
        let expected = Node::from_children(
            Node::leaf(b'a', 3),
            Node::from_children(Node::leaf(b'c', 1), Node::leaf(b'b', 2)),
        );
        assert_eq!(tree, expected);
        assert_eq!(tree.frequency(), 6);
        assert_eq!(tree.depth(), 3);
        assert_eq!(tree.leaf_count(), 3);
    }

    #[test]
    fn equal_frequencies_keep_insertion_order() {
        let table = FrequencyTable::from_pairs([(b'd', 1), (b'c', 1), (b'b', 1), (b'a', 1)]);
        let tree = Node::from_frequencies(&table).unwrap();

        let expected = Node::from_children(
            Node::from_children(Node::leaf(b'a', 1), Node::leaf(b'b', 1)),
            Node::from_children(Node::leaf(b'c', 1), Node::leaf(b'd', 1)),
        );
        assert_eq!(tree, expected);
    }

    #[test]
    fn built_trees_are_well_formed() {
        let mut rng = StdRng::seed_from_u64(0x9e37_79b9_7f4a_7c15);
        for _ in 0..200 {
            let table = random_table(&mut rng);
            let tree = Node::from_frequencies(&table).unwrap();

            assert!(tree.is_well_formed());
            assert!(!tree.is_leaf());
            assert!(left_never_heavier(&tree));
            assert_eq!(tree.frequency(), table.total());

            let mut found = Vec::new();
            leaves(&tree, &mut found);
            found.sort_unstable();
            assert_eq!(found, table.iter().collect::<Vec<_>>());
            assert_eq!(tree.leaf_count(), table.distinct());
        }
    }

    #[test]
    fn identical_tables_build_identical_trees() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..50 {
            let table = random_table(&mut rng);
            assert_eq!(
                Node::from_frequencies(&table).unwrap(),
                Node::from_frequencies(&table).unwrap()
            );
        }
    }

    #[test]
    fn full_alphabet_of_equal_counts_is_balanced() {
        let table = FrequencyTable::from_pairs((0..=255u8).map(|s| (s, 1)));
        let tree = Node::from_frequencies(&table).unwrap();

        assert_eq!(tree.leaf_count(), NUM_SYMBOLS);
        assert_eq!(tree.depth(), 9);
    }

    #[test]
    fn serde_round_trip() {
        let table = FrequencyTable::from_symbols("mississippi".bytes());
        let tree = Node::from_frequencies(&table).unwrap();

        let data = rmp_serde::to_vec(&tree).unwrap();
        let back: Node = rmp_serde::from_slice(&data).unwrap();

        assert_eq!(back, tree);
        assert!(back.is_well_formed());
    }
}
