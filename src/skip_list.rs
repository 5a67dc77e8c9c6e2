// model = "claude-opus-4-5"
// created = "2026-10-19"
// modified = "2026-10-19"
// driver = "Isaac Clayton"

//! Ordered skip list with in-place update.
//!
//! # Structure
//!
//! Nodes live in an arena and link to each other by index. Level 0 is the
//! full sorted chain; every higher level is a sparser express lane over the
//! same nodes. The header is a value-less array of `max_level` links placed
//! before every real element.
//!
//! ```text
//! Level 2: HEAD ----------------> 5 ------------------> NULL
//! Level 1: HEAD ------> 3 ------> 5 ------------------> NULL
//! Level 0: HEAD -> -2 -> 3 -> 4 -> 5 -> 7 -> 20 -> 43 -> NULL
//! ```
//!
//! # Sentinel rule
//!
//! The terminal link (`NULL`) compares greater than every value, so a forward
//! scan stops at the end of a level through the same comparison that stops
//! it at a larger value.
//!
//! # Invariants
//!
//! - At every level the chain from the header is strictly increasing.
//! - A node of height `h` appears in levels `0..h` and no others.
//! - Nodes reachable at level `l` are a subset of those reachable at `l - 1`.
//! - No level contains a cycle.
//!
//! Debug builds check the neighbourhood of every spliced node; the crate's
//! tests also walk the whole structure.

use std::cmp::Ordering;
use std::fmt;
use std::iter::FusedIterator;
use std::mem;

use log::debug;
use log::trace;
use rand_core::OsRng;
use smallvec::SmallVec;
use smallvec::smallvec;

use crate::compare::Comparator;
use crate::compare::NaturalOrder;
use crate::level::CoinFlip;
use crate::level::LevelGenerator;

/// Maximum level used by `Default`. 16 levels suit lists of ~65k elements.
pub const DEFAULT_MAX_LEVEL: usize = 16;

/// Node index type. u32 saves space vs usize on 64-bit.
pub(crate) type Idx = u32;

/// Terminal link marker.
pub(crate) const NULL: Idx = Idx::MAX;

/// Forward links of one node. Most nodes are short.
type Links = SmallVec<[Idx; 4]>;

/// The node (or header, as `None`) whose forward link at some level is rewritten
/// when a new node is spliced in.
type Pred = Option<Idx>;

/// Per-level predecessors recorded by a search.
type Update = SmallVec<[Pred; DEFAULT_MAX_LEVEL]>;

/// A value and its forward links. The number of links is the node's height.
pub(crate) struct Node<T> {
    pub(crate) value: T,
    pub(crate) next: Links,
}

impl<T> Node<T> {
    pub(crate) fn height(&self) -> usize {
        return self.next.len();
    }
}

/// Error returned when a list is configured with an unusable maximum level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MaxLevelError {
    /// A list needs at least one level.
    Zero,
}

impl fmt::Display for MaxLevelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MaxLevelError::Zero => write!(f, "max level must be at least 1"),
        }
    }
}

impl std::error::Error for MaxLevelError {}

/// Suggested maximum level for a list expected to hold `expected_len` elements.
///
/// This is `ceil(log2(expected_len))`, and never less than 1.
pub fn max_level_for(expected_len: usize) -> usize {
    if expected_len <= 2 {
        return 1;
    }
    let bits = usize::BITS - (expected_len - 1).leading_zeros();
    return bits as usize;
}

/// A probabilistic ordered container.
///
/// Values are kept unique under the comparator: inserting a value equal to
/// a stored one overwrites it in place. Not thread-safe; callers that share a
/// list must exclude `insert` from overlapping any other operation.
pub struct SkipList<T, C = NaturalOrder, G = CoinFlip<OsRng>> {
    /// Arena of nodes. Nodes are never freed.
    pub(crate) nodes: Vec<Node<T>>,
    /// Header links, one per level.
    pub(crate) head: Vec<Idx>,
    pub(crate) max_level: usize,
    compare: C,
    levels: G,
}

impl<T, C: Comparator<T>> SkipList<T, C> {
    /// Create an empty list ordered by `compare`, with heights drawn from the
    /// operating system RNG.
    ///
    /// `max_level` bounds node height and should be about the log2 of the
    /// largest expected element count (see [`max_level_for`]).
    ///
    /// # Panics
    ///
    /// Panics if `max_level` is zero.
    pub fn new(compare: C, max_level: usize) -> SkipList<T, C> {
        return Self::with_level_generator(compare, max_level, CoinFlip::default());
    }

    /// Like [`SkipList::new`], but reports a zero `max_level` as an error.
    pub fn try_new(compare: C, max_level: usize) -> Result<SkipList<T, C>, MaxLevelError> {
        if max_level == 0 {
            return Err(MaxLevelError::Zero);
        }
        return Ok(Self::new(compare, max_level));
    }
}

impl<T, C: Comparator<T>, G: LevelGenerator> SkipList<T, C, G> {
    /// Create an empty list whose node heights come from `levels`.
    ///
    /// # Panics
    ///
    /// Panics if `max_level` is zero.
    pub fn with_level_generator(compare: C, max_level: usize, levels: G) -> SkipList<T, C, G> {
        assert!(max_level >= 1, "{}", MaxLevelError::Zero);
        debug!("new skip list with max level {}", max_level);
        return SkipList {
            nodes: Vec::new(),
            head: vec![NULL; max_level],
            max_level,
            compare,
            levels,
        };
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        return self.nodes.len();
    }

    pub fn is_empty(&self) -> bool {
        return self.nodes.is_empty();
    }

    /// Height of the header; no node is taller.
    pub fn max_level(&self) -> usize {
        return self.max_level;
    }

    /// The comparator this list was built with.
    pub fn comparator(&self) -> &C {
        return &self.compare;
    }

    // --- Node access helpers ---

    fn node(&self, idx: Idx) -> &Node<T> {
        return &self.nodes[idx as usize];
    }

    fn node_mut(&mut self, idx: Idx) -> &mut Node<T> {
        return &mut self.nodes[idx as usize];
    }

    /// The link leaving `pred` at `level`.
    pub(crate) fn forward(&self, pred: Pred, level: usize) -> Idx {
        return match pred {
            None => self.head[level],
            Some(idx) => self.node(idx).next[level],
        };
    }

    fn forward_mut(&mut self, pred: Pred, level: usize) -> &mut Idx {
        return match pred {
            None => &mut self.head[level],
            Some(idx) => &mut self.node_mut(idx).next[level],
        };
    }

    fn alloc_node(&mut self, value: T, height: usize) -> Idx {
        let idx = self.nodes.len();
        assert!(idx < NULL as usize, "skip list is full ({} nodes)", idx);
        self.nodes.push(Node {
            value,
            next: smallvec![NULL; height],
        });
        return idx as Idx;
    }

    /// Compare the value behind `link` against `value`, with the terminal link
    /// greater than everything.
    fn compare_link(&self, link: Idx, value: &T) -> Ordering {
        if link == NULL {
            return Ordering::Greater;
        }
        return self.compare.compare(&self.node(link).value, value);
    }

    // --- Core operations ---

    /// Descend from the header towards `value`.
    ///
    /// At each level, advance while the next node is less than `value`, then
    /// drop a level from where the scan stopped. When `update` is given, the
    /// last position at each level is recorded in it. Returns the level 0
    /// successor of the final position: the first node not less than `value`.
    fn search(&self, value: &T, mut update: Option<&mut Update>) -> Idx {
        let mut pred: Pred = None;
        for level in (0..self.max_level).rev() {
            loop {
                let next = self.forward(pred, level);
                match self.compare_link(next, value) {
                    Ordering::Less => pred = Some(next),
                    Ordering::Equal | Ordering::Greater => break,
                }
            }
            if let Some(update) = update.as_deref_mut() {
                update[level] = pred;
            }
        }
        return self.forward(pred, 0);
    }

    /// Insert `value`.
    ///
    /// Returns `None` for a fresh insertion. If an equal value is already
    /// stored, it is overwritten in place and the previous value is returned.
    pub fn insert(&mut self, value: T) -> Option<T> {
        let mut update: Update = smallvec![None; self.max_level];
        let found = self.search(&value, Some(&mut update));

        if self.compare_link(found, &value) == Ordering::Equal {
            trace!("updated node {} in place", found);
            let prev = mem::replace(&mut self.node_mut(found).value, value);
            return Some(prev);
        }

        let height = self.levels.random_level(self.max_level);
        assert!(
            height >= 1 && height <= self.max_level,
            "level generator returned height {} outside [1, {}]",
            height,
            self.max_level
        );
        let new_idx = self.alloc_node(value, height);

        // Read the old successor before redirecting the predecessor to us.
        for level in 0..height {
            let succ = self.forward(update[level], level);
            self.node_mut(new_idx).next[level] = succ;
            *self.forward_mut(update[level], level) = new_idx;
        }

        trace!("inserted node {} with height {}", new_idx, height);
        self.check_splice(new_idx, &update);
        return None;
    }

    /// Whether a value equal to `value` is stored.
    pub fn contains(&self, value: &T) -> bool {
        return self.get(value).is_some();
    }

    /// The stored value equal to `value`, if any.
    pub fn get(&self, value: &T) -> Option<&T> {
        let found = self.search(value, None);
        if self.compare_link(found, value) == Ordering::Equal {
            return Some(&self.node(found).value);
        }
        return None;
    }

    /// Call `f` on each value in ascending order.
    ///
    /// Stops at the first error and returns it.
    pub fn for_each<E, F>(&self, mut f: F) -> Result<(), E>
    where
        F: FnMut(&T) -> Result<(), E>,
    {
        for value in self.iter() {
            f(value)?;
        }
        return Ok(());
    }

    /// Iterate over all values in ascending order.
    pub fn iter(&self) -> Iter<'_, T> {
        return Iter {
            nodes: &self.nodes,
            current: self.head[0],
            remaining: self.nodes.len(),
        };
    }

    // --- Invariant checking ---

    /// Check the neighbourhood of a freshly spliced node: at every level it
    /// sits strictly between its predecessor and its successor. O(height).
    #[cfg(debug_assertions)]
    fn check_splice(&self, new_idx: Idx, update: &Update) {
        let node = self.node(new_idx);
        for level in 0..node.height() {
            if let Some(pred) = update[level] {
                assert_eq!(
                    self.compare.compare(&self.node(pred).value, &node.value),
                    Ordering::Less,
                    "INVARIANT VIOLATED: node {} not after its predecessor {} at level {}",
                    new_idx,
                    pred,
                    level
                );
            }
            assert_eq!(
                self.compare_link(node.next[level], &node.value),
                Ordering::Greater,
                "INVARIANT VIOLATED: node {} not before its successor at level {}",
                new_idx,
                level
            );
        }
    }

    #[cfg(not(debug_assertions))]
    #[inline(always)]
    fn check_splice(&self, _new_idx: Idx, _update: &Update) {}

    /// Walk every level and check the whole structure. O(n * max_level).
    #[cfg(test)]
    pub(crate) fn check_invariants(&self) {
        let mut seen_below: Option<Vec<bool>> = None;
        for level in 0..self.max_level {
            let mut seen = vec![false; self.nodes.len()];
            let mut pred: Pred = None;
            let mut idx = self.head[level];
            while idx != NULL {
                assert!(
                    !seen[idx as usize],
                    "INVARIANT VIOLATED: cycle through node {} at level {}",
                    idx, level
                );
                seen[idx as usize] = true;

                let node = self.node(idx);
                assert!(
                    level < node.height(),
                    "INVARIANT VIOLATED: node {} of height {} linked at level {}",
                    idx,
                    node.height(),
                    level
                );
                if let Some(below) = &seen_below {
                    assert!(
                        below[idx as usize],
                        "INVARIANT VIOLATED: node {} at level {} missing from level {}",
                        idx,
                        level,
                        level - 1
                    );
                }
                if let Some(p) = pred {
                    assert_eq!(
                        self.compare.compare(&self.node(p).value, &node.value),
                        Ordering::Less,
                        "INVARIANT VIOLATED: level {} out of order at node {}",
                        level,
                        idx
                    );
                }
                pred = Some(idx);
                idx = node.next[level];
            }

            // Every node tall enough for this level must be on it.
            for (i, node) in self.nodes.iter().enumerate() {
                assert_eq!(
                    seen[i],
                    level < node.height(),
                    "INVARIANT VIOLATED: node {} of height {} reachable={} at level {}",
                    i,
                    node.height(),
                    seen[i],
                    level
                );
            }
            seen_below = Some(seen);
        }
    }
}

impl<T: Ord> Default for SkipList<T> {
    fn default() -> Self {
        return SkipList::new(NaturalOrder, DEFAULT_MAX_LEVEL);
    }
}

impl<T: fmt::Debug, C, G> fmt::Debug for SkipList<T, C, G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let values = Iter {
            nodes: &self.nodes,
            current: self.head[0],
            remaining: self.nodes.len(),
        };
        return f
            .debug_struct("SkipList")
            .field("max_level", &self.max_level)
            .field("values", &DebugValues(values))
            .finish();
    }
}

struct DebugValues<'a, T>(Iter<'a, T>);

impl<T: fmt::Debug> fmt::Debug for DebugValues<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        return f.debug_list().entries(self.0.clone()).finish();
    }
}

/// Iterator over a list's values in ascending order.
pub struct Iter<'a, T> {
    nodes: &'a [Node<T>],
    current: Idx,
    /// Values not yet yielded.
    remaining: usize,
}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        return Iter {
            nodes: self.nodes,
            current: self.current,
            remaining: self.remaining,
        };
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current == NULL {
            return None;
        }
        let node = &self.nodes[self.current as usize];
        self.current = node.next[0];
        self.remaining -= 1;
        return Some(&node.value);
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        return (self.remaining, Some(self.remaining));
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

impl<'a, T, C: Comparator<T>, G: LevelGenerator> IntoIterator for &'a SkipList<T, C, G> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        return self.iter();
    }
}
