use crate::node::{Augment, NodeRef};
use crate::rbtree::{RbTree, TreeError};

/// Interval-tree augmentation: the maximum high endpoint over a node's
/// entire subtree, the node itself included.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct MaxEndpoint<T> {
    pub(crate) hi: T,
    pub(crate) max: T,
}

impl<T: Ord + Clone> Augment for MaxEndpoint<T> {
    fn pull(&mut self, left: Option<&Self>, right: Option<&Self>) {
        let mut max = self.hi.clone();
        for child in [left, right].into_iter().flatten() {
            if child.max > max {
                max = child.max.clone();
            }
        }
        self.max = max;
    }
}

/// Containment index over half-open intervals `[lo, hi)`.
///
/// A red-black tree keyed on the low endpoints, where every node also
/// tracks its subtree's maximum high endpoint. That bound lets a point
/// query take a single root-to-leaf path: whenever the left subtree's
/// maximum cannot cover the point, the match (if any) must be on the
/// right.
///
/// Interval low endpoints must be distinct; a duplicate `lo` is rejected
/// like a duplicate tree key.
pub struct IntervalTree<T, R> {
    tree: RbTree<T, R, MaxEndpoint<T>>,
}

impl<T: Ord + Clone, R> IntervalTree<T, R> {
    pub fn new() -> Self {
        Self { tree: RbTree::new() }
    }

    pub fn len(&self) -> usize {
        self.tree.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// The root node, or Nil when the tree is empty.
    pub fn root(&self) -> NodeRef {
        self.tree.root()
    }

    /// All real nodes, preorder, root first.
    pub fn nodes(&self) -> Vec<NodeRef> {
        self.tree.nodes()
    }

    pub fn lo(&self, n: NodeRef) -> &T {
        self.tree.key(n)
    }

    pub fn hi(&self, n: NodeRef) -> &T {
        &self.tree.aug(n).hi
    }

    /// The maximum high endpoint over `n`'s subtree.
    pub fn max_endpoint(&self, n: NodeRef) -> &T {
        &self.tree.aug(n).max
    }

    pub fn value(&self, n: NodeRef) -> &R {
        self.tree.value(n)
    }

    /// Inserts `[lo, hi)` with an associated value.
    ///
    /// Panics if the interval is empty (`lo >= hi`).
    pub fn insert(&mut self, lo: T, hi: T, value: R) -> Result<NodeRef, TreeError> {
        assert!(lo < hi, "interval must satisfy lo < hi");
        let max = hi.clone();
        self.tree.insert_with(lo, value, MaxEndpoint { hi, max })
    }

    /// Some node whose interval contains `point`, or `None`. One descent,
    /// O(log n); other overlapping intervals are not reported.
    pub fn interval_containing(&self, point: &T) -> Option<NodeRef> {
        let mut cur = self.tree.root();
        while !cur.is_nil() {
            if *self.lo(cur) <= *point && *point < *self.hi(cur) {
                return Some(cur);
            }
            let left = self.tree.left(cur);
            // a half-open interval never covers its own high endpoint, so a
            // left subtree whose max endpoint is <= point cannot match
            cur = if left.is_nil() || *self.max_endpoint(left) <= *point {
                self.tree.right(cur)
            } else {
                left
            };
        }
        None
    }

    /// Unlinks the interval node `n`, returning its low endpoint and value.
    /// Max endpoints along the affected paths are restored before returning.
    pub fn delete(&mut self, n: NodeRef) -> (T, R) {
        self.tree.delete(n)
    }
}

impl<T: Ord + Clone, R> Default for IntervalTree<T, R> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
impl<T: Ord + Clone, R> IntervalTree<T, R> {
    pub(crate) fn assert_invariants(&self) {
        self.tree.assert_invariants();
    }
}

#[cfg(test)]
fn sample_tree() -> (IntervalTree<i32, &'static str>, [NodeRef; 4]) {
    let mut tree = IntervalTree::new();
    let a = tree.insert(17, 19, "a").unwrap();
    let b = tree.insert(5, 8, "b").unwrap();
    let c = tree.insert(21, 24, "c").unwrap();
    let d = tree.insert(15, 18, "d").unwrap();
    (tree, [a, b, c, d])
}

#[test]
fn inserts_update_max_endpoints() {
    let mut tree = IntervalTree::new();

    let a = tree.insert(17, 19, "a").unwrap();
    assert_eq!(*tree.max_endpoint(a), 19);

    let b = tree.insert(5, 8, "b").unwrap();
    assert_eq!(*tree.max_endpoint(a), 19);
    assert_eq!(*tree.max_endpoint(b), 8);

    let c = tree.insert(21, 24, "c").unwrap();
    assert_eq!(*tree.max_endpoint(a), 24);
    assert_eq!(*tree.max_endpoint(b), 8);
    assert_eq!(*tree.max_endpoint(c), 24);

    // (15, 18) lands in (5, 8)'s subtree, so that max rises with it
    let d = tree.insert(15, 18, "d").unwrap();
    assert_eq!(*tree.max_endpoint(a), 24);
    assert_eq!(*tree.max_endpoint(b), 18);
    assert_eq!(*tree.max_endpoint(c), 24);
    assert_eq!(*tree.max_endpoint(d), 18);

    tree.assert_invariants();
}

#[test]
fn containment_queries() {
    let (tree, [a, b, c, d]) = sample_tree();

    for p in [17, 18] {
        assert_eq!(tree.interval_containing(&p), Some(a), "point {p}");
    }
    for p in [5, 6, 7] {
        assert_eq!(tree.interval_containing(&p), Some(b), "point {p}");
    }
    for p in [21, 22, 23] {
        assert_eq!(tree.interval_containing(&p), Some(c), "point {p}");
    }
    for p in [15, 16] {
        assert_eq!(tree.interval_containing(&p), Some(d), "point {p}");
    }
    // the high endpoint is excluded
    for p in [4, 8, 14, 19, 20, 24] {
        assert_eq!(tree.interval_containing(&p), None, "point {p}");
    }
}

#[test]
fn queries_are_idempotent() {
    let (tree, _) = sample_tree();
    for p in 0..30 {
        assert_eq!(tree.interval_containing(&p), tree.interval_containing(&p));
    }
}

#[test]
fn query_on_empty_tree() {
    let tree: IntervalTree<i32, ()> = IntervalTree::new();
    assert_eq!(tree.interval_containing(&5), None);
}

#[test]
#[should_panic(expected = "lo < hi")]
fn empty_interval_is_rejected() {
    let mut tree: IntervalTree<i32, ()> = IntervalTree::new();
    let _ = tree.insert(5, 5, ());
}

#[test]
fn duplicate_lo_is_rejected() {
    let (mut tree, _) = sample_tree();
    assert_eq!(tree.insert(17, 30, "x"), Err(TreeError::DuplicateKey));
    assert_eq!(tree.len(), 4);
}

#[test]
fn delete_keeps_max_endpoints_exact() {
    let (mut tree, [a, b, c, d]) = sample_tree();

    assert_eq!(tree.delete(a), (17, "a"));
    tree.assert_invariants();
    assert_eq!(tree.len(), 3);

    // 17 is still covered by (15, 18); 18 no longer by anything
    assert_eq!(tree.interval_containing(&17), Some(d));
    assert_eq!(tree.interval_containing(&18), None);
    assert_eq!(tree.interval_containing(&6), Some(b));
    assert_eq!(tree.interval_containing(&22), Some(c));

    assert_eq!(tree.delete(d), (15, "d"));
    tree.assert_invariants();
    assert_eq!(tree.interval_containing(&17), None);
    assert_eq!(tree.interval_containing(&6), Some(b));
}

#[test]
fn randomized_against_linear_scan() {
    use rand::{Rng, SeedableRng};
    use rand::seq::SliceRandom;
    use rand_chacha::ChaCha20Rng;

    let mut rng = ChaCha20Rng::from_seed([0; 32]);
    let mut los: Vec<i32> = (0..300).map(|i| i * 7).collect();
    los.shuffle(&mut rng);

    let mut tree = IntervalTree::new();
    let mut live: Vec<(i32, i32, NodeRef)> = Vec::new();
    for &lo in &los {
        let hi = lo + rng.gen_range(1..40);
        let n = tree.insert(lo, hi, lo).unwrap();
        live.push((lo, hi, n));
        tree.assert_invariants();
    }

    let check = |tree: &IntervalTree<i32, i32>, live: &[(i32, i32, NodeRef)]| {
        for p in -5..2150 {
            match tree.interval_containing(&p) {
                Some(n) => assert!(
                    *tree.lo(n) <= p && p < *tree.hi(n),
                    "query {p} returned a non-containing interval",
                ),
                None => assert!(
                    !live.iter().any(|&(lo, hi, _)| lo <= p && p < hi),
                    "query {p} missed a containing interval",
                ),
            }
        }
    };
    check(&tree, &live);

    live.shuffle(&mut rng);
    for _ in 0..150 {
        let (lo, _, n) = live.pop().unwrap();
        assert_eq!(tree.delete(n).0, lo);
        tree.assert_invariants();
    }
    check(&tree, &live);
}
