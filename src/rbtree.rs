use std::cmp::Ordering;

use log::{debug, trace};

use crate::node::{Augment, Color, Direction, Node, NodeRef};

#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeError {
    DuplicateKey,
}

/// Red-black tree over an arena of index-linked nodes.
///
/// The parent/left/right links form a cyclic graph, so nodes live in an
/// arena and refer to each other by [`NodeRef`]; `NodeRef::NIL` stands in
/// for the shared Nil terminal. After every public call returns:
///
/// - the root and all Nil terminals are black,
/// - a red node never has a red parent,
/// - every path from a node to the Nil terminals below it crosses the same
///   number of black nodes,
/// - keys obey the BST order, and
/// - every node's augmentation is exactly what a fresh `pull` would produce.
///
/// Handles stay valid until the node they name is deleted. Passing a stale
/// handle (or one from another tree) is a caller bug and panics.
pub struct RbTree<T, R, A = ()> {
    nodes: Vec<Option<Node<T, R, A>>>,
    free: Vec<usize>,
    root: NodeRef,
    len: usize,
}

impl<T, R, A> RbTree<T, R, A> {
    pub fn new() -> Self {
        Self { nodes: Vec::new(), free: Vec::new(), root: NodeRef::NIL, len: 0 }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The root node, or Nil when the tree is empty.
    pub fn root(&self) -> NodeRef {
        self.root
    }

    fn node(&self, n: NodeRef) -> &Node<T, R, A> {
        assert!(!n.is_nil(), "Nil carries no node data");
        self.nodes[n.0].as_ref().expect("stale node handle")
    }

    fn node_mut(&mut self, n: NodeRef) -> &mut Node<T, R, A> {
        assert!(!n.is_nil(), "Nil carries no node data");
        self.nodes[n.0].as_mut().expect("stale node handle")
    }

    pub fn key(&self, n: NodeRef) -> &T {
        &self.node(n).key
    }

    pub fn value(&self, n: NodeRef) -> &R {
        &self.node(n).value
    }

    pub fn value_mut(&mut self, n: NodeRef) -> &mut R {
        &mut self.node_mut(n).value
    }

    /// Nil is vacuously black.
    pub fn color(&self, n: NodeRef) -> Color {
        if n.is_nil() { Color::Black } else { self.node(n).color }
    }

    pub fn parent(&self, n: NodeRef) -> NodeRef {
        self.node(n).parent
    }

    pub fn left(&self, n: NodeRef) -> NodeRef {
        self.node(n).left
    }

    pub fn right(&self, n: NodeRef) -> NodeRef {
        self.node(n).right
    }

    pub(crate) fn aug(&self, n: NodeRef) -> &A {
        &self.node(n).aug
    }

    /// All real nodes, preorder, root first.
    pub fn nodes(&self) -> Vec<NodeRef> {
        let mut out = Vec::with_capacity(self.len);
        let mut stack = Vec::new();
        if !self.root.is_nil() {
            stack.push(self.root);
        }
        while let Some(n) = stack.pop() {
            out.push(n);
            let node = self.node(n);
            if !node.right.is_nil() {
                stack.push(node.right);
            }
            if !node.left.is_nil() {
                stack.push(node.left);
            }
        }
        out
    }

    /// Real nodes with no real children.
    pub fn leaves(&self) -> Vec<NodeRef> {
        self.nodes()
            .into_iter()
            .filter(|&n| {
                let node = self.node(n);
                node.left.is_nil() && node.right.is_nil()
            })
            .collect()
    }

    /// Replaces whichever child link of `parent` points at `old` with `new`.
    /// No-op when neither matches.
    fn swap_child(&mut self, parent: NodeRef, old: NodeRef, new: NodeRef) {
        let p = self.node_mut(parent);
        if p.left == old {
            p.left = new;
        } else if p.right == old {
            p.right = new;
        }
    }

    /// Replaces the subtree position occupied by `u` with `v` (which may be
    /// Nil). `v`'s own children are left untouched; deletion is responsible
    /// for rewiring them.
    pub fn transplant(&mut self, u: NodeRef, v: NodeRef) {
        let p = self.node(u).parent;
        if u == self.root {
            self.root = v;
        } else {
            self.swap_child(p, u, v);
        }
        if !v.is_nil() {
            self.node_mut(v).parent = p;
        }
    }

    fn minimum(&self, mut n: NodeRef) -> NodeRef {
        while !self.node(n).left.is_nil() {
            n = self.node(n).left;
        }
        n
    }

    fn alloc(&mut self, key: T, value: R, aug: A) -> NodeRef {
        let node = Node {
            key,
            value,
            color: Color::Red,
            parent: NodeRef::NIL,
            left: NodeRef::NIL,
            right: NodeRef::NIL,
            aug,
        };
        let idx = match self.free.pop() {
            Some(idx) => {
                self.nodes[idx] = Some(node);
                idx
            }
            None => {
                self.nodes.push(Some(node));
                self.nodes.len() - 1
            }
        };
        self.len += 1;
        NodeRef(idx)
    }

    fn release(&mut self, n: NodeRef) -> Node<T, R, A> {
        let node = self.nodes[n.0].take().expect("stale node handle");
        self.free.push(n.0);
        self.len -= 1;
        node
    }
}

impl<T, R, A: Augment> RbTree<T, R, A> {
    /// Recomputes `n`'s augmentation from its children.
    fn pull(&mut self, n: NodeRef) {
        let (l, r) = {
            let node = self.node(n);
            (node.left, node.right)
        };
        let la = (!l.is_nil()).then(|| self.node(l).aug.clone());
        let ra = (!r.is_nil()).then(|| self.node(r).aug.clone());
        self.node_mut(n).aug.pull(la.as_ref(), ra.as_ref());
    }

    fn pull_to_root(&mut self, mut n: NodeRef) {
        while !n.is_nil() {
            self.pull(n);
            n = self.node(n).parent;
        }
    }

    /// Single rotation at `x`: for `Direction::Left` the right child rises
    /// into `x`'s position and `x` becomes its left child (mirror for
    /// `Right`). Keys never move, so BST order is preserved; colors are the
    /// caller's problem. The augmentations of the two nodes that swap
    /// positions are recomputed here, child before parent.
    ///
    /// Panics if `x` or the child it pivots on is Nil.
    pub fn rotate(&mut self, x: NodeRef, dir: Direction) {
        assert!(!x.is_nil(), "cannot rotate at Nil");
        let y = self.node(x).child(dir.opposite());
        assert!(!y.is_nil(), "rotating {dir:?} at {x:?} needs a real {:?} child", dir.opposite());
        trace!("rotate {dir:?} at {x:?}, pivot {y:?}");

        let z = self.node(y).child(dir);
        let p = self.node(x).parent;

        if p.is_nil() {
            self.root = y;
        } else {
            self.swap_child(p, x, y);
        }
        self.node_mut(x).set_child(dir.opposite(), z);
        self.node_mut(y).parent = p;
        self.node_mut(x).parent = y;
        self.node_mut(y).set_child(dir, x);
        if !z.is_nil() {
            self.node_mut(z).parent = x;
        }

        self.pull(x);
        self.pull(y);
    }
}

impl<T: Ord, R, A: Augment> RbTree<T, R, A> {
    /// BST descent step: `n`'s left child if `key < n.key`, else its right
    /// child; Nil stays Nil, so descent loops terminate uniformly.
    pub fn next_toward(&self, n: NodeRef, key: &T) -> NodeRef {
        if n.is_nil() {
            return NodeRef::NIL;
        }
        let node = self.node(n);
        if *key < node.key { node.left } else { node.right }
    }

    /// The node holding `key`, or `None`. O(log n).
    pub fn find(&self, key: &T) -> Option<NodeRef> {
        let mut cur = self.root;
        while !cur.is_nil() {
            if self.node(cur).key == *key {
                return Some(cur);
            }
            cur = self.next_toward(cur, key);
        }
        None
    }

    /// Inserts a key/value pair with an explicit augmentation seed;
    /// augmented wrappers (the interval tree) call this directly.
    pub fn insert_with(&mut self, key: T, value: R, aug: A) -> Result<NodeRef, TreeError> {
        // find the attachment point first so a duplicate allocates nothing
        let mut parent = NodeRef::NIL;
        let mut dir = Direction::Left;
        let mut cur = self.root;
        while !cur.is_nil() {
            parent = cur;
            let node = self.node(cur);
            dir = match key.cmp(&node.key) {
                Ordering::Less => Direction::Left,
                Ordering::Greater => Direction::Right,
                Ordering::Equal => return Err(TreeError::DuplicateKey),
            };
            cur = node.child(dir);
        }

        let z = self.alloc(key, value, aug);
        if parent.is_nil() {
            self.node_mut(z).color = Color::Black;
            self.root = z;
            trace!("insert: {z:?} becomes the root");
            return Ok(z);
        }
        self.node_mut(z).parent = parent;
        self.node_mut(parent).set_child(dir, z);
        trace!("insert: {z:?} attached as {dir:?} child of {parent:?}");

        self.insert_fixup(z);
        // rotations have already re-pulled the nodes they moved; everything
        // else that changed is an ancestor of z
        let up = self.node(z).parent;
        self.pull_to_root(up);
        Ok(z)
    }

    /// Repairs the red-red violation introduced by inserting the red node
    /// `z`. A red uncle moves the violation two levels up; a black uncle is
    /// settled locally with one or two rotations and the loop ends.
    fn insert_fixup(&mut self, mut z: NodeRef) {
        while self.color(self.node(z).parent) == Color::Red {
            let parent = self.node(z).parent;
            // a red parent is never the root, so the grandparent is real
            let grandparent = self.node(parent).parent;
            let parent_dir = if self.node(grandparent).left == parent {
                Direction::Left
            } else {
                Direction::Right
            };
            let uncle = self.node(grandparent).child(parent_dir.opposite());

            if self.color(uncle) == Color::Red {
                trace!("insert fixup: red uncle under {grandparent:?}, recoloring");
                self.node_mut(parent).color = Color::Black;
                self.node_mut(uncle).color = Color::Black;
                self.node_mut(grandparent).color = Color::Red;
                z = grandparent;
                continue;
            }

            if self.node(parent).child(parent_dir.opposite()) == z {
                // triangle: straighten it through the parent first
                trace!("insert fixup: triangle at {parent:?}");
                z = parent;
                self.rotate(z, parent_dir);
            }
            // line: one rotation at the grandparent settles the violation
            let parent = self.node(z).parent;
            let grandparent = self.node(parent).parent;
            trace!("insert fixup: line, rotating {:?} at {grandparent:?}", parent_dir.opposite());
            self.node_mut(parent).color = Color::Black;
            self.node_mut(grandparent).color = Color::Red;
            self.rotate(grandparent, parent_dir.opposite());
        }
        let root = self.root;
        self.node_mut(root).color = Color::Black;
    }

    /// Unlinks `z` and returns its key and value. When `z` has two real
    /// children its in-order successor is promoted into `z`'s position, so
    /// every other handle stays valid. If the spliced-out node was black the
    /// resulting black-height deficiency is repaired before returning.
    ///
    /// Panics if `z` is Nil or was already deleted.
    pub fn delete(&mut self, z: NodeRef) -> (T, R) {
        debug_assert_eq!(
            self.find(&self.node(z).key),
            Some(z),
            "delete: node is not linked into this tree",
        );

        let zl = self.node(z).left;
        let zr = self.node(z).right;
        let removed_color;
        let fix_parent;
        let x; // the node (possibly Nil) now sitting at the spliced position
        if zl.is_nil() {
            removed_color = self.node(z).color;
            fix_parent = self.node(z).parent;
            x = zr;
            self.transplant(z, zr);
        } else if zr.is_nil() {
            removed_color = self.node(z).color;
            fix_parent = self.node(z).parent;
            x = zl;
            self.transplant(z, zl);
        } else {
            let y = self.minimum(zr);
            trace!("delete: promoting successor {y:?} into {z:?}'s position");
            removed_color = self.node(y).color;
            x = self.node(y).right;
            if self.node(y).parent == z {
                fix_parent = y;
            } else {
                fix_parent = self.node(y).parent;
                let yr = self.node(y).right;
                self.transplant(y, yr);
                self.node_mut(y).right = zr;
                self.node_mut(zr).parent = y;
            }
            self.transplant(z, y);
            self.node_mut(y).left = zl;
            self.node_mut(zl).parent = y;
            let zc = self.node(z).color;
            self.node_mut(y).color = zc;
        }

        if removed_color == Color::Black {
            self.delete_fixup(x, fix_parent);
        }
        // the splice point and every node rotated during the fixup sit on
        // this parent chain, so one bottom-up walk refreshes them all
        self.pull_to_root(fix_parent);

        let node = self.release(z);
        debug!("deleted {z:?}, {} nodes left", self.len);
        (node.key, node.value)
    }

    /// Absorbs the "double black" deficiency at `x` (a possibly-Nil node,
    /// hence the explicit `parent`). Sibling case analysis, symmetric to
    /// insertion's: a red sibling is first rotated into a black one; a black
    /// sibling with black children pushes the deficiency up; a red nephew
    /// lets one or two rotations absorb it locally.
    fn delete_fixup(&mut self, mut x: NodeRef, mut parent: NodeRef) {
        while x != self.root && self.color(x) == Color::Black {
            // a doubly-black node always has a real sibling, else the other
            // side of `parent` would be short a black node
            let dir = if self.node(parent).left == x { Direction::Left } else { Direction::Right };
            let mut w = self.node(parent).child(dir.opposite());

            if self.color(w) == Color::Red {
                trace!("delete fixup: red sibling {w:?}, rotating {dir:?} at {parent:?}");
                self.node_mut(w).color = Color::Black;
                self.node_mut(parent).color = Color::Red;
                self.rotate(parent, dir);
                w = self.node(parent).child(dir.opposite());
            }

            let near = self.node(w).child(dir);
            let far = self.node(w).child(dir.opposite());
            if self.color(near) == Color::Black && self.color(far) == Color::Black {
                trace!("delete fixup: black sibling {w:?} with black children, deficiency moves up");
                self.node_mut(w).color = Color::Red;
                x = parent;
                parent = self.node(x).parent;
                continue;
            }

            if self.color(far) == Color::Black {
                // near nephew red: rotate the sibling so the red ends up far
                trace!("delete fixup: near nephew {near:?} red, rotating sibling {w:?}");
                self.node_mut(near).color = Color::Black;
                self.node_mut(w).color = Color::Red;
                self.rotate(w, dir.opposite());
                w = self.node(parent).child(dir.opposite());
            }
            trace!("delete fixup: far nephew red, absorbing at {parent:?}");
            let pc = self.node(parent).color;
            self.node_mut(w).color = pc;
            self.node_mut(parent).color = Color::Black;
            let far = self.node(w).child(dir.opposite());
            self.node_mut(far).color = Color::Black;
            self.rotate(parent, dir);
            x = self.root;
        }
        if !x.is_nil() {
            self.node_mut(x).color = Color::Black;
        }
    }
}

impl<T: Ord, R> RbTree<T, R> {
    /// Inserts a key/value pair. The new node starts red and the tree is
    /// rebalanced as needed. Duplicate keys are rejected.
    pub fn insert(&mut self, key: T, value: R) -> Result<NodeRef, TreeError> {
        self.insert_with(key, value, ())
    }
}

impl<T, R, A> Default for RbTree<T, R, A> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
impl<T: Ord, R, A: Augment + PartialEq> RbTree<T, R, A> {
    pub(crate) fn assert_invariants(&self) {
        if self.root.is_nil() {
            assert_eq!(self.len, 0, "empty tree with nonzero len");
            return;
        }
        assert!(self.node(self.root).parent.is_nil(), "root has a parent");
        assert_eq!(self.color(self.root), Color::Black, "root must be black");
        let mut count = 0;
        self.check_subtree(self.root, None, None, &mut count);
        assert_eq!(count, self.len, "len does not match reachable nodes");
    }

    /// Checks order, links, colors, and augmentation below `n`; returns the
    /// black-height of the subtree.
    fn check_subtree(
        &self,
        n: NodeRef,
        min: Option<&T>,
        max: Option<&T>,
        count: &mut usize,
    ) -> usize {
        if n.is_nil() {
            return 1;
        }
        *count += 1;
        let node = self.node(n);
        if let Some(min) = min {
            assert!(*min < node.key, "BST order violated");
        }
        if let Some(max) = max {
            assert!(node.key < *max, "BST order violated");
        }
        if node.color == Color::Red {
            assert_eq!(self.color(node.parent), Color::Black, "red node with red parent");
        }
        for child in [node.left, node.right] {
            if !child.is_nil() {
                assert_eq!(self.node(child).parent, n, "child's parent backlink is broken");
            }
        }

        let lh = self.check_subtree(node.left, min, Some(&node.key), count);
        let rh = self.check_subtree(node.right, Some(&node.key), max, count);
        assert_eq!(lh, rh, "black-height differs between subtrees");

        // children are verified by now, so a fresh pull must be a no-op
        let mut expected = node.aug.clone();
        let la = (!node.left.is_nil()).then(|| self.node(node.left).aug.clone());
        let ra = (!node.right.is_nil()).then(|| self.node(node.right).aug.clone());
        expected.pull(la.as_ref(), ra.as_ref());
        assert!(node.aug == expected, "stale augmentation at {n:?}");

        lh + usize::from(node.color == Color::Black)
    }
}

#[cfg(test)]
pub(crate) fn init_test_logging() {
    use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};
    let _ = TermLogger::init(LevelFilter::Debug, Config::default(), TerminalMode::Mixed, ColorChoice::Auto);
}

#[cfg(test)]
fn seven_node_tree() -> (RbTree<i32, i32>, [NodeRef; 7]) {
    let mut tree = RbTree::new();
    let refs = [5, 2, 10, 8, 12, 6, 9].map(|k| tree.insert(k, k).unwrap());
    (tree, refs)
}

#[test]
fn seven_inserts_take_the_expected_shape() {
    let (tree, [n5, n2, n10, n8, n12, n6, n9]) = seven_node_tree();

    assert_eq!(tree.root(), n5);
    assert!(tree.parent(n5).is_nil());
    assert_eq!((tree.left(n5), tree.right(n5)), (n2, n10));
    assert_eq!((tree.left(n10), tree.right(n10)), (n8, n12));
    assert_eq!((tree.left(n8), tree.right(n8)), (n6, n9));
    assert_eq!(tree.parent(n10), n5);
    assert_eq!(tree.parent(n8), n10);
    for leaf in [n2, n12, n6, n9] {
        assert!(tree.left(leaf).is_nil() && tree.right(leaf).is_nil());
    }
    tree.assert_invariants();
}

#[test]
fn insertion_coloring() {
    let mut tree = RbTree::new();

    let n5 = tree.insert(5, 5).unwrap();
    assert_eq!(tree.color(n5), Color::Black); // root recoloring

    let n2 = tree.insert(2, 2).unwrap();
    assert_eq!(tree.color(n2), Color::Red);
    assert_eq!(tree.color(n5), Color::Black);

    let n10 = tree.insert(10, 10).unwrap();
    assert_eq!(tree.color(n10), Color::Red);
    assert_eq!(tree.color(n2), Color::Red);
    assert_eq!(tree.color(n5), Color::Black);

    // 8 lands under a red parent with a red uncle: both get recolored
    let n8 = tree.insert(8, 8).unwrap();
    assert_eq!(tree.color(n8), Color::Red);
    assert_eq!(tree.color(n10), Color::Black);
    assert_eq!(tree.color(n2), Color::Black);
    assert_eq!(tree.color(n5), Color::Black);
    tree.assert_invariants();
}

#[test]
fn rotate_left_then_right_restores_structure() {
    init_test_logging();
    let (mut tree, [n5, n2, n10, n8, n12, n6, n9]) = seven_node_tree();

    tree.rotate(n5, Direction::Left);
    assert_eq!(tree.root(), n10);
    assert!(tree.parent(n10).is_nil());
    assert_eq!((tree.left(n10), tree.right(n10)), (n5, n12));
    assert_eq!((tree.left(n5), tree.right(n5)), (n2, n8));
    assert_eq!(tree.parent(n5), n10);
    assert_eq!(tree.parent(n8), n5);
    assert_eq!((tree.left(n8), tree.right(n8)), (n6, n9));

    tree.rotate(n10, Direction::Right);
    assert_eq!(tree.root(), n5);
    assert!(tree.parent(n5).is_nil());
    assert_eq!((tree.left(n5), tree.right(n5)), (n2, n10));
    assert_eq!((tree.left(n10), tree.right(n10)), (n8, n12));
    assert_eq!((tree.left(n8), tree.right(n8)), (n6, n9));
    assert_eq!(tree.parent(n10), n5);
    assert_eq!(tree.parent(n8), n10);
}

#[test]
#[should_panic(expected = "cannot rotate at Nil")]
fn rotating_nil_panics() {
    let (mut tree, _) = seven_node_tree();
    tree.rotate(NodeRef::NIL, Direction::Left);
}

#[test]
fn find_present_and_absent_keys() {
    let (mut tree, refs) = seven_node_tree();
    for (n, k) in refs.into_iter().zip([5, 2, 10, 8, 12, 6, 9]) {
        assert_eq!(tree.find(&k), Some(n));
        assert_eq!(*tree.key(n), k);
    }
    for k in [0, 3, 7, 11, 100] {
        assert_eq!(tree.find(&k), None);
    }
    assert_eq!(RbTree::<i32, i32>::new().find(&5), None);

    let n20 = tree.insert(20, 20).unwrap();
    assert_eq!(tree.find(&20), Some(n20));
}

#[test]
fn duplicate_keys_are_rejected() {
    let (mut tree, _) = seven_node_tree();
    assert_eq!(tree.insert(8, 0), Err(TreeError::DuplicateKey));
    assert_eq!(tree.len(), 7);
    tree.assert_invariants();
}

#[test]
fn nodes_and_leaves() {
    let (tree, [n5, n2, n10, n8, n12, n6, n9]) = seven_node_tree();

    let nodes = tree.nodes();
    assert_eq!(nodes[0], tree.root());
    assert_eq!(nodes.len(), 7);
    for n in [n5, n2, n10, n8, n12, n6, n9] {
        assert!(nodes.contains(&n));
    }

    let leaves = tree.leaves();
    assert_eq!(leaves.len(), 4);
    for leaf in [n2, n12, n6, n9] {
        assert!(leaves.contains(&leaf));
    }
    // internal nodes of this particular tree all have two real children
    for n in nodes {
        if !leaves.contains(&n) {
            assert!(!tree.left(n).is_nil() && !tree.right(n).is_nil());
        }
    }
}

#[cfg(test)]
fn transplant_fixture() -> (RbTree<i32, &'static str>, [NodeRef; 6]) {
    let mut tree = RbTree::new();
    let n15 = tree.insert(15, "a").unwrap();
    let n11 = tree.insert(11, "b").unwrap();
    let n19 = tree.insert(19, "c").unwrap();
    let n7 = tree.insert(7, "d").unwrap();
    let n13 = tree.insert(13, "e").unwrap();
    let n23 = tree.insert(23, "f").unwrap();

    // 15 at the root, 11(7, 13) on the left, 19(_, 23) on the right
    assert_eq!(tree.root(), n15);
    assert_eq!((tree.left(n15), tree.right(n15)), (n11, n19));
    assert_eq!((tree.left(n11), tree.right(n11)), (n7, n13));
    assert!(tree.left(n19).is_nil());
    assert_eq!(tree.right(n19), n23);

    (tree, [n15, n11, n19, n7, n13, n23])
}

#[test]
fn transplant_at_the_root() {
    let (mut tree, [n15, n11, n19, n7, n13, n23]) = transplant_fixture();

    tree.transplant(n15, n19);

    assert_eq!(tree.root(), n19);
    assert!(tree.parent(n19).is_nil());
    // v keeps its own children, u keeps all of its links
    assert!(tree.left(n19).is_nil());
    assert_eq!(tree.right(n19), n23);
    assert_eq!((tree.left(n15), tree.right(n15)), (n11, n19));
    assert_eq!((tree.left(n11), tree.right(n11)), (n7, n13));
    assert_eq!(tree.parent(n23), n19);
}

#[test]
fn transplant_left_child() {
    let (mut tree, [n15, n11, _, n7, n13, _]) = transplant_fixture();

    tree.transplant(n11, n13);

    assert_eq!(tree.root(), n15);
    assert_eq!(tree.left(n15), n13);
    assert_eq!(tree.parent(n13), n15);
    assert_eq!(tree.parent(n11), n15);
    assert_eq!((tree.left(n11), tree.right(n11)), (n7, n13));
}

#[test]
fn transplant_right_child() {
    let (mut tree, [n15, n11, n19, _, _, n23]) = transplant_fixture();
    let n18 = tree.insert(18, "g").unwrap();
    assert_eq!(tree.left(n19), n18);

    tree.transplant(n19, n18);

    assert_eq!(tree.root(), n15);
    assert_eq!(tree.right(n15), n18);
    assert_eq!(tree.parent(n18), n15);
    assert!(tree.left(n18).is_nil() && tree.right(n18).is_nil());
    assert_eq!(tree.left(n15), n11);
    assert_eq!(tree.parent(n19), n15);
    assert_eq!((tree.left(n19), tree.right(n19)), (n18, n23));
}

#[test]
fn delete_red_leaf() {
    let (mut tree, [.., n9]) = seven_node_tree();
    assert_eq!(tree.delete(n9), (9, 9));
    assert_eq!(tree.find(&9), None);
    assert_eq!(tree.len(), 6);
    tree.assert_invariants();
}

#[test]
fn delete_node_with_two_children_promotes_successor() {
    init_test_logging();
    let (mut tree, [n5, n2, n10, n8, n12, n6, n9]) = seven_node_tree();

    assert_eq!(tree.delete(n10), (10, 10));
    assert_eq!(tree.find(&10), None);

    // 12, the successor, took 10's position; the repair rotation then
    // pulled 8 up over it
    assert_eq!(tree.root(), n5);
    assert_eq!((tree.left(n5), tree.right(n5)), (n2, n8));
    assert_eq!((tree.left(n8), tree.right(n8)), (n6, n12));
    assert_eq!(tree.left(n12), n9);
    assert!(tree.right(n12).is_nil());
    tree.assert_invariants();

    for k in [5, 2, 8, 12, 6, 9] {
        assert!(tree.find(&k).is_some());
    }
}

#[test]
fn delete_black_leaf_repairs_double_black() {
    let (mut tree, [_, n2, ..]) = seven_node_tree();
    assert_eq!(tree.color(n2), Color::Black);

    assert_eq!(tree.delete(n2), (2, 2));
    assert_eq!(tree.find(&2), None);
    tree.assert_invariants();
    for k in [5, 10, 8, 12, 6, 9] {
        assert!(tree.find(&k).is_some());
    }
}

#[test]
fn delete_root_with_single_child() {
    let mut tree = RbTree::new();
    let n1 = tree.insert(1, "one").unwrap();
    let n2 = tree.insert(2, "two").unwrap();

    assert_eq!(tree.delete(n1), (1, "one"));
    assert_eq!(tree.root(), n2);
    assert_eq!(tree.color(n2), Color::Black);
    tree.assert_invariants();
}

#[test]
fn delete_down_to_empty() {
    let (mut tree, refs) = seven_node_tree();
    for n in refs {
        tree.delete(n);
        tree.assert_invariants();
    }
    assert!(tree.is_empty());
    assert!(tree.root().is_nil());
    assert_eq!(tree.find(&5), None);
}

#[test]
fn randomized_inserts_and_deletes_preserve_invariants() {
    use rand::SeedableRng;
    use rand::seq::SliceRandom;
    use rand_chacha::ChaCha20Rng;

    let mut rng = ChaCha20Rng::from_seed([0; 32]);
    let mut keys: Vec<i32> = (0..200).collect();
    keys.shuffle(&mut rng);

    let mut tree = RbTree::new();
    for (i, &k) in keys.iter().enumerate() {
        tree.insert(k, k * 10).unwrap();
        assert_eq!(tree.len(), i + 1);
        tree.assert_invariants();
    }
    for k in 0..200 {
        let n = tree.find(&k).expect("inserted key must be found");
        assert_eq!(*tree.key(n), k);
        assert_eq!(*tree.value(n), k * 10);
    }
    assert_eq!(tree.find(&200), None);
    assert_eq!(tree.find(&-1), None);

    keys.shuffle(&mut rng);
    for &k in &keys {
        let n = tree.find(&k).unwrap();
        assert_eq!(tree.delete(n), (k, k * 10));
        assert_eq!(tree.find(&k), None);
        tree.assert_invariants();
    }
    assert!(tree.is_empty());
}
