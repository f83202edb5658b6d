use std::fmt;

/// Handle to a node in a tree's arena.
///
/// `NodeRef::NIL` is the shared "no node" terminal: it is vacuously black,
/// carries no key or value, and descending from it stays at Nil, so walking
/// code never needs a separate null check.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeRef(pub(crate) usize);

impl NodeRef {
    pub const NIL: NodeRef = NodeRef(usize::MAX);

    pub fn is_nil(self) -> bool {
        self == Self::NIL
    }
}

impl fmt::Debug for NodeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_nil() { write!(f, "Nil") } else { write!(f, "#{}", self.0) }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Color {
    Red,
    Black,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    pub fn opposite(self) -> Direction {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

/// Per-subtree data the tree keeps consistent across every link rewrite.
///
/// `pull` recomputes a node's augmentation from its own seed data and its
/// children's already-correct values; a `None` child is a Nil terminal.
/// The base tree uses `()`, which costs nothing.
pub trait Augment: Clone {
    fn pull(&mut self, left: Option<&Self>, right: Option<&Self>);
}

impl Augment for () {
    fn pull(&mut self, _left: Option<&Self>, _right: Option<&Self>) {}
}

pub(crate) struct Node<T, R, A> {
    pub(crate) key: T,
    pub(crate) value: R,
    pub(crate) color: Color,
    pub(crate) parent: NodeRef,
    pub(crate) left: NodeRef,
    pub(crate) right: NodeRef,
    pub(crate) aug: A,
}

impl<T, R, A> Node<T, R, A> {
    pub(crate) fn child(&self, dir: Direction) -> NodeRef {
        match dir {
            Direction::Left => self.left,
            Direction::Right => self.right,
        }
    }

    pub(crate) fn set_child(&mut self, dir: Direction, child: NodeRef) {
        match dir {
            Direction::Left => self.left = child,
            Direction::Right => self.right = child,
        }
    }
}

#[test]
fn nil_is_its_own_terminal() {
    assert!(NodeRef::NIL.is_nil());
    assert_eq!(NodeRef::NIL, NodeRef::NIL);
    assert_ne!(NodeRef(0), NodeRef::NIL);
    assert_eq!(format!("{:?}", NodeRef::NIL), "Nil");
    assert_eq!(format!("{:?}", NodeRef(3)), "#3");
}

#[test]
fn direction_opposite() {
    assert_eq!(Direction::Left.opposite(), Direction::Right);
    assert_eq!(Direction::Right.opposite(), Direction::Left);
}
