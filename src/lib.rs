#![deny(unsafe_op_in_unsafe_fn)]

// node arena: handles, colors, the augmentation seam
pub mod node;

// ordered index structures
pub mod rbtree;
pub mod interval;
