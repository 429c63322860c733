//! Priority selection: binary heaps under a pluggable ordering.

pub mod heap;

pub use heap::{HeapOrder, PrioritySelector};
