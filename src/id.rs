use alloc::string::String;
use core::fmt::Debug;

use petgraph::graph::NodeIndex;

/// A trait representing a node identifier.
pub trait Id: Clone + Ord + Debug {}

impl Id for i32 {}

impl Id for u32 {}

impl Id for u64 {}

impl Id for usize {}

impl Id for char {}

impl Id for String {}

impl Id for &str {}

impl Id for NodeIndex {}
