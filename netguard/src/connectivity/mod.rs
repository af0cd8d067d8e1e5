//! Spatial connectivity: which connection points on a sheet are
//! electrically one.

pub mod namer;
pub mod node;
pub mod resolver;

pub use namer::NetNamer;
pub use node::NodeRef;
pub use resolver::{ConnectivityResolver, UnionFind};
