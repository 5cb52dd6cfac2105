//! Nodal loads

mod node_load;

pub use node_load::NodeLoad;
