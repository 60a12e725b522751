//! The `default_node_pool` block of the managed Kubernetes cluster resource.

pub mod expand;
pub mod flatten;
pub mod node_pool;
pub mod plan;
pub mod schema;

pub use expand::expand_default_node_pool;
pub use flatten::{find_default_node_pool, flatten_default_node_pool};
pub use node_pool::{DefaultNodePool, NodePoolState};
pub use plan::{plan_default_node_pool, PlanAction};
pub use schema::{schema_default_node_pool, DEFAULT_NODE_POOL};
