//! The engagement core: edge CRUD, counter reconciliation, and the listing
//! queries built on top of them. Every mutation that touches an edge table
//! recomputes the dependent denormalized counters inside the same
//! transaction; the edge tables are the source of truth and the counters are
//! a cache.

pub mod comments;
pub mod engagement;
pub mod follow_graph;
pub mod posts;
pub mod products;
pub mod profiles;
pub mod reconcile;
pub mod reviews;
