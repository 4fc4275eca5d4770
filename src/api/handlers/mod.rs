pub mod comments;
pub mod engagement;
pub mod health;
pub mod metrics;
pub mod posts;
pub mod products;
pub mod profiles;
pub mod reviews;
pub mod social_graph;
