pub mod comment;
pub mod engagement;
pub mod follow;
pub mod post;
pub mod product;
pub mod profile;
pub mod review;

pub use profile::{FaceShape, Profile, PublicProfile};
