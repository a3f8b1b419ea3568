//! Domain entities and the post resource model.

mod category;
mod post;

pub mod filter;
pub mod pagination;
pub mod projection;
pub mod resource;
pub mod validation;

pub use category::{Category, CategoryId, NewCategory};
pub use post::{NewPost, Post, PostId};

#[cfg(test)]
pub(crate) mod fixtures;
