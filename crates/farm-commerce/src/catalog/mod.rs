//! Product catalog module.
//!
//! Contains the canonical product record and image URL helpers.

mod media;
mod product;

pub use media::resolve_image_url;
pub use product::{Product, PRODUCT_FIELDS};
