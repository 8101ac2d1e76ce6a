//! Collaborators the handler depends on but does not own.
//!
//! The binary asset and the redirect target sit behind traits so tests can
//! substitute failing or panicking implementations.

pub mod asset;
pub mod link;

pub use asset::{AssetSource, EmbeddedAsset, FileAsset, MAX_ASSET_BYTES, TINY_PNG};
pub use link::{LinkProvider, StaticLink, is_absolute_http_url};
