//! Asynchronous texture and font resolution with fallback chains.
//!
//! Every request ends in a usable resource: the primary path is tried first,
//! then the secondary path, and when both fail a deterministic placeholder is
//! synthesized on the polling thread.

mod error;
pub mod font;
pub mod handle;
pub mod placeholder;
pub mod resolver;
pub mod source;
pub mod texture;

pub use error::LoadError;
pub use font::{FontFace, TextBounds};
pub use handle::{AssetKind, AssetState, HandleId, Resource, ResourceOrigin};
pub use placeholder::Fallback;
pub use resolver::{AssetRequest, AssetResolver, Resolved, default_worker_count};
pub use source::{AssetSource, FsAssetSource, MemoryAssetSource};
pub use texture::Texture;
