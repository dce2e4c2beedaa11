//! Handle identifiers, load states, and resolved resources.

use std::fmt;
use std::sync::Arc;

use crate::font::FontFace;
use crate::texture::Texture;

/// Opaque reference to one requested asset within a resolver generation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HandleId(pub u32);

impl fmt::Display for HandleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "asset#{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AssetKind {
    Texture,
    Font,
}

/// Which step of the chain produced a resource.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResourceOrigin {
    Primary,
    Secondary,
    Placeholder,
}

/// Lifecycle of a handle. Transitions only move forward:
/// `Pending` → `Loaded`, or `Pending` → `Failed` → `Loaded(Placeholder)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AssetState {
    /// A load is in flight. `attempt` counts the paths tried so far.
    Pending { attempt: u8 },
    /// Both paths failed; the placeholder has not been substituted yet.
    Failed,
    Loaded(ResourceOrigin),
}

impl AssetState {
    pub fn is_loaded(&self) -> bool {
        matches!(self, AssetState::Loaded(_))
    }
}

/// A usable asset. Cheap to clone; the pixel and glyph data are shared.
#[derive(Clone, Debug)]
pub enum Resource {
    Texture(Arc<Texture>),
    Font(Arc<FontFace>),
}

impl Resource {
    pub fn kind(&self) -> AssetKind {
        match self {
            Resource::Texture(_) => AssetKind::Texture,
            Resource::Font(_) => AssetKind::Font,
        }
    }

    pub fn as_texture(&self) -> Option<&Arc<Texture>> {
        match self {
            Resource::Texture(t) => Some(t),
            Resource::Font(_) => None,
        }
    }

    pub fn as_font(&self) -> Option<&Arc<FontFace>> {
        match self {
            Resource::Font(f) => Some(f),
            Resource::Texture(_) => None,
        }
    }
}
