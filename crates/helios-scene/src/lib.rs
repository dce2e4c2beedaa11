//! Celestial body catalog, live scene entities, and the builder that turns
//! one into the other.

pub mod builder;
pub mod catalog;
pub mod entity;
pub mod lighting;
pub mod material;
pub mod render;
pub mod scene;
pub mod starfield;

pub use builder::{AssetTarget, BuildSettings, SceneBuilder};
pub use catalog::{BodySpec, Catalog, SurfaceSpec};
pub use entity::{
    Axes, BodyId, CelestialBody, Label, OrbitGuide, Ring, RingSet, RingSetId, Satellite, Shell,
    Sun, TextMesh, TitleText,
};
pub use lighting::LightRig;
pub use material::{Material, Shading, Side, TextureSlot};
pub use render::RenderBackend;
pub use scene::{Group, Scene, Visibility};
pub use starfield::Starfield;
