//! # Atelier Core
//!
//! Host-side data model shared by the Atelier render adapters: 3D vectors,
//! triangle meshes, view objects, the per-project render handle, and the
//! `HostServices` capability trait through which adapters reach the host
//! application (preferences, message log, document recompute).
//!
//! Adapters never talk to the host directly; everything they need is
//! injected through these types.

pub mod geometry;
pub mod host;
pub mod project;
pub mod scene;

pub use geometry::{TriangleMesh, Vec3};
pub use host::HostServices;
pub use project::RenderProject;
pub use scene::{Color, ViewObject};
