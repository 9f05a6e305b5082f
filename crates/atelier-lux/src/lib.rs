//! # Atelier LuxRender adapter
//!
//! Exports host scene geometry and camera state into LuxRender's
//! scene-description text format and launches the renderer executable.
//! The adapter is stateless: three pure serialization functions plus one
//! render-invocation routine with filesystem and process side effects.
//!
//! The host injects its services (preference store, message log, document
//! recompute) through [`atelier_core::HostServices`]; nothing here touches
//! host state directly.

pub mod render;
pub mod scene;

pub use render::{render, RenderSettings};
pub use scene::{write_camera, write_object};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LuxError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// No renderer executable is configured for the requested mode. The
    /// only error the adapter reports through the host channel itself.
    #[error("no renderer executable configured for preference key '{0}'")]
    MissingExecutable(String),
}
