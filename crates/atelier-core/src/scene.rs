use serde::{Deserialize, Serialize};

/// A flat RGB color. Components are expected in [0, 1] but never checked;
/// adapters emit them verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Color {
    pub fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }
}

/// The host's display handle for one renderable entity. The name doubles as
/// the identifier adapters use for materials and shapes in exported scenes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewObject {
    pub name: String,
}

impl ViewObject {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
        }
    }
}
