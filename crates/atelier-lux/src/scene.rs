//! Scene-description serialization.
//!
//! Pure text assembly: these functions turn host camera state and view
//! objects into LuxRender scene-file fragments. Numbers use the default
//! `f64` display formatting (no fixed precision), and mesh data is emitted
//! in input storage order with no reindexing or deduplication. Degenerate
//! meshes serialize without complaint; the renderer rejects them downstream.

use atelier_core::{Color, TriangleMesh, Vec3, ViewObject};

/// Serialize a look-at camera directive.
///
/// The three vectors appear space-separated in the fixed order
/// `position target up`. Total over any inputs; no validation (`up` need
/// not be orthogonal to the view direction).
pub fn write_camera(pos: &Vec3, target: &Vec3, up: &Vec3) -> String {
    let pos = format!("{} {} {}", pos.x, pos.y, pos.z);
    let target = format!("{} {} {}", target.x, target.y, target.z);
    let up = format!("{} {} {}", up.x, up.y, up.z);

    let mut cam = String::new();
    cam += "# declares position and view direction\n";
    cam += "# Generated by the Atelier export pipeline\n";
    cam += &format!("LookAt {} {} {}\n", pos, target, up);
    cam
}

/// Serialize one view object as a named matte material plus a mesh shape
/// bound to it under an identity transform.
///
/// The `transparency` attribute appears iff `alpha < 1.0` (strict). Vertex
/// positions, per-vertex normals, and triangle index triples are flattened
/// into whitespace-separated runs preserving their input order exactly.
pub fn write_object(view: &ViewObject, mesh: &TriangleMesh, color: &Color, alpha: f64) -> String {
    let name = &view.name;
    let color = format!("{} {} {}", color.r, color.g, color.b);

    let mut p = String::new();
    for v in &mesh.vertices {
        p += &format!("{} {} {} ", v.x, v.y, v.z);
    }
    let mut n = String::new();
    for nrm in mesh.point_normals() {
        n += &format!("{} {} {} ", nrm.x, nrm.y, nrm.z);
    }
    let mut tris = String::new();
    for t in &mesh.triangles {
        tris += &format!("{} {} {} ", t[0], t[1], t[2]);
    }

    let mut objdef = String::new();

    // material
    objdef += &format!("MakeNamedMaterial \"{}_mat\"\n", name);
    objdef += &format!("    \"color Kd\" [{}]\n", color);
    objdef += "    \"float sigma\" [0.2]\n";
    objdef += "    \"string type\" [\"matte\"]\n";
    if alpha < 1.0 {
        objdef += &format!("    \"float transparency\" [\"{}\"]\n", alpha);
    }
    objdef += "\n";

    // mesh shape
    objdef += &format!("AttributeBegin #  \"{}\"\n", name);
    objdef += "Transform [1 0 0 0 0 1 0 0 0 0 1 0 0 0 0 1]\n";
    objdef += &format!("NamedMaterial \"{}_mat\"\n", name);
    objdef += "Shape \"mesh\"\n";
    objdef += &format!("    \"integer triindices\" [{}]\n", tris);
    objdef += &format!("    \"point P\" [{}]\n", p);
    objdef += &format!("    \"normal N\" [{}]\n", n);
    objdef += "    \"bool generatetangents\" [\"false\"]\n";
    objdef += &format!("    \"string name\" [\"{}\"]\n", name);
    objdef += "AttributeEnd # \"\"\n";

    objdef
}
