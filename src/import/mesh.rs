//! `Geometry` objects of class `Mesh`: polygon topology and `LayerElement*` attributes.

use std::cell::Cell;

use glam::{Vec2, Vec3, Vec4};
use log::{debug, warn};

use crate::error::{Error, Result};
use crate::options::IndexErrorHandling;
use crate::scene::mesh::{Face, Mesh, VertexAttribute};
use crate::types::{DocNode, Property};

/// Per-corner lookup tables shared by every layer of one geometry.
struct Topology {
    corner_vertex: Vec<u32>,
    corner_face: Vec<u32>,
    faces: Vec<Face>,
}

struct Context<'a> {
    mesh: &'a str,
    handling: IndexErrorHandling,
    clamped: Cell<usize>,
}

impl<'a> Context<'a> {
    /// Bounds-check `index` against a pool of `len` values. `None` drops the attribute.
    fn resolve(&self, index: i64, len: usize, attribute: &'static str) -> Result<Option<u32>> {
        if index >= 0 && (index as usize) < len {
            return Ok(Some(index as u32));
        }
        match self.handling {
            IndexErrorHandling::Clamp if len > 0 => {
                self.clamped.set(self.clamped.get() + 1);
                Ok(Some(index.clamp(0, len as i64 - 1) as u32))
            }
            IndexErrorHandling::Clamp | IndexErrorHandling::NoIndex => Ok(None),
            IndexErrorHandling::Abort => Err(Error::BadIndex {
                mesh: self.mesh.to_string(),
                attribute,
                index,
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mapping {
    PerCorner,
    PerVertex,
    PerFace,
    AllSame,
}

impl Mapping {
    fn from_fbx(name: &str) -> Option<Mapping> {
        match name {
            "ByPolygonVertex" => Some(Mapping::PerCorner),
            "ByVertex" | "ByVertice" | "ByControlPoint" => Some(Mapping::PerVertex),
            "ByPolygon" => Some(Mapping::PerFace),
            "AllSame" => Some(Mapping::AllSame),
            _ => None,
        }
    }
}

struct Layer {
    element: &'static str,
    values: &'static str,
    index: &'static str,
    components: usize,
    attribute: &'static str,
}

const NORMAL: Layer = Layer {
    element: "LayerElementNormal",
    values: "Normals",
    index: "NormalsIndex",
    components: 3,
    attribute: "normal",
};
const UV: Layer = Layer {
    element: "LayerElementUV",
    values: "UV",
    index: "UVIndex",
    components: 2,
    attribute: "uv",
};
const TANGENT: Layer = Layer {
    element: "LayerElementTangent",
    values: "Tangents",
    index: "TangentsIndex",
    components: 3,
    attribute: "tangent",
};
const BITANGENT: Layer = Layer {
    element: "LayerElementBinormal",
    values: "Binormals",
    index: "BinormalsIndex",
    components: 3,
    attribute: "bitangent",
};
const COLOR: Layer = Layer {
    element: "LayerElementColor",
    values: "Colors",
    index: "ColorIndex",
    components: 4,
    attribute: "color",
};

fn vec2(v: &[f64]) -> Vec2 {
    Vec2::new(v[0] as f32, v[1] as f32)
}

fn vec3(v: &[f64]) -> Vec3 {
    Vec3::new(v[0] as f32, v[1] as f32, v[2] as f32)
}

fn vec4(v: &[f64]) -> Vec4 {
    Vec4::new(v[0] as f32, v[1] as f32, v[2] as f32, v[3] as f32)
}

/// Split `PolygonVertexIndex` into faces. A negative entry `-(v + 1)` closes the current face.
fn read_topology(raw: &[i64], num_vertices: usize, ctx: &Context) -> Result<Option<Topology>> {
    let mut topology = Topology {
        corner_vertex: Vec::with_capacity(raw.len()),
        corner_face: Vec::with_capacity(raw.len()),
        faces: Vec::new(),
    };
    let mut begin = 0u32;
    for (corner, &entry) in raw.iter().enumerate() {
        let last = entry < 0;
        let vertex = if last { !entry } else { entry };
        match ctx.resolve(vertex, num_vertices, "position")? {
            Some(v) => topology.corner_vertex.push(v),
            None => return Ok(None),
        }
        topology.corner_face.push(topology.faces.len() as u32);
        if last {
            let end = corner as u32 + 1;
            topology.faces.push(Face {
                index_begin: begin,
                num_indices: end - begin,
            });
            begin = end;
        }
    }
    // Some exporters forget to terminate the final polygon.
    let end = raw.len() as u32;
    if begin < end {
        topology.faces.push(Face {
            index_begin: begin,
            num_indices: end - begin,
        });
    }
    Ok(Some(topology))
}

fn read_layer<T>(
    geometry: &DocNode,
    topology: &Topology,
    ctx: &Context,
    layer: &Layer,
    convert: fn(&[f64]) -> T,
) -> Result<VertexAttribute<T>> {
    let element = match geometry.child(layer.element) {
        Some(element) => element,
        None => return Ok(VertexAttribute::default()),
    };
    let raw = match element.child_property(layer.values).and_then(Property::to_f64_vec) {
        Some(raw) => raw,
        None => return Ok(VertexAttribute::default()),
    };
    let values: Vec<T> = raw.chunks_exact(layer.components).map(convert).collect();

    let mapping_name = element.child_str("MappingInformationType").unwrap_or("ByPolygonVertex");
    let mapping = match Mapping::from_fbx(mapping_name) {
        Some(mapping) => mapping,
        None => {
            debug!(
                "mesh {:?}: unsupported {} mapping {:?}",
                ctx.mesh, layer.attribute, mapping_name
            );
            return Ok(VertexAttribute::default());
        }
    };
    let indexed = matches!(
        element.child_str("ReferenceInformationType"),
        Some("IndexToDirect") | Some("Index")
    );
    let index_array = if indexed {
        element
            .child_property(layer.index)
            .and_then(Property::to_i64_vec)
            .unwrap_or_default()
    } else {
        Vec::new()
    };

    let mut indices = Vec::with_capacity(topology.corner_vertex.len());
    for corner in 0..topology.corner_vertex.len() {
        let key = match mapping {
            Mapping::PerCorner => corner,
            Mapping::PerVertex => topology.corner_vertex[corner] as usize,
            Mapping::PerFace => topology.corner_face[corner] as usize,
            Mapping::AllSame => 0,
        };
        let index = if indexed {
            index_array.get(key).copied().unwrap_or(-1)
        } else {
            key as i64
        };
        match ctx.resolve(index, values.len(), layer.attribute)? {
            Some(i) => indices.push(i),
            None => {
                warn!(
                    "mesh {:?}: dropping {} attribute, index {} out of range",
                    ctx.mesh, layer.attribute, index
                );
                return Ok(VertexAttribute::default());
            }
        }
    }
    Ok(VertexAttribute { values, indices })
}

fn read_face_materials(geometry: &DocNode, num_faces: usize) -> Vec<u32> {
    let element = match geometry.child("LayerElementMaterial") {
        Some(element) => element,
        None => return Vec::new(),
    };
    let slots = element
        .child_property("Materials")
        .and_then(Property::to_i64_vec)
        .unwrap_or_default();
    if slots.is_empty() {
        return Vec::new();
    }
    let slot = |i: usize| slots.get(i).copied().unwrap_or(0).clamp(0, u32::MAX as i64) as u32;
    match element.child_str("MappingInformationType") {
        Some("AllSame") => vec![slot(0); num_faces],
        _ => (0..num_faces).map(slot).collect(),
    }
}

/// Fill the topology and attributes of `mesh` from its `Geometry` object.
pub(crate) fn read_geometry(
    mesh: &mut Mesh,
    geometry: &DocNode,
    handling: IndexErrorHandling,
) -> Result<()> {
    let positions: Vec<Vec3> = geometry
        .child_property("Vertices")
        .and_then(Property::to_f64_vec)
        .map(|raw| raw.chunks_exact(3).map(vec3).collect())
        .unwrap_or_default();
    let raw_indices = geometry
        .child_property("PolygonVertexIndex")
        .and_then(Property::to_i64_vec)
        .unwrap_or_default();

    let ctx = Context {
        mesh: &mesh.name,
        handling,
        clamped: Cell::new(0),
    };
    let topology = match read_topology(&raw_indices, positions.len(), &ctx)? {
        Some(topology) => topology,
        None => {
            warn!("mesh {:?}: vertex indices out of range, importing without geometry", mesh.name);
            mesh.num_vertices = positions.len();
            mesh.vertex_position.values = positions;
            return Ok(());
        }
    };

    let vertex_normal = read_layer(geometry, &topology, &ctx, &NORMAL, vec3)?;
    let vertex_uv = read_layer(geometry, &topology, &ctx, &UV, vec2)?;
    let vertex_tangent = read_layer(geometry, &topology, &ctx, &TANGENT, vec3)?;
    let vertex_bitangent = read_layer(geometry, &topology, &ctx, &BITANGENT, vec3)?;
    let vertex_color = read_layer(geometry, &topology, &ctx, &COLOR, vec4)?;
    let face_material = read_face_materials(geometry, topology.faces.len());
    if ctx.clamped.get() > 0 {
        warn!("mesh {:?}: clamped {} out-of-range indices", mesh.name, ctx.clamped.get());
    }

    mesh.num_vertices = positions.len();
    mesh.num_indices = topology.corner_vertex.len();
    mesh.num_faces = topology.faces.len();
    mesh.num_triangles = topology.faces.iter().map(Face::num_triangles).sum();
    mesh.vertex_position = VertexAttribute {
        values: positions,
        indices: topology.corner_vertex,
    };
    mesh.faces = topology.faces;
    mesh.vertex_normal = vertex_normal;
    mesh.vertex_uv = vertex_uv;
    mesh.vertex_tangent = vertex_tangent;
    mesh.vertex_bitangent = vertex_bitangent;
    mesh.vertex_color = vertex_color;
    mesh.face_material = face_material;
    Ok(())
}
