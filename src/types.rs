//! Generic FBX document tree, as produced by the binary and ASCII readers.
//!
//! Nothing in here knows what a mesh or a light is: a [`Document`] is a list of named
//! [`DocNode`]s, each carrying typed [`Property`] values and nested children.

use std::fmt;

/// A single value attached to a document node.
#[derive(Clone, PartialEq)]
pub enum Property {
    B(bool),
    I16(i16),
    I32(i32),
    I64(i64),
    F32(f32),
    F64(f64),
    RawArray(Vec<u8>),
    String(String),
    BArray(Vec<bool>),
    I8Array(Vec<i8>),
    I32Array(Vec<i32>),
    I64Array(Vec<i64>),
    F32Array(Vec<f32>),
    F64Array(Vec<f64>),
}

impl Property {
    /// Integer view of a scalar property. Booleans map to 0/1, floats are not truncated.
    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            Property::B(v) => Some(v as i64),
            Property::I16(v) => Some(v as i64),
            Property::I32(v) => Some(v as i64),
            Property::I64(v) => Some(v),
            _ => None,
        }
    }

    /// Floating point view of a scalar property; integers widen.
    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            Property::F32(v) => Some(v as f64),
            Property::F64(v) => Some(v),
            _ => self.as_i64().map(|v| v as f64),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Property::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Property::RawArray(v) => Some(v),
            Property::String(s) => Some(s.as_bytes()),
            _ => None,
        }
    }

    /// Numeric array contents widened to `f64`.
    pub fn to_f64_vec(&self) -> Option<Vec<f64>> {
        match self {
            Property::F64Array(v) => Some(v.clone()),
            Property::F32Array(v) => Some(v.iter().map(|&x| x as f64).collect()),
            Property::I32Array(v) => Some(v.iter().map(|&x| x as f64).collect()),
            Property::I64Array(v) => Some(v.iter().map(|&x| x as f64).collect()),
            Property::I8Array(v) => Some(v.iter().map(|&x| x as f64).collect()),
            _ => None,
        }
    }

    /// Integer array contents widened to `i64`. Float arrays are rejected.
    pub fn to_i64_vec(&self) -> Option<Vec<i64>> {
        match self {
            Property::I64Array(v) => Some(v.clone()),
            Property::I32Array(v) => Some(v.iter().map(|&x| x as i64).collect()),
            Property::I8Array(v) => Some(v.iter().map(|&x| x as i64).collect()),
            _ => None,
        }
    }

    /// Number of elements for array properties, `None` for scalars.
    pub fn array_len(&self) -> Option<usize> {
        match self {
            Property::BArray(v) => Some(v.len()),
            Property::I8Array(v) => Some(v.len()),
            Property::I32Array(v) => Some(v.len()),
            Property::I64Array(v) => Some(v.len()),
            Property::F32Array(v) => Some(v.len()),
            Property::F64Array(v) => Some(v.len()),
            _ => None,
        }
    }
}

impl fmt::Debug for Property {
    // Arrays in real files run into the millions of elements; print their size instead.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Property::B(v) => write!(f, "{}", v),
            Property::I16(v) => write!(f, "{}i16", v),
            Property::I32(v) => write!(f, "{}i32", v),
            Property::I64(v) => write!(f, "{}i64", v),
            Property::F32(v) => write!(f, "{}f32", v),
            Property::F64(v) => write!(f, "{}f64", v),
            Property::RawArray(v) => write!(f, "raw[{}]", v.len()),
            Property::String(s) => write!(f, "{:?}", s),
            other => write!(f, "array[{}]", other.array_len().unwrap_or(0)),
        }
    }
}

/// A named record of the document tree.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocNode {
    pub name: String,
    pub properties: Vec<Property>,
    pub children: Vec<DocNode>,
}

impl DocNode {
    pub fn new(name: impl Into<String>) -> DocNode {
        DocNode {
            name: name.into(),
            ..DocNode::default()
        }
    }

    /// First child named `name`.
    pub fn child(&self, name: &str) -> Option<&DocNode> {
        self.children.iter().find(|c| c.name == name)
    }

    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a DocNode> + 'a {
        self.children.iter().filter(move |c| c.name == name)
    }

    pub fn property(&self, index: usize) -> Option<&Property> {
        self.properties.get(index)
    }

    /// First property of the child `name`, the usual shape of `Key: value` records.
    pub fn child_property(&self, name: &str) -> Option<&Property> {
        self.child(name).and_then(|c| c.properties.first())
    }

    pub fn child_str(&self, name: &str) -> Option<&str> {
        self.child_property(name).and_then(Property::as_str)
    }
}

/// Encoding the document was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Binary,
    Ascii,
}

/// A decoded FBX file.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub format: Format,
    pub version: u32,
    pub nodes: Vec<DocNode>,
}

impl Document {
    pub fn node(&self, name: &str) -> Option<&DocNode> {
        self.nodes.iter().find(|n| n.name == name)
    }
}
