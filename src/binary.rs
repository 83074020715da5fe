//! Reader for the binary FBX encoding.
//!
//! The layout follows the `blender` importer. Records are nested and each header stores the
//! absolute offset of the record end. A record whose end offset is zero terminates a node list.

use std::io::{Cursor, Read};

use byteorder::{LittleEndian, ReadBytesExt};
use flate2::read::ZlibDecoder;
use log::trace;

use crate::error::{Error, Result};
use crate::types::{DocNode, Document, Format, Property};

pub const MAGIC: &[u8; 23] = b"Kaydara FBX Binary  \x00\x1a\x00";

/// Oldest version whose object layout the importer understands.
pub const MIN_VERSION: u32 = 7000;

/// Deepest record nesting either reader accepts.
pub const MAX_DEPTH: usize = 256;

/// Starting with 7.5, record headers use 64-bit offsets.
const WIDE_HEADER_VERSION: u32 = 7500;

type Reader<'a> = Cursor<&'a [u8]>;

trait Decodable: Sized {
    const SIZE: usize;
    fn decode<R: Read>(r: &mut R) -> Result<Self>;
}

impl Decodable for bool {
    const SIZE: usize = 1;
    fn decode<R: Read>(r: &mut R) -> Result<bool> {
        Ok(r.read_u8()? != 0)
    }
}

impl Decodable for i8 {
    const SIZE: usize = 1;
    fn decode<R: Read>(r: &mut R) -> Result<i8> {
        Ok(r.read_i8()?)
    }
}

impl Decodable for i32 {
    const SIZE: usize = 4;
    fn decode<R: Read>(r: &mut R) -> Result<i32> {
        Ok(r.read_i32::<LittleEndian>()?)
    }
}

impl Decodable for i64 {
    const SIZE: usize = 8;
    fn decode<R: Read>(r: &mut R) -> Result<i64> {
        Ok(r.read_i64::<LittleEndian>()?)
    }
}

impl Decodable for f32 {
    const SIZE: usize = 4;
    fn decode<R: Read>(r: &mut R) -> Result<f32> {
        Ok(r.read_f32::<LittleEndian>()?)
    }
}

impl Decodable for f64 {
    const SIZE: usize = 8;
    fn decode<R: Read>(r: &mut R) -> Result<f64> {
        Ok(r.read_f64::<LittleEndian>()?)
    }
}

/// True when `data` starts with the binary magic.
pub fn is_binary(data: &[u8]) -> bool {
    data.starts_with(&MAGIC[..21])
}

/// Decode a binary FBX file held in memory to a [`Document`].
pub fn decode_fbx(data: &[u8]) -> Result<Document> {
    let mut r = Cursor::new(data);
    let mut header = [0u8; 23];
    r.read_exact(&mut header[..])?;
    if &header != MAGIC {
        return Err(Error::UnrecognizedFormat);
    }
    let version = r.read_u32::<LittleEndian>()?;
    if version < MIN_VERSION {
        return Err(Error::UnsupportedVersion(version));
    }
    let wide = version >= WIDE_HEADER_VERSION;
    let nodes = decode_node_list(&mut r, wide, data.len() as u64, 0)?;
    Ok(Document {
        format: Format::Binary,
        version,
        nodes,
    })
}

fn remaining(r: &Reader) -> u64 {
    (r.get_ref().len() as u64).saturating_sub(r.position())
}

fn decode_node_list(r: &mut Reader, wide: bool, end: u64, depth: usize) -> Result<Vec<DocNode>> {
    let mut nodes = Vec::new();
    while r.position() < end {
        match decode_node(r, wide, depth)? {
            Some(node) => nodes.push(node),
            None => break,
        }
    }
    Ok(nodes)
}

fn decode_node(r: &mut Reader, wide: bool, depth: usize) -> Result<Option<DocNode>> {
    let start = r.position();
    let (end_offset, num_properties) = if wide {
        let end_offset = r.read_u64::<LittleEndian>()?;
        let num_properties = r.read_u64::<LittleEndian>()?;
        let _list_len = r.read_u64::<LittleEndian>()?;
        (end_offset, num_properties)
    } else {
        let end_offset = r.read_u32::<LittleEndian>()? as u64;
        let num_properties = r.read_u32::<LittleEndian>()? as u64;
        let _list_len = r.read_u32::<LittleEndian>()?;
        (end_offset, num_properties)
    };
    let name_len = r.read_u8()? as usize;
    if end_offset == 0 {
        return Ok(None);
    }
    if end_offset <= start || end_offset > r.get_ref().len() as u64 {
        let message = format!("record end offset {} is out of bounds", end_offset);
        return Err(Error::malformed(start, message));
    }

    let mut name = vec![0u8; name_len];
    r.read_exact(&mut name)?;
    let mut node = DocNode::new(String::from_utf8_lossy(&name));
    trace!("record '{}' at {} ({} properties)", node.name, start, num_properties);

    // Every property occupies at least two bytes, which bounds the preallocation.
    if num_properties > remaining(r) {
        return Err(Error::malformed(start, "property count exceeds record size"));
    }
    node.properties.reserve(num_properties as usize);
    for _ in 0..num_properties {
        node.properties.push(decode_property(r)?);
    }

    if r.position() < end_offset {
        if depth >= MAX_DEPTH {
            let message = format!("records nested deeper than {} levels", MAX_DEPTH);
            return Err(Error::malformed(start, message));
        }
        node.children = decode_node_list(r, wide, end_offset, depth + 1)?;
    }
    r.set_position(end_offset);
    Ok(Some(node))
}

fn decode_property(r: &mut Reader) -> Result<Property> {
    let offset = r.position();
    match r.read_u8()? {
        b'C' => Ok(Property::B(r.read_u8()? != 0)),
        b'Y' => Ok(Property::I16(r.read_i16::<LittleEndian>()?)),
        b'I' => Ok(Property::I32(r.read_i32::<LittleEndian>()?)),
        b'L' => Ok(Property::I64(r.read_i64::<LittleEndian>()?)),
        b'F' => Ok(Property::F32(r.read_f32::<LittleEndian>()?)),
        b'D' => Ok(Property::F64(r.read_f64::<LittleEndian>()?)),
        b'R' => Ok(Property::RawArray(decode_raw_array(r)?)),
        b'S' => {
            let raw = decode_raw_array(r)?;
            Ok(Property::String(match String::from_utf8(raw) {
                Ok(s) => s,
                Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
            }))
        }
        b'b' => Ok(Property::BArray(decode_array::<bool>(r)?)),
        b'c' => Ok(Property::I8Array(decode_array::<i8>(r)?)),
        b'i' => Ok(Property::I32Array(decode_array::<i32>(r)?)),
        b'l' => Ok(Property::I64Array(decode_array::<i64>(r)?)),
        b'f' => Ok(Property::F32Array(decode_array::<f32>(r)?)),
        b'd' => Ok(Property::F64Array(decode_array::<f64>(r)?)),
        code => Err(Error::malformed(offset, format!("invalid property type code 0x{:02x}", code))),
    }
}

fn decode_raw_array(r: &mut Reader) -> Result<Vec<u8>> {
    let offset = r.position();
    let length = r.read_u32::<LittleEndian>()? as u64;
    if length > remaining(r) {
        return Err(Error::malformed(offset, "raw array runs past the end of the file"));
    }
    let mut array = vec![0u8; length as usize];
    r.read_exact(&mut array[..])?;
    Ok(array)
}

fn decode_array<T: Decodable>(r: &mut Reader) -> Result<Vec<T>> {
    let offset = r.position();
    let length = r.read_u32::<LittleEndian>()? as usize;
    let encoding = r.read_u32::<LittleEndian>()?;
    let compressed_length = r.read_u32::<LittleEndian>()? as u64;
    let byte_length = length * T::SIZE;

    match encoding {
        0 => {
            if byte_length as u64 > remaining(r) {
                return Err(Error::malformed(offset, "array runs past the end of the file"));
            }
            let mut array = Vec::with_capacity(length);
            for _ in 0..length {
                array.push(T::decode(r)?);
            }
            Ok(array)
        }
        1 => {
            if compressed_length > remaining(r) {
                let message = "compressed array runs past the end of the file";
                return Err(Error::malformed(offset, message));
            }
            let start = r.position() as usize;
            let data = *r.get_ref();
            let compressed = &data[start..start + compressed_length as usize];
            r.set_position(start as u64 + compressed_length);

            // The declared length is unchecked until inflation ends, so let the buffer grow.
            let mut inflated = Vec::new();
            ZlibDecoder::new(compressed)
                .take(byte_length as u64)
                .read_to_end(&mut inflated)
                .map_err(|e| Error::Decompress(e.to_string()))?;
            if inflated.len() != byte_length {
                return Err(Error::Decompress(format!(
                    "expected {} bytes, inflated {}",
                    byte_length,
                    inflated.len()
                )));
            }

            let mut cursor = Cursor::new(&inflated[..]);
            let mut array = Vec::with_capacity(length);
            for _ in 0..length {
                array.push(T::decode(&mut cursor)?);
            }
            Ok(array)
        }
        _ => Err(Error::malformed(offset, format!("unknown array encoding {}", encoding))),
    }
}
