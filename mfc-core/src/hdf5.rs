//! Minimal, read-only HDF5 reader.
//!
//! Supports exactly one shape: superblock version 0 with 8-byte offsets and
//! lengths, a root group containing a single named 2-D contiguous dataset of
//! 32-bit IEEE floats. Every other shape (chunked or compressed layouts,
//! later superblock versions, nested groups) is rejected rather than
//! partially supported. This is the shape produced by the reference vector
//! datasets this reader was built against; it is not a general HDF5 client.

use std::{
    io::{Cursor, Read, Seek, SeekFrom},
    path::Path,
};

use byteorder::{LittleEndian, ReadBytesExt};

use crate::error::Hdf5Error;

const SIGNATURE: [u8; 8] = [0x89, b'H', b'D', b'F', b'\r', b'\n', 0x1a, b'\n'];

/// A 2-D dataset read from an HDF5 file: `rows * cols` row-major `f32`s.
#[derive(Clone, Debug, PartialEq)]
pub struct Dataset {
    rows: usize,
    cols: usize,
    values: Vec<f32>,
}

impl Dataset {
    /// Builds a dataset directly from row-major values, bypassing the HDF5
    /// reader. Used by provider crates to wrap in-memory data (and by this
    /// crate's own tests) in the same shape [`read_dataset`] produces.
    #[must_use]
    pub const fn from_rows(rows: usize, cols: usize, values: Vec<f32>) -> Self {
        Self { rows, cols, values }
    }

    /// Number of rows (records).
    #[must_use]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns (dimension of each record).
    #[must_use]
    pub const fn cols(&self) -> usize {
        self.cols
    }

    /// Row-major flattened values.
    #[must_use]
    pub fn values(&self) -> &[f32] {
        &self.values
    }
}

/// Reads the named 2-D floating point dataset from the root group of an
/// HDF5 file at `path`.
///
/// # Errors
///
/// Returns [`Hdf5Error`] if the file does not match the supported
/// superblock shape, the dataset is absent, or its dataspace, datatype, or
/// layout deviates from the supported shape.
pub fn read_dataset(path: &Path, dataset_name: &str) -> Result<Dataset, Hdf5Error> {
    let bytes = std::fs::read(path)?;
    let mut cursor = Cursor::new(bytes.as_slice());

    let superblock = read_superblock(&mut cursor)?;
    let (btree_address, heap_address) = read_root_symbol_table(&mut cursor, &superblock)?;
    let heap = read_local_heap(&mut cursor, heap_address)?;
    let entry = find_symbol_table_entry(&mut cursor, btree_address, &heap, dataset_name)?;
    read_dataset_object_header(&mut cursor, entry.object_header_address)
}

struct Superblock {
    root_group_symbol_table_entry_offset: u64,
}

fn read_superblock(cursor: &mut Cursor<&[u8]>) -> Result<Superblock, Hdf5Error> {
    cursor.set_position(0);
    let mut signature = [0_u8; 8];
    cursor.read_exact(&mut signature)?;
    if signature != SIGNATURE {
        return Err(Hdf5Error::BadSignature);
    }

    let version_superblock = cursor.read_u8()?;
    if version_superblock != 0 {
        return Err(Hdf5Error::UnsupportedSuperblock {
            reason: "only superblock version 0 is supported",
        });
    }

    let _version_free_space = cursor.read_u8()?;
    let _version_root_group_symbol_table = cursor.read_u8()?;
    let _reserved = cursor.read_u8()?;
    let _version_shared_header = cursor.read_u8()?;

    let size_of_offsets = cursor.read_u8()?;
    let size_of_lengths = cursor.read_u8()?;
    if size_of_offsets != 8 || size_of_lengths != 8 {
        return Err(Hdf5Error::UnsupportedSuperblock {
            reason: "only 8-byte offsets and lengths are supported",
        });
    }

    let _reserved = cursor.read_u8()?;
    let _group_leaf_node_k = cursor.read_u16::<LittleEndian>()?;
    let _group_internal_node_k = cursor.read_u16::<LittleEndian>()?;
    let _file_consistency_flags = cursor.read_u32::<LittleEndian>()?;

    let base_address = cursor.read_u64::<LittleEndian>()?;
    if base_address != 0 {
        return Err(Hdf5Error::UnsupportedSuperblock {
            reason: "only a zero base address is supported",
        });
    }

    let _free_space_address = cursor.read_u64::<LittleEndian>()?;
    let _end_of_file_address = cursor.read_u64::<LittleEndian>()?;
    let _driver_info_address = cursor.read_u64::<LittleEndian>()?;

    // Root group symbol table entry starts here: link name offset (8),
    // object header address (8), cache type (4), reserved (4), scratch (16).
    let root_group_symbol_table_entry_offset = cursor.position();

    Ok(Superblock {
        root_group_symbol_table_entry_offset,
    })
}

fn read_root_symbol_table(
    cursor: &mut Cursor<&[u8]>,
    superblock: &Superblock,
) -> Result<(u64, u64), Hdf5Error> {
    cursor.set_position(superblock.root_group_symbol_table_entry_offset);
    let _link_name_offset = cursor.read_u64::<LittleEndian>()?;
    let object_header_address = cursor.read_u64::<LittleEndian>()?;
    let cache_type = cursor.read_u32::<LittleEndian>()?;
    let _reserved = cursor.read_u32::<LittleEndian>()?;

    if cache_type == 1 {
        // Cached symbol table information: b-tree address then heap
        // address, each 8 bytes, within the 16-byte scratch area.
        let btree_address = cursor.read_u64::<LittleEndian>()?;
        let heap_address = cursor.read_u64::<LittleEndian>()?;
        return Ok((btree_address, heap_address));
    }

    read_symbol_table_message(cursor, object_header_address)
}

/// Walks the root group's object header looking for message type `0x11`
/// (Symbol Table message), which carries the b-tree and heap addresses.
fn read_symbol_table_message(
    cursor: &mut Cursor<&[u8]>,
    object_header_address: u64,
) -> Result<(u64, u64), Hdf5Error> {
    for message in iter_object_header_messages(cursor, object_header_address)? {
        if message.message_type == 0x0011 {
            let mut body = Cursor::new(message.body.as_slice());
            let btree_address = body.read_u64::<LittleEndian>()?;
            let heap_address = body.read_u64::<LittleEndian>()?;
            return Ok((btree_address, heap_address));
        }
    }

    Err(Hdf5Error::Malformed {
        reason: "root group object header has no symbol table message",
    })
}

struct LocalHeap {
    data_segment_address: u64,
}

fn read_local_heap(cursor: &mut Cursor<&[u8]>, heap_address: u64) -> Result<LocalHeap, Hdf5Error> {
    cursor.set_position(heap_address);
    let mut signature = [0_u8; 4];
    cursor.read_exact(&mut signature)?;
    if &signature != b"HEAP" {
        return Err(Hdf5Error::Malformed {
            reason: "local heap signature mismatch",
        });
    }

    let _version = cursor.read_u8()?;
    cursor.seek(SeekFrom::Current(3))?;
    let _data_segment_size = cursor.read_u64::<LittleEndian>()?;
    let _free_list_head_offset = cursor.read_u64::<LittleEndian>()?;
    let data_segment_address = cursor.read_u64::<LittleEndian>()?;

    Ok(LocalHeap {
        data_segment_address,
    })
}

fn read_heap_string(
    cursor: &mut Cursor<&[u8]>,
    heap: &LocalHeap,
    name_offset: u64,
) -> Result<String, Hdf5Error> {
    cursor.set_position(heap.data_segment_address.saturating_add(name_offset));
    let mut bytes = Vec::new();
    loop {
        let byte = cursor.read_u8()?;
        if byte == 0 {
            break;
        }
        bytes.push(byte);
    }
    String::from_utf8(bytes).map_err(|_err| Hdf5Error::Malformed {
        reason: "dataset name in local heap is not valid UTF-8",
    })
}

struct SymbolTableEntry {
    object_header_address: u64,
}

/// Walks the type-0 B-tree rooted at `btree_address` down to its leaf
/// (`SNOD`) nodes, returning the symbol table entry whose name (resolved
/// via the local heap) matches `dataset_name`.
fn find_symbol_table_entry(
    cursor: &mut Cursor<&[u8]>,
    btree_address: u64,
    heap: &LocalHeap,
    dataset_name: &str,
) -> Result<SymbolTableEntry, Hdf5Error> {
    let mut stack = vec![btree_address];

    while let Some(node_address) = stack.pop() {
        cursor.set_position(node_address);
        let mut signature = [0_u8; 4];
        cursor.read_exact(&mut signature)?;

        if &signature == b"SNOD" {
            if let Some(entry) = scan_leaf_node(cursor, heap, dataset_name)? {
                return Ok(entry);
            }
            continue;
        }

        if &signature != b"TREE" {
            return Err(Hdf5Error::Malformed {
                reason: "expected TREE or SNOD signature while walking the group b-tree",
            });
        }

        let node_type = cursor.read_u8()?;
        if node_type != 0 {
            return Err(Hdf5Error::UnsupportedSuperblock {
                reason: "only group (type 0) b-trees are supported",
            });
        }

        let _node_level = cursor.read_u8()?;
        let entries_used = cursor.read_u16::<LittleEndian>()?;
        let _left_sibling = cursor.read_u64::<LittleEndian>()?;
        let _right_sibling = cursor.read_u64::<LittleEndian>()?;

        // Keys and child pointers alternate; the first key is skipped, then
        // (child, key) pairs follow. Only child pointers are needed here.
        let _first_key_length = cursor.read_u64::<LittleEndian>()?;
        for _ in 0..entries_used {
            let child_pointer = cursor.read_u64::<LittleEndian>()?;
            stack.push(child_pointer);
            let _key_length = cursor.read_u64::<LittleEndian>()?;
        }
    }

    Err(Hdf5Error::DatasetNotFound {
        name: dataset_name.to_owned(),
    })
}

fn scan_leaf_node(
    cursor: &mut Cursor<&[u8]>,
    heap: &LocalHeap,
    dataset_name: &str,
) -> Result<Option<SymbolTableEntry>, Hdf5Error> {
    let _version = cursor.read_u8()?;
    cursor.seek(SeekFrom::Current(1))?;
    let symbol_count = cursor.read_u16::<LittleEndian>()?;

    for _ in 0..symbol_count {
        let link_name_offset = cursor.read_u64::<LittleEndian>()?;
        let object_header_address = cursor.read_u64::<LittleEndian>()?;
        let _cache_type = cursor.read_u32::<LittleEndian>()?;
        let _reserved = cursor.read_u32::<LittleEndian>()?;
        cursor.seek(SeekFrom::Current(16))?;

        let position_after_entry = cursor.position();
        let name = read_heap_string(cursor, heap, link_name_offset)?;
        cursor.set_position(position_after_entry);

        if name == dataset_name {
            return Ok(Some(SymbolTableEntry {
                object_header_address,
            }));
        }
    }

    Ok(None)
}

struct ObjectHeaderMessage {
    message_type: u16,
    body: Vec<u8>,
}

/// Walks an object header's messages, following Object-Header-Continuation
/// messages (type `0x0010`) to the blocks they point at.
///
/// The v1 object header prefix is 16 bytes (version, reserved, message
/// count, reference count, header size, and a trailing 4-byte reserved
/// field) so the first message starts 8-byte aligned; the message count in
/// that prefix counts every message, including continuations, across every
/// block the header spans.
fn iter_object_header_messages(
    cursor: &mut Cursor<&[u8]>,
    object_header_address: u64,
) -> Result<Vec<ObjectHeaderMessage>, Hdf5Error> {
    cursor.set_position(object_header_address);
    let _version = cursor.read_u8()?;
    cursor.seek(SeekFrom::Current(1))?;
    let total_message_count = cursor.read_u16::<LittleEndian>()?;
    let _object_reference_count = cursor.read_u32::<LittleEndian>()?;
    let _header_message_data_size = cursor.read_u32::<LittleEndian>()?;
    cursor.seek(SeekFrom::Current(4))?;

    let mut messages = Vec::with_capacity(usize::from(total_message_count));
    let mut remaining_messages = total_message_count;

    while remaining_messages > 0 {
        let message_type = cursor.read_u16::<LittleEndian>()?;
        let message_size = cursor.read_u16::<LittleEndian>()?;
        let _flags = cursor.read_u8()?;
        cursor.seek(SeekFrom::Current(3))?;

        let mut body = vec![0_u8; usize::from(message_size)];
        cursor.read_exact(&mut body)?;
        remaining_messages -= 1;

        if message_type == 0x0010 {
            let mut continuation = Cursor::new(body.as_slice());
            let continuation_address = continuation.read_u64::<LittleEndian>()?;
            let _continuation_length = continuation.read_u64::<LittleEndian>()?;
            cursor.set_position(continuation_address);
            continue;
        }

        messages.push(ObjectHeaderMessage { message_type, body });
    }

    Ok(messages)
}

fn read_dataset_object_header(
    cursor: &mut Cursor<&[u8]>,
    object_header_address: u64,
) -> Result<Dataset, Hdf5Error> {
    let mut rows = None;
    let mut cols = None;
    let mut saw_float_datatype = false;
    let mut layout: Option<(u64, u64)> = None;

    for message in iter_object_header_messages(cursor, object_header_address)? {
        match message.message_type {
            0x0001 => {
                let (r, c) = parse_dataspace_message(&message.body)?;
                rows = Some(r);
                cols = Some(c);
            }
            0x0003 => {
                parse_datatype_message(&message.body)?;
                saw_float_datatype = true;
            }
            0x0008 => {
                layout = Some(parse_layout_message(&message.body)?);
            }
            _ => {}
        }
    }

    let rows = rows.ok_or(Hdf5Error::UnsupportedDataspace {
        reason: "dataset has no dataspace message",
    })?;
    let cols = cols.ok_or(Hdf5Error::UnsupportedDataspace {
        reason: "dataset has no dataspace message",
    })?;
    if !saw_float_datatype {
        return Err(Hdf5Error::UnsupportedDatatype {
            reason: "dataset has no supported floating point datatype message",
        });
    }
    let (data_address, data_size) = layout.ok_or(Hdf5Error::UnsupportedLayout {
        reason: "dataset has no contiguous data layout message",
    })?;

    let expected_elements = rows.saturating_mul(cols);
    let expected_bytes = expected_elements.saturating_mul(4);
    if u64::try_from(expected_bytes).unwrap_or(u64::MAX) > data_size {
        return Err(Hdf5Error::Malformed {
            reason: "data layout size is smaller than rows * cols * 4 bytes",
        });
    }

    cursor.set_position(data_address);
    let mut values = Vec::with_capacity(expected_elements);
    for _ in 0..expected_elements {
        values.push(cursor.read_f32::<LittleEndian>()?);
    }

    Ok(Dataset::from_rows(rows, cols, values))
}

fn parse_dataspace_message(body: &[u8]) -> Result<(usize, usize), Hdf5Error> {
    let mut cursor = Cursor::new(body);
    let version = cursor.read_u8()?;
    if version != 1 {
        return Err(Hdf5Error::UnsupportedDataspace {
            reason: "only dataspace message version 1 is supported",
        });
    }
    let dimensionality = cursor.read_u8()?;
    if dimensionality != 2 {
        return Err(Hdf5Error::UnsupportedDataspace {
            reason: "only 2-D dataspaces are supported",
        });
    }
    let flags = cursor.read_u8()?;
    if flags != 1 {
        return Err(Hdf5Error::UnsupportedDataspace {
            reason: "only dataspaces with fixed (max == current) dimensions are supported",
        });
    }
    cursor.seek(SeekFrom::Current(5))?;

    let dim0 = cursor.read_u64::<LittleEndian>()?;
    let dim1 = cursor.read_u64::<LittleEndian>()?;
    let max0 = cursor.read_u64::<LittleEndian>()?;
    let max1 = cursor.read_u64::<LittleEndian>()?;
    if dim0 != max0 || dim1 != max1 {
        return Err(Hdf5Error::UnsupportedDataspace {
            reason: "only fixed-size (non-extensible) dataspaces are supported",
        });
    }

    Ok((
        usize::try_from(dim0).unwrap_or(usize::MAX),
        usize::try_from(dim1).unwrap_or(usize::MAX),
    ))
}

fn parse_datatype_message(body: &[u8]) -> Result<(), Hdf5Error> {
    let mut cursor = Cursor::new(body);
    let class_and_version = cursor.read_u8()?;
    let version = class_and_version >> 4;
    let class = class_and_version & 0x0f;
    if version != 1 {
        return Err(Hdf5Error::UnsupportedDatatype {
            reason: "only datatype message version 1 is supported",
        });
    }
    if class != 1 {
        return Err(Hdf5Error::UnsupportedDatatype {
            reason: "only floating point (class 1) datatypes are supported",
        });
    }
    Ok(())
}

fn parse_layout_message(body: &[u8]) -> Result<(u64, u64), Hdf5Error> {
    let mut cursor = Cursor::new(body);
    let version = cursor.read_u8()?;
    if version != 3 {
        return Err(Hdf5Error::UnsupportedLayout {
            reason: "only data layout message version 3 is supported",
        });
    }
    let layout_class = cursor.read_u8()?;
    if layout_class != 1 {
        return Err(Hdf5Error::UnsupportedLayout {
            reason: "only contiguous (layout class 1) storage is supported",
        });
    }
    let address = cursor.read_u64::<LittleEndian>()?;
    let size = cursor.read_u64::<LittleEndian>()?;
    Ok((address, size))
}

#[cfg(test)]
mod tests {
    use super::SIGNATURE;

    #[test]
    fn signature_is_the_hdf5_magic_bytes() {
        assert_eq!(&SIGNATURE, b"\x89HDF\r\n\x1a\n");
    }
}
