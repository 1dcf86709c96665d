//! Minimal node file format: one or more data pages followed by a CBOR
//! footer, with an 8-byte big-endian length trailer at the very end of the
//! file naming the footer's size.
//!
//! `DirectoryScan` opens every `<id>.db` and `<parent>.<child>.db.seal` file
//! it finds through [open_node], which only ever needs to read the footer —
//! recovery never touches page bytes. This crate does not implement a real
//! page/compression engine (that belongs to the `PageWriter`/`IndexWriter`
//! collaborators); it ships just enough of the format for a freshly
//! bootstrapped node, and for tests, to round-trip through the same path a
//! production `PageWriter` would use.

use cbordata::{Cborize, FromCbor, IntoCbor};

use std::{convert::TryFrom, path::Path};

use crate::{contracts::Vfs, err_at, util, Error, Result};

/// One data page's location within the node file.
#[derive(Clone, Debug, Cborize)]
pub struct PageDescriptor {
    pub offset: u64,
    pub length: u64,
}

impl PageDescriptor {
    const ID: u32 = 0x0001;
}

/// Trailer of a node file: the pages it holds, the key range they cover,
/// the highest log-sequence-number written into the node, and an optional
/// compression tag the page bytes were written under.
#[derive(Clone, Debug, Cborize)]
pub struct Footer {
    pub pages: Vec<PageDescriptor>,
    pub low_key: Option<Vec<u8>>,
    pub high_key: Option<Vec<u8>>,
    pub lsn: u64,
    pub compression: Option<String>,
}

impl Footer {
    const ID: u32 = 0x0002;
}

/// Write the footer-only node a freshly bootstrapped repository's first
/// node consists of: one zero-length page covering an empty key range, at
/// `lsn = 0`. `compression` is threaded straight from the scheme's
/// capability set (§9: "modeled as a capability set... passed by value");
/// this crate's minimal page writer has nothing to compress, but the tag
/// still round-trips through the footer so `open_node` reports it honestly.
pub fn write_bootstrap_node<V: Vfs + ?Sized>(
    vfs: &V,
    path: &Path,
    compression: Option<String>,
) -> Result<()> {
    let footer = Footer {
        pages: vec![PageDescriptor {
            offset: 0,
            length: 0,
        }],
        low_key: None,
        high_key: None,
        lsn: 0,
        compression,
    };
    let data = encode_node(&footer)?;
    vfs.write_new_file(path, &data)
}

/// Encode a page-less node: just the footer, trailer-prefixed.
fn encode_node(footer: &Footer) -> Result<Vec<u8>> {
    let mut block = util::into_cbor_bytes(footer.clone())?;
    let n = u64::try_from(block.len())
        .map_err(|_| Error::Fatal(format!("footer too large: {} bytes", block.len())))?;
    block.extend_from_slice(&n.to_be_bytes());
    Ok(block)
}

/// Open a node file and decode its footer. Recovery never reads page bytes,
/// so this is the only read path `DirectoryScan` needs.
pub fn open_node<V: Vfs + ?Sized>(vfs: &V, path: &Path) -> Result<Footer> {
    let data = vfs.read_file(path)?;
    if data.len() < 8 {
        return err_at!(Corrupted, path);
    }
    let (body, tail) = data.split_at(data.len() - 8);
    let n = u64::from_be_bytes(match tail.try_into() {
        Ok(arr) => arr,
        Err(_) => return err_at!(Corrupted, path),
    });
    let n = usize::try_from(n).map_err(|_| Error::Corrupted {
        path: format!("{:?}", path),
    })?;
    if n > body.len() {
        return err_at!(Corrupted, path);
    }
    let footer_bytes = &body[body.len() - n..];
    match util::from_cbor_bytes::<Footer>(footer_bytes) {
        Ok((footer, _)) => Ok(footer),
        Err(_) => err_at!(Corrupted, path),
    }
}
