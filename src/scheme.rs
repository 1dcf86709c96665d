//! Scheme (schema) file: the single durable file, per repository, naming the
//! field list, key ordering and the capability set (compression choice,
//! direct-I/O geometry) every node in the directory was written under.
//!
//! Grounded on the teacher's root-file handling in `shrobt.rs`
//! (`ShrobtFactory::new_root_file` / `open_root_file`, a `toml::Value` table
//! written/read next to the shards) and `dgm.rs`'s own `toml` round-trip of
//! its `Config` — both serialize their on-disk control file as TOML via
//! `serde`/`toml` rather than CBOR, reserving CBOR for node/footer bytes.

use serde::{Deserialize, Serialize};

use std::path::Path;

use crate::{contracts::Vfs, Result};

pub const SCHEME_FILE_NAME: &str = "scheme.toml";

/// Compression a node's pages were (or should be) written under.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Compression {
    None,
    Lz4,
    Snappy,
}

impl Default for Compression {
    fn default() -> Self {
        Compression::None
    }
}

/// Direct I/O geometry: whether node writes bypass the page cache and, if
/// so, the alignment pages must be padded to.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DirectIo {
    pub enabled: bool,
    pub block_size: u32,
}

impl Default for DirectIo {
    fn default() -> Self {
        DirectIo {
            enabled: false,
            block_size: 4096,
        }
    }
}

/// The schema definition this repository was created with: field list, key
/// ordering, compression choice and direct-I/O parameters. Recovery treats
/// this as opaque configuration threaded through to `node_io` at bootstrap
/// time; it never inspects field contents.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Scheme {
    pub fields: Vec<String>,
    pub key_order: Vec<String>,
    pub compression: Compression,
    pub direct_io: DirectIo,
}

impl Scheme {
    /// Durably write this scheme to `<dir>/scheme.toml`, matching the
    /// teacher's "write root file, then the shards" ordering — the scheme
    /// lands on disk before any node file does.
    pub fn write<V: Vfs + ?Sized>(&self, vfs: &V, dir: &Path) -> Result<()> {
        let body = toml::to_string_pretty(self)
            .map_err(|e| crate::Error::Scheme(format!("encode: {}", e)))?;
        vfs.write_new_file(&dir.join(SCHEME_FILE_NAME), body.as_bytes())
    }
}

/// Load the scheme for an existing repository. A failure here — missing
/// file, unparsable TOML — aborts recovery before directory scan begins,
/// per §6: "Recovery calls `scheme_recover(path)` before directory scan;
/// any failure aborts recovery."
pub fn scheme_recover<V: Vfs + ?Sized>(vfs: &V, dir: &Path) -> Result<Scheme> {
    let path = dir.join(SCHEME_FILE_NAME);
    let data = vfs.read_file(&path)?;
    let text = std::str::from_utf8(&data)
        .map_err(|e| crate::Error::Scheme(format!("{:?}: not utf8: {}", path, e)))?;
    toml::from_str(text).map_err(|e| crate::Error::Scheme(format!("{:?}: {}", path, e)))
}
