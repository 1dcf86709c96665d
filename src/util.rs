//! CBOR encode/decode helpers shared by [`node_io`] and [`scheme`].
//!
//! Mirrors `util::{into_cbor_bytes, from_cbor_bytes}` in the teacher's
//! `util/mod.rs`, generalized from the `err_at!(FailCbor, ...)` variant the
//! teacher uses to this crate's flat `Error` enum.

use cbordata::{Cbor, FromCbor, IntoCbor};

use crate::{Error, Result};

pub fn into_cbor_bytes<T>(val: T) -> Result<Vec<u8>>
where
    T: IntoCbor,
{
    let mut data: Vec<u8> = vec![];
    let cbor = val
        .into_cbor()
        .map_err(|e| Error::Fatal(format!("cbor encode: {}", e)))?;
    cbor.encode(&mut data)
        .map_err(|e| Error::Fatal(format!("cbor encode: {}", e)))?;
    Ok(data)
}

pub fn from_cbor_bytes<T>(mut data: &[u8]) -> Result<(T, usize)>
where
    T: FromCbor,
{
    let (val, n) =
        Cbor::decode(&mut data).map_err(|e| Error::Fatal(format!("cbor decode: {}", e)))?;
    let val = T::from_cbor(val).map_err(|e| Error::Fatal(format!("cbor decode: {}", e)))?;
    Ok((val, n))
}
