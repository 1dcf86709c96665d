//! §4.7 Bootstrap: the path `recover` takes when the repository directory
//! is absent, or present but empty after `DirectoryScan`.

use std::path::Path;

use log::info;

use crate::{
    contracts::Vfs,
    database::Database,
    filename,
    node::{Node, RecoverFlags},
    node_io,
    planner::Planner,
    scheme::Scheme,
    tracker::Tracker,
    Result,
};

/// Create the directory if needed, write the scheme, write and publish a
/// single empty node. Returns the freshly deployed node's id.
pub fn bootstrap<V: Vfs + ?Sized, P: Planner>(
    vfs: &V,
    dir: &Path,
    scheme: &Scheme,
    database: &Database,
    tracker: &mut Tracker,
    planner: &mut P,
) -> Result<u64> {
    if !vfs.exists(dir) {
        vfs.mkdir(dir)?;
    }

    let scheme_path = dir.join(crate::scheme::SCHEME_FILE_NAME);
    if !vfs.exists(&scheme_path) {
        scheme.write(vfs, dir)?;
    }

    let nsn = database.next_nsn();
    let incomplete = dir.join(filename::bootstrap_incomplete_name(nsn));
    let compression = match scheme.compression {
        crate::scheme::Compression::None => None,
        ref other => Some(format!("{:?}", other)),
    };
    node_io::write_bootstrap_node(vfs, &incomplete, compression)?;

    let canonical = dir.join(filename::db_name(nsn));
    vfs.rename(&incomplete, &canonical)?;

    let footer = node_io::open_node(vfs, &canonical)?;
    tracker.bump_lsn(footer.lsn);
    tracker.insert(Node {
        id: nsn,
        parent_id: 0,
        recover_flags: RecoverFlags::DB,
        footer: Some(footer),
    });
    planner.notify(nsn);
    info!(target: "boot  ", "{:?}, deployed node {}", dir, nsn);

    Ok(nsn)
}

#[cfg(test)]
#[path = "bootstrap_test.rs"]
mod bootstrap_test;
