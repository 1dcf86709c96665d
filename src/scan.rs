//! §4.3 DirectoryScan: one order-insensitive pass over the repository
//! directory, classifying every entry and populating the [`Tracker`],
//! deleting files that are unambiguously junk as it goes.

use std::path::Path;

use log::debug;

use crate::{
    contracts::Vfs,
    filename::{self, Classification, NodeId},
    node::{Node, RecoverFlags},
    node_io,
    tracker::Tracker,
    Result,
};

/// Scan `dir` and populate `tracker`. Order of directory entries never
/// affects the result (§4.3, §5's "DirectoryScan is order-insensitive").
pub fn scan_directory<V: Vfs + ?Sized>(vfs: &V, dir: &Path, tracker: &mut Tracker) -> Result<()> {
    let names = vfs.read_dir(dir)?;
    debug!(target: "scan  ", "{:?}, {} entries", dir, names.len());
    for name in names {
        scan_one(vfs, dir, tracker, &name)?;
    }
    Ok(())
}

fn scan_one<V: Vfs + ?Sized>(
    vfs: &V,
    dir: &Path,
    tracker: &mut Tracker,
    name: &str,
) -> Result<()> {
    let classification = filename::classify(name);

    // Step 3: feed both `parent` and `nsn` to the tracker's max_nsn update,
    // for every shape except hidden/unknown names.
    match classification {
        Classification::Db { id }
        | Classification::Remove { id }
        | Classification::BootstrapIncomplete { id } => {
            tracker.bump_nsn(id);
        }
        Classification::Incomplete { parent, child } | Classification::Seal { parent, child } => {
            tracker.bump_nsn(parent);
            tracker.bump_nsn(child);
        }
        Classification::Hidden | Classification::Unknown => return Ok(()),
    }

    match classification {
        Classification::Hidden | Classification::Unknown => unreachable!(),

        Classification::Incomplete { parent, child } => {
            debug!(target: "scan  ", "{}, incomplete of {} flags parent {}", child, parent, parent);
            locate_or_flag(tracker, parent, RecoverFlags::DBI);
            vfs.unlink(&dir.join(name))
        }

        Classification::BootstrapIncomplete { id } => {
            // A crash between write_bootstrap_node and its rename to
            // `<id>.db` (§4.7): the staged node never became anyone's
            // parent or child, so it is unlinked unconditionally with no
            // tracker effect, the same as a `.db.gc` marker.
            debug!(target: "scan  ", "{}, bootstrap staging file unlinked", id);
            vfs.unlink(&dir.join(name))
        }

        Classification::Seal { parent, child } => {
            debug!(target: "scan  ", "{}, seal of {} opened", child, parent);
            locate_or_flag(tracker, parent, RecoverFlags::DBSEAL);
            let footer = node_io::open_node(vfs, &dir.join(name))?;
            tracker.bump_lsn(footer.lsn);
            tracker.insert(Node {
                id: child,
                parent_id: parent,
                recover_flags: RecoverFlags::DBSEAL,
                footer: Some(footer),
            });
            Ok(())
        }

        Classification::Remove { id } => {
            debug!(target: "scan  ", "{}, gc marker unlinked", id);
            vfs.unlink(&dir.join(name))
        }

        Classification::Db { id } => {
            debug!(target: "scan  ", "{}, db node opened", id);
            let footer = node_io::open_node(vfs, &dir.join(name))?;
            tracker.bump_lsn(footer.lsn);
            let mut node = Node {
                id,
                parent_id: id,
                recover_flags: RecoverFlags::DB,
                footer: Some(footer),
            };
            if let Some(old) = tracker.get(id) {
                node.recover_flags
                    .insert(old.recover_flags.difference(RecoverFlags::UNDEF));
            }
            tracker.replace(node);
            Ok(())
        }
    }
}

/// Locate-or-create the placeholder for `parent_id`, setting `flag` on
/// whichever node ends up there (fresh `UNDEF` placeholder, or a node
/// already present from an entry seen earlier in this scan).
fn locate_or_flag(tracker: &mut Tracker, parent_id: NodeId, flag: RecoverFlags) {
    match tracker.get_mut(parent_id) {
        Some(node) => node.recover_flags.insert(flag),
        None => {
            let mut node = Node::placeholder(parent_id);
            node.recover_flags.insert(flag);
            tracker.insert(node);
        }
    }
}

#[cfg(test)]
#[path = "scan_test.rs"]
mod scan_test;
