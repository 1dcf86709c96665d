//! §4.5 Validator: walks the tracker in descending id order and resolves,
//! per node, promote / remove / keep.
//!
//! Descending order guarantees that when a node is visited, any descendant
//! that could supersede it has already been processed, so REMOVE
//! propagation is single-pass (§4.5's closing paragraph).

use std::path::Path;

use log::debug;

use crate::{
    contracts::Vfs,
    err_at,
    filename::{self, NodeId},
    node::RecoverFlags,
    tracker::Tracker,
    Result,
};

pub fn validate<V: Vfs + ?Sized>(vfs: &V, dir: &Path, tracker: &mut Tracker) -> Result<()> {
    let ids = tracker.ids_descending();
    debug!(target: "valid ", "{:?}, {} nodes to validate", dir, ids.len());
    for id in ids {
        validate_one(vfs, dir, tracker, id)?;
    }
    Ok(())
}

fn validate_one<V: Vfs + ?Sized>(
    vfs: &V,
    dir: &Path,
    tracker: &mut Tracker,
    id: NodeId,
) -> Result<()> {
    let (flags, parent_id, is_undef) = {
        let node = tracker.get(id).expect("tracked id must still be present");
        (node.recover_flags, node.parent_id, node.is_undef())
    };

    if !flags.is_legal_base() {
        return err_at!(Corrupted, dir.join(filename::db_name(id)));
    }

    let base = flags.difference(RecoverFlags::REMOVE);

    if base == RecoverFlags::DBSEAL {
        resolve_sealed_child(vfs, dir, tracker, id, parent_id)?;
    } else if base.contains(RecoverFlags::DB) {
        // A valid canonical descendant always supersedes a lingering parent.
        if parent_id != id {
            if let Some(ancestor) = tracker.get_mut(parent_id) {
                ancestor.set_remove();
            }
        }
    } else if is_undef {
        // UNDEF | DBSEAL placeholder: it has no file of its own to remove
        // or promote. Its sealed child (a distinct, larger-id node visited
        // earlier in this same descending pass) already resolved itself
        // through the DBSEAL branch above; any REMOVE this placeholder
        // carries was set by that resolution and Publisher treats UNDEF
        // nodes as never having a backing file, so the mark is a no-op.
    } else {
        return err_at!(Corrupted, dir.join(filename::db_name(id)));
    }

    Ok(())
}

/// A sealed child (`recover_flags == DBSEAL`, no `UNDEF`): decide whether it
/// or its parent is stale, then promote the survivor.
fn resolve_sealed_child<V: Vfs + ?Sized>(
    vfs: &V,
    dir: &Path,
    tracker: &mut Tracker,
    id: NodeId,
    parent_id: NodeId,
) -> Result<()> {
    let parent_has_dbi = tracker
        .get(parent_id)
        .map(|p| p.recover_flags.contains(RecoverFlags::DBI));

    match parent_has_dbi {
        Some(true) => {
            // Same parent produced both an incomplete and a sealed attempt;
            // the seal is stale relative to whatever attempt never finished.
            debug!(target: "valid ", "{}, stale seal of {} (parent has DBI) removed", id, parent_id);
            tracker.get_mut(id).expect("node just visited").set_remove();
        }
        Some(false) => {
            // The sealed child is authoritative; it supersedes the parent.
            debug!(target: "valid ", "{}, seal supersedes parent {} removed", id, parent_id);
            tracker.get_mut(parent_id).expect("parent just checked").set_remove();
        }
        None => {
            // Parent was never observed at all; nothing to mark.
        }
    }

    if !tracker.get(id).expect("node just visited").is_remove() {
        promote(vfs, dir, tracker, id, parent_id)?;
    }
    Ok(())
}

/// Rename `<parent>.<id>.db.seal` to `<id>.db` atomically, clear all flags,
/// set `DB` (§4.5's promote step).
fn promote<V: Vfs + ?Sized>(
    vfs: &V,
    dir: &Path,
    tracker: &mut Tracker,
    id: NodeId,
    parent_id: NodeId,
) -> Result<()> {
    let from = dir.join(filename::seal_name(parent_id, id));
    let to = dir.join(filename::db_name(id));
    debug!(target: "valid ", "{}, promoting seal of {} to db", id, parent_id);
    vfs.rename(&from, &to)?;

    let node = tracker.get_mut(id).expect("node just visited");
    node.parent_id = id;
    node.recover_flags = RecoverFlags::DB;
    Ok(())
}

#[cfg(test)]
#[path = "validate_test.rs"]
mod validate_test;
