//! §4.6 Publisher: materializes the surviving nodes into the live index and
//! advances the sequence counters. Runs in strict ascending id order
//! (§4.5/§5), though nothing about publish itself depends on order beyond
//! determinism of planner notification sequence.

use std::path::Path;

use log::{debug, info};

use crate::{
    contracts::Vfs,
    database::Database,
    err_at,
    filename::{self, NodeId},
    node::RecoverFlags,
    planner::Planner,
    tracker::Tracker,
    Result,
};

/// What survived and what was discarded, for the caller's logging/tests.
#[derive(Debug, Default)]
pub struct PublishReport {
    pub published: Vec<NodeId>,
    pub removed: Vec<NodeId>,
}

pub fn publish<V: Vfs + ?Sized, P: Planner>(
    vfs: &V,
    dir: &Path,
    tracker: &mut Tracker,
    database: &Database,
    planner: &mut P,
) -> Result<PublishReport> {
    let mut report = PublishReport::default();

    for id in tracker.ids_ascending() {
        let (flags, parent_id, is_undef) = {
            let node = tracker.get(id).expect("tracked id must still be present");
            (node.recover_flags, node.parent_id, node.is_undef())
        };

        if is_undef {
            // A placeholder never backed by a file of its own; drop it
            // silently, published or not (§4.5's UNDEF|DBSEAL edge case).
            debug!(target: "publ  ", "{}, placeholder dropped", id);
            tracker.remove(id);
            continue;
        }

        if flags.contains(RecoverFlags::REMOVE) {
            debug!(target: "publ  ", "{}, removing, flags {:?}", id, flags);
            delete_backing_file(vfs, dir, id, parent_id, flags)?;
            tracker.remove(id);
            report.removed.push(id);
            continue;
        }

        if flags != RecoverFlags::DB {
            return err_at!(
                Fatal,
                msg: "node {} left validator with flags {:?}, expected DB",
                id,
                flags
            );
        }

        planner.notify(id);
        report.published.push(id);
    }

    database.bump_nsn(tracker.max_nsn());
    database.bump_lsn(tracker.max_lsn());
    info!(
        target: "publ  ",
        "{:?}, published {} removed {}",
        dir,
        report.published.len(),
        report.removed.len()
    );

    Ok(report)
}

fn delete_backing_file<V: Vfs + ?Sized>(
    vfs: &V,
    dir: &Path,
    id: NodeId,
    parent_id: NodeId,
    flags: RecoverFlags,
) -> Result<()> {
    let path = if flags.contains(RecoverFlags::DB) {
        dir.join(filename::db_name(id))
    } else if flags.difference(RecoverFlags::REMOVE) == RecoverFlags::DBSEAL {
        dir.join(filename::seal_name(parent_id, id))
    } else {
        return err_at!(
            Fatal,
            msg: "node {} marked REMOVE with unexpected flags {:?}",
            id,
            flags
        );
    };
    vfs.unlink(&path)
}

#[cfg(test)]
#[path = "publish_test.rs"]
mod publish_test;
