//! The entry point: `recover` dispatches to Bootstrap, or to
//! `DirectoryScan -> Validator -> Publisher`, per §2.

use std::path::Path;

use log::info;

use crate::{
    bootstrap::bootstrap,
    contracts::Vfs,
    database::Database,
    planner::Planner,
    publish::{publish, PublishReport},
    scan::scan_directory,
    scheme::{scheme_recover, Scheme},
    tracker::Tracker,
    validate::validate,
    Result,
};

/// §4.7's return-code contract: Bootstrap returns `Deployed`, successful
/// recovery of an existing repo returns `Recovered`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Recovered,
    Deployed,
}

/// Recover (or bootstrap) the repository at `dir`.
///
/// `scheme` is the in-memory scheme the caller is configured with; it is
/// only consulted — and durably written — when `dir` turns out to need
/// bootstrapping. For an existing repository, the on-disk scheme file is
/// authoritative and is loaded via `scheme_recover` before the directory is
/// scanned, per §6. Any failure is recorded in `database`'s error slot and
/// marks it malfunctioning (§7) before being returned.
pub fn recover<V: Vfs + ?Sized, P: Planner>(
    vfs: &V,
    dir: &Path,
    scheme: &Scheme,
    database: &Database,
    planner: &mut P,
) -> Result<(Outcome, PublishReport)> {
    info!(target: "recov ", "{:?}, recovery starting", dir);
    run(vfs, dir, scheme, database, planner).map_err(|err| {
        database.mark_malfunctioning(&err);
        err
    })
}

fn run<V: Vfs + ?Sized, P: Planner>(
    vfs: &V,
    dir: &Path,
    scheme: &Scheme,
    database: &Database,
    planner: &mut P,
) -> Result<(Outcome, PublishReport)> {
    let mut tracker = Tracker::new();

    if is_absent_or_empty(vfs, dir)? {
        return deploy(vfs, dir, scheme, database, &mut tracker, planner);
    }

    let recovered_scheme = scheme_recover(vfs, dir)?;
    scan_directory(vfs, dir, &mut tracker)?;

    if tracker.is_empty() {
        // Only unknown/hidden files were present (§8 property 7): treat the
        // repository as empty and bootstrap, reusing the scheme already on
        // disk rather than the caller's in-memory one.
        return deploy(vfs, dir, &recovered_scheme, database, &mut tracker, planner);
    }

    validate(vfs, dir, &mut tracker)?;
    let report = publish(vfs, dir, &mut tracker, database, planner)?;
    Ok((Outcome::Recovered, report))
}

fn deploy<V: Vfs + ?Sized, P: Planner>(
    vfs: &V,
    dir: &Path,
    scheme: &Scheme,
    database: &Database,
    tracker: &mut Tracker,
    planner: &mut P,
) -> Result<(Outcome, PublishReport)> {
    let id = bootstrap(vfs, dir, scheme, database, tracker, planner)?;
    database.bump_lsn(tracker.max_lsn());
    Ok((
        Outcome::Deployed,
        PublishReport {
            published: vec![id],
            removed: vec![],
        },
    ))
}

fn is_absent_or_empty<V: Vfs + ?Sized>(vfs: &V, dir: &Path) -> Result<bool> {
    if !vfs.exists(dir) {
        return Ok(true);
    }
    Ok(vfs.read_dir(dir)?.is_empty())
}

#[cfg(test)]
#[path = "recover_test.rs"]
mod recover_test;
