//! `strata` implements the repository recovery subsystem for a
//! log-structured-merge node store: given a directory of immutable
//! on-disk node files plus whatever staging files an interrupted
//! compaction left behind, rebuild a consistent in-memory index without
//! data loss or duplication.
//!
//! A repository is a directory containing:
//!
//! - `<id>.db` — a canonical, published node.
//! - `<id>.db.gc` — a node superseded by a compaction, surviving one crash
//!   window before final unlink.
//! - `<parent>.<child>.db.incomplete` — a compaction output whose write was
//!   interrupted before sealing.
//! - `<parent>.<child>.db.seal` — a compaction output fully written and
//!   fsynced, but whose parent has not yet been demoted.
//! - a single `scheme.toml` naming the schema this repository was created
//!   with.
//!
//! [`recover`] is the entry point: it either bootstraps a fresh repository
//! or walks an existing one through `DirectoryScan -> Validator ->
//! Publisher`, in that order, on the calling thread, synchronously.
//!
//! Durable page/index writers, compression, the virtual filesystem, the
//! scheme codec, the compaction planner and the surrounding database object
//! are named as external collaborators; this crate ships minimal concrete
//! versions of each (see [`contracts`], [`node_io`], [`scheme`],
//! [`planner`], [`database`]) behind the same seams so the recovery module
//! itself never depends on a particular storage or compression engine.

mod bootstrap;
mod error;
mod filename;
mod node;
mod publish;
mod recover;
mod scan;
mod tracker;
mod util;
mod validate;

pub mod contracts;
pub mod database;
pub mod node_io;
pub mod planner;
pub mod scheme;

pub use crate::database::Database;
pub use crate::error::{Error, Result};
pub use crate::filename::NodeId;
pub use crate::planner::{NoopPlanner, Planner};
pub use crate::publish::PublishReport;
pub use crate::recover::{recover, Outcome};
pub use crate::scheme::Scheme;
