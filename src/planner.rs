//! The planner that schedules future compactions is an external
//! collaborator (§1); recovery's only contract with it is to notify it of
//! every node that enters the live index, whether by surviving validation
//! (Publisher, §4.6) or by bootstrap (§4.7).

use crate::filename::NodeId;

/// Narrow seam recovery calls through. A real planner would use this to
/// seed its compaction candidate queue; recovery does not need to know how.
pub trait Planner {
    fn notify(&mut self, id: NodeId);
}

/// Default planner: does nothing. Stands in for the teacher's full
/// compaction scheduler (the `compact_interval`-driven thread in
/// `dgm::Config`), which this crate does not implement because it is named
/// as external in §1.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopPlanner;

impl Planner for NoopPlanner {
    fn notify(&mut self, _id: NodeId) {}
}
