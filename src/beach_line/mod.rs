use crate::{events::EventId, segments::SegmentId, SiteId};

mod arena;
pub use arena::BeachLine;

/// Index of an arc slot in the [`BeachLine`] arena.
/// Slots are reused after an arc vanishes, an id is only meaningful while its arc lives.
#[derive(Debug, Hash, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct ArcId(u32);

impl ArcId {
    pub fn as_usize(&self) -> usize {
        self.0 as usize
    }

    pub(crate) fn from_index(index: usize) -> Self {
        Self(index as u32)
    }
}

/// A parabolic section of the beach line.
/// Arcs are ordered by y, `prev` is the arc below and `next` the arc above.
#[derive(Debug, Clone)]
pub struct Arc {
    pub site: SiteId,
    pub prev: Option<ArcId>,
    pub next: Option<ArcId>,
    /// pending circle event predicting this arc's disappearance
    pub circle_event: Option<EventId>,
    /// edge traced by the breakpoint with `prev`
    pub left_segment: Option<SegmentId>,
    /// edge traced by the breakpoint with `next`
    pub right_segment: Option<SegmentId>,
}

impl Arc {
    fn new(site: SiteId) -> Self {
        Self {
            site,
            prev: None,
            next: None,
            circle_event: None,
            left_segment: None,
            right_segment: None,
        }
    }
}

/// The three arcs replacing an arc hit by a new site
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Split {
    pub left: ArcId,
    pub middle: ArcId,
    pub right: ArcId,
}
