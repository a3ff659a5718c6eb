use crate::{
    beach_line::BeachLine, events::EventQueue, segments::SegmentStore, shape::BoundingBox,
    sites::Sites, Float,
};

/// State of one sweep. Handed to [`crate::Observer`] callbacks.
pub struct Context<'a> {
    pub sites: &'a Sites,
    pub bounds: BoundingBox,
    pub beach_line: BeachLine,
    pub segments: SegmentStore,
    pub site_events: EventQueue,
    pub circle_events: EventQueue,
    /// current sweep line position, never decreases
    pub sweep_x: Float,
}

impl<'a> Context<'a> {
    pub fn new(sites: &'a Sites, bounds: BoundingBox) -> Self {
        // at most 2n - 1 arcs alive, at most 3n - 6 edges
        Self {
            sites,
            bounds,
            beach_line: BeachLine::with_capacity(sites.len() * 2),
            segments: SegmentStore::with_capacity(sites.len() * 3),
            site_events: EventQueue::with_capacity(sites.len()),
            circle_events: EventQueue::with_capacity(sites.len() * 2),
            sweep_x: Float::NEG_INFINITY,
        }
    }
}
