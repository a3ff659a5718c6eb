use crate::{shape::Point, SiteId};

#[derive(Debug, Hash, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct SegmentId(u32);

impl SegmentId {
    pub fn as_usize(&self) -> usize {
        self.0 as usize
    }

    pub(crate) fn from_index(index: usize) -> Self {
        Self(index as u32)
    }
}

/// A Voronoi edge under construction.
///
/// It starts at a breakpoint or a circle center and is finished exactly once, when the
/// breakpoint tracing it vanishes or when the sweep is over.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub start: Point,
    end: Option<Point>,
    /// the two sites the edge separates
    pub sites: [SiteId; 2],
    /// the other half of an edge born at a site event, both halves start at the same
    /// breakpoint and run in opposite directions
    pub twin: Option<SegmentId>,
}

impl Segment {
    pub fn new(start: Point, sites: [SiteId; 2]) -> Self {
        Self {
            start,
            end: None,
            sites,
            twin: None,
        }
    }

    pub fn end(&self) -> Option<Point> {
        self.end
    }

    pub fn is_done(&self) -> bool {
        self.end.is_some()
    }

    /// Set the end point. Only the first call has effect, returns whether it did.
    pub fn finish(&mut self, end: Point) -> bool {
        if self.end.is_some() {
            return false;
        }
        self.end = Some(end);
        true
    }
}

/// Segment store, in creation order
#[derive(Debug, Default)]
pub struct SegmentStore {
    segments: Vec<Segment>,
}

impl SegmentStore {
    pub fn new() -> Self {
        Self { segments: vec![] }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            segments: Vec::with_capacity(capacity),
        }
    }

    /// Returns number of segments
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// insert a new open segment
    pub fn insert(&mut self, segment: Segment) -> SegmentId {
        let id = SegmentId::from_index(self.segments.len());
        self.segments.push(segment);
        id
    }

    /// insert the two halves of the edge starting at a site event breakpoint
    pub fn insert_twins(&mut self, start: Point, sites: [SiteId; 2]) -> (SegmentId, SegmentId) {
        let first = SegmentId::from_index(self.segments.len());
        let second = SegmentId::from_index(self.segments.len() + 1);

        let mut segment = Segment::new(start, sites);
        segment.twin = Some(second);
        self.segments.push(segment);

        segment.twin = Some(first);
        self.segments.push(segment);

        (first, second)
    }

    pub fn get(&self, id: SegmentId) -> Option<&Segment> {
        self.segments.get(id.as_usize())
    }

    pub fn get_mut(&mut self, id: SegmentId) -> Option<&mut Segment> {
        self.segments.get_mut(id.as_usize())
    }

    /// finish the segment if it is still open
    pub fn finish(&mut self, id: SegmentId, end: Point) -> bool {
        self.get_mut(id)
            .map(|segment| segment.finish(end))
            .unwrap_or(false)
    }

    pub fn iter(&self) -> impl Iterator<Item = (SegmentId, &Segment)> {
        self.segments
            .iter()
            .enumerate()
            .map(|(idx, s)| (SegmentId::from_index(idx), s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finish_is_idempotent() {
        let mut segment = Segment::new(Point::new(0., 0.), [SiteId(0), SiteId(1)]);
        assert!(!segment.is_done());
        assert!(segment.end().is_none());

        assert!(segment.finish(Point::new(1., 1.)));
        assert!(segment.is_done());

        assert!(!segment.finish(Point::new(5., 5.)));
        assert_eq!(segment.end(), Some(Point::new(1., 1.)));
    }

    #[test]
    fn test_twins() {
        let mut store = SegmentStore::new();
        let single = store.insert(Segment::new(Point::new(3., 3.), [SiteId(0), SiteId(2)]));
        let (a, b) = store.insert_twins(Point::new(1., 2.), [SiteId(0), SiteId(1)]);
        assert_eq!(store.len(), 3);

        assert_eq!(store.get(single).unwrap().twin, None);
        assert_eq!(store.get(a).unwrap().twin, Some(b));
        assert_eq!(store.get(b).unwrap().twin, Some(a));
        assert_eq!(store.get(a).unwrap().start, store.get(b).unwrap().start);

        assert!(store.finish(a, Point::new(0., 0.)));
        assert!(!store.finish(a, Point::new(9., 9.)));
        assert!(!store.get(b).unwrap().is_done());
        assert_eq!(store.iter().filter(|(_, s)| s.is_done()).count(), 1);
    }
}
