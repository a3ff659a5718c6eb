use super::*;
use crate::{shape::Point, sites::Sites, utils::breakpoint_y};

/// Beach line, a doubly linked list of arcs stored in a slot arena.
///
/// Arcs never move, links are slot indices. A vanished arc's slot goes to the free list
/// and is handed out again by the next insert.
#[derive(Debug, Default)]
pub struct BeachLine {
    slots: Vec<Option<Arc>>,
    free: Vec<ArcId>,
    head: Option<ArcId>,
    len: usize,
}

impl BeachLine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            ..Default::default()
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// lowest arc
    pub fn head(&self) -> Option<ArcId> {
        self.head
    }

    /// highest arc
    pub fn tail(&self) -> Option<ArcId> {
        self.iter().last().map(|(id, _)| id)
    }

    pub fn get(&self, id: ArcId) -> Option<&Arc> {
        self.slots.get(id.as_usize())?.as_ref()
    }

    pub fn get_mut(&mut self, id: ArcId) -> Option<&mut Arc> {
        self.slots.get_mut(id.as_usize())?.as_mut()
    }

    /// Arc for an id known to be alive
    pub fn arc(&self, id: ArcId) -> &Arc {
        match self.get(id) {
            Some(arc) => arc,
            None => panic!("{id:?} vanished from the beach line"),
        }
    }

    /// Arc for an id known to be alive
    pub fn arc_mut(&mut self, id: ArcId) -> &mut Arc {
        match self.get_mut(id) {
            Some(arc) => arc,
            None => panic!("{id:?} vanished from the beach line"),
        }
    }

    /// iterate arcs from the lowest to the highest
    pub fn iter(&self) -> impl Iterator<Item = (ArcId, &Arc)> + '_ {
        let mut cursor = self.head;
        std::iter::from_fn(move || {
            let id = cursor?;
            let arc = self.get(id)?;
            cursor = arc.next;
            Some((id, arc))
        })
    }

    /// Start the beach line with the first site's arc, any previous content is dropped
    pub fn init(&mut self, site: SiteId) -> ArcId {
        self.slots.clear();
        self.free.clear();
        let id = self.alloc(Arc::new(site));
        self.head = Some(id);
        self.len = 1;
        id
    }

    /// Link a new arc for `site` right above `after`
    pub fn insert_after(&mut self, after: ArcId, site: SiteId) -> ArcId {
        let next = self.get(after).and_then(|arc| arc.next);

        let mut arc = Arc::new(site);
        arc.prev = Some(after);
        arc.next = next;
        let id = self.alloc(arc);

        if let Some(after) = self.get_mut(after) {
            after.next = Some(id);
        }
        if let Some(next) = next.and_then(|next| self.get_mut(next)) {
            next.prev = Some(id);
        }
        self.len += 1;
        id
    }

    /// Split `arc` by a new `site`: `arc` keeps its slot as the left copy, the new arc and
    /// a right copy of `arc` are linked above it. The right copy takes over the right
    /// segment, circle events are left to the caller.
    pub fn split(&mut self, arc: ArcId, site: SiteId) -> Split {
        let split_arc = self.arc_mut(arc);
        let arc_site = split_arc.site;
        let right_segment = split_arc.right_segment.take();

        let right = self.insert_after(arc, arc_site);
        let middle = self.insert_after(arc, site);
        self.arc_mut(right).right_segment = right_segment;

        Split {
            left: arc,
            middle,
            right,
        }
    }

    /// Unlink `arc`, its neighbors become adjacent. Returns the removed arc.
    pub fn remove(&mut self, id: ArcId) -> Arc {
        let Some(arc) = self.slots.get_mut(id.as_usize()).and_then(Option::take) else {
            panic!("remove on a vanished arc");
        };

        if let Some(prev) = arc.prev {
            if let Some(prev) = self.get_mut(prev) {
                prev.next = arc.next;
            }
        } else {
            self.head = arc.next;
        }
        if let Some(next) = arc.next.and_then(|next| self.get_mut(next)) {
            next.prev = arc.prev;
        }

        self.free.push(id);
        self.len -= 1;
        arc
    }

    /// The arc right above the new `site` at the sweep line `site.x`.
    ///
    /// Walks from the lowest arc and stops at the first one whose upper breakpoint is not
    /// below the site. The highest arc has no upper breakpoint and is the fallback.
    pub fn find_arc_above(&self, site: Point, sites: &Sites) -> Option<ArcId> {
        for (id, arc) in self.iter() {
            let Some(next) = arc.next.and_then(|next| self.get(next)) else {
                return Some(id);
            };

            let y = breakpoint_y(arc.site.get(sites), next.site.get(sites), site.x);
            if site.y <= y {
                return Some(id);
            }
        }
        None
    }

    fn alloc(&mut self, arc: Arc) -> ArcId {
        match self.free.pop() {
            Some(id) => {
                self.slots[id.as_usize()] = Some(arc);
                id
            }
            None => {
                let id = ArcId::from_index(self.slots.len());
                self.slots.push(Some(arc));
                id
            }
        }
    }
}
