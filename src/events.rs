use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::{beach_line::ArcId, shape::Point, Float, SiteId};

/// Popped or peeked a queue that holds no valid event.
/// The sweep never does this, hitting it means the driver loop is broken.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("pop from an empty event queue")]
pub struct EmptyQueueError;

/// Identity of a scheduled event, index of its slot in the owning queue
#[derive(Debug, Hash, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct EventId(u32);

impl EventId {
    pub fn as_usize(&self) -> usize {
        self.0 as usize
    }
}

/// Predicted disappearance of `arc`, when the sweep line reaches `x`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircleEvent {
    pub x: Float,
    /// the Voronoi vertex created when the event fires
    pub center: Point,
    pub arc: ArcId,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event {
    Site { id: SiteId, point: Point },
    Circle(CircleEvent),
}

impl Event {
    /// sweep position of the event
    pub fn x(&self) -> Float {
        match self {
            Event::Site { point, .. } => point.x,
            Event::Circle(circle) => circle.x,
        }
    }

    /// secondary order key for events at the same x
    fn y(&self) -> Float {
        match self {
            Event::Site { point, .. } => point.y,
            Event::Circle(circle) => circle.center.y,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SlotState {
    Scheduled,
    /// invalidated, its heap entry is dropped when it reaches the top
    Tombstone,
    Popped,
}

#[derive(Debug)]
struct Slot {
    event: Event,
    state: SlotState,
}

/// Heap entry, the heap is a max heap so the order is reversed
#[derive(Debug, Clone, Copy)]
struct Entry {
    x: Float,
    y: Float,
    id: EventId,
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Entry {}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .x
            .total_cmp(&self.x)
            .then_with(|| other.y.total_cmp(&self.y))
            .then_with(|| other.id.cmp(&self.id))
    }
}

/// Priority queue of events ordered by sweep x, with lazy invalidation.
///
/// Events live in slots addressed by [`EventId`]; the heap only holds ordering keys.
/// Invalidating turns the slot into a tombstone, its heap entry is skipped by later
/// pops, so invalidation is O(1).
#[derive(Debug, Default)]
pub struct EventQueue {
    slots: Vec<Slot>,
    heap: BinaryHeap<Entry>,
    scheduled: usize,
    /// tombstones dropped from the heap so far
    discarded: usize,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            heap: BinaryHeap::with_capacity(capacity),
            scheduled: 0,
            discarded: 0,
        }
    }

    /// Number of valid events
    pub fn len(&self) -> usize {
        self.scheduled
    }

    pub fn is_empty(&self) -> bool {
        self.scheduled == 0
    }

    /// Number of invalidated events dropped by pops and peeks so far
    pub fn discarded(&self) -> usize {
        self.discarded
    }

    /// Store and schedule a new event
    pub fn push(&mut self, event: Event) -> EventId {
        let id = EventId(self.slots.len() as u32);
        self.slots.push(Slot {
            event,
            state: SlotState::Popped,
        });
        self.schedule(id);
        id
    }

    /// Schedule a known event again. No-op if it is still scheduled.
    pub fn schedule(&mut self, id: EventId) {
        let Some(slot) = self.slots.get_mut(id.as_usize()) else {
            return;
        };
        if slot.state == SlotState::Scheduled {
            return;
        }

        slot.state = SlotState::Scheduled;
        self.scheduled += 1;
        self.heap.push(Entry {
            x: slot.event.x(),
            y: slot.event.y(),
            id,
        });
    }

    /// Mark the event as removed, later pops silently discard it
    pub fn invalidate(&mut self, id: EventId) {
        if let Some(slot) = self.slots.get_mut(id.as_usize()) {
            if slot.state == SlotState::Scheduled {
                slot.state = SlotState::Tombstone;
                self.scheduled -= 1;
            }
        }
    }

    /// whether the event is scheduled and not invalidated
    pub fn is_valid(&self, id: EventId) -> bool {
        matches!(
            self.slots.get(id.as_usize()),
            Some(Slot {
                state: SlotState::Scheduled,
                ..
            })
        )
    }

    pub fn get(&self, id: EventId) -> Option<&Event> {
        self.slots.get(id.as_usize()).map(|slot| &slot.event)
    }

    /// Remove and return the lowest valid event
    pub fn pop(&mut self) -> Result<(EventId, Event), EmptyQueueError> {
        self.discard_stale();
        let entry = self.heap.pop().ok_or(EmptyQueueError)?;
        let slot = &mut self.slots[entry.id.as_usize()];
        slot.state = SlotState::Popped;
        self.scheduled -= 1;
        Ok((entry.id, slot.event))
    }

    /// Lowest valid event, the queue is logically unchanged
    pub fn peek(&mut self) -> Result<(EventId, &Event), EmptyQueueError> {
        self.discard_stale();
        let entry = self.heap.peek().ok_or(EmptyQueueError)?;
        Ok((entry.id, &self.slots[entry.id.as_usize()].event))
    }

    /// x of the lowest valid event
    pub fn peek_x(&mut self) -> Option<Float> {
        self.peek().ok().map(|(_, event)| event.x())
    }

    /// drop tombstones sitting on top of the heap
    fn discard_stale(&mut self) {
        while let Some(entry) = self.heap.peek() {
            let slot = &mut self.slots[entry.id.as_usize()];
            if slot.state == SlotState::Scheduled {
                return;
            }
            if slot.state == SlotState::Tombstone {
                slot.state = SlotState::Popped;
                self.discarded += 1;
            }
            self.heap.pop();
        }
    }
}
