mod beach_line;
mod context;
mod diagram;
mod events;
mod segments;
mod shape;
mod sites;
mod sweeper;
mod utils;
pub use sweeper::{construct, Observer, Sweeper, SweeperBuilder};

/// exported to enable observer
pub use beach_line::{Arc, ArcId, BeachLine};
pub use context::Context;
pub use events::{CircleEvent, EmptyQueueError, Event, EventId, EventQueue};
pub use segments::{Segment, SegmentId, SegmentStore};
pub use sites::{SiteId, Sites};

pub use diagram::{Cell, Diagram, Edge, Nearest, NoSitesError};
pub use shape::{BoundingBox, Point};

/// Coordinate type
pub type Float = f64;

/// Absolute tolerance for every geometric comparison: same sweep position, collinear
/// sites, vanishing determinants.
pub const EPSILON: Float = 1e-9;
