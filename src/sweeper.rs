use crate::{
    beach_line::{ArcId, Split},
    context::Context,
    diagram::Diagram,
    events::{CircleEvent, EmptyQueueError, Event, EventId},
    segments::Segment,
    shape::{BoundingBox, Point},
    sites::{Sites, SitesBuilder},
    utils::{breakpoint, circumcircle_cw, parabola_x},
    Float, SiteId, EPSILON,
};

/// Observer for sweeper, used to monitor how sweeper works, quite useful
/// for visual debugging
/// Note: the trait's method may change to add/remove parameters, so don't
/// rely on them too much
#[allow(unused_variables)]
pub trait Observer {
    /// About to process a site event, the sweep line is already at the site
    fn site_event(&mut self, site: SiteId, context: &Context) {}

    /// About to process a valid circle event
    fn circle_event(&mut self, event: &CircleEvent, context: &Context) {}

    /// A circle event is predicted and pushed into the queue
    #[inline]
    fn circle_event_scheduled(&mut self, event: &CircleEvent, context: &Context) {}

    /// Both event queues drained
    fn sweep_done(&mut self, context: &Context) {}

    /// Edges still open after the sweep are finished against the bounds
    fn edges_completed(&mut self, context: &Context) {}
}

/// Default dummy observer, blank impl, so all calls should be optimized out by compiler.
impl Observer for () {}

/// Sweeper Builder
///
/// # Example
/// ```rust
///    use fortune_rs::{Point, SweeperBuilder};
///
///    let diagram = SweeperBuilder::new(vec![(0., 0.), (10., 0.), (5., 10.)])
///        .add_site(Point::new(5., 4.))
///        .build()
///        .sweep();
///
///    assert_eq!(diagram.sites().len(), 4);
///    let nearest = diagram.nearest_site(Point::new(5., 9.)).unwrap();
///    assert_eq!(nearest.site.as_usize(), 2);
/// ```
#[derive(Clone, Default)]
pub struct SweeperBuilder {
    sites_builder: SitesBuilder,
    bounds: Option<BoundingBox>,
}

impl SweeperBuilder {
    /// Create a new Builder with sites, site ids follow the input order
    pub fn new(sites: impl IntoIterator<Item = impl Into<Point>>) -> Self {
        let sites = sites.into_iter();
        Self {
            sites_builder: SitesBuilder::with_capacity(sites.size_hint().0),
            bounds: None,
        }
        .add_sites(sites)
    }

    /// Add a single site
    pub fn add_site(mut self, site: impl Into<Point>) -> Self {
        self.sites_builder.add_site(site.into());
        self
    }

    /// Add multiple sites, batch version for `Self::add_site`
    pub fn add_sites(mut self, sites: impl IntoIterator<Item = impl Into<Point>>) -> Self {
        self.sites_builder
            .add_sites(sites.into_iter().map(Into::into));
        self
    }

    /// Use `bounds` as the diagram box instead of the one derived from the sites.
    /// Edges reaching infinity are still clipped far enough to cover every site.
    pub fn with_bounds(mut self, bounds: BoundingBox) -> Self {
        self.bounds = Some(bounds);
        self
    }

    /// build the sweeper
    pub fn build(self) -> Sweeper {
        let sites = self.sites_builder.build();
        Sweeper {
            sites,
            bounds: self.bounds,
        }
    }
}

/// Main interface, user should grab a new Sweeper by [`SweeperBuilder::build`]
#[derive(Clone)]
pub struct Sweeper {
    sites: Sites,
    bounds: Option<BoundingBox>,
}

/// Build the diagram of `sites` in one call
pub fn construct(sites: impl IntoIterator<Item = impl Into<Point>>) -> Diagram {
    SweeperBuilder::new(sites).build().sweep()
}

impl Sweeper {
    /// Run the sweep with dummy observer
    pub fn sweep(self) -> Diagram {
        self.sweep_with_observer(&mut ())
    }

    /// Run the sweep with observer
    pub fn sweep_with_observer(self, observer: &mut impl Observer) -> Diagram {
        let bounds = match (self.bounds, self.sites.bounds()) {
            (Some(bounds), _) => bounds,
            (None, Some(bounds)) => bounds,
            (None, None) => BoundingBox::default(),
        };
        if self.sites.is_empty() {
            return Diagram::new(vec![], vec![], bounds);
        }

        // infinite edges are clipped by this box, it must cover every site
        let clip_bounds = match self.sites.bounds() {
            Some(site_bounds) => site_bounds.union(&bounds),
            None => bounds,
        };

        let mut context = Context::new(&self.sites, clip_bounds);
        for (id, point) in self.sites.iter_by_x() {
            context.site_events.push(Event::Site { id, point });
        }

        if let Err(err) = Self::sweep_events(&mut context, observer) {
            panic!("sweep stopped early: {err}");
        }
        observer.sweep_done(&context);

        Self::complete_edges(&mut context);
        observer.edges_completed(&context);

        let edges = Diagram::edges_from_segments(&context.segments);
        drop(context);

        let diagram = Diagram::new(self.sites.into_vec(), edges, bounds);
        tracing::debug!(
            sites = diagram.sites().len(),
            edges = diagram.edges().len(),
            "voronoi diagram built"
        );
        diagram
    }
}

impl Sweeper {
    /// Consume both queues, a site event goes first when it ties with a circle event
    fn sweep_events(
        context: &mut Context,
        observer: &mut impl Observer,
    ) -> Result<(), EmptyQueueError> {
        loop {
            let circle_first = match (
                context.site_events.peek_x(),
                context.circle_events.peek_x(),
            ) {
                (None, None) => return Ok(()),
                (Some(site_x), Some(circle_x)) => circle_x < site_x,
                (Some(_), None) => false,
                (None, Some(_)) => true,
            };

            if circle_first {
                let (event_id, event) = context.circle_events.pop()?;
                if let Event::Circle(circle) = event {
                    Self::circle_event(event_id, circle, context, observer);
                }
            } else {
                let (_, event) = context.site_events.pop()?;
                if let Event::Site { id, point } = event {
                    Self::site_event(id, point, context, observer);
                }
            }
        }
    }

    fn site_event(site: SiteId, point: Point, context: &mut Context, observer: &mut impl Observer) {
        context.sweep_x = context.sweep_x.max(point.x);
        tracing::trace!(site = site.as_usize(), x = point.x, y = point.y, "site event");
        observer.site_event(site, context);

        let Some(arc) = context.beach_line.find_arc_above(point, context.sites) else {
            context.beach_line.init(site);
            return;
        };

        let found = context.beach_line.arc(arc);
        let found_point = found.site.get(context.sites);
        if found.next.is_none() && (found_point.x - point.x).abs() < EPSILON {
            // sites sharing the first sweep position, or a duplicate of the highest one
            Self::append_arc(arc, site, point, context, observer);
        } else {
            Self::split_arc(arc, site, point, context, observer);
        }
    }

    /// Link the new arc above the highest arc, both foci sit on the sweep line so the
    /// edge between them is horizontal and comes from the far left.
    fn append_arc(
        tail: ArcId,
        site: SiteId,
        point: Point,
        context: &mut Context,
        observer: &mut impl Observer,
    ) {
        let tail_site = context.beach_line.arc(tail).site;
        let tail_point = tail_site.get(context.sites);

        let start = Point::new(context.bounds.far_left(), (tail_point.y + point.y) / 2.);
        let segment = context
            .segments
            .insert(Segment::new(start, [tail_site, site]));

        let arc = context.beach_line.insert_after(tail, site);
        context.beach_line.arc_mut(tail).right_segment = Some(segment);
        context.beach_line.arc_mut(arc).left_segment = Some(segment);

        Self::check_circle_event(tail, point.x, context, observer);
    }

    /// Split the arc hit by the new site. Two half edges start where the site's
    /// horizontal line meets the arc and grow in opposite directions.
    fn split_arc(
        arc: ArcId,
        site: SiteId,
        point: Point,
        context: &mut Context,
        observer: &mut impl Observer,
    ) {
        let hit = context.beach_line.arc_mut(arc);
        let arc_site = hit.site;
        if let Some(event) = hit.circle_event.take() {
            context.circle_events.invalidate(event);
        }

        let focus = arc_site.get(context.sites);
        let start = match parabola_x(focus, point.y, point.x) {
            Some(x) => Point::new(x, point.y),
            None => point,
        };

        let Split {
            left,
            middle,
            right,
        } = context.beach_line.split(arc, site);
        let (lower, upper) = context.segments.insert_twins(start, [arc_site, site]);

        context.beach_line.arc_mut(left).right_segment = Some(lower);
        let middle = context.beach_line.arc_mut(middle);
        middle.left_segment = Some(lower);
        middle.right_segment = Some(upper);
        context.beach_line.arc_mut(right).left_segment = Some(upper);

        Self::check_circle_event(left, point.x, context, observer);
        Self::check_circle_event(right, point.x, context, observer);
    }

    /// The arc squeezed to a point vanishes, its two edges meet at the circle center
    /// where a new edge between its neighbors starts.
    fn circle_event(
        event_id: EventId,
        event: CircleEvent,
        context: &mut Context,
        observer: &mut impl Observer,
    ) {
        let neighbors = context.beach_line.get(event.arc).and_then(|arc| {
            if arc.circle_event != Some(event_id) {
                return None;
            }
            Some((arc.prev?, arc.next?))
        });
        let Some((prev, next)) = neighbors else {
            // invalidated events never leave the queue, a mismatch here is a driver bug
            tracing::warn!(arc = event.arc.as_usize(), x = event.x, "circle event out of date");
            return;
        };

        context.sweep_x = context.sweep_x.max(event.x);
        tracing::trace!(
            arc = event.arc.as_usize(),
            x = event.x,
            center_x = event.center.x,
            center_y = event.center.y,
            "circle event"
        );
        observer.circle_event(&event, context);

        let removed = context.beach_line.remove(event.arc);
        for segment in [removed.left_segment, removed.right_segment]
            .into_iter()
            .flatten()
        {
            context.segments.finish(segment, event.center);
        }

        let sites = [
            context.beach_line.arc(prev).site,
            context.beach_line.arc(next).site,
        ];
        let segment = context.segments.insert(Segment::new(event.center, sites));
        context.beach_line.arc_mut(prev).right_segment = Some(segment);
        context.beach_line.arc_mut(next).left_segment = Some(segment);

        Self::check_circle_event(prev, event.x, context, observer);
        Self::check_circle_event(next, event.x, context, observer);
    }

    /// Replace the arc's pending circle event with the one its current neighbors
    /// predict, if they converge ahead of the sweep line.
    fn check_circle_event(
        arc_id: ArcId,
        sweep_x: Float,
        context: &mut Context,
        observer: &mut impl Observer,
    ) {
        let arc = context.beach_line.arc_mut(arc_id);
        if let Some(event) = arc.circle_event.take() {
            context.circle_events.invalidate(event);
        }

        let arc = context.beach_line.arc(arc_id);
        let (Some(prev), Some(next)) = (arc.prev, arc.next) else {
            return;
        };
        let a = context.beach_line.arc(prev).site.get(context.sites);
        let b = arc.site.get(context.sites);
        let c = context.beach_line.arc(next).site.get(context.sites);

        // only a clockwise turn has converging breakpoints
        let Some(circle) = circumcircle_cw(a, b, c) else {
            return;
        };
        let x = circle.rightmost_x();
        if x <= sweep_x - EPSILON {
            return;
        }

        let event = CircleEvent {
            x,
            center: circle.center,
            arc: arc_id,
        };
        let event_id = context.circle_events.push(Event::Circle(event));
        context.beach_line.arc_mut(arc_id).circle_event = Some(event_id);
        observer.circle_event_scheduled(&event, context);
    }

    /// Finish every edge still traced by a breakpoint, at the breakpoint's position once
    /// the sweep line is far past the bounds.
    fn complete_edges(context: &mut Context) {
        let directrix = context.bounds.far_directrix();
        let open = context
            .beach_line
            .iter()
            .filter_map(|(_, arc)| {
                let next = context.beach_line.get(arc.next?)?;
                Some((arc.right_segment?, arc.site, next.site))
            })
            .collect::<Vec<_>>();

        for (segment, lower, upper) in open {
            let lower = lower.get(context.sites);
            let upper = upper.get(context.sites);
            let end = breakpoint(lower, upper, directrix)
                .unwrap_or_else(|| Point::new(directrix, (lower.y + upper.y) / 2.));
            context.segments.finish(segment, end);
        }
    }
}
