use crate::{
    segments::SegmentStore,
    shape::{BoundingBox, Point},
    Float, SiteId, EPSILON,
};

/// A finished Voronoi edge, the part of the perpendicular bisector of its two sites
/// that both of them own.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub start: Point,
    pub end: Point,
    /// the sites on either side
    pub sites: [SiteId; 2],
}

impl Edge {
    pub fn new(start: Point, end: Point, sites: [SiteId; 2]) -> Self {
        Self { start, end, sites }
    }

    /// `(x0, y0, x1, y1)`
    pub fn to_tuple(&self) -> (Float, Float, Float, Float) {
        (self.start.x, self.start.y, self.end.x, self.end.y)
    }

    pub fn length(&self) -> Float {
        self.start.distance(&self.end)
    }

    /// the site on the other side of the edge, None if `site` is not one of its sites
    pub fn other_site(&self, site: SiteId) -> Option<SiteId> {
        match self.sites {
            [a, b] if a == site => Some(b),
            [a, b] if b == site => Some(a),
            _ => None,
        }
    }
}

/// The region of the plane closer to `site` than to any other site, described by the
/// edges bounding it.
#[derive(Debug, Clone)]
pub struct Cell {
    site: SiteId,
    point: Point,
    /// indices into [`Diagram::edges`]
    edges: Vec<usize>,
    /// edge endpoints, deduplicated
    vertices: Vec<Point>,
    /// sites sharing an edge with this one
    neighbors: Vec<(SiteId, Point)>,
}

impl Cell {
    pub fn site(&self) -> SiteId {
        self.site
    }

    /// position of the cell's site
    pub fn point(&self) -> Point {
        self.point
    }

    pub fn edges(&self) -> &[usize] {
        &self.edges
    }

    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    pub fn neighbors(&self) -> impl Iterator<Item = SiteId> + '_ {
        self.neighbors.iter().map(|(id, _)| *id)
    }

    /// Whether `point` is in the cell, boundary included.
    ///
    /// A Voronoi cell is the intersection of the half planes towards its site, and only
    /// the neighbors' bisectors bound it.
    pub fn contains(&self, point: Point) -> bool {
        let own = point.distance_squared(&self.point);
        self.neighbors
            .iter()
            .all(|(_, other)| own <= point.distance_squared(other) + EPSILON)
    }

    fn add_vertex(&mut self, vertex: Point) {
        if !self.vertices.iter().any(|v| v.approx_eq(&vertex, EPSILON)) {
            self.vertices.push(vertex);
        }
    }

    fn add_neighbor(&mut self, site: SiteId, point: Point) {
        if !self.neighbors.iter().any(|(id, _)| *id == site) {
            self.neighbors.push((site, point));
        }
    }
}

/// Result of a nearest site query
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Nearest {
    pub site: SiteId,
    /// position of the site
    pub point: Point,
    pub distance: Float,
}

/// Queried a diagram built from no site
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("nearest site query on a diagram without sites")]
pub struct NoSitesError;

/// The Voronoi diagram of a set of sites
#[derive(Debug, Clone, Default)]
pub struct Diagram {
    sites: Vec<Point>,
    edges: Vec<Edge>,
    cells: Vec<Cell>,
    bounds: BoundingBox,
}

impl Diagram {
    pub(crate) fn new(sites: Vec<Point>, edges: Vec<Edge>, bounds: BoundingBox) -> Self {
        let cells = build_cells(&sites, &edges);
        Self {
            sites,
            edges,
            cells,
            bounds,
        }
    }

    /// Turn finished segments into edges. Twin halves started at the same site event
    /// breakpoint are joined into one edge running from one's end to the other's.
    pub(crate) fn edges_from_segments(segments: &SegmentStore) -> Vec<Edge> {
        let mut edges = Vec::with_capacity(segments.len());
        for (id, segment) in segments.iter() {
            let Some(end) = segment.end() else {
                tracing::warn!(segment = id.as_usize(), "segment left open, skipped");
                continue;
            };

            let start = match segment.twin {
                // emitted with the twin
                Some(twin) if twin < id => continue,
                Some(twin) => match segments.get(twin).and_then(|twin| twin.end()) {
                    Some(twin_end) => twin_end,
                    None => segment.start,
                },
                None => segment.start,
            };
            edges.push(Edge::new(start, end, segment.sites));
        }
        edges
    }

    /// all sites in input order, indexed by [`SiteId`]
    pub fn sites(&self) -> &[Point] {
        &self.sites
    }

    pub fn site(&self, id: SiteId) -> Option<Point> {
        self.sites.get(id.as_usize()).copied()
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// one cell per site, indexed by [`SiteId`]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn cell(&self, id: SiteId) -> Option<&Cell> {
        self.cells.get(id.as_usize())
    }

    pub fn bounds(&self) -> BoundingBox {
        self.bounds
    }

    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }

    /// The site closest to `point`, ties go to the lowest site id
    pub fn nearest_site(&self, point: impl Into<Point>) -> Result<Nearest, NoSitesError> {
        let point = point.into();
        let mut nearest: Option<(usize, Float)> = None;
        for (idx, site) in self.sites.iter().enumerate() {
            let d2 = point.distance_squared(site);
            match nearest {
                Some((_, best)) if best <= d2 => {}
                _ => nearest = Some((idx, d2)),
            }
        }

        let (idx, d2) = nearest.ok_or(NoSitesError)?;
        Ok(Nearest {
            site: SiteId(idx as u32),
            point: self.sites[idx],
            distance: d2.sqrt(),
        })
    }

    /// The cell `point` falls in, the nearest site's cell
    pub fn cell_containing(&self, point: impl Into<Point>) -> Option<&Cell> {
        let nearest = self.nearest_site(point).ok()?;
        self.cell(nearest.site)
    }
}

fn build_cells(sites: &[Point], edges: &[Edge]) -> Vec<Cell> {
    let mut cells = sites
        .iter()
        .enumerate()
        .map(|(idx, point)| Cell {
            site: SiteId(idx as u32),
            point: *point,
            edges: vec![],
            vertices: vec![],
            neighbors: vec![],
        })
        .collect::<Vec<_>>();

    for (edge_idx, edge) in edges.iter().enumerate() {
        let [a, b] = edge.sites;
        if a == b {
            continue;
        }
        for (site, other) in [(a, b), (b, a)] {
            let other_point = sites[other.as_usize()];
            let cell = &mut cells[site.as_usize()];
            cell.edges.push(edge_idx);
            cell.add_vertex(edge.start);
            cell.add_vertex(edge.end);
            cell.add_neighbor(other, other_point);
        }
    }
    cells
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::construct;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    #[test]
    fn test_nearest_site() {
        let diagram = construct(vec![(0., 0.), (10., 0.), (5., 10.)]);

        let nearest = diagram.nearest_site((1., 1.)).unwrap();
        assert_eq!(nearest.site.as_usize(), 0);
        assert_eq!(nearest.point, Point::new(0., 0.));
        assert!((nearest.distance - 2f64.sqrt()).abs() < 1e-12);

        let nearest = diagram.nearest_site(Point::new(5., 9.)).unwrap();
        assert_eq!(nearest.site.as_usize(), 2);
        assert!((nearest.distance - 1.).abs() < 1e-12);
    }

    #[test]
    fn test_nearest_site_tie_goes_to_lowest_id() {
        let diagram = construct(vec![(10., 0.), (0., 0.), (0., 0.)]);
        assert_eq!(diagram.nearest_site((5., 0.)).unwrap().site.as_usize(), 0);
        assert_eq!(diagram.nearest_site((-1., 0.)).unwrap().site.as_usize(), 1);
    }

    #[test]
    fn test_no_sites() {
        let diagram = construct(Vec::<Point>::new());
        assert_eq!(diagram.nearest_site((0., 0.)), Err(NoSitesError));
        assert!(diagram.cell_containing((0., 0.)).is_none());
    }

    #[test]
    fn test_single_site_cell() {
        let diagram = construct(vec![(3., 4.)]);
        let cell = diagram.cell(SiteId(0)).unwrap();
        assert!(cell.edges().is_empty());
        assert_eq!(cell.neighbors().count(), 0);
        // without neighbors the cell is the whole plane
        assert!(cell.contains(Point::new(-1000., 1000.)));
    }

    #[test]
    fn test_triangle_cells() {
        let diagram = construct(vec![(0., 0.), (10., 0.), (5., 10.)]);
        assert_eq!(diagram.cells().len(), 3);
        for cell in diagram.cells() {
            assert_eq!(cell.edges().len(), 2);
            assert_eq!(cell.neighbors().count(), 2);
            // the shared vertex plus one far end per edge
            assert_eq!(cell.vertices().len(), 3);
            for &edge in cell.edges() {
                assert!(diagram.edges()[edge].other_site(cell.site()).is_some());
            }
        }
    }

    #[test]
    fn test_cells_partition_the_plane() {
        let mut rng = StdRng::seed_from_u64(3);
        let sites = (0..100)
            .map(|_| Point::new(rng.gen_range(0. ..100.), rng.gen_range(0. ..100.)))
            .collect::<Vec<_>>();
        let diagram = construct(sites);

        for i in 0..40 {
            for j in 0..40 {
                let point = Point::new(i as Float * 2.5 + 0.3, j as Float * 2.5 + 0.7);
                let nearest = diagram.nearest_site(point).unwrap();
                let cell = diagram.cell_containing(point).unwrap();
                assert_eq!(cell.site(), nearest.site);
                assert!(cell.contains(point));

                // only the neighbors' bisectors bound a cell, so this fails on a missing edge
                let containing = diagram.cells().iter().filter(|c| c.contains(point)).count();
                assert_eq!(containing, 1, "{point:?}");
            }
        }
    }

    #[test]
    fn test_edges_from_segments_joins_twins() {
        use crate::segments::Segment;

        let mut segments = SegmentStore::new();
        let (a, b) = segments.insert_twins(Point::new(5., 0.), [SiteId(0), SiteId(1)]);
        let single = segments.insert(Segment::new(Point::new(1., 1.), [SiteId(1), SiteId(2)]));
        let open = segments.insert(Segment::new(Point::new(2., 2.), [SiteId(0), SiteId(2)]));

        segments.finish(a, Point::new(5., -10.));
        segments.finish(b, Point::new(5., 10.));
        segments.finish(single, Point::new(3., 3.));
        assert!(!segments.get(open).unwrap().is_done());

        let edges = Diagram::edges_from_segments(&segments);
        assert_eq!(edges.len(), 2);
        assert_eq!(edges[0].start, Point::new(5., 10.));
        assert_eq!(edges[0].end, Point::new(5., -10.));
        assert_eq!(edges[1].to_tuple(), (1., 1., 3., 3.));
    }
}
