use std::cmp::Ordering;

use crate::shape::{BoundingBox, Point};

/// Type alias to the underlying type for SiteId.
/// SiteId is copied around in arcs, segments and events, keep it small.
type NumType = u32;

/// new type for site id, it is the index of the site in the input
#[derive(Debug, Copy, Clone, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct SiteId(pub(crate) NumType);

impl SiteId {
    /// Get the inner value as usize
    pub fn as_usize(&self) -> usize {
        self.0 as usize
    }

    /// Get the inner value as u32
    pub fn as_u32(&self) -> u32 {
        self.0
    }

    /// helper method used in the crate when the `SiteId` is known to be valid in `Sites`
    pub(crate) fn get(&self, sites: &Sites) -> Point {
        sites.sites[self.as_usize()]
    }
}

#[derive(Clone, Default)]
pub struct SitesBuilder {
    sites: Vec<Point>,
}

impl SitesBuilder {
    pub fn with_capacity(cap: usize) -> Self {
        Self {
            sites: Vec::with_capacity(cap),
        }
    }

    /// Add a site. Coincident sites are kept, each one gets its own id.
    pub fn add_site(&mut self, point: Point) -> SiteId {
        let site_id = SiteId(self.sites.len() as NumType);
        self.sites.push(point);
        site_id
    }

    pub fn add_sites(&mut self, points: impl IntoIterator<Item = Point>) {
        for point in points {
            self.add_site(point);
        }
    }

    pub fn build(self) -> Sites {
        Sites::new(self.sites)
    }
}

/// Site store
#[derive(Clone, Debug)]
pub struct Sites {
    sites: Vec<Point>,
    /// ids in sweep order
    x_sorted: Vec<SiteId>,
    /// padded box around all sites, None when there is no site
    bounds: Option<BoundingBox>,
}

impl Sites {
    pub fn new(sites: Vec<Point>) -> Self {
        let mut x_sorted = (0..sites.len())
            .map(|idx| SiteId(idx as NumType))
            .collect::<Vec<_>>();

        // sort by x, then y. The sort is stable so coincident sites keep input order
        x_sorted.sort_by(|a, b| {
            let p1 = sites[a.as_usize()];
            let p2 = sites[b.as_usize()];
            match p1.x.total_cmp(&p2.x) {
                Ordering::Equal => p1.y.total_cmp(&p2.y),
                order => order,
            }
        });

        let bounds = BoundingBox::from_points(&sites).map(|b| b.padded());

        Self {
            sites,
            x_sorted,
            bounds,
        }
    }

    pub fn len(&self) -> usize {
        self.sites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }

    /// get site for id
    pub fn get(&self, site_id: SiteId) -> Option<Point> {
        self.sites.get(site_id.as_usize()).copied()
    }

    pub fn bounds(&self) -> Option<BoundingBox> {
        self.bounds
    }

    /// iter sites in the order the sweep line reaches them
    pub fn iter_by_x(&self) -> impl Iterator<Item = (SiteId, Point)> + '_ {
        self.x_sorted
            .iter()
            .map(|id| (*id, self.sites[id.as_usize()]))
    }

    /// iter all sites in input order
    pub fn iter(&self) -> impl Iterator<Item = (SiteId, Point)> + '_ {
        self.sites
            .iter()
            .enumerate()
            .map(|(idx, p)| (SiteId(idx as NumType), *p))
    }

    pub fn as_slice(&self) -> &[Point] {
        &self.sites
    }

    pub(crate) fn into_vec(self) -> Vec<Point> {
        self.sites
    }
}
