//! Octree spatial index for neighbor-pair enumeration
//!
//! Used by hydrogen-bond candidate selection: instead of testing all
//! O(n²) residue pairs, alpha-carbon positions are indexed once and
//! pairs within the cutoff radius are enumerated in O(n·k) for local
//! density k.

use lin_alg::f64::Vec3;
use thiserror::Error;

/// Maximum subdivision depth before the build gives up
const MAX_DEPTH: usize = 16;

/// Items per leaf before a node is subdivided
const LEAF_CAPACITY: usize = 8;

/// Errors from building the spatial index
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OctreeError {
    /// Subdivision reached the depth cap without separating the items
    /// (coincident positions)
    #[error("octree subdivision exceeded depth {depth} without separating {count} items")]
    ExcessiveDivision { depth: usize, count: usize },
}

/// A point to be indexed, carrying the caller's index for it
#[derive(Debug, Clone, Copy)]
pub struct OctreeItem {
    /// Position in space
    pub position: Vec3,
    /// Caller-side identity of this item
    pub index: usize,
}

impl OctreeItem {
    /// Create an item
    pub fn new(position: Vec3, index: usize) -> Self {
        OctreeItem { position, index }
    }
}

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy)]
struct Aabb {
    min: Vec3,
    max: Vec3,
}

impl Aabb {
    fn around(items: &[OctreeItem], margin: f64) -> Self {
        let mut min = Vec3::new(f64::INFINITY, f64::INFINITY, f64::INFINITY);
        let mut max = Vec3::new(f64::NEG_INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY);
        for item in items {
            let p = item.position;
            min = Vec3::new(min.x.min(p.x), min.y.min(p.y), min.z.min(p.z));
            max = Vec3::new(max.x.max(p.x), max.y.max(p.y), max.z.max(p.z));
        }
        let m = Vec3::new(margin, margin, margin);
        Aabb {
            min: min - m,
            max: max + m,
        }
    }

    fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// The child box for one of the eight octants
    fn octant(&self, which: usize) -> Aabb {
        let c = self.center();
        let pick = |bit: bool, lo: f64, mid: f64, hi: f64| -> (f64, f64) {
            if bit {
                (mid, hi)
            } else {
                (lo, mid)
            }
        };
        let (x0, x1) = pick(which & 1 != 0, self.min.x, c.x, self.max.x);
        let (y0, y1) = pick(which & 2 != 0, self.min.y, c.y, self.max.y);
        let (z0, z1) = pick(which & 4 != 0, self.min.z, c.z, self.max.z);
        Aabb {
            min: Vec3::new(x0, y0, z0),
            max: Vec3::new(x1, y1, z1),
        }
    }

    /// Which octant a point falls in, relative to the box center
    fn octant_of(&self, p: Vec3) -> usize {
        let c = self.center();
        (usize::from(p.x >= c.x)) | (usize::from(p.y >= c.y) << 1) | (usize::from(p.z >= c.z) << 2)
    }

    /// Squared distance from a point to the nearest point of the box
    fn distance_squared_to(&self, p: Vec3) -> f64 {
        let clamp = |v: f64, lo: f64, hi: f64| v.max(lo).min(hi);
        let q = Vec3::new(
            clamp(p.x, self.min.x, self.max.x),
            clamp(p.y, self.min.y, self.max.y),
            clamp(p.z, self.min.z, self.max.z),
        );
        (p - q).magnitude_squared()
    }
}

#[derive(Debug)]
enum Node {
    Leaf { slots: Vec<usize> },
    /// Exactly eight children, indexed by octant
    Branch { children: Vec<Node> },
}

/// Bounded-depth octree over a fixed item set
#[derive(Debug)]
pub struct Octree {
    items: Vec<OctreeItem>,
    bounds: Aabb,
    root: Node,
}

impl Octree {
    /// Build the tree around the bounding box of `items`, expanded by
    /// `margin` on each axis.
    ///
    /// Fails with [`OctreeError::ExcessiveDivision`] when subdivision
    /// cannot separate the items within the maximum depth (coincident
    /// positions past the leaf capacity).
    pub fn build(items: &[OctreeItem], margin: f64) -> Result<Octree, OctreeError> {
        let items = items.to_vec();
        let bounds = Aabb::around(&items, margin);
        let all: Vec<usize> = (0..items.len()).collect();
        let root = Self::split(all, bounds, 0, &items)?;
        Ok(Octree {
            items,
            bounds,
            root,
        })
    }

    fn split(
        slots: Vec<usize>,
        bounds: Aabb,
        depth: usize,
        items: &[OctreeItem],
    ) -> Result<Node, OctreeError> {
        if slots.len() <= LEAF_CAPACITY {
            return Ok(Node::Leaf { slots });
        }
        if depth >= MAX_DEPTH {
            return Err(OctreeError::ExcessiveDivision {
                depth,
                count: slots.len(),
            });
        }

        let mut buckets: [Vec<usize>; 8] = std::array::from_fn(|_| Vec::new());
        for slot in slots {
            buckets[bounds.octant_of(items[slot].position)].push(slot);
        }

        let mut children: Vec<Node> = Vec::with_capacity(8);
        for (which, bucket) in buckets.into_iter().enumerate() {
            children.push(Self::split(bucket, bounds.octant(which), depth + 1, items)?);
        }
        Ok(Node::Branch { children })
    }

    /// Number of indexed items
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the tree holds no items
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// All unordered item-index pairs `(i, j)` with `i < j` whose
    /// positions are within `cutoff` of each other.
    ///
    /// Ordering across the returned set is unspecified.
    pub fn candidate_pairs(&self, cutoff: f64) -> Vec<(usize, usize)> {
        let mut pairs = Vec::new();
        let mut found = Vec::new();
        for item in &self.items {
            found.clear();
            self.collect_within(&self.root, self.bounds, item.position, cutoff, &mut found);
            for &slot in &found {
                let other = self.items[slot].index;
                if other > item.index {
                    pairs.push((item.index, other));
                }
            }
        }
        pairs
    }

    /// Item slots within `radius` of `center`, appended to `out`
    fn collect_within(
        &self,
        node: &Node,
        bounds: Aabb,
        center: Vec3,
        radius: f64,
        out: &mut Vec<usize>,
    ) {
        if bounds.distance_squared_to(center) > radius * radius {
            return;
        }
        match node {
            Node::Leaf { slots } => {
                for &slot in slots {
                    if (self.items[slot].position - center).magnitude() <= radius {
                        out.push(slot);
                    }
                }
            }
            Node::Branch { children } => {
                for (which, child) in children.iter().enumerate() {
                    self.collect_within(child, bounds.octant(which), center, radius, out);
                }
            }
        }
    }
}
