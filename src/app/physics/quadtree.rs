use eframe::egui::{Vec2, vec2};

const LEAF_CAPACITY: usize = 8;
const MAX_DEPTH: usize = 12;

#[derive(Clone, Copy, Debug)]
pub(super) struct Square {
    pub(super) center: Vec2,
    pub(super) half_extent: f32,
}

impl Square {
    fn enclosing(points: &[Vec2]) -> Option<Self> {
        let mut min = vec2(f32::INFINITY, f32::INFINITY);
        let mut max = vec2(f32::NEG_INFINITY, f32::NEG_INFINITY);
        for point in points {
            min = min.min(*point);
            max = max.max(*point);
        }

        if !(min.x.is_finite() && min.y.is_finite() && max.x.is_finite() && max.y.is_finite()) {
            return None;
        }

        let span = (max - min).max_elem().max(1.0);
        Some(Self {
            center: (min + max) * 0.5,
            half_extent: span * 0.5 + 1.0,
        })
    }

    pub(super) fn contains(self, point: Vec2) -> bool {
        let offset = point - self.center;
        offset.x.abs() <= self.half_extent && offset.y.abs() <= self.half_extent
    }

    pub(super) fn width(self) -> f32 {
        self.half_extent * 2.0
    }

    pub(super) fn gap_sq(self, other: Self) -> f32 {
        let reach = self.half_extent + other.half_extent;
        let dx = ((self.center.x - other.center.x).abs() - reach).max(0.0);
        let dy = ((self.center.y - other.center.y).abs() - reach).max(0.0);
        dx * dx + dy * dy
    }

    fn quadrant(self, index: usize) -> Self {
        let quarter = self.half_extent * 0.5;
        let offset = vec2(
            if index & 1 == 0 { -quarter } else { quarter },
            if index & 2 == 0 { -quarter } else { quarter },
        );
        Self {
            center: self.center + offset,
            half_extent: quarter,
        }
    }

    fn quadrant_of(self, point: Vec2) -> usize {
        usize::from(point.x >= self.center.x) | (usize::from(point.y >= self.center.y) << 1)
    }
}

pub(super) struct QuadNode {
    pub(super) bounds: Square,
    pub(super) centroid: Vec2,
    pub(super) count: usize,
    pub(super) indices: Vec<usize>,
    pub(super) children: [Option<Box<QuadNode>>; 4],
}

impl QuadNode {
    pub(super) fn build(positions: &[Vec2]) -> Option<Self> {
        let bounds = Square::enclosing(positions)?;
        Some(Self::subdivide(
            bounds,
            (0..positions.len()).collect(),
            positions,
            0,
        ))
    }

    fn subdivide(bounds: Square, indices: Vec<usize>, positions: &[Vec2], depth: usize) -> Self {
        let count = indices.len();
        let centroid = if count == 0 {
            bounds.center
        } else {
            indices
                .iter()
                .fold(Vec2::ZERO, |sum, &index| sum + positions[index])
                / count as f32
        };

        let mut node = Self {
            bounds,
            centroid,
            count,
            indices,
            children: std::array::from_fn(|_| None),
        };

        if depth >= MAX_DEPTH || count <= LEAF_CAPACITY {
            return node;
        }

        let mut buckets: [Vec<usize>; 4] = std::array::from_fn(|_| Vec::new());
        for &index in &node.indices {
            buckets[bounds.quadrant_of(positions[index])].push(index);
        }

        // coincident points never separate; keep them in one leaf
        if buckets.iter().filter(|bucket| !bucket.is_empty()).count() <= 1 {
            return node;
        }

        node.indices.clear();
        for (quadrant, bucket) in buckets.into_iter().enumerate() {
            if !bucket.is_empty() {
                node.children[quadrant] = Some(Box::new(Self::subdivide(
                    bounds.quadrant(quadrant),
                    bucket,
                    positions,
                    depth + 1,
                )));
            }
        }
        node
    }

    pub(super) fn is_leaf(&self) -> bool {
        self.children.iter().all(Option::is_none)
    }

    fn children(&self) -> impl Iterator<Item = &QuadNode> {
        self.children.iter().filter_map(|child| child.as_deref())
    }

    pub(super) fn for_each_close_pair(&self, max_distance: f32, visit: &mut impl FnMut(usize, usize)) {
        Self::close_pairs(self, self, true, max_distance * max_distance, visit);
    }

    fn close_pairs(
        node_a: &QuadNode,
        node_b: &QuadNode,
        same_node: bool,
        max_distance_sq: f32,
        visit: &mut impl FnMut(usize, usize),
    ) {
        if node_a.bounds.gap_sq(node_b.bounds) > max_distance_sq {
            return;
        }

        if node_a.is_leaf() && node_b.is_leaf() {
            if same_node {
                for (offset, &from) in node_a.indices.iter().enumerate() {
                    for &to in &node_a.indices[offset + 1..] {
                        visit(from, to);
                    }
                }
            } else {
                for &from in &node_a.indices {
                    for &to in &node_b.indices {
                        visit(from, to);
                    }
                }
            }
            return;
        }

        if same_node {
            let children = node_a.children().collect::<Vec<_>>();
            for (offset, child_a) in children.iter().enumerate() {
                Self::close_pairs(child_a, child_a, true, max_distance_sq, visit);
                for child_b in &children[offset + 1..] {
                    Self::close_pairs(child_a, child_b, false, max_distance_sq, visit);
                }
            }
            return;
        }

        let split_a = !node_a.is_leaf()
            && (node_b.is_leaf() || node_a.bounds.half_extent >= node_b.bounds.half_extent);
        if split_a {
            for child in node_a.children() {
                Self::close_pairs(child, node_b, false, max_distance_sq, visit);
            }
        } else {
            for child in node_b.children() {
                Self::close_pairs(node_a, child, false, max_distance_sq, visit);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(count: usize) -> Vec<Vec2> {
        (0..count)
            .map(|index| vec2((index % 7) as f32 * 13.0, (index / 7) as f32 * 11.0))
            .collect()
    }

    #[test]
    fn root_counts_every_point() {
        let positions = grid(50);
        let tree = QuadNode::build(&positions).unwrap();
        assert_eq!(tree.count, 50);
        assert!(!tree.is_leaf());

        let mean = positions.iter().fold(Vec2::ZERO, |sum, point| sum + *point) / 50.0;
        assert!((tree.centroid - mean).length() < 1e-3);
        assert!(positions.iter().all(|point| tree.bounds.contains(*point)));
    }

    #[test]
    fn close_pairs_match_brute_force() {
        let positions = grid(60);
        let tree = QuadNode::build(&positions).unwrap();
        let limit = 20.0;

        let mut found = Vec::new();
        tree.for_each_close_pair(limit, &mut |a, b| {
            if (positions[a] - positions[b]).length() < limit {
                found.push((a.min(b), a.max(b)));
            }
        });
        found.sort_unstable();

        let mut expected = Vec::new();
        for a in 0..positions.len() {
            for b in a + 1..positions.len() {
                if (positions[a] - positions[b]).length() < limit {
                    expected.push((a, b));
                }
            }
        }

        assert_eq!(found, expected);
    }

    #[test]
    fn coincident_points_stay_in_one_leaf() {
        let positions = vec![vec2(3.0, 3.0); 20];
        let tree = QuadNode::build(&positions).unwrap();
        assert!(tree.is_leaf());
        assert_eq!(tree.indices.len(), 20);
    }

    #[test]
    fn empty_input_has_no_tree() {
        assert!(QuadNode::build(&[]).is_none());
    }
}
