//! Three-dimensional k-d tree with insertion and radius search.
//!
//! Nodes live in a flat arena and the splitting axis cycles x → y → z with
//! depth. There is no rebalancing: range scans usually arrive sorted, so the
//! tree may degenerate into a chain. Insertion and search are therefore
//! iterative and never recurse on tree depth.

#[derive(Clone, Debug)]
struct Node {
    point: [f64; 3],
    id: usize,
    left: Option<usize>,
    right: Option<usize>,
}

#[derive(Clone, Debug, Default)]
pub struct KdTree3 {
    nodes: Vec<Node>,
}

impl KdTree3 {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
        }
    }

    /// Build a tree holding `points[i]` under id `i`, inserted in order.
    pub fn from_points(points: &[[f64; 3]]) -> Self {
        let mut tree = Self::with_capacity(points.len());
        for (id, p) in points.iter().enumerate() {
            tree.insert(*p, id);
        }
        tree
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Insert `point` under `id`. Ties on the splitting coordinate go right.
    pub fn insert(&mut self, point: [f64; 3], id: usize) {
        let new_idx = self.nodes.len();
        self.nodes.push(Node {
            point,
            id,
            left: None,
            right: None,
        });
        if new_idx == 0 {
            return;
        }

        let mut cur = 0usize;
        let mut depth = 0usize;
        loop {
            let axis = depth % 3;
            let node = &mut self.nodes[cur];
            let slot = if point[axis] < node.point[axis] {
                &mut node.left
            } else {
                &mut node.right
            };
            match *slot {
                Some(next) => {
                    cur = next;
                    depth += 1;
                }
                None => {
                    *slot = Some(new_idx);
                    return;
                }
            }
        }
    }

    /// Ids of all points within Euclidean distance `radius` of `target`
    /// (closed ball), in depth-first pre-order.
    pub fn radius_search(&self, target: &[f64; 3], radius: f64) -> Vec<usize> {
        let mut ids = Vec::new();
        if self.nodes.is_empty() {
            return ids;
        }
        let r2 = radius * radius;
        let mut stack: Vec<(usize, usize)> = vec![(0, 0)];
        while let Some((idx, depth)) = stack.pop() {
            let node = &self.nodes[idx];
            if within_box(&node.point, target, radius) && dist2(&node.point, target) <= r2 {
                ids.push(node.id);
            }

            let axis = depth % 3;
            let split = node.point[axis];
            // Right is pushed first so the left subtree is explored first.
            // Left holds coordinates strictly below `split`, right holds
            // coordinates at or above it.
            if target[axis] + radius >= split {
                if let Some(right) = node.right {
                    stack.push((right, depth + 1));
                }
            }
            if target[axis] - radius < split {
                if let Some(left) = node.left {
                    stack.push((left, depth + 1));
                }
            }
        }
        ids
    }
}

#[inline]
fn within_box(p: &[f64; 3], target: &[f64; 3], radius: f64) -> bool {
    (0..3).all(|k| p[k] >= target[k] - radius && p[k] <= target[k] + radius)
}

#[inline]
fn dist2(a: &[f64; 3], b: &[f64; 3]) -> f64 {
    let dx = a[0] - b[0];
    let dy = a[1] - b[1];
    let dz = a[2] - b[2];
    dx * dx + dy * dy + dz * dz
}
