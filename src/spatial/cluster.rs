//! Euclidean region growing over a [`KdTree3`].
//!
//! Every point ends up in exactly one cluster; isolated points form
//! singletons. Clusters are emitted in order of their lowest seed index and
//! their members appear in depth-first discovery order. The expansion keeps
//! an explicit stack of pending neighbour lists instead of recursing, so long
//! chains of points cannot exhaust the call stack.
use super::kdtree::KdTree3;

/// Ordered set of indices into the clustered point list.
pub type Cluster = Vec<usize>;

/// Neighbour list of a visited point plus the position of the next candidate.
struct Pending {
    neighbours: Vec<usize>,
    cursor: usize,
}

impl Pending {
    fn next(&mut self) -> Option<usize> {
        let id = self.neighbours.get(self.cursor).copied();
        self.cursor += 1;
        id
    }
}

/// Partition `points` into connected components where two points are
/// connected when their distance is at most `tolerance`.
///
/// `tree` must index exactly `points`, with `points[i]` stored under id `i`.
pub fn euclidean_cluster(points: &[[f64; 3]], tree: &KdTree3, tolerance: f64) -> Vec<Cluster> {
    debug_assert_eq!(
        tree.len(),
        points.len(),
        "tree must index exactly the clustered points"
    );
    let mut clusters = Vec::new();
    let mut processed = vec![false; points.len()];
    let mut stack: Vec<Pending> = Vec::new();

    for seed in 0..points.len() {
        if processed[seed] {
            continue;
        }
        let mut cluster = Cluster::new();
        processed[seed] = true;
        cluster.push(seed);
        stack.push(Pending {
            neighbours: tree.radius_search(&points[seed], tolerance),
            cursor: 0,
        });

        loop {
            let next = match stack.last_mut() {
                Some(top) => top.next(),
                None => break,
            };
            match next {
                Some(id) if !processed[id] => {
                    processed[id] = true;
                    cluster.push(id);
                    stack.push(Pending {
                        neighbours: tree.radius_search(&points[id], tolerance),
                        cursor: 0,
                    });
                }
                Some(_) => {}
                None => {
                    stack.pop();
                }
            }
        }
        clusters.push(cluster);
    }
    clusters
}
