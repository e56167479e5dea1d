/// Cycle enumeration over a sketch.
///
/// Two cycle families are reported:
///
/// - **Multi-edge cycles** — an unordered pair with more than one parallel
///   edge yields one 2-label cycle (or a 1-label cycle for a self-pair).
///   Whether the pair holds 2 or 3 edges makes no difference: any count
///   above 1 produces exactly one reported cycle.
/// - **Simple cycles** — closed walks of 3 or more distinct nodes, found by
///   a depth-first search over the deduplicated adjacency view.
///
/// # Canonical forms
///
/// Every reported cycle has exactly one representation, so the result set
/// never contains rotations or reversals of the same cycle:
///
/// - a 2-label cycle is ordered lexically;
/// - a simple cycle is anchored at its lexically smallest label (the DFS
///   only ever extends through labels strictly greater than its anchor, so
///   each cycle is found from its smallest label only), and of the two
///   traversal directions the one whose second label is smaller is kept.
///
/// The DFS runs on an explicit frame stack — no recursion, so pathological
/// sketches cannot overflow the call stack. It still explores worst-case
/// exponentially many paths on dense graphs; acceptable for the interactive
/// sketch sizes this tool targets.
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::Serialize;

use crate::label::Label;
use crate::sketch::Sketch;

// ---------------------------------------------------------------------------
// Cycle
// ---------------------------------------------------------------------------

/// A single cycle, as an ordered label sequence.
///
/// The first label implicitly follows the last. Length 1 is a self-loop
/// pair, length 2 a parallel pair, length 3 and up a simple cycle. The
/// derived `Ord` (lexical over the label sequence) gives [`CycleSet`] its
/// deterministic iteration order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Cycle(Vec<Label>);

impl Cycle {
    /// A 1-label cycle: a node with parallel self-edges.
    fn self_loop(label: Label) -> Self {
        Self(vec![label])
    }

    /// A 2-label cycle from a parallel pair, canonicalised to lexical order.
    fn parallel_pair(a: Label, b: Label) -> Self {
        if a <= b {
            Self(vec![a, b])
        } else {
            Self(vec![b, a])
        }
    }

    /// A simple cycle from a DFS path, canonicalised by direction.
    ///
    /// The path is already anchored at its smallest label. Of the two
    /// traversal directions the canonical one has the smaller second label;
    /// if the discovered path is the other direction, its tail is reversed.
    fn simple(mut path: Vec<Label>) -> Self {
        if path.len() >= 3 {
            let last = path.len() - 1;
            if path[1] > path[last] {
                path[1..].reverse();
            }
        }
        Self(path)
    }

    /// The labels of the cycle, in canonical order.
    pub fn labels(&self) -> &[Label] {
        &self.0
    }

    /// Number of distinct labels in the cycle.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always `false` for a detector-produced cycle; present for API
    /// completeness alongside [`Cycle::len`].
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Cycle {
    /// Renders the closed walk, repeating the anchor: `A -> B -> C -> A`.
    ///
    /// A self-loop cycle renders as `A -> A`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for label in &self.0 {
            write!(f, "{label} -> ")?;
        }
        match self.0.first() {
            Some(anchor) => write!(f, "{anchor}"),
            None => Ok(()),
        }
    }
}

// ---------------------------------------------------------------------------
// CycleSet
// ---------------------------------------------------------------------------

/// The result of [`find_cycles`]: a deduplicated, deterministically ordered
/// set of cycles.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct CycleSet(BTreeSet<Cycle>);

impl CycleSet {
    /// Returns `true` when the sketch is acyclic.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of distinct cycles found.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterates cycles in canonical (lexical) order.
    pub fn iter(&self) -> impl Iterator<Item = &Cycle> {
        self.0.iter()
    }

    /// Returns `true` when `cycle` is in the set.
    pub fn contains(&self, cycle: &Cycle) -> bool {
        self.0.contains(cycle)
    }

    fn insert(&mut self, cycle: Cycle) {
        self.0.insert(cycle);
    }
}

impl<'a> IntoIterator for &'a CycleSet {
    type Item = &'a Cycle;
    type IntoIter = std::collections::btree_set::Iter<'a, Cycle>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

// ---------------------------------------------------------------------------
// Detection
// ---------------------------------------------------------------------------

/// Enumerates every cycle in `sketch`.
///
/// Builds a simple-graph adjacency view (parallel edges collapsed), collects
/// multi-edge cycles from the per-neighbour link lists, collects simple
/// cycles of length ≥ 3 by anchored DFS, and unions the two families. Pure
/// read: the sketch is not modified, and repeated calls on an unmodified
/// sketch return equal sets.
pub fn find_cycles(sketch: &Sketch) -> CycleSet {
    let adjacency = adjacency(sketch);
    let mut cycles = CycleSet::default();
    multi_edge_cycles(sketch, &mut cycles);
    simple_cycles(&adjacency, &mut cycles);
    cycles
}

/// Builds the deduplicated adjacency view: label → distinct neighbour labels.
///
/// A node with a self-loop lists itself as a neighbour, mirroring its link
/// list; the DFS never extends through it (it is always already on the
/// path), so this cannot produce spurious simple cycles.
fn adjacency(sketch: &Sketch) -> BTreeMap<Label, BTreeSet<Label>> {
    sketch
        .nodes()
        .map(|node| {
            let neighbors: BTreeSet<Label> = node.neighbors().cloned().collect();
            (node.label.clone(), neighbors)
        })
        .collect()
}

/// Records one cycle for every pair (self-pairs included) with more than one
/// parallel edge.
///
/// Each qualifying pair is seen from both endpoints' link lists;
/// [`Cycle::parallel_pair`] canonicalises the order, so the set collapses
/// the two sightings into one entry.
fn multi_edge_cycles(sketch: &Sketch, out: &mut CycleSet) {
    for node in sketch.nodes() {
        for (neighbor, edge_ids) in node.links() {
            if edge_ids.len() > 1 {
                if *neighbor == node.label {
                    out.insert(Cycle::self_loop(node.label.clone()));
                } else {
                    out.insert(Cycle::parallel_pair(
                        node.label.clone(),
                        neighbor.clone(),
                    ));
                }
            }
        }
    }
}

/// A DFS frame: the remaining neighbours of the node at this depth.
struct Frame {
    children: Vec<Label>,
    next: usize,
}

/// Finds every simple cycle of length ≥ 3 by anchored depth-first search.
///
/// For each label in ascending order, a DFS explores paths that start there
/// and only ever extend through labels **strictly greater** than the anchor
/// and not already on the path. A path closes into a cycle when the current
/// node neighbours the anchor and the path holds at least 3 labels. The
/// strictly-greater rule means every cycle is discovered from its smallest
/// label only — no rotations — and [`Cycle::simple`] collapses the two
/// traversal directions into one canonical form.
fn simple_cycles(adjacency: &BTreeMap<Label, BTreeSet<Label>>, out: &mut CycleSet) {
    for start in adjacency.keys() {
        let mut path: Vec<Label> = vec![start.clone()];
        let mut stack: Vec<Frame> = vec![Frame {
            children: sorted_neighbors(adjacency, start),
            next: 0,
        }];

        while let Some(frame) = stack.last_mut() {
            if frame.next >= frame.children.len() {
                // This depth is exhausted: backtrack.
                stack.pop();
                path.pop();
                continue;
            }

            let neighbor = frame.children[frame.next].clone();
            frame.next += 1;

            if neighbor == *start && path.len() >= 3 {
                out.insert(Cycle::simple(path.clone()));
            } else if neighbor > *start && !path.contains(&neighbor) {
                let children = sorted_neighbors(adjacency, &neighbor);
                path.push(neighbor);
                stack.push(Frame { children, next: 0 });
            }
        }
    }
}

/// The neighbours of `label` as a sorted vector (empty if unknown).
fn sorted_neighbors(adjacency: &BTreeMap<Label, BTreeSet<Label>>, label: &Label) -> Vec<Label> {
    adjacency
        .get(label)
        .map(|set| set.iter().cloned().collect())
        .unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use super::*;
    use crate::structures::Position;

    fn label(s: &str) -> Label {
        Label::try_from(s).expect("valid label")
    }

    /// Builds a sketch containing exactly the given edges; endpoints are
    /// created on first sight.
    fn sketch_from_edges(edges: &[(&str, &str)]) -> Sketch {
        let mut sketch = Sketch::new();
        for (a, b) in edges {
            for endpoint in [a, b] {
                let l = label(endpoint);
                if sketch.node(&l).is_none() {
                    sketch
                        .add_labeled_node(l, Position::new(0.0, 0.0))
                        .expect("seed node");
                }
            }
            let _ = sketch.connect(&label(a), &label(b)).expect("under cap");
        }
        sketch
    }

    /// The found cycles as label-string vectors, in set order.
    fn found(sketch: &Sketch) -> Vec<Vec<String>> {
        find_cycles(sketch)
            .iter()
            .map(|c| c.labels().iter().map(ToString::to_string).collect())
            .collect()
    }

    fn strings(cycle: &[&str]) -> Vec<String> {
        cycle.iter().map(ToString::to_string).collect()
    }

    // -----------------------------------------------------------------------
    // Acyclic sketches
    // -----------------------------------------------------------------------

    #[test]
    fn empty_sketch_has_no_cycles() {
        let sketch = Sketch::new();
        assert!(find_cycles(&sketch).is_empty());
    }

    #[test]
    fn simple_path_has_no_cycles() {
        let sketch = sketch_from_edges(&[("A", "B"), ("B", "C"), ("C", "D")]);
        assert!(find_cycles(&sketch).is_empty());
    }

    #[test]
    fn star_has_no_cycles() {
        let sketch = sketch_from_edges(&[("A", "B"), ("A", "C"), ("A", "D")]);
        assert!(find_cycles(&sketch).is_empty());
    }

    #[test]
    fn single_self_loop_is_not_a_cycle() {
        // One self-edge does not close anything; only a parallel self-pair
        // counts as a multi-edge cycle.
        let sketch = sketch_from_edges(&[("A", "A")]);
        assert!(find_cycles(&sketch).is_empty());
    }

    #[test]
    fn single_edge_between_two_nodes_is_not_a_cycle() {
        let sketch = sketch_from_edges(&[("A", "B")]);
        assert!(find_cycles(&sketch).is_empty());
    }

    // -----------------------------------------------------------------------
    // Multi-edge cycles
    // -----------------------------------------------------------------------

    #[test]
    fn parallel_pair_yields_exactly_one_two_cycle() {
        let sketch = sketch_from_edges(&[("A", "B"), ("A", "B")]);
        assert_eq!(found(&sketch), vec![strings(&["A", "B"])]);
    }

    #[test]
    fn triple_edges_report_the_same_single_cycle_as_double() {
        // 2 or 3 parallel edges are indistinguishable in the report: any
        // count above 1 triggers exactly one cycle for the pair.
        let double = sketch_from_edges(&[("A", "B"), ("A", "B")]);
        let triple = sketch_from_edges(&[("A", "B"), ("A", "B"), ("A", "B")]);
        assert_eq!(find_cycles(&double), find_cycles(&triple));
    }

    #[test]
    fn parallel_pair_is_canonical_regardless_of_creation_order() {
        let forward = sketch_from_edges(&[("A", "B"), ("A", "B")]);
        let backward = sketch_from_edges(&[("B", "A"), ("B", "A")]);
        assert_eq!(find_cycles(&forward), find_cycles(&backward));
    }

    #[test]
    fn two_self_edges_yield_a_one_cycle() {
        let sketch = sketch_from_edges(&[("A", "A"), ("A", "A")]);
        assert_eq!(found(&sketch), vec![strings(&["A"])]);
    }

    #[test]
    fn three_self_edges_still_yield_one_cycle() {
        let sketch = sketch_from_edges(&[("A", "A"), ("A", "A"), ("A", "A")]);
        assert_eq!(found(&sketch), vec![strings(&["A"])]);
    }

    // -----------------------------------------------------------------------
    // Simple cycles
    // -----------------------------------------------------------------------

    #[test]
    fn triangle_yields_exactly_one_cycle() {
        let sketch = sketch_from_edges(&[("A", "B"), ("B", "C"), ("C", "A")]);
        assert_eq!(found(&sketch), vec![strings(&["A", "B", "C"])]);
    }

    #[test]
    fn triangle_is_anchored_at_its_smallest_label() {
        let sketch = sketch_from_edges(&[("D", "B"), ("B", "Q"), ("Q", "D")]);
        assert_eq!(found(&sketch), vec![strings(&["B", "D", "Q"])]);
    }

    #[test]
    fn square_yields_exactly_one_cycle() {
        let sketch = sketch_from_edges(&[("A", "B"), ("B", "C"), ("C", "D"), ("D", "A")]);
        assert_eq!(found(&sketch), vec![strings(&["A", "B", "C", "D"])]);
    }

    #[test]
    fn square_with_chord_yields_three_cycles() {
        let sketch = sketch_from_edges(&[
            ("A", "B"),
            ("B", "C"),
            ("C", "D"),
            ("D", "A"),
            ("A", "C"),
        ]);
        assert_eq!(
            found(&sketch),
            vec![
                strings(&["A", "B", "C"]),
                strings(&["A", "B", "C", "D"]),
                strings(&["A", "C", "D"]),
            ]
        );
    }

    #[test]
    fn complete_graph_on_four_nodes_yields_seven_cycles() {
        // K4: four triangles plus three 4-cycles.
        let sketch = sketch_from_edges(&[
            ("A", "B"),
            ("A", "C"),
            ("A", "D"),
            ("B", "C"),
            ("B", "D"),
            ("C", "D"),
        ]);
        assert_eq!(find_cycles(&sketch).len(), 7);
    }

    #[test]
    fn disjoint_triangles_are_both_found() {
        let sketch = sketch_from_edges(&[
            ("A", "B"),
            ("B", "C"),
            ("C", "A"),
            ("D", "E"),
            ("E", "F"),
            ("F", "D"),
        ]);
        assert_eq!(
            found(&sketch),
            vec![strings(&["A", "B", "C"]), strings(&["D", "E", "F"])]
        );
    }

    #[test]
    fn triangles_sharing_a_vertex_are_both_found() {
        let sketch = sketch_from_edges(&[
            ("A", "B"),
            ("B", "C"),
            ("C", "A"),
            ("A", "D"),
            ("D", "E"),
            ("E", "A"),
        ]);
        assert_eq!(
            found(&sketch),
            vec![strings(&["A", "B", "C"]), strings(&["A", "D", "E"])]
        );
    }

    // -----------------------------------------------------------------------
    // Mixed families
    // -----------------------------------------------------------------------

    #[test]
    fn multi_edge_and_simple_cycles_union() {
        // Triangle A-B-C with a doubled A-B side: the pair cycle and the
        // triangle are distinct entries.
        let sketch =
            sketch_from_edges(&[("A", "B"), ("A", "B"), ("B", "C"), ("C", "A")]);
        assert_eq!(
            found(&sketch),
            vec![strings(&["A", "B"]), strings(&["A", "B", "C"])]
        );
    }

    #[test]
    fn self_loop_pair_next_to_a_triangle() {
        let sketch = sketch_from_edges(&[
            ("B", "B"),
            ("B", "B"),
            ("A", "B"),
            ("B", "C"),
            ("C", "A"),
        ]);
        assert_eq!(
            found(&sketch),
            vec![strings(&["A", "B", "C"]), strings(&["B"])]
        );
    }

    // -----------------------------------------------------------------------
    // Stability
    // -----------------------------------------------------------------------

    #[test]
    fn detection_is_idempotent() {
        let sketch = sketch_from_edges(&[("A", "B"), ("B", "C"), ("C", "A"), ("A", "A")]);
        assert_eq!(find_cycles(&sketch), find_cycles(&sketch));
    }

    #[test]
    fn deleting_a_cycle_member_removes_the_cycle() {
        let mut sketch = sketch_from_edges(&[("A", "B"), ("B", "C"), ("C", "A")]);
        assert_eq!(find_cycles(&sketch).len(), 1);

        sketch.delete_node(&label("C")).expect("delete C");
        assert!(find_cycles(&sketch).is_empty());
    }

    #[test]
    fn detection_does_not_mutate_the_sketch() {
        let sketch = sketch_from_edges(&[("A", "B"), ("B", "C"), ("C", "A")]);
        let nodes_before = sketch.node_count();
        let edges_before = sketch.edge_count();
        let _ = find_cycles(&sketch);
        assert_eq!(sketch.node_count(), nodes_before);
        assert_eq!(sketch.edge_count(), edges_before);
    }

    // -----------------------------------------------------------------------
    // Rendering
    // -----------------------------------------------------------------------

    #[test]
    fn cycle_display_repeats_the_anchor() {
        let sketch = sketch_from_edges(&[("A", "B"), ("B", "C"), ("C", "A")]);
        let cycles = find_cycles(&sketch);
        let rendered: Vec<String> = cycles.iter().map(ToString::to_string).collect();
        assert_eq!(rendered, ["A -> B -> C -> A"]);
    }

    #[test]
    fn self_loop_cycle_display() {
        let sketch = sketch_from_edges(&[("A", "A"), ("A", "A")]);
        let cycles = find_cycles(&sketch);
        let rendered: Vec<String> = cycles.iter().map(ToString::to_string).collect();
        assert_eq!(rendered, ["A -> A"]);
    }

    #[test]
    fn cycle_set_serializes_as_label_arrays() {
        let sketch = sketch_from_edges(&[("A", "B"), ("A", "B")]);
        let json = serde_json::to_value(find_cycles(&sketch)).expect("serialize");
        assert_eq!(json, serde_json::json!([["A", "B"]]));
    }
}
