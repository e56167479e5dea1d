//! Deterministic random-sketch generation for benchmarking `tangle-core`.
//!
//! Sketches are seeded, so every benchmark run sees identical input. Labels
//! go beyond the interactive single-letter range (`A`, `B`, … `Z`, `AA`,
//! `AB`, …) because benchmark sketches are larger than anything the
//! allocator is meant to serve; nodes are therefore seeded explicitly.
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tangle_core::{Label, Position, Sketch};

/// Benchmark sketch sizes.
#[derive(Debug, Clone, Copy)]
pub enum SizeTier {
    /// 16 nodes — an interactive-scale sketch.
    Small,
    /// 64 nodes.
    Medium,
    /// 256 nodes.
    Large,
}

impl SizeTier {
    /// Number of nodes in a sketch of this tier.
    pub fn node_count(self) -> usize {
        match self {
            Self::Small => 16,
            Self::Medium => 64,
            Self::Large => 256,
        }
    }

    /// Number of random connect attempts for this tier.
    ///
    /// Kept at half the node count so the sketch stays as sparse as a real
    /// interactive drawing. Simple-cycle enumeration is exponential in dense
    /// graphs, so denser random input would measure pathology, not use.
    pub fn connect_attempts(self) -> usize {
        self.node_count() / 2
    }
}

/// Returns the bijective base-26 label for node `i`: `A`, `B`, … `Z`, `AA`, …
pub fn label_for(i: usize) -> Label {
    let mut n = i + 1;
    let mut s = String::new();
    while n > 0 {
        n -= 1;
        let letter = char::from(b'A' + (n % 26) as u8);
        s.insert(0, letter);
        n /= 26;
    }
    Label::try_from(s.as_str()).unwrap_or_else(|_| unreachable!())
}

/// Generates a random sketch of the given tier.
///
/// Nodes are placed on a deterministic grid walk; edges connect uniformly
/// random node pairs (self-pairs included), skipping attempts the edge cap
/// rejects. The same `(tier, seed)` always produces the same sketch.
pub fn generate_sketch(tier: SizeTier, seed: u64) -> Sketch {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut sketch = Sketch::new();

    let node_count = tier.node_count();
    for i in 0..node_count {
        let position = Position::new((i % 16) as f64 * 40.0, (i / 16) as f64 * 40.0);
        sketch
            .add_labeled_node(label_for(i), position)
            .unwrap_or_else(|_| unreachable!());
    }

    for _ in 0..tier.connect_attempts() {
        let a = label_for(rng.gen_range(0..node_count));
        let b = label_for(rng.gen_range(0..node_count));
        // Rejected by the cap now and then; that is part of realistic input.
        let _attempt = sketch.connect(&a, &b);
    }

    sketch
}

/// Generates a single ring `A - B - … - A`, the worst honest case for the
/// anchored DFS (one long simple cycle).
pub fn generate_ring(node_count: usize) -> Sketch {
    let mut sketch = Sketch::new();
    for i in 0..node_count {
        let position = Position::new(i as f64 * 30.0, 0.0);
        sketch
            .add_labeled_node(label_for(i), position)
            .unwrap_or_else(|_| unreachable!());
    }
    for i in 0..node_count {
        let a = label_for(i);
        let b = label_for((i + 1) % node_count);
        sketch
            .connect(&a, &b)
            .unwrap_or_else(|_| unreachable!());
    }
    sketch
}

/// Generates `count` disjoint 4-cliques.
///
/// Each clique contributes exactly 7 simple cycles (4 triangles and 3
/// squares), so the total cycle count scales linearly and the workload is a
/// controlled cyclic load rather than a combinatorial blow-up.
pub fn generate_cliques(count: usize) -> Sketch {
    let mut sketch = Sketch::new();
    for c in 0..count {
        let members: Vec<Label> = (0..4).map(|i| label_for(c * 4 + i)).collect();
        for (i, label) in members.iter().enumerate() {
            let position = Position::new(c as f64 * 100.0, i as f64 * 30.0);
            sketch
                .add_labeled_node(label.clone(), position)
                .unwrap_or_else(|_| unreachable!());
        }
        for i in 0..4 {
            for j in (i + 1)..4 {
                sketch
                    .connect(&members[i], &members[j])
                    .unwrap_or_else(|_| unreachable!());
            }
        }
    }
    sketch
}
