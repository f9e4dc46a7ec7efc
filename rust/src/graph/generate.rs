//! Random DAG generation for benchmarking.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::TaskGraph;
use crate::config::GeneratorConfig;

/// Generate a random weighted DAG.
///
/// Every pair `u < v` over nodes `0..size` becomes the edge `u -> v` with
/// probability `edge_probability`, so the result is acyclic by construction.
/// Only nodes touched by an edge appear in the graph.
pub fn random_dag(config: &GeneratorConfig) -> TaskGraph {
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    random_dag_with(config, &mut rng)
}

/// Same as [`random_dag`] with a caller-supplied RNG.
pub fn random_dag_with<R: Rng>(config: &GeneratorConfig, rng: &mut R) -> TaskGraph {
    let p = if config.edge_probability.is_nan() {
        0.0
    } else {
        config.edge_probability.clamp(0.0, 1.0)
    };
    let (lo, hi) = if config.min_weight <= config.max_weight {
        (config.min_weight, config.max_weight)
    } else {
        (config.max_weight, config.min_weight)
    };

    let mut graph = TaskGraph::new();
    for u in 0..config.size {
        for v in (u + 1)..config.size {
            if rng.random_bool(p) {
                let weight = rng.random_range(lo..=hi);
                graph.add_edge(&u.to_string(), &v.to_string(), weight);
            }
        }
    }
    graph
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_config(size: usize, edge_probability: f64, seed: u64) -> GeneratorConfig {
        GeneratorConfig {
            size,
            edge_probability,
            seed: Some(seed),
            ..GeneratorConfig::default()
        }
    }

    #[test]
    fn test_seeded_generation_is_reproducible() {
        let config = make_config(12, 0.5, 7);
        let first = random_dag(&config);
        let second = random_dag(&config);

        assert_eq!(first.edges(), second.edges());
        assert_eq!(first.node_count(), second.node_count());
    }

    #[test]
    fn test_edges_point_forward_and_weights_in_range() {
        let graph = random_dag(&make_config(15, 0.6, 42));

        assert!(graph.is_acyclic());
        for edge in graph.edges() {
            let u: usize = graph.label(edge.source).parse().unwrap();
            let v: usize = graph.label(edge.target).parse().unwrap();
            assert!(u < v);
            assert!((1..=10).contains(&edge.weight));
        }
    }

    #[test]
    fn test_probability_extremes() {
        let empty = random_dag(&make_config(8, 0.0, 1));
        assert!(empty.is_empty());

        let full = random_dag(&make_config(6, 1.0, 1));
        assert_eq!(full.edge_count(), 6 * 5 / 2);
        assert_eq!(full.longest_path_length(), 5);
    }
}
