//! Property-based tests for Tikhonov learning on random connected graphs.
//!
//! Invariants checked for any graph, mask and signal:
//! - The output has the shape of the input signal
//! - Hard constraints keep observed values bit for bit
//! - Harmonic interpolation obeys the maximum principle
//! - Dense and sparse Laplacians give the same answer
//! - Fully observed labels classify to themselves

use std::collections::BTreeMap;

use learnr::{
    CgConfig, GraphData, LaplacianGraph, SolverPath, TikhonovAlgorithms, TikhonovOptions,
};
use numr::runtime::cpu::{CpuClient, CpuDevice, CpuRuntime};
use numr::tensor::Tensor;
use proptest::prelude::*;

const MAX_NODES: usize = 12;

/// A ring over `n` nodes plus weighted chords, as an undirected edge map.
#[derive(Debug, Clone)]
struct RandomGraph {
    n: usize,
    edges: BTreeMap<(usize, usize), f64>,
}

impl RandomGraph {
    fn new(n: usize, chords: &[(usize, usize, f64)]) -> Self {
        let mut edges = BTreeMap::new();
        for i in 0..n {
            let j = (i + 1) % n;
            edges.insert((i.min(j), i.max(j)), 1.0);
        }
        for &(a, b, w) in chords {
            let (a, b) = (a % n, b % n);
            if a != b {
                edges.entry((a.min(b), a.max(b))).or_insert(w);
            }
        }
        Self { n, edges }
    }

    fn sparse(&self, client: &CpuClient, device: &CpuDevice) -> LaplacianGraph<CpuRuntime> {
        let sources: Vec<i64> = self.edges.keys().map(|&(a, _)| a as i64).collect();
        let targets: Vec<i64> = self.edges.keys().map(|&(_, b)| b as i64).collect();
        let weights: Vec<f64> = self.edges.values().copied().collect();
        let graph = GraphData::<CpuRuntime>::from_edge_list(
            &sources,
            &targets,
            Some(&weights),
            self.n,
            false,
            device,
        )
        .unwrap();
        LaplacianGraph::from_graph(client, &graph, false).unwrap()
    }

    /// Dense Laplacian assembled directly from the edge map.
    fn dense(&self, device: &CpuDevice) -> LaplacianGraph<CpuRuntime> {
        let n = self.n;
        let mut lap = vec![0.0; n * n];
        for (&(a, b), &w) in &self.edges {
            lap[a * n + a] += w;
            lap[b * n + b] += w;
            lap[a * n + b] -= w;
            lap[b * n + a] -= w;
        }
        LaplacianGraph::from_dense(Tensor::<CpuRuntime>::from_slice(&lap, &[n, n], device))
            .unwrap()
    }
}

fn arb_graph() -> impl Strategy<Value = RandomGraph> {
    (
        3usize..MAX_NODES,
        prop::collection::vec((0usize..MAX_NODES, 0usize..MAX_NODES, 0.5f64..2.0), 0..8),
    )
        .prop_map(|(n, chords)| RandomGraph::new(n, &chords))
}

/// Mask with node 0 always observed.
fn arb_mask() -> impl Strategy<Value = Vec<bool>> {
    prop::collection::vec(any::<bool>(), MAX_NODES).prop_map(|mut mask| {
        mask[0] = true;
        mask
    })
}

fn arb_values() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(-5.0f64..5.0, MAX_NODES * 2)
}

fn setup() -> (CpuDevice, CpuClient) {
    let device = CpuDevice::new();
    let client = CpuClient::new(device.clone());
    (device, client)
}

fn tight_options(tau: f64) -> TikhonovOptions {
    TikhonovOptions {
        tau,
        cg: CgConfig {
            rtol: 1e-12,
            ..Default::default()
        },
        ..Default::default()
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn output_shape_matches_input(
        graph in arb_graph(),
        mask in arb_mask(),
        values in arb_values(),
        tau in prop_oneof![Just(0.0), 0.1f64..5.0],
        sparse in any::<bool>(),
    ) {
        let (device, client) = setup();
        let n = graph.n;
        let mask = &mask[..n];
        let lap = if sparse { graph.sparse(&client, &device) } else { graph.dense(&device) };

        let vector = Tensor::<CpuRuntime>::from_slice(&values[..n], &[n], &device);
        let result = client.regression_tik(&lap, &vector, mask, &tight_options(tau)).unwrap();
        prop_assert_eq!(result.solution.shape(), &[n]);

        let matrix = Tensor::<CpuRuntime>::from_slice(&values[..2 * n], &[n, 2], &device);
        let result = client.regression_tik(&lap, &matrix, mask, &tight_options(tau)).unwrap();
        prop_assert_eq!(result.solution.shape(), &[n, 2]);
    }

    #[test]
    fn hard_constraints_keep_observed_values(
        graph in arb_graph(),
        mask in arb_mask(),
        values in arb_values(),
        sparse in any::<bool>(),
    ) {
        let (device, client) = setup();
        let n = graph.n;
        let mask = &mask[..n];
        let lap = if sparse { graph.sparse(&client, &device) } else { graph.dense(&device) };

        // Unobserved entries are garbage and must not leak into the result
        let signal: Vec<f64> = values[..n]
            .iter()
            .zip(mask)
            .map(|(&v, &m)| if m { v } else { f64::NAN })
            .collect();
        let y = Tensor::<CpuRuntime>::from_slice(&signal, &[n], &device);

        let x: Vec<f64> = client
            .regression_tik(&lap, &y, mask, &TikhonovOptions::default())
            .unwrap()
            .solution
            .to_vec();

        for i in 0..n {
            if mask[i] {
                prop_assert_eq!(x[i], signal[i]);
            } else {
                prop_assert!(x[i].is_finite());
            }
        }
    }

    #[test]
    fn harmonic_interpolation_stays_within_observed_range(
        graph in arb_graph(),
        mask in arb_mask(),
        values in arb_values(),
    ) {
        let (device, client) = setup();
        let n = graph.n;
        let mask = &mask[..n];
        let lap = graph.sparse(&client, &device);
        let y = Tensor::<CpuRuntime>::from_slice(&values[..n], &[n], &device);

        let x: Vec<f64> = client
            .regression_tik(&lap, &y, mask, &TikhonovOptions::default())
            .unwrap()
            .solution
            .to_vec();

        let observed: Vec<f64> = (0..n).filter(|&i| mask[i]).map(|i| values[i]).collect();
        let lo = observed.iter().copied().fold(f64::INFINITY, f64::min);
        let hi = observed.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        for v in x {
            prop_assert!(v >= lo - 1e-9 && v <= hi + 1e-9, "{} outside [{}, {}]", v, lo, hi);
        }
    }

    #[test]
    fn dense_and_sparse_agree(
        graph in arb_graph(),
        mask in arb_mask(),
        values in arb_values(),
        tau in prop_oneof![Just(0.0), 0.1f64..5.0],
    ) {
        let (device, client) = setup();
        let n = graph.n;
        let mask = &mask[..n];
        let y = Tensor::<CpuRuntime>::from_slice(&values[..2 * n], &[n, 2], &device);
        let options = tight_options(tau);

        let dense = client.regression_tik(&graph.dense(&device), &y, mask, &options).unwrap();
        let sparse = client
            .regression_tik(&graph.sparse(&client, &device), &y, mask, &options)
            .unwrap();

        if tau > 0.0 {
            prop_assert_eq!(dense.report.path, SolverPath::DenseDirect);
            prop_assert_eq!(sparse.report.path, SolverPath::ConjugateGradient);
            prop_assert!(sparse.report.converged());
        }

        let d: Vec<f64> = dense.solution.to_vec();
        let s: Vec<f64> = sparse.solution.to_vec();
        for (a, b) in d.iter().zip(&s) {
            prop_assert!((a - b).abs() < 1e-7, "dense {:?} vs sparse {:?}", d, s);
        }
    }

    #[test]
    fn fully_observed_labels_round_trip(
        graph in arb_graph(),
        labels in prop::collection::vec(0u8..4, MAX_NODES),
        sparse in any::<bool>(),
    ) {
        let (device, client) = setup();
        let n = graph.n;
        let lap = if sparse { graph.sparse(&client, &device) } else { graph.dense(&device) };
        let values: Vec<f64> = labels[..n].iter().map(|&l| l as f64).collect();
        let y = Tensor::<CpuRuntime>::from_slice(&values, &[n], &device);

        let result = client
            .classification_tik(&lap, &y, &vec![true; n], &TikhonovOptions::default())
            .unwrap();

        let expected: Vec<i64> = labels[..n].iter().map(|&l| l as i64).collect();
        let max_label = labels[..n].iter().copied().max().unwrap_or(0) as usize;
        prop_assert_eq!(result.num_classes, max_label + 1);
        prop_assert_eq!(result.labels.to_vec::<i64>(), expected);
    }

    #[test]
    fn constant_signal_is_a_fixed_point(
        graph in arb_graph(),
        mask in arb_mask(),
        value in -5.0f64..5.0,
        tau in 0.1f64..5.0,
    ) {
        let (device, client) = setup();
        let n = graph.n;
        let y = Tensor::<CpuRuntime>::from_slice(&vec![value; n], &[n], &device);

        // Only a fully observed constant is a fixed point of the penalized problem
        let full = vec![true; n];
        let x: Vec<f64> = client
            .regression_tik(&graph.sparse(&client, &device), &y, &full, &tight_options(tau))
            .unwrap()
            .solution
            .to_vec();
        for v in x {
            prop_assert!((v - value).abs() < 1e-8);
        }

        // Under hard constraints any observed constant propagates everywhere
        let x: Vec<f64> = client
            .regression_tik(&graph.dense(&device), &y, &mask[..n], &TikhonovOptions::default())
            .unwrap()
            .solution
            .to_vec();
        for v in x {
            prop_assert!((v - value).abs() < 1e-9);
        }
    }
}
