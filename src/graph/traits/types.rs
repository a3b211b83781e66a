//! Graph data types.

use numr::dtype::{DType, Element};
use numr::error::{Error, Result};
use numr::runtime::Runtime;
use numr::sparse::SparseTensor;

/// Graph representation using a sparse adjacency matrix.
///
/// Weights are stored as the values of the CSR matrix. This is the input of
/// [`GraphMatrixAlgorithms::laplacian_matrix`](super::GraphMatrixAlgorithms).
///
/// ```ignore
/// use learnr::graph::GraphData;
///
/// // From edge list
/// let graph = GraphData::from_edge_list(&rows, &cols, Some(&weights), num_nodes, directed, &device)?;
///
/// // From sparse adjacency matrix
/// let graph = GraphData::new(adjacency, directed);
/// ```
#[derive(Debug, Clone)]
pub struct GraphData<R: Runtime<DType = DType>> {
    /// CSR sparse adjacency matrix [n, n], weights as values
    pub adjacency: SparseTensor<R>,
    /// Number of nodes in the graph
    pub num_nodes: usize,
    /// Whether the graph is directed
    pub directed: bool,
}

impl<R: Runtime<DType = DType>> GraphData<R> {
    /// Create a graph from a sparse adjacency matrix.
    pub fn new(adjacency: SparseTensor<R>, directed: bool) -> Self {
        let num_nodes = adjacency.nrows();
        Self {
            adjacency,
            num_nodes,
            directed,
        }
    }

    /// Create a graph from an edge list.
    ///
    /// Undirected graphs store every edge in both directions. Each unordered
    /// pair should appear once.
    ///
    /// # Arguments
    ///
    /// * `sources` - Source node indices
    /// * `targets` - Target node indices
    /// * `weights` - Optional edge weights. If None, uses 1 for all edges.
    /// * `num_nodes` - Number of nodes in the graph
    /// * `directed` - Whether the graph is directed
    /// * `device` - Device to create tensors on
    pub fn from_edge_list<T: Element>(
        sources: &[i64],
        targets: &[i64],
        weights: Option<&[T]>,
        num_nodes: usize,
        directed: bool,
        device: &R::Device,
    ) -> Result<Self> {
        let num_edges = sources.len();
        if targets.len() != num_edges {
            return Err(Error::ShapeMismatch {
                expected: vec![num_edges],
                got: vec![targets.len()],
            });
        }
        if let Some(w) = weights
            && w.len() != num_edges
        {
            return Err(Error::ShapeMismatch {
                expected: vec![num_edges],
                got: vec![w.len()],
            });
        }
        if let Some(&node) = sources
            .iter()
            .chain(targets)
            .find(|&&v| v < 0 || v as usize >= num_nodes)
        {
            return Err(Error::InvalidArgument {
                arg: "edges",
                reason: format!("node {node} out of range for {num_nodes} nodes"),
            });
        }

        let weight = |i: usize| weights.map_or(T::one(), |w| w[i]);

        let (sources, targets, values): (Vec<i64>, Vec<i64>, Vec<T>) = if directed {
            (
                sources.to_vec(),
                targets.to_vec(),
                (0..num_edges).map(weight).collect(),
            )
        } else {
            // Undirected: add both directions
            let mut all_sources = Vec::with_capacity(num_edges * 2);
            let mut all_targets = Vec::with_capacity(num_edges * 2);
            let mut all_weights = Vec::with_capacity(num_edges * 2);
            for i in 0..num_edges {
                let w = weight(i);
                all_sources.extend([sources[i], targets[i]]);
                all_targets.extend([targets[i], sources[i]]);
                all_weights.extend([w, w]);
            }
            (all_sources, all_targets, all_weights)
        };

        let adjacency = SparseTensor::<R>::from_coo_slices(
            &sources,
            &targets,
            &values,
            [num_nodes, num_nodes],
            device,
        )?;
        Ok(Self::new(adjacency.to_csr()?, directed))
    }
}
