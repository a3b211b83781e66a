//! Graph Laplacian construction.
//!
//! Built row by row from the CSR adjacency, so the result stays sparse for
//! both the combinatorial and the normalized variant.

use numr::dtype::DType;
use numr::error::Result;
use numr::runtime::Runtime;
use numr::sparse::{CsrData, SparseOps, SparseTensor};
use numr::tensor::Tensor;

use crate::graph::traits::types::GraphData;

use super::helpers::{CsrArrays, extract_csr_arrays};

/// Compute the weighted graph Laplacian L = D - W.
///
/// If normalized: L_norm = I - D^{-1/2} W D^{-1/2}.
pub fn laplacian_matrix_impl<R, C>(
    _client: &C,
    graph: &GraphData<R>,
    normalized: bool,
) -> Result<SparseTensor<R>>
where
    R: Runtime<DType = DType>,
    C: SparseOps<R>,
{
    let CsrArrays {
        row_ptrs,
        col_indices,
        values,
        num_nodes: n,
        device,
    } = extract_csr_arrays(graph)?;

    // Weighted degree, self-loops do not contribute
    let degrees: Vec<f64> = (0..n)
        .map(|u| {
            let start = row_ptrs[u] as usize;
            let end = row_ptrs[u + 1] as usize;
            (start..end)
                .filter(|&idx| col_indices[idx] as usize != u)
                .map(|idx| values[idx])
                .sum()
        })
        .collect();

    let deg_inv_sqrt: Vec<f64> = degrees
        .iter()
        .map(|&d| if d > 0.0 { d.sqrt().recip() } else { 0.0 })
        .collect();

    let mut lap_row_ptrs = Vec::with_capacity(n + 1);
    let mut lap_col_indices = Vec::with_capacity(col_indices.len() + n);
    let mut lap_values = Vec::with_capacity(col_indices.len() + n);
    lap_row_ptrs.push(0i64);

    for u in 0..n {
        let start = row_ptrs[u] as usize;
        let end = row_ptrs[u + 1] as usize;

        let mut row: Vec<(i64, f64)> = Vec::with_capacity(end - start + 1);
        row.push((u as i64, if normalized { 1.0 } else { degrees[u] }));

        for idx in start..end {
            let v = col_indices[idx] as usize;
            if v == u {
                continue;
            }
            let w = values[idx];
            let entry = if normalized {
                -w * deg_inv_sqrt[u] * deg_inv_sqrt[v]
            } else {
                -w
            };
            row.push((v as i64, entry));
        }

        // Keep column indices sorted within the row
        row.sort_unstable_by_key(|&(col, _)| col);
        for (col, val) in row {
            lap_col_indices.push(col);
            lap_values.push(val);
        }
        lap_row_ptrs.push(lap_col_indices.len() as i64);
    }

    let row_ptrs_tensor = Tensor::<R>::from_slice(&lap_row_ptrs, &[n + 1], &device);
    let col_indices_tensor =
        Tensor::<R>::from_slice(&lap_col_indices, &[lap_col_indices.len()], &device);
    let values_tensor = Tensor::<R>::from_slice(&lap_values, &[lap_values.len()], &device);

    let csr = CsrData::new(row_ptrs_tensor, col_indices_tensor, values_tensor, [n, n])?;
    Ok(SparseTensor::Csr(csr))
}
