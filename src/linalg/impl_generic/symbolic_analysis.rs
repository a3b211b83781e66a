//! Symbolic analysis feeding numr's numeric sparse LU.
//!
//! Works on the CSC pattern only: elimination tree, its post-order, the
//! per-column reach and a first guess at the L/U patterns. Fill-in beyond the
//! original pattern is handled dynamically by the numeric factorization.

use numr::algorithm::sparse_linalg::LuSymbolic;

/// Sentinel parent for roots of the elimination tree.
fn root(n: usize) -> usize {
    n
}

/// Elimination tree of a CSC pattern; `parent[j] == n` marks a root.
pub fn elimination_tree(n: usize, col_ptrs: &[i64], row_indices: &[i64]) -> Vec<usize> {
    let mut parent = vec![root(n); n];
    let mut ancestor = vec![root(n); n];

    for col in 0..n {
        let entries = &row_indices[col_ptrs[col] as usize..col_ptrs[col + 1] as usize];
        for &ri in entries {
            let mut node = ri as usize;
            // Upper-triangular entries only
            while node < col {
                let next = ancestor[node];
                ancestor[node] = col;
                if next == root(n) {
                    parent[node] = col;
                    break;
                }
                if next == col {
                    break;
                }
                node = next;
            }
        }
    }

    parent
}

/// Post-order of the elimination tree (children before parents).
pub fn post_order(parent: &[usize]) -> Vec<usize> {
    let n = parent.len();
    let mut children: Vec<Vec<usize>> = vec![Vec::new(); n];
    let mut roots = Vec::new();
    for (j, &p) in parent.iter().enumerate() {
        if p < n {
            children[p].push(j);
        } else {
            roots.push(j);
        }
    }

    let mut order = Vec::with_capacity(n);
    let mut stack: Vec<(usize, bool)> = roots.iter().rev().map(|&r| (r, false)).collect();
    while let Some((node, expanded)) = stack.pop() {
        if expanded {
            order.push(node);
            continue;
        }
        stack.push((node, true));
        stack.extend(children[node].iter().rev().map(|&c| (c, false)));
    }
    order
}

/// For each column k, the earlier columns whose L factor updates column k,
/// in ascending order.
pub fn column_reach(
    n: usize,
    parent: &[usize],
    col_ptrs: &[i64],
    row_indices: &[i64],
) -> Vec<Vec<usize>> {
    let mut reach = vec![Vec::new(); n];
    let mut visited = vec![usize::MAX; n];

    for col in 0..n {
        let entries = &row_indices[col_ptrs[col] as usize..col_ptrs[col + 1] as usize];
        for &ri in entries {
            let mut j = ri as usize;
            while j < col && visited[j] != col {
                reach[col].push(j);
                visited[j] = col;
                j = parent[j];
            }
        }
        reach[col].sort_unstable();
    }

    reach
}

/// Build the `LuSymbolic` numr's numeric LU consumes.
pub fn lu_symbolic(n: usize, col_ptrs: &[i64], row_indices: &[i64]) -> LuSymbolic {
    let etree = elimination_tree(n, col_ptrs, row_indices);
    let post_order = post_order(&etree);
    let reach = column_reach(n, &etree, col_ptrs, row_indices);

    let mut l_col_ptrs = Vec::with_capacity(n + 1);
    let mut l_row_indices = Vec::new();
    let mut u_col_ptrs = Vec::with_capacity(n + 1);
    let mut u_row_indices = Vec::new();
    l_col_ptrs.push(0i64);
    u_col_ptrs.push(0i64);

    for col in 0..n {
        // U: reach plus the diagonal
        u_row_indices.extend(reach[col].iter().map(|&j| j as i64));
        u_row_indices.push(col as i64);
        u_col_ptrs.push(u_row_indices.len() as i64);

        // L: strictly lower entries of the original column
        let mut lower: Vec<i64> = row_indices
            [col_ptrs[col] as usize..col_ptrs[col + 1] as usize]
            .iter()
            .copied()
            .filter(|&r| r as usize > col)
            .collect();
        lower.sort_unstable();
        lower.dedup();
        l_row_indices.extend(lower);
        l_col_ptrs.push(l_row_indices.len() as i64);
    }

    LuSymbolic {
        n,
        etree,
        post_order,
        reach,
        l_col_ptrs,
        l_row_indices,
        u_col_ptrs,
        u_row_indices,
        workspace_size: n,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagonal_pattern_has_no_dependencies() {
        let col_ptrs = vec![0i64, 1, 2, 3];
        let row_indices = vec![0i64, 1, 2];

        let etree = elimination_tree(3, &col_ptrs, &row_indices);
        assert!(etree.iter().all(|&p| p == 3));

        let symbolic = lu_symbolic(3, &col_ptrs, &row_indices);
        assert_eq!(symbolic.n, 3);
        assert!(symbolic.reach.iter().all(|r| r.is_empty()));
    }

    #[test]
    fn test_tridiagonal_chain() {
        // Reduced Laplacian of a 6-node path with both ends observed
        let col_ptrs = vec![0i64, 2, 5, 8, 10];
        let row_indices = vec![0i64, 1, 0, 1, 2, 1, 2, 3, 2, 3];

        let etree = elimination_tree(4, &col_ptrs, &row_indices);
        assert_eq!(etree, vec![1, 2, 3, 4]);

        let reach = column_reach(4, &etree, &col_ptrs, &row_indices);
        assert_eq!(reach[2], vec![1]);
        assert!(reach[0].is_empty());
    }

    #[test]
    fn test_star_pattern_reach() {
        // Hub in column 0 connected to every other column
        let col_ptrs = vec![0i64, 4, 6, 8, 10];
        let row_indices = vec![0i64, 1, 2, 3, 0, 1, 0, 2, 0, 3];

        let symbolic = lu_symbolic(4, &col_ptrs, &row_indices);
        for col in 1..4 {
            assert!(symbolic.reach[col].contains(&0));
        }
        assert_eq!(symbolic.l_col_ptrs[1], 3);
    }

    #[test]
    fn test_post_order_is_permutation() {
        let col_ptrs = vec![0i64, 2, 4, 6, 7, 9];
        let row_indices = vec![0i64, 1, 0, 1, 2, 3, 2, 3, 4];

        let etree = elimination_tree(5, &col_ptrs, &row_indices);
        let mut order = post_order(&etree);
        assert_eq!(order.len(), 5);
        order.sort_unstable();
        assert_eq!(order, (0..5).collect::<Vec<_>>());
    }
}
