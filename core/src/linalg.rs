//! Small dense least-squares helpers for the multiplier fits.
//!
//! Design matrices are row-major: one `Vec<f64>` per observation, all the
//! same width. Systems here are a handful of columns wide, so the normal
//! equations are solved directly.

use crate::error::{ForecastError, ForecastResult};

const PIVOT_EPS: f64 = 1e-12;

/// `XᵀX` for a row-major design matrix of width `p`.
pub fn gram(rows: &[Vec<f64>], p: usize) -> Vec<Vec<f64>> {
    let mut g = vec![vec![0.0; p]; p];
    for row in rows {
        for i in 0..p {
            for j in i..p {
                g[i][j] += row[i] * row[j];
            }
        }
    }
    for i in 0..p {
        for j in 0..i {
            g[i][j] = g[j][i];
        }
    }
    g
}

/// `Xᵀy`.
pub fn xt_y(rows: &[Vec<f64>], y: &[f64], p: usize) -> Vec<f64> {
    let mut out = vec![0.0; p];
    for (row, yi) in rows.iter().zip(y) {
        for (o, x) in out.iter_mut().zip(row) {
            *o += x * yi;
        }
    }
    out
}

/// Solve `A x = b` by Gaussian elimination with partial pivoting.
pub fn solve(mut a: Vec<Vec<f64>>, mut b: Vec<f64>) -> ForecastResult<Vec<f64>> {
    let n = b.len();
    if a.len() != n || a.iter().any(|r| r.len() != n) {
        return Err(ForecastError::Other(anyhow::anyhow!(
            "linear system is not square ({} rows, {n} unknowns)",
            a.len()
        )));
    }

    for col in 0..n {
        let pivot = (col..n)
            .max_by(|&i, &j| a[i][col].abs().total_cmp(&a[j][col].abs()))
            .unwrap_or(col);
        if a[pivot][col].abs() < PIVOT_EPS {
            return Err(ForecastError::Other(anyhow::anyhow!(
                "singular linear system at column {col}"
            )));
        }
        a.swap(col, pivot);
        b.swap(col, pivot);

        for row in col + 1..n {
            let factor = a[row][col] / a[col][col];
            if factor == 0.0 {
                continue;
            }
            for k in col..n {
                a[row][k] -= factor * a[col][k];
            }
            b[row] -= factor * b[col];
        }
    }

    let mut x = vec![0.0; n];
    for row in (0..n).rev() {
        let tail: f64 = (row + 1..n).map(|k| a[row][k] * x[k]).sum();
        x[row] = (b[row] - tail) / a[row][row];
    }
    Ok(x)
}

/// Ridge solution `(XᵀX + λI)⁻¹ Xᵀy`.
pub fn ridge(rows: &[Vec<f64>], y: &[f64], p: usize, lambda: f64) -> ForecastResult<Vec<f64>> {
    let mut g = gram(rows, p);
    for (i, row) in g.iter_mut().enumerate() {
        row[i] += lambda;
    }
    solve(g, xt_y(rows, y, p))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn solves_with_row_swaps() {
        // First pivot is zero; partial pivoting has to swap.
        let a = vec![vec![0.0, 2.0], vec![3.0, 1.0]];
        let x = solve(a, vec![4.0, 5.0]).unwrap();
        assert!((x[0] - 1.0).abs() < 1e-12);
        assert!((x[1] - 2.0).abs() < 1e-12);
    }

    #[test]
    fn singular_system_is_an_error() {
        let a = vec![vec![1.0, 2.0], vec![2.0, 4.0]];
        assert!(solve(a, vec![1.0, 2.0]).is_err());
    }

    #[test]
    fn ridge_recovers_exact_coefficients() {
        let rows = vec![vec![1.0, 0.0], vec![0.0, 1.0], vec![1.0, 1.0], vec![2.0, 1.0]];
        let y: Vec<f64> = rows.iter().map(|r| 2.0 * r[0] + 0.5 * r[1]).collect();
        let beta = ridge(&rows, &y, 2, 1e-9).unwrap();
        assert!((beta[0] - 2.0).abs() < 1e-6);
        assert!((beta[1] - 0.5).abs() < 1e-6);
    }
}
