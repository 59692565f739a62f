//! Closed-form ordinary least squares via the normal equations.
//!
//! This is the single regression primitive the trend labeler re-fits for
//! every (index, horizon) window, so it stays allocation-light and does the
//! whole fit in one pass over the window: `beta = (XᵀX)⁻¹Xᵀy`, standard
//! errors from the scaled inverse, t-values as their ratio.

use anyhow::{Result, anyhow, bail};

/// Coefficients, standard errors, and t-values of one least-squares fit.
#[derive(Debug, Clone)]
pub struct OlsFit {
    pub beta: Vec<f64>,
    pub se_beta: Vec<f64>,
    pub t_values: Vec<f64>,
}

/// Fit `y ~ X` by ordinary least squares.
///
/// `x` is row-major: one row per observation, the first column expected to
/// be the all-ones intercept. Shape errors fail fast; a singular `XᵀX`
/// (e.g. linearly dependent columns) is returned as an error for the caller
/// to convert into "no result". Zero degrees of freedom (`n == k`) is NOT
/// an error here: the residual variance divides by zero and the resulting
/// NaN/Inf t-values propagate out for the caller to screen.
pub fn ols_regression(y: &[f64], x: &[Vec<f64>]) -> Result<OlsFit> {
    let n = y.len();
    if n == 0 {
        bail!("OLS requires a non-empty response vector");
    }
    if x.len() != n {
        bail!("design matrix has {} rows for {} observations", x.len(), n);
    }
    let k = x[0].len();
    if k == 0 || x.iter().any(|row| row.len() != k) {
        bail!("design matrix rows must all have the same non-zero width");
    }
    if n < k {
        bail!("underdetermined system: {} observations for {} coefficients", n, k);
    }

    // Normal equations: XᵀX (k×k) and Xᵀy (k)
    let mut xtx = vec![vec![0.0; k]; k];
    let mut xty = vec![0.0; k];
    for (row, &yi) in x.iter().zip(y.iter()) {
        for i in 0..k {
            xty[i] += row[i] * yi;
            for j in i..k {
                xtx[i][j] += row[i] * row[j];
            }
        }
    }
    // Fill the symmetric lower triangle
    for i in 0..k {
        for j in 0..i {
            xtx[i][j] = xtx[j][i];
        }
    }

    let xtx_inv = invert_matrix(xtx)
        .ok_or_else(|| anyhow!("singular design matrix: XᵀX is not invertible"))?;

    let beta: Vec<f64> = (0..k)
        .map(|i| (0..k).map(|j| xtx_inv[i][j] * xty[j]).sum())
        .collect();

    // Residual sum of squares
    let mut rss = 0.0;
    for (row, &yi) in x.iter().zip(y.iter()) {
        let fitted: f64 = row.iter().zip(beta.iter()).map(|(xi, bi)| xi * bi).sum();
        let residual = yi - fitted;
        rss += residual * residual;
    }

    // Residual variance; dof can be zero, in which case the division yields
    // Inf (rss > 0) or NaN (rss == 0) and everything downstream follows IEEE
    let dof = (n - k) as f64;
    let rse_sq = rss / dof;

    let se_beta: Vec<f64> = (0..k).map(|i| (xtx_inv[i][i] * rse_sq).sqrt()).collect();
    let t_values: Vec<f64> = beta
        .iter()
        .zip(se_beta.iter())
        .map(|(b, se)| b / se)
        .collect();

    Ok(OlsFit {
        beta,
        se_beta,
        t_values,
    })
}

/// Fit a straight line against the time index `0..n` and return the
/// `(t_value, slope)` of the time coefficient.
pub fn trend_t_value(close: &[f64]) -> Result<(f64, f64)> {
    let rows: Vec<Vec<f64>> = (0..close.len()).map(|i| vec![1.0, i as f64]).collect();
    let fit = ols_regression(close, &rows)?;
    Ok((fit.t_values[1], fit.beta[1]))
}

/// Gauss-Jordan inversion with partial pivoting. Returns None when a pivot
/// vanishes (singular matrix).
fn invert_matrix(mut m: Vec<Vec<f64>>) -> Option<Vec<Vec<f64>>> {
    let k = m.len();
    let mut inv = vec![vec![0.0; k]; k];
    for (i, row) in inv.iter_mut().enumerate() {
        row[i] = 1.0;
    }

    for col in 0..k {
        let mut pivot_row = col;
        for row in (col + 1)..k {
            if m[row][col].abs() > m[pivot_row][col].abs() {
                pivot_row = row;
            }
        }
        if m[pivot_row][col].abs() < f64::EPSILON {
            return None;
        }
        m.swap(col, pivot_row);
        inv.swap(col, pivot_row);

        let pivot = m[col][col];
        for j in 0..k {
            m[col][j] /= pivot;
            inv[col][j] /= pivot;
        }

        for row in 0..k {
            if row == col {
                continue;
            }
            let factor = m[row][col];
            if factor == 0.0 {
                continue;
            }
            for j in 0..k {
                m[row][j] -= factor * m[col][j];
                inv[row][j] -= factor * inv[col][j];
            }
        }
    }

    Some(inv)
}
