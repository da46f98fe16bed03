//! Planar embedding by metric multidimensional scaling.
//!
//! Embeds a precomputed dissimilarity matrix into two coordinates per feature so that pairwise
//! Euclidean distances among the output points approximate the input dissimilarities.
//!
//! The optimizer is SMACOF: repeated Guttman transforms that monotonically decrease raw stress,
//! the squared discrepancy between configured and target distances. The starting configuration
//! comes from classical scaling (Torgerson) of the same matrix, which is fully deterministic, so
//! repeated runs on identical input produce identical output. Iteration stops once the relative
//! stress decrease falls below [MdsConfig::eps] or after [MdsConfig::max_iter] iterations.

use crate::error::SoundscapeError;

use std::cmp::Ordering;

use nalgebra::{DMatrix, SymmetricEigen};
use ndarray::Array2;

/// Dimensionality of the embedding.
pub const OUTPUT_DIMS: usize = 2;

/// Optimizer limits for the SMACOF iteration.
#[derive(Clone, Copy, Debug)]
pub struct MdsConfig {
    /// Iteration cap for the Guttman transform loop.
    pub max_iter: usize,
    /// Relative raw-stress decrease below which iteration stops.
    pub eps: f64,
}

impl Default for MdsConfig {
    fn default() -> Self {
        Self {
            max_iter: 300,
            eps: 1e-6,
        }
    }
}

/// A planar embedding of the dissimilarity matrix.
#[derive(Clone, Debug)]
pub struct Embedding {
    /// One 2-D point per input entity, in input order.
    pub coords: Vec<[f64; 2]>,
    /// Final raw stress of the configuration.
    pub stress: f64,
    /// Number of Guttman transforms applied.
    pub iterations: usize,
    /// Whether the stress decrease reached tolerance before the iteration cap.
    pub converged: bool,
}

/// Embed a square symmetric dissimilarity matrix into the plane.
pub fn embed(
    dissimilarities: &Array2<f64>,
    config: &MdsConfig,
) -> Result<Embedding, SoundscapeError> {
    let n = dissimilarities.nrows();
    if dissimilarities.ncols() != n {
        return Err(SoundscapeError::DistanceMatrixShape {
            rows: n,
            cols: dissimilarities.ncols(),
        });
    }
    if n == 0 {
        return Err(SoundscapeError::EmptyInput(
            ndarray_stats::errors::EmptyInput,
        ));
    }

    let delta = DMatrix::from_fn(n, n, |i, j| dissimilarities[[i, j]]);
    let mut configuration = classical_scaling(&delta);
    let mut stress = raw_stress(&delta, &configuration);
    let mut iterations = 0;
    let mut converged = false;

    while iterations < config.max_iter {
        configuration = guttman_transform(&delta, &configuration);
        let next = raw_stress(&delta, &configuration);
        iterations += 1;
        if stress - next <= config.eps * stress {
            stress = next;
            converged = true;
            break;
        }
        stress = next;
    }

    let coords = (0..n)
        .map(|i| [configuration[(i, 0)], configuration[(i, 1)]])
        .collect();
    Ok(Embedding {
        coords,
        stress,
        iterations,
        converged,
    })
}

/// Classical scaling (Torgerson) of the dissimilarity matrix: eigendecompose the double-centred
/// squared dissimilarities and scale the two leading eigenvectors by the square roots of their
/// eigenvalues.
fn classical_scaling(delta: &DMatrix<f64>) -> DMatrix<f64> {
    let n = delta.nrows();
    let squared = DMatrix::from_fn(n, n, |i, j| delta[(i, j)] * delta[(i, j)]);
    let row_means: Vec<f64> = (0..n).map(|i| squared.row(i).sum() / n as f64).collect();
    let grand_mean = squared.sum() / (n * n) as f64;
    let centred = DMatrix::from_fn(n, n, |i, j| {
        -0.5 * (squared[(i, j)] - row_means[i] - row_means[j] + grand_mean)
    });

    let eigen = SymmetricEigen::new(centred);
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| {
        eigen.eigenvalues[b]
            .partial_cmp(&eigen.eigenvalues[a])
            .unwrap_or(Ordering::Equal)
    });

    let mut configuration = DMatrix::zeros(n, OUTPUT_DIMS);
    for (dim, &k) in order.iter().take(OUTPUT_DIMS).enumerate() {
        let scale = eigen.eigenvalues[k].max(0.0).sqrt();
        let column = eigen.eigenvectors.column(k);
        // Eigenvector sign is arbitrary. Pin it so the largest magnitude entry is positive.
        let extreme = (0..n).fold(0, |best, i| {
            if column[i].abs() > column[best].abs() {
                i
            } else {
                best
            }
        });
        let sign = if column[extreme] < 0.0 { -1.0 } else { 1.0 };
        for i in 0..n {
            configuration[(i, dim)] = sign * scale * column[i];
        }
    }
    configuration
}

/// One SMACOF step: apply the Guttman transform to the current configuration.
fn guttman_transform(delta: &DMatrix<f64>, configuration: &DMatrix<f64>) -> DMatrix<f64> {
    let n = configuration.nrows();
    let distances = pairwise_distances(configuration);
    let mut b = DMatrix::zeros(n, n);
    for i in 0..n {
        for j in 0..n {
            // Points that currently coincide contribute nothing.
            if i != j && distances[(i, j)] > f64::EPSILON {
                b[(i, j)] = -delta[(i, j)] / distances[(i, j)];
            }
        }
    }
    for i in 0..n {
        let off_diagonal: f64 = (0..n).filter(|&j| j != i).map(|j| b[(i, j)]).sum();
        b[(i, i)] = -off_diagonal;
    }
    (b * configuration) / n as f64
}

/// Raw stress: squared discrepancy between configured and target distances over distinct pairs.
fn raw_stress(delta: &DMatrix<f64>, configuration: &DMatrix<f64>) -> f64 {
    let n = configuration.nrows();
    let distances = pairwise_distances(configuration);
    let mut stress = 0.0;
    for i in 0..n {
        for j in (i + 1)..n {
            let residual = delta[(i, j)] - distances[(i, j)];
            stress += residual * residual;
        }
    }
    stress
}

/// Euclidean distance matrix of a configuration.
fn pairwise_distances(configuration: &DMatrix<f64>) -> DMatrix<f64> {
    let n = configuration.nrows();
    DMatrix::from_fn(n, n, |i, j| {
        let mut sum = 0.0;
        for dim in 0..configuration.ncols() {
            let diff = configuration[(i, dim)] - configuration[(j, dim)];
            sum += diff * diff;
        }
        sum.sqrt()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::distance::correlation_distances;
    use crate::standardize::standardize;
    use crate::test_utils;

    use approx::assert_abs_diff_eq;
    use ndarray::arr2;

    /// Euclidean distances between embedded points, flattened over distinct pairs.
    fn embedded_distances(embedding: &Embedding) -> Vec<f64> {
        let n = embedding.coords.len();
        let mut out = Vec::new();
        for i in 0..n {
            for j in (i + 1)..n {
                let dx = embedding.coords[i][0] - embedding.coords[j][0];
                let dy = embedding.coords[i][1] - embedding.coords[j][1];
                out.push((dx * dx + dy * dy).sqrt());
            }
        }
        out
    }

    /// Ranks of a sequence, averaging over exact ties.
    fn ranks(values: &[f64]) -> Vec<f64> {
        let mut order: Vec<usize> = (0..values.len()).collect();
        order.sort_by(|&a, &b| values[a].partial_cmp(&values[b]).unwrap());
        let mut out = vec![0.0; values.len()];
        let mut i = 0;
        while i < order.len() {
            let mut j = i;
            while j + 1 < order.len() && values[order[j + 1]] == values[order[i]] {
                j += 1;
            }
            let rank = (i + j) as f64 / 2.0;
            for &index in &order[i..=j] {
                out[index] = rank;
            }
            i = j + 1;
        }
        out
    }

    /// Spearman rank correlation between two sequences.
    fn spearman(a: &[f64], b: &[f64]) -> f64 {
        let ra = ranks(a);
        let rb = ranks(b);
        let n = ra.len() as f64;
        let mean = (n - 1.0) / 2.0;
        let mut cov = 0.0;
        let mut var_a = 0.0;
        let mut var_b = 0.0;
        for (x, y) in ra.iter().zip(rb.iter()) {
            cov += (x - mean) * (y - mean);
            var_a += (x - mean) * (x - mean);
            var_b += (y - mean) * (y - mean);
        }
        cov / (var_a.sqrt() * var_b.sqrt())
    }

    #[test]
    fn recovers_planar_configuration() {
        // Distances measured from four points in the plane are reproduced almost exactly.
        let points = [[0.0, 0.0], [1.0, 0.0], [0.0, 1.0], [1.0, 1.0]];
        let mut dissimilarities = Array2::zeros((4, 4));
        for i in 0..4 {
            for j in 0..4 {
                let dx: f64 = points[i][0] - points[j][0];
                let dy: f64 = points[i][1] - points[j][1];
                dissimilarities[[i, j]] = (dx * dx + dy * dy).sqrt();
            }
        }
        let embedding = embed(&dissimilarities, &MdsConfig::default()).unwrap();
        assert!(embedding.converged);
        assert_abs_diff_eq!(embedding.stress, 0.0, epsilon = 1e-6);
        let recovered = embedded_distances(&embedding);
        let mut target = Vec::new();
        for i in 0..4 {
            for j in (i + 1)..4 {
                target.push(dissimilarities[[i, j]]);
            }
        }
        for (r, t) in recovered.iter().zip(target.iter()) {
            assert_abs_diff_eq!(r, t, epsilon = 1e-4);
        }
    }

    #[test]
    fn preserves_rank_order_of_dissimilarities() {
        // Well-separated synthetic input: distances measured from 14 points on a spiral,
        // perturbed multiplicatively so the matrix is no longer exactly Euclidean.
        let n = 14;
        let points: Vec<[f64; 2]> = (0..n)
            .map(|k| {
                let angle = k as f64 * 0.9;
                let radius = 1.0 + 0.3 * k as f64;
                [radius * angle.cos(), radius * angle.sin()]
            })
            .collect();
        let mut dissimilarities = Array2::zeros((n, n));
        for i in 0..n {
            for j in (i + 1)..n {
                let dx = points[i][0] - points[j][0];
                let dy = points[i][1] - points[j][1];
                let noise = 1.0 + 0.05 * ((i + j) as f64 * 3.0).sin();
                let d = (dx * dx + dy * dy).sqrt() * noise;
                dissimilarities[[i, j]] = d;
                dissimilarities[[j, i]] = d;
            }
        }

        let embedding = embed(&dissimilarities, &MdsConfig::default()).unwrap();
        assert_eq!(n, embedding.coords.len());

        let recovered = embedded_distances(&embedding);
        let mut target = Vec::new();
        for i in 0..n {
            for j in (i + 1)..n {
                target.push(dissimilarities[[i, j]]);
            }
        }
        assert!(
            spearman(&recovered, &target) > 0.8,
            "embedding must preserve the rank order of input dissimilarities"
        );
    }

    #[test]
    fn deterministic_across_runs() {
        let standardized = standardize(&test_utils::synthetic_features(60)).unwrap();
        let dissimilarities = correlation_distances(&standardized).unwrap();
        let first = embed(&dissimilarities, &MdsConfig::default()).unwrap();
        let second = embed(&dissimilarities, &MdsConfig::default()).unwrap();
        assert_eq!(first.coords, second.coords);
        assert_eq!(first.iterations, second.iterations);
    }

    #[test]
    fn iteration_cap_reports_non_convergence() {
        let standardized = standardize(&test_utils::synthetic_features(40)).unwrap();
        let dissimilarities = correlation_distances(&standardized).unwrap();
        let config = MdsConfig {
            max_iter: 1,
            eps: 0.0,
        };
        let embedding = embed(&dissimilarities, &config).unwrap();
        assert!(!embedding.converged);
        assert_eq!(1, embedding.iterations);
    }

    #[test]
    fn rejects_non_square_input() {
        let dissimilarities = arr2(&[[0.0, 1.0, 2.0], [1.0, 0.0, 1.0]]);
        let error = embed(&dissimilarities, &MdsConfig::default()).unwrap_err();
        assert!(matches!(
            error,
            SoundscapeError::DistanceMatrixShape { rows: 2, cols: 3 }
        ));
    }
}
