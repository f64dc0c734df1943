//! Polynomial least squares.
//!
//! ## Purpose
//!
//! This module fits and evaluates low-order polynomials. It is used twice: by
//! the robust background fitter (once per re-weighting iteration) and by the
//! local patcher (once per spike group).
//!
//! ## Design notes
//!
//! * **Normal equations**: Power sums `Σ xᵏ` and moments `Σ xᵏ y` are
//!   accumulated in a single pass and the resulting `(order+1)²` system is
//!   solved by Gaussian elimination with partial pivoting.
//! * **Conditioning**: The abscissa is mapped to `[-1, 1]` before fitting; the
//!   mapping is stored in the polynomial and applied on evaluation.
//! * **SIMD**: `f64` and `f32` accumulate with `wide` vectors through the
//!   [`PolySolver`] trait; other float types use the scalar path.
//!
//! ## Invariants
//!
//! * A fit of order `k` needs at least `k + 1` points.
//! * Coefficients are stored in ascending power order.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use num_traits::Float;
use wide::{f32x8, f64x2};

// Internal dependencies
use crate::primitives::errors::DespikeError;

/// Sample index as a position on the real line.
#[inline]
pub fn abscissa<T: Float>(index: usize) -> T {
    T::from(index).unwrap_or_else(T::nan)
}

// ============================================================================
// Accumulation
// ============================================================================

/// Scalar accumulation of power sums (`0..=2*order`) and moments (`0..=order`).
#[inline]
pub fn accumulate_moments_scalar<T: Float>(
    x: &[T],
    y: &[T],
    order: usize,
) -> (Vec<T>, Vec<T>) {
    let mut power_sums = vec![T::zero(); 2 * order + 1];
    let mut moments = vec![T::zero(); order + 1];

    for (&xi, &yi) in x.iter().zip(y) {
        let mut pow = T::one();
        for (k, sum) in power_sums.iter_mut().enumerate() {
            *sum = *sum + pow;
            if k <= order {
                moments[k] = moments[k] + pow * yi;
            }
            pow = pow * xi;
        }
    }

    (power_sums, moments)
}

/// SIMD accumulation of power sums and moments (f64, two lanes).
pub fn accumulate_moments_simd_f64(x: &[f64], y: &[f64], order: usize) -> (Vec<f64>, Vec<f64>) {
    let mut s_pow = vec![f64x2::splat(0.0); 2 * order + 1];
    let mut s_mom = vec![f64x2::splat(0.0); order + 1];

    let x_chunks = x.chunks_exact(2);
    let y_chunks = y.chunks_exact(2);
    let (x_tail, y_tail) = (x_chunks.remainder(), y_chunks.remainder());

    for (xc, yc) in x_chunks.zip(y_chunks) {
        let x_val = f64x2::new([xc[0], xc[1]]);
        let y_val = f64x2::new([yc[0], yc[1]]);

        let mut pow = f64x2::splat(1.0);
        for (k, sum) in s_pow.iter_mut().enumerate() {
            *sum += pow;
            if k <= order {
                s_mom[k] += pow * y_val;
            }
            pow = pow * x_val;
        }
    }

    let mut power_sums: Vec<f64> = s_pow.iter().map(|v| v.reduce_add()).collect();
    let mut moments: Vec<f64> = s_mom.iter().map(|v| v.reduce_add()).collect();

    let (tail_pow, tail_mom) = accumulate_moments_scalar(x_tail, y_tail, order);
    for (sum, t) in power_sums.iter_mut().zip(tail_pow) {
        *sum += t;
    }
    for (sum, t) in moments.iter_mut().zip(tail_mom) {
        *sum += t;
    }

    (power_sums, moments)
}

/// SIMD accumulation of power sums and moments (f32, eight lanes).
pub fn accumulate_moments_simd_f32(x: &[f32], y: &[f32], order: usize) -> (Vec<f32>, Vec<f32>) {
    let mut s_pow = vec![f32x8::splat(0.0); 2 * order + 1];
    let mut s_mom = vec![f32x8::splat(0.0); order + 1];

    let x_chunks = x.chunks_exact(8);
    let y_chunks = y.chunks_exact(8);
    let (x_tail, y_tail) = (x_chunks.remainder(), y_chunks.remainder());

    for (xc, yc) in x_chunks.zip(y_chunks) {
        let x_val = f32x8::new([xc[0], xc[1], xc[2], xc[3], xc[4], xc[5], xc[6], xc[7]]);
        let y_val = f32x8::new([yc[0], yc[1], yc[2], yc[3], yc[4], yc[5], yc[6], yc[7]]);

        let mut pow = f32x8::splat(1.0);
        for (k, sum) in s_pow.iter_mut().enumerate() {
            *sum += pow;
            if k <= order {
                s_mom[k] += pow * y_val;
            }
            pow = pow * x_val;
        }
    }

    let mut power_sums: Vec<f32> = s_pow.iter().map(|v| v.reduce_add()).collect();
    let mut moments: Vec<f32> = s_mom.iter().map(|v| v.reduce_add()).collect();

    let (tail_pow, tail_mom) = accumulate_moments_scalar(x_tail, y_tail, order);
    for (sum, t) in power_sums.iter_mut().zip(tail_pow) {
        *sum += t;
    }
    for (sum, t) in moments.iter_mut().zip(tail_mom) {
        *sum += t;
    }

    (power_sums, moments)
}

// ============================================================================
// Solver Trait
// ============================================================================

/// Type-specific accumulation and solving of the polynomial normal equations.
pub trait PolySolver: Float {
    /// Accumulate power sums `Σ xᵏ` (`k = 0..=2*order`) and moments `Σ xᵏ y` (`k = 0..=order`).
    #[inline]
    fn accumulate_moments(x: &[Self], y: &[Self], order: usize) -> (Vec<Self>, Vec<Self>) {
        accumulate_moments_scalar(x, y, order)
    }

    /// Solve the normal equations built from the accumulated sums.
    #[inline]
    fn solve_normal(power_sums: &[Self], moments: &[Self]) -> Option<Vec<Self>> {
        solve_normal_equations(power_sums, moments)
    }
}

impl PolySolver for f64 {
    #[inline]
    fn accumulate_moments(x: &[f64], y: &[f64], order: usize) -> (Vec<f64>, Vec<f64>) {
        accumulate_moments_simd_f64(x, y, order)
    }
}

impl PolySolver for f32 {
    #[inline]
    fn accumulate_moments(x: &[f32], y: &[f32], order: usize) -> (Vec<f32>, Vec<f32>) {
        accumulate_moments_simd_f32(x, y, order)
    }
}

/// Solve the Hankel system `A c = b` with `A[i][j] = power_sums[i + j]`.
///
/// Gaussian elimination with partial pivoting. Returns `None` if a pivot
/// vanishes relative to the largest matrix entry.
pub fn solve_normal_equations<T: Float>(power_sums: &[T], moments: &[T]) -> Option<Vec<T>> {
    let m = moments.len();
    if m == 0 || power_sums.len() < 2 * m - 1 {
        return None;
    }

    let mut a: Vec<Vec<T>> = (0..m)
        .map(|i| (0..m).map(|j| power_sums[i + j]).collect())
        .collect();
    let mut b: Vec<T> = moments.to_vec();

    let max_abs = power_sums
        .iter()
        .fold(T::zero(), |acc, v| acc.max(v.abs()));
    let tol = T::epsilon() * max_abs * T::from(m).unwrap_or(T::one());

    // Forward elimination
    for col in 0..m {
        let pivot_row = (col..m)
            .max_by(|&r1, &r2| {
                a[r1][col]
                    .abs()
                    .partial_cmp(&a[r2][col].abs())
                    .unwrap_or(core::cmp::Ordering::Equal)
            })
            .unwrap_or(col);

        let pivot = a[pivot_row][col].abs();
        if pivot.is_nan() || pivot <= tol {
            return None;
        }

        a.swap(col, pivot_row);
        b.swap(col, pivot_row);

        for row in (col + 1)..m {
            let factor = a[row][col] / a[col][col];
            if factor == T::zero() {
                continue;
            }
            for k in col..m {
                a[row][k] = a[row][k] - factor * a[col][k];
            }
            b[row] = b[row] - factor * b[col];
        }
    }

    // Back substitution
    let mut coeffs = vec![T::zero(); m];
    for row in (0..m).rev() {
        let mut acc = b[row];
        for k in (row + 1)..m {
            acc = acc - a[row][k] * coeffs[k];
        }
        coeffs[row] = acc / a[row][row];
    }

    Some(coeffs)
}

// ============================================================================
// Polynomial
// ============================================================================

/// Polynomial `p(x) = Σ cₖ uᵏ` with `u = (x - center) / scale`.
#[derive(Debug, Clone, PartialEq)]
pub struct Polynomial<T> {
    /// Coefficients in ascending power order.
    pub coefficients: Vec<T>,

    /// Abscissa offset applied before evaluation.
    pub center: T,

    /// Abscissa divisor applied before evaluation.
    pub scale: T,
}

impl<T: Float> Polynomial<T> {
    /// Polynomial in the raw abscissa (`center = 0`, `scale = 1`).
    pub fn new(coefficients: Vec<T>) -> Self {
        Self {
            coefficients,
            center: T::zero(),
            scale: T::one(),
        }
    }

    /// Constant polynomial.
    pub fn constant(value: T) -> Self {
        Self::new(vec![value])
    }

    /// Degree of the stored coefficient vector (0 for a constant).
    pub fn order(&self) -> usize {
        self.coefficients.len().saturating_sub(1)
    }

    /// Evaluate at `x` using Horner's scheme.
    #[inline]
    pub fn evaluate(&self, x: T) -> T {
        let u = (x - self.center) / self.scale;
        self.coefficients
            .iter()
            .rev()
            .fold(T::zero(), |acc, &c| acc * u + c)
    }
}

impl<T: PolySolver> Polynomial<T> {
    /// Least-squares polynomial of degree `order` through `(x, y)`.
    ///
    /// # Errors
    ///
    /// * `MismatchedInputs` if `x` and `y` differ in length.
    /// * `TooFewPoints` if fewer than `order + 1` points are given.
    /// * `SingularSystem` if the abscissae do not determine the polynomial
    ///   (e.g., repeated positions).
    pub fn fit(x: &[T], y: &[T], order: usize) -> Result<Self, DespikeError> {
        if x.len() != y.len() {
            return Err(DespikeError::MismatchedInputs {
                x_len: x.len(),
                y_len: y.len(),
            });
        }
        if x.len() < order + 1 {
            return Err(DespikeError::TooFewPoints {
                got: x.len(),
                min: order + 1,
            });
        }

        let (lo, hi) = x.iter().fold((x[0], x[0]), |(lo, hi), &v| (lo.min(v), hi.max(v)));
        let two = T::one() + T::one();
        let center = (lo + hi) / two;
        let half_range = (hi - lo) / two;
        let scale = if half_range > T::zero() {
            half_range
        } else {
            T::one()
        };

        let u: Vec<T> = x.iter().map(|&v| (v - center) / scale).collect();
        let (power_sums, moments) = T::accumulate_moments(&u, y, order);
        let coefficients =
            T::solve_normal(&power_sums, &moments).ok_or(DespikeError::SingularSystem { order })?;

        Ok(Self {
            coefficients,
            center,
            scale,
        })
    }
}
