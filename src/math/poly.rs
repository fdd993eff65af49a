//! Real polynomials: evaluation and complex root finding.
//!
//! Coefficients are stored highest power first (`[c_n, ..., c_1, c_0]`).
//!
//! Roots are the eigenvalues of the balanced companion matrix, taken from
//! nalgebra's real Schur form. Real eigenvalues come back with `im == 0` and
//! complex ones as exact conjugates. A root of multiplicity `m` is only resolved
//! to roughly `eps^(1/m)`, so clusters whose spread is within that perturbation
//! bound are merged into their centroid before the roots are handed on.

use nalgebra::linalg::Schur;
use nalgebra::linalg::balancing::balance_parlett_reinsch;
use nalgebra::{Complex, DMatrix};

/// Iteration budget of the Schur decomposition.
const MAX_SCHUR_ITER: usize = 10_000;

/// Backward error of the eigenvalue solve, relative to the monic coefficients.
const BACKWARD_ERR: f64 = 16.0 * f64::EPSILON;

/// Slack on the expected spread of a perturbed multiple root.
const CLUSTER_SLACK: f64 = 10.0;

/// Evaluate a real polynomial at a real point (Horner).
pub fn horner(coeffs: &[f64], x: f64) -> f64 {
    coeffs.iter().fold(0.0, |acc, &c| acc * x + c)
}

/// All complex roots of a real polynomial.
///
/// Leading zero coefficients are stripped first, so the number of returned roots
/// equals the effective degree; constants have no roots. Multiple roots come back
/// as repeated identical values and the output is closed under conjugation.
///
/// Returns `None` when the eigenvalue iteration does not converge.
pub fn roots(coeffs: &[f64]) -> Option<Vec<Complex<f64>>> {
    let start = coeffs.iter().position(|&c| c != 0.0).unwrap_or(coeffs.len());
    let coeffs = &coeffs[start..];
    if coeffs.len() < 2 {
        return Some(Vec::new());
    }
    let n = coeffs.len() - 1;
    let monic: Vec<f64> = coeffs.iter().map(|&c| c / coeffs[0]).collect();
    if n == 1 {
        return Some(vec![Complex::new(-monic[1], 0.0)]);
    }

    let mut companion = DMatrix::from_fn(n, n, |i, j| {
        if i == 0 {
            -monic[j + 1]
        } else if i == j + 1 {
            1.0
        } else {
            0.0
        }
    });
    balance_parlett_reinsch(&mut companion);
    let schur = Schur::try_new(companion, f64::EPSILON, MAX_SCHUR_ITER)?;

    let mut z: Vec<Complex<f64>> = schur.complex_eigenvalues().iter().copied().collect();
    merge_multiple_roots(&monic, &mut z);
    close_under_conjugation(&mut z);
    Some(z)
}

/// Replace each cluster of `k` roots by its centroid when the cluster is no wider
/// than a `k`-fold root perturbed by the backward error would be.
///
/// For a `k`-fold root `c`, a coefficient perturbation of size `δ · Σ|a_j| R^j`
/// moves the roots by about `(δ · Σ|a_j| R^j / Π_{other} |c - z_j|)^(1/k)`,
/// with `R` the larger of `|c|` and the largest root modulus. Larger clusters are
/// tried first.
fn merge_multiple_roots(monic: &[f64], z: &mut [Complex<f64>]) {
    let n = z.len();
    let mut merged = vec![false; n];
    let rho = z.iter().map(|v| v.norm()).fold(0.0, f64::max);
    for k in (2..=n).rev() {
        for seed in 0..n {
            if merged[seed] {
                continue;
            }
            let mut near: Vec<usize> = (0..n).filter(|&j| j != seed && !merged[j]).collect();
            if near.len() < k - 1 {
                break;
            }
            near.sort_by(|&a, &b| (z[a] - z[seed]).norm().total_cmp(&(z[b] - z[seed]).norm()));
            let mut members = vec![seed];
            members.extend_from_slice(&near[..k - 1]);

            let centre = members.iter().map(|&i| z[i]).sum::<Complex<f64>>() / k as f64;
            let spread = members
                .iter()
                .map(|&i| (z[i] - centre).norm())
                .fold(0.0, f64::max);
            let r = centre.norm().max(rho);
            let size = monic.iter().fold(0.0, |acc, c| acc * r + c.abs());
            let rest: f64 = (0..n)
                .filter(|j| !members.contains(j))
                .map(|j| (centre - z[j]).norm())
                .product();
            let expected = (BACKWARD_ERR * size / rest).powf(1.0 / k as f64);

            if spread <= CLUSTER_SLACK * expected {
                for &i in &members {
                    z[i] = centre;
                    merged[i] = true;
                }
            }
        }
    }
}

/// Snap roundoff-level imaginary parts to zero and make every lower root the
/// exact conjugate of its nearest upper partner.
fn close_under_conjugation(z: &mut [Complex<f64>]) {
    for v in z.iter_mut() {
        if v.im.abs() <= BACKWARD_ERR * (1.0 + v.norm()) {
            v.im = 0.0;
        }
    }
    let uppers: Vec<usize> = (0..z.len()).filter(|&i| z[i].im > 0.0).collect();
    let mut lowers: Vec<usize> = (0..z.len()).filter(|&i| z[i].im < 0.0).collect();
    if uppers.len() != lowers.len() {
        return;
    }
    for u in uppers {
        let target = z[u].conj();
        let best = lowers
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| (z[**a] - target).norm().total_cmp(&(z[**b] - target).norm()))
            .map(|(pos, _)| pos);
        if let Some(pos) = best {
            let l = lowers.swap_remove(pos);
            z[l] = target;
        }
    }
}

/// Real roots of a real polynomial, ascending.
///
/// A root counts as real when its imaginary part is within `eps · (1 + |re|)`.
/// Returns `None` when the eigenvalue iteration does not converge.
pub fn real_roots(coeffs: &[f64], eps: f64) -> Option<Vec<f64>> {
    let mut out: Vec<f64> = roots(coeffs)?
        .into_iter()
        .filter(|z| z.im.abs() <= eps * (1.0 + z.re.abs()))
        .map(|z| z.re)
        .collect();
    out.sort_by(|a, b| a.total_cmp(b));
    Some(out)
}

/// Expand `lead · Π (x - r_i)` into real coefficients, highest power first.
///
/// Complex roots must come in conjugate pairs for the result to be real; the
/// imaginary residue is discarded.
pub fn from_roots(lead: f64, roots: &[Complex<f64>]) -> Vec<f64> {
    let mut acc = vec![Complex::new(lead, 0.0)];
    for &r in roots {
        let mut next = vec![Complex::new(0.0, 0.0); acc.len() + 1];
        for (i, &c) in acc.iter().enumerate() {
            next[i] += c;
            next[i + 1] -= c * r;
        }
        acc = next;
    }
    acc.into_iter().map(|c| c.re).collect()
}
