//! Property-based tests for the classification, decomposition and support stages.

use nalgebra::Complex;
use proptest::prelude::*;

use pearson8::domain::{Coefficients, RootKind, SupportInterval};
use pearson8::math::from_roots;
use pearson8::pfd::{PartialFractions, decompose};
use pearson8::roots::classify;
use pearson8::support::{adjust_bounds, newton};

const EPS: f64 = 1e-10;

fn re(x: f64) -> Complex<f64> {
    Complex::new(x, 0.0)
}

fn pair(re: f64, im: f64) -> [Complex<f64>; 2] {
    [Complex::new(re, im), Complex::new(re, -im)]
}

fn permutations() -> Vec<[usize; 4]> {
    let mut out = Vec::with_capacity(24);
    for a in 0..4 {
        for b in 0..4 {
            for c in 0..4 {
                for d in 0..4 {
                    let p = [a, b, c, d];
                    let mut seen = [false; 4];
                    p.iter().for_each(|&i| seen[i] = true);
                    if seen.iter().all(|s| *s) {
                        out.push(p);
                    }
                }
            }
        }
    }
    out
}

/// One root set per kind, built from a base point, three positive gaps and an
/// imaginary part.
fn pattern(kind: RootKind, x: f64, g: [f64; 3], im: f64) -> [Complex<f64>; 4] {
    let (x2, x3, x4) = (x + g[0], x + g[0] + g[1], x + g[0] + g[1] + g[2]);
    match kind {
        RootKind::RepeatedConjugatePair => {
            let [u, l] = pair(x, im);
            [u, l, u, l]
        }
        RootKind::TwoConjugatePairs => {
            let [u1, l1] = pair(x, im);
            let [u2, l2] = pair(x2, im + g[1]);
            [u1, l1, u2, l2]
        }
        RootKind::DoubleRealWithPair => {
            let [u, l] = pair(x2, im);
            [re(x), re(x), u, l]
        }
        RootKind::TwoRealWithPair => {
            let [u, l] = pair(x3, im);
            [re(x), re(x2), u, l]
        }
        RootKind::QuadrupleReal => [re(x); 4],
        RootKind::TripleReal => [re(x), re(x), re(x), re(x2)],
        RootKind::TwoDoubleReal => [re(x), re(x), re(x2), re(x2)],
        RootKind::DoubleRealTwoSimple => [re(x2), re(x2), re(x), re(x3)],
        RootKind::FourDistinctReal => [re(x), re(x2), re(x3), re(x4)],
    }
}

fn coefficients(a: f64, c4: f64, roots: &[Complex<f64>; 4]) -> Coefficients {
    let v = from_roots(c4, roots);
    Coefficients {
        a,
        c0: v[4],
        c1: v[3],
        c2: v[2],
        c3: v[1],
        c4: v[0],
    }
}

fn gaps() -> impl Strategy<Value = [f64; 3]> {
    [0.5..3.0f64, 0.5..3.0f64, 0.5..3.0f64]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Classification ignores the order in which roots arrive.
    #[test]
    fn classification_is_permutation_invariant(
        k in 0usize..9,
        x in -5.0..5.0f64,
        g in gaps(),
        im in 0.5..3.0f64,
    ) {
        let kind = RootKind::ALL[k];
        let roots = pattern(kind, x, g, im);
        let reference = classify(roots, EPS).unwrap();
        prop_assert_eq!(reference.kind, kind);
        for p in permutations() {
            let shuffled = p.map(|i| roots[i]);
            let got = classify(shuffled, EPS).unwrap();
            prop_assert_eq!(got, reference, "permutation {:?}", p);
        }
    }

    /// The decomposition reproduces (x + a) / D(x) away from the poles.
    #[test]
    fn decomposition_reconstructs_the_ratio(
        k in 0usize..9,
        x in -3.0..3.0f64,
        g in gaps(),
        im in 0.5..3.0f64,
        a in -2.0..2.0f64,
        c4 in 0.05..2.0f64,
        t in -8.0..8.0f64,
    ) {
        let kind = RootKind::ALL[k];
        let roots = pattern(kind, x, g, im);
        prop_assume!(roots.iter().all(|r| (r - re(t)).norm() > 0.2));

        let coef = coefficients(a, c4, &roots);
        let config = classify(roots, EPS).unwrap();
        let pfd = decompose(&coef, &config).unwrap();
        let want = coef.ratio(t);
        let got = pfd.ratio(t);
        prop_assert!((got - want).abs() <= 1e-6 * want.abs().max(1.0), "{} vs {}", got, want);
    }

    /// Tightening keeps 0 inside, never widens, and leaves no pole inside.
    #[test]
    fn adjusted_bounds_stay_valid(
        p in prop::array::uniform4(-6.0..6.0f64),
        lower in -8.0..-0.01f64,
        upper in 0.01..8.0f64,
    ) {
        let mut x = p;
        x.sort_by(|a, b| a.total_cmp(b));
        prop_assume!(x.windows(2).all(|w| w[1] - w[0] > 1e-3));
        prop_assume!(x.iter().all(|v| v.abs() > 1e-3));

        let pfd = PartialFractions::FourDistinctReal { x, a: [1.0; 4] };
        let s = adjust_bounds(SupportInterval::new(lower, upper), &pfd, 1e-5).unwrap();
        prop_assert!(s.contains_zero());
        prop_assert!(s.lower >= lower && s.upper <= upper);
        prop_assert!(x.iter().all(|v| !(s.lower < *v && *v < s.upper)));
    }

    /// Newton never leaves its bracket, whatever the step function does.
    #[test]
    fn newton_root_stays_in_bracket(
        x0 in -10.0..10.0f64,
        lo in -20.0..-1.0f64,
        width in 0.5..30.0f64,
        scale in -5.0..5.0f64,
    ) {
        let hi = lo + width;
        let t = newton(|x| scale * x.sin() + 0.3, x0, lo, hi, 1e-5, 10).unwrap();
        prop_assert!(t.root >= lo && t.root <= hi);
        prop_assert!(t.iterations() <= 10);
    }
}
