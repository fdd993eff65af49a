//! Plain-text fit summaries.
//!
//! Formatting lives here so the numeric code stays free of presentation
//! concerns and output changes stay localized.

use crate::domain::ConjugatePair;
use crate::fit::PearsonFit;
use crate::pfd::PartialFractions;

fn fmt_pair(p: &ConjugatePair) -> String {
    format!("{:.6} ± {:.6}i", p.re, p.im)
}

/// One line per partial-fraction term parameter.
pub fn format_partial_fractions(pfd: &PartialFractions) -> String {
    let rows: Vec<(String, String)> = match pfd {
        PartialFractions::RepeatedConjugatePair { pair, a1, b1 } => vec![
            ("pair".into(), fmt_pair(pair)),
            ("A1".into(), format!("{a1:.6}")),
            ("B1".into(), format!("{b1:.6}")),
        ],
        PartialFractions::TwoConjugatePairs {
            pair1,
            a1,
            b1,
            pair2,
            a2,
            b2,
        } => vec![
            ("pair1".into(), fmt_pair(pair1)),
            ("A1".into(), format!("{a1:.6}")),
            ("B1".into(), format!("{b1:.6}")),
            ("pair2".into(), fmt_pair(pair2)),
            ("A2".into(), format!("{a2:.6}")),
            ("B2".into(), format!("{b2:.6}")),
        ],
        PartialFractions::DoubleRealWithPair {
            x1,
            a1,
            a2,
            pair,
            a3,
            b3,
        } => vec![
            ("x1".into(), format!("{x1:.6}")),
            ("A1".into(), format!("{a1:.6}")),
            ("A2".into(), format!("{a2:.6}")),
            ("pair".into(), fmt_pair(pair)),
            ("A3".into(), format!("{a3:.6}")),
            ("B3".into(), format!("{b3:.6}")),
        ],
        PartialFractions::TwoRealWithPair {
            x1,
            a1,
            x2,
            a2,
            pair,
            a3,
            b3,
        } => vec![
            ("x1".into(), format!("{x1:.6}")),
            ("A1".into(), format!("{a1:.6}")),
            ("x2".into(), format!("{x2:.6}")),
            ("A2".into(), format!("{a2:.6}")),
            ("pair".into(), fmt_pair(pair)),
            ("A3".into(), format!("{a3:.6}")),
            ("B3".into(), format!("{b3:.6}")),
        ],
        PartialFractions::QuadrupleReal { x1, a3, a4 } => vec![
            ("x1".into(), format!("{x1:.6}")),
            ("A3".into(), format!("{a3:.6}")),
            ("A4".into(), format!("{a4:.6}")),
        ],
        PartialFractions::TripleReal {
            x1,
            a1,
            a2,
            a3,
            x4,
            a4,
        } => vec![
            ("x1".into(), format!("{x1:.6}")),
            ("A1".into(), format!("{a1:.6}")),
            ("A2".into(), format!("{a2:.6}")),
            ("A3".into(), format!("{a3:.6}")),
            ("x4".into(), format!("{x4:.6}")),
            ("A4".into(), format!("{a4:.6}")),
        ],
        PartialFractions::TwoDoubleReal {
            x1,
            a1,
            a2,
            x3,
            a3,
            a4,
        } => vec![
            ("x1".into(), format!("{x1:.6}")),
            ("A1".into(), format!("{a1:.6}")),
            ("A2".into(), format!("{a2:.6}")),
            ("x3".into(), format!("{x3:.6}")),
            ("A3".into(), format!("{a3:.6}")),
            ("A4".into(), format!("{a4:.6}")),
        ],
        PartialFractions::DoubleRealTwoSimple {
            x1,
            a1,
            a2,
            x3,
            a3,
            x4,
            a4,
        } => vec![
            ("x1".into(), format!("{x1:.6}")),
            ("A1".into(), format!("{a1:.6}")),
            ("A2".into(), format!("{a2:.6}")),
            ("x3".into(), format!("{x3:.6}")),
            ("A3".into(), format!("{a3:.6}")),
            ("x4".into(), format!("{x4:.6}")),
            ("A4".into(), format!("{a4:.6}")),
        ],
        PartialFractions::FourDistinctReal { x, a } => x
            .iter()
            .zip(a.iter())
            .enumerate()
            .flat_map(|(i, (xi, ai))| {
                [
                    (format!("x{}", i + 1), format!("{xi:.6}")),
                    (format!("A{}", i + 1), format!("{ai:.6}")),
                ]
            })
            .collect(),
    };

    let mut out = String::new();
    for (name, value) in rows {
        out.push_str(&format!("  {name:<6} {value}\n"));
    }
    out
}

/// Format the full diagnostic block for one fit.
pub fn format_fit_summary(fit: &PearsonFit) -> String {
    let mut out = String::new();

    out.push_str("=== Pearson density fit ===\n");
    match fit.moments() {
        Some(m) => {
            out.push_str(&format!("Mean:      {:.7}\n", m.mean));
            out.push_str(&format!("Variance:  {:.7}\n", m.variance));
            out.push_str(&format!("Std dev:   {:.7}\n", m.std_dev()));
            out.push_str(&format!("Skewness:  {:.7}\n", m.skewness));
            out.push_str(&format!("Kurtosis:  {:.7}\n", m.kurtosis));
        }
        None => out.push_str("Moments:   n/a (built from coefficients)\n"),
    }

    let c = fit.coefficients();
    out.push_str(&format!(
        "Coefficients: a = {:.7}, c0 = {:.7}, c1 = {:.7}, c2 = {:.7}, c3 = {:.7}, c4 = {:.7}\n",
        c.a, c.c0, c.c1, c.c2, c.c3, c.c4
    ));
    let kind = fit.root_kind();
    out.push_str(&format!("Root type: {} ({})\n", kind.code(), kind.display_name()));
    out.push_str("Partial fractions:\n");
    out.push_str(&format_partial_fractions(fit.partial_fractions()));
    out.push_str(&format!(
        "Extremum at -a = {:.7}: {}\n",
        c.mode(),
        fit.extremum().display_name()
    ));

    match fit.support() {
        Ok(s) => {
            let (lb, ub) = s.as_tuple();
            out.push_str(&format!("Support: ({lb:.7}, {ub:.7})\n"));
        }
        Err(e) => out.push_str(&format!("Support: unavailable ({e})\n")),
    }

    out
}
