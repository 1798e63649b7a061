//! Statistics for comparing a word's frequency in two samples.
//!
//! Significance is the log-likelihood statistic G² over a 2×2 contingency
//! table, compared against the chi-squared critical values at 1 degree of
//! freedom. Effect size is Cohen's h on the two proportions.
//!
//! Both counts are smoothed by [`SMOOTHING`] before anything is computed.
//! Without it a word missing from the document has a zero cell, and the
//! usual `a · ln(a / E)` term is undefined, so the most under-represented
//! words would be exactly the ones that can never be reported.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Additive smoothing applied to both observed counts (Haldane–Anscombe style).
pub const SMOOTHING: f64 = 0.5;

/// Critical value for p < 0.05 at 1 df. The significance gate.
pub const CRITICAL_P05: f64 = 3.84;

/// Critical value for p < 0.01 at 1 df.
pub const CRITICAL_P01: f64 = 6.63;

/// Critical value for p < 0.001 at 1 df.
pub const CRITICAL_P001: f64 = 10.83;

/// A 2×2 table of observed values.
///
/// Columns are the two samples (document, corpus); the first row holds the
/// word's count, the second row everything else.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContingencyTable {
    cells: [[f64; 2]; 2],
}

impl ContingencyTable {
    /// Build a table from raw cell values. Negative or non-finite cells are
    /// treated as 0.
    pub fn new(cells: [[f64; 2]; 2]) -> Self {
        let clean = |v: f64| if v.is_finite() && v > 0.0 { v } else { 0.0 };
        Self {
            cells: cells.map(|row| row.map(clean)),
        }
    }

    /// Table for already smoothed word counts `a` (document) and `b`
    /// (corpus): `[[a, b], [doc_total − a, corpus_total − b]]`.
    pub fn for_word(a: f64, b: f64, doc_total: u64, corpus_total: u64) -> Self {
        Self::new([
            [a, b],
            [doc_total as f64 - a, corpus_total as f64 - b],
        ])
    }

    /// Observed cells.
    pub const fn cells(&self) -> [[f64; 2]; 2] {
        self.cells
    }

    /// Log-likelihood ratio statistic `2 Σ O ln(O / E)`.
    ///
    /// Expected values come from the row and column margins. Cells with no
    /// observations contribute nothing. A table with an empty row or column
    /// carries no signal and scores 0.
    pub fn g_squared(&self) -> f64 {
        let rows = [
            self.cells[0][0] + self.cells[0][1],
            self.cells[1][0] + self.cells[1][1],
        ];
        let cols = [
            self.cells[0][0] + self.cells[1][0],
            self.cells[0][1] + self.cells[1][1],
        ];
        let n = rows[0] + rows[1];

        if rows.contains(&0.0) || cols.contains(&0.0) {
            return 0.0;
        }

        let mut sum = 0.0;
        for (i, row) in self.cells.iter().enumerate() {
            for (j, &observed) in row.iter().enumerate() {
                if observed > 0.0 {
                    let expected = rows[i] * cols[j] / n;
                    sum += observed * (observed / expected).ln();
                }
            }
        }

        // G² is a scaled KL divergence, so anything below 0 is rounding noise.
        (2.0 * sum).max(0.0)
    }
}

/// G² for smoothed counts `a` and `b` against their sample sizes.
///
/// Returns 0 when either sample is empty.
pub fn log_likelihood(a: f64, b: f64, doc_total: u64, corpus_total: u64) -> f64 {
    if doc_total == 0 || corpus_total == 0 {
        return 0.0;
    }
    ContingencyTable::for_word(a, b, doc_total, corpus_total).g_squared()
}

/// `count / total`, clamped to `[0, 1]`; 0 when `total` is 0.
pub fn proportion(count: f64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (count / total as f64).clamp(0.0, 1.0)
}

/// Cohen's h: `2·asin(√p₁) − 2·asin(√p₂)`.
///
/// Positive when `p1 > p2`. Inputs are clamped to `[0, 1]`, so the result
/// always lies in `[−π, π]`.
pub fn cohens_h(p1: f64, p2: f64) -> f64 {
    let phi = |p: f64| 2.0 * p.clamp(0.0, 1.0).sqrt().asin();
    phi(p1) - phi(p2)
}

/// Round half away from zero to `places` decimal places.
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// Significance tier of a statistic at 1 degree of freedom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, JsonSchema)]
pub enum Significance {
    /// p < 0.05
    #[serde(rename = "*")]
    Low,
    /// p < 0.01
    #[serde(rename = "**")]
    Medium,
    /// p < 0.001
    #[serde(rename = "***")]
    High,
}

impl Significance {
    /// Tier for `statistic`, or `None` below [`CRITICAL_P05`].
    pub fn from_statistic(statistic: f64) -> Option<Self> {
        if statistic >= CRITICAL_P001 {
            Some(Self::High)
        } else if statistic >= CRITICAL_P01 {
            Some(Self::Medium)
        } else if statistic >= CRITICAL_P05 {
            Some(Self::Low)
        } else {
            None
        }
    }

    /// Star marker (`*`, `**`, `***`).
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "*",
            Self::Medium => "**",
            Self::High => "***",
        }
    }
}

impl std::fmt::Display for Significance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() <= tol
    }

    /// Closed-form two-cell log-likelihood (Rayson & Garside).
    fn two_cell_g_squared(a: f64, b: f64, c: f64, d: f64) -> f64 {
        let e1 = c * (a + b) / (c + d);
        let e2 = d * (a + b) / (c + d);
        2.0 * (a * (a / e1).ln() + b * (b / e2).ln())
    }

    #[test]
    fn g_squared_known_value() {
        let table = ContingencyTable::new([[10.0, 20.0], [90.0, 880.0]]);
        assert!(close(table.g_squared(), 12.649_015_8, 1e-6));
    }

    #[test]
    fn g_squared_zero_for_identical_proportions() {
        let table = ContingencyTable::new([[10.0, 100.0], [90.0, 900.0]]);
        assert!(close(table.g_squared(), 0.0, 1e-9));
    }

    #[test]
    fn g_squared_matches_two_cell_form_for_rare_words() {
        for (a, b, c, d) in [
            (20.5, 1000.5, 10_000.0, 1_000_000.0),
            (60.5, 100.5, 20_000.0, 1_000_000.0),
        ] {
            let generic = ContingencyTable::new([[a, b], [c - a, d - b]]).g_squared();
            let closed = two_cell_g_squared(a, b, c, d);
            assert!(
                (generic - closed).abs() / generic < 0.005,
                "generic {generic} vs closed {closed}"
            );
        }
    }

    #[test]
    fn g_squared_ignores_empty_margin() {
        let table = ContingencyTable::new([[0.0, 5.0], [0.0, 10.0]]);
        assert_eq!(table.g_squared(), 0.0);
    }

    #[test]
    fn negative_cells_are_clamped() {
        // One token is the whole document: doc_total − a' = −0.5.
        let table = ContingencyTable::for_word(4.5, 10.5, 4, 1000);
        assert_eq!(table.cells()[1][0], 0.0);
        assert!(table.g_squared().is_finite());
        assert!(table.g_squared() >= 0.0);
    }

    #[test]
    fn naive_unsmoothed_statistic_is_degenerate_for_missing_words() {
        // "the" is 6% of the corpus but absent from a 1000-word document.
        let naive = two_cell_g_squared(0.0, 6000.0, 1000.0, 100_000.0);
        assert!(naive.is_nan(), "naive statistic {naive} should be unusable");

        let smoothed = log_likelihood(0.5, 6000.5, 1000, 100_000);
        assert!(smoothed >= CRITICAL_P001, "smoothed statistic {smoothed}");
    }

    #[test]
    fn log_likelihood_guards_empty_samples() {
        assert_eq!(log_likelihood(0.5, 100.5, 0, 1000), 0.0);
        assert_eq!(log_likelihood(3.5, 0.5, 100, 0), 0.0);
    }

    #[test]
    fn proportion_guards() {
        assert_eq!(proportion(5.0, 0), 0.0);
        assert_eq!(proportion(4.5, 4), 1.0);
        assert!(close(proportion(1.5, 10), 0.15, 1e-12));
    }

    #[test]
    fn cohens_h_values_and_sign() {
        assert_eq!(cohens_h(0.5, 0.5), 0.0);
        assert!(close(cohens_h(0.25, 0.0), std::f64::consts::PI / 3.0, 1e-12));
        assert!(close(cohens_h(1.0, 0.0), std::f64::consts::PI, 1e-12));
        assert!(cohens_h(0.1, 0.3) < 0.0);
        assert!(cohens_h(0.3, 0.1) > 0.0);
    }

    #[test]
    fn significance_tiers() {
        assert_eq!(Significance::from_statistic(3.83), None);
        assert_eq!(Significance::from_statistic(3.84), Some(Significance::Low));
        assert_eq!(Significance::from_statistic(6.63), Some(Significance::Medium));
        assert_eq!(Significance::from_statistic(10.82), Some(Significance::Medium));
        assert_eq!(Significance::from_statistic(10.83), Some(Significance::High));
        assert_eq!(Significance::High.to_string(), "***");
    }

    #[test]
    fn significance_serializes_as_stars() {
        let json = serde_json::to_string(&[Significance::Low, Significance::High]).unwrap();
        assert_eq!(json, r#"["*","***"]"#);
    }

    #[test]
    fn rounding() {
        assert_eq!(round_to(0.123_456, 4), 0.1235);
        assert_eq!(round_to(-0.123_46, 4), -0.1235);
        assert_eq!(round_to(12.0, 2), 12.0);
    }
}
