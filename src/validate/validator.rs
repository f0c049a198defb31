//! Font-size distribution scoring for rendered artifacts.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::artifact::RenderedArtifact;
use crate::error::{Error, Result};

const FONT_DISTRIBUTION_POINTS: u32 = 50;
const PAGE_BREAK_POINTS: u32 = 25;
const COLUMN_POINTS: u32 = 15;
const OUTLIER_POINTS: u32 = 10;
const ISSUE_PENALTY: u32 = 10;

/// Target ranges and thresholds for validation.
///
/// Shares are percentages in `[0, 100]`; sizes are in points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorOptions {
    /// Smallest size counted as body text
    pub body_min_size: f32,
    /// Smallest size counted as a heading (body upper bound)
    pub heading_min_size: f32,
    /// Smallest size counted as a title (heading upper bound)
    pub title_min_size: f32,

    /// Minimum body share
    pub body_min_share: f32,
    /// Maximum body share
    pub body_max_share: f32,
    /// Minimum heading share
    pub heading_min_share: f32,
    /// Maximum title share
    pub title_max_share: f32,

    /// Sizes below this are outliers
    pub min_font_size: f32,
    /// Sizes above this are outliers
    pub max_font_size: f32,

    /// Minimum total score for a pass
    pub pass_threshold: u32,
    /// Fail whenever the distribution has findings, regardless of score
    pub require_font_distribution: bool,
}

impl ValidatorOptions {
    /// Create options with the default targets.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load options from JSON; missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let options: Self = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    /// Set the body share range.
    pub fn with_body_share(mut self, min: f32, max: f32) -> Self {
        self.body_min_share = min;
        self.body_max_share = max;
        self
    }

    /// Set the minimum heading share.
    pub fn with_heading_min_share(mut self, share: f32) -> Self {
        self.heading_min_share = share;
        self
    }

    /// Set the maximum title share.
    pub fn with_title_max_share(mut self, share: f32) -> Self {
        self.title_max_share = share;
        self
    }

    /// Set the accepted font size range.
    pub fn with_font_size_range(mut self, min: f32, max: f32) -> Self {
        self.min_font_size = min;
        self.max_font_size = max;
        self
    }

    /// Set the pass threshold.
    pub fn with_pass_threshold(mut self, threshold: u32) -> Self {
        self.pass_threshold = threshold.min(100);
        self
    }

    /// Set whether distribution findings fail the result on their own.
    pub fn with_require_font_distribution(mut self, require: bool) -> Self {
        self.require_font_distribution = require;
        self
    }

    /// Check that ranges are ordered and shares lie in `[0, 100]`.
    pub fn validate(&self) -> Result<()> {
        let ordered = self.body_min_size <= self.heading_min_size
            && self.heading_min_size <= self.title_min_size
            && self.min_font_size <= self.max_font_size
            && self.body_min_share <= self.body_max_share;
        if !ordered {
            return Err(Error::InvalidOptions(
                "validator ranges must be ordered low to high".to_string(),
            ));
        }

        let shares = [
            ("body_min_share", self.body_min_share),
            ("body_max_share", self.body_max_share),
            ("heading_min_share", self.heading_min_share),
            ("title_max_share", self.title_max_share),
        ];
        for (name, share) in shares {
            if !(0.0..=100.0).contains(&share) {
                return Err(Error::InvalidOptions(format!(
                    "{} must be a percentage, got {}",
                    name, share
                )));
            }
        }
        Ok(())
    }
}

impl Default for ValidatorOptions {
    fn default() -> Self {
        Self {
            body_min_size: 10.0,
            heading_min_size: 13.0,
            title_min_size: 24.0,
            body_min_share: 50.0,
            body_max_share: 85.0,
            heading_min_share: 10.0,
            title_max_share: 10.0,
            min_font_size: 7.0,
            max_font_size: 48.0,
            pass_threshold: 70,
            require_font_distribution: true,
        }
    }
}

/// Percentage of samples per size category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FontDistribution {
    /// Body sizes, 10pt up to 13pt
    pub body: f32,
    /// Heading sizes, 13pt up to 24pt
    pub heading: f32,
    /// Title sizes, 24pt and above
    pub title: f32,
    /// Everything else
    pub other: f32,
}

/// Points awarded per scoring component.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    /// Font distribution, out of 50
    pub font_distribution: u32,
    /// Page count fidelity, out of 25
    pub page_breaks: u32,
    /// Column detection, out of 15
    pub columns: u32,
    /// No-outlier bonus, out of 10
    pub outliers: u32,
}

impl ScoreBreakdown {
    /// Sum of all components.
    pub fn total(&self) -> u32 {
        self.font_distribution + self.page_breaks + self.columns + self.outliers
    }
}

/// Outcome of validating one rendered artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    /// Total score, 0 to 100
    pub score: u32,
    /// Whether the artifact meets the targets
    pub passed: bool,
    /// Share of samples per size category
    pub font_size_distribution: FontDistribution,
    /// Human-readable findings
    pub issues: Vec<String>,
    /// Points per scoring component
    pub breakdown: ScoreBreakdown,
    /// Number of font sizes inspected
    pub sample_count: usize,
    /// Pages found in the artifact
    pub page_count: usize,
    /// Most frequent size, to 0.1pt
    pub dominant_font_size: Option<f32>,
}

impl ValidationResult {
    /// Multi-line report for printing.
    pub fn summary(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verdict = if self.passed { "PASSED" } else { "FAILED" };
        writeln!(f, "Score: {}/100 ({})", self.score, verdict)?;

        let d = &self.font_size_distribution;
        writeln!(
            f,
            "Font sizes: body {:.1}%, heading {:.1}%, title {:.1}%, other {:.1}% ({} samples, {} pages)",
            d.body, d.heading, d.title, d.other, self.sample_count, self.page_count
        )?;
        if let Some(size) = self.dominant_font_size {
            writeln!(f, "Dominant size: {:.1}pt", size)?;
        }

        let b = &self.breakdown;
        writeln!(
            f,
            "Breakdown: distribution {}/{}, pages {}/{}, columns {}/{}, outliers {}/{}",
            b.font_distribution,
            FONT_DISTRIBUTION_POINTS,
            b.page_breaks,
            PAGE_BREAK_POINTS,
            b.columns,
            COLUMN_POINTS,
            b.outliers,
            OUTLIER_POINTS
        )?;

        if self.issues.is_empty() {
            write!(f, "No issues")
        } else {
            write!(f, "Issues:")?;
            for issue in &self.issues {
                write!(f, "\n  - {}", issue)?;
            }
            Ok(())
        }
    }
}

/// Frequency of observed font sizes at 0.1pt precision.
#[derive(Debug, Clone, Default)]
pub struct FontHistogram {
    buckets: BTreeMap<i32, usize>,
}

impl FontHistogram {
    /// Add a font size observation. Non-finite sizes are ignored.
    pub fn add_size(&mut self, size: f32) {
        if size.is_finite() {
            let key = (size * 10.0).round() as i32;
            *self.buckets.entry(key).or_insert(0) += 1;
        }
    }

    /// The most common size; ties go to the smaller size.
    pub fn dominant_size(&self) -> Option<f32> {
        self.buckets
            .iter()
            .max_by(|a, b| a.1.cmp(b.1).then_with(|| b.0.cmp(a.0)))
            .map(|(key, _)| *key as f32 / 10.0)
    }

    /// Number of distinct sizes.
    pub fn distinct_sizes(&self) -> usize {
        self.buckets.len()
    }
}

impl FromIterator<f32> for FontHistogram {
    fn from_iter<I: IntoIterator<Item = f32>>(iter: I) -> Self {
        let mut histogram = Self::default();
        for size in iter {
            histogram.add_size(size);
        }
        histogram
    }
}

/// Scores rendered artifacts against target font-size ranges.
#[derive(Debug, Clone, Default)]
pub struct QualityValidator {
    options: ValidatorOptions,
}

impl QualityValidator {
    /// Create a validator.
    pub fn new(options: ValidatorOptions) -> Self {
        Self { options }
    }

    /// The options in use.
    pub fn options(&self) -> &ValidatorOptions {
        &self.options
    }

    /// Score an artifact.
    ///
    /// When `expected_pages` is given, the page component requires the
    /// artifact's page count to match it. Never fails: problems are
    /// reported as issues on the result.
    pub fn validate(
        &self,
        artifact: &dyn RenderedArtifact,
        expected_pages: Option<usize>,
    ) -> ValidationResult {
        let sizes = artifact.font_sizes();
        let page_count = artifact.page_count();
        let mut issues = Vec::new();

        let distribution = self.distribution(&sizes);
        let findings = if sizes.is_empty() {
            vec!["no font sizes found".to_string()]
        } else {
            self.distribution_findings(&distribution)
        };
        let font_points = if sizes.is_empty() {
            0
        } else {
            let penalty = ISSUE_PENALTY.saturating_mul(findings.len() as u32);
            FONT_DISTRIBUTION_POINTS.saturating_sub(penalty)
        };
        let distribution_ok = findings.is_empty();
        issues.extend(findings);

        let outliers: Vec<f32> = sizes
            .iter()
            .copied()
            .filter(|size| !self.in_range(*size))
            .collect();
        if !outliers.is_empty() {
            issues.push(self.describe_outliers(&outliers));
        }

        let pages_ok = match expected_pages {
            Some(expected) if expected != page_count => {
                issues.push(format!(
                    "expected {} pages, found {}",
                    expected, page_count
                ));
                false
            }
            _ => true,
        };

        let breakdown = ScoreBreakdown {
            font_distribution: font_points,
            page_breaks: if pages_ok { PAGE_BREAK_POINTS } else { 0 },
            columns: COLUMN_POINTS,
            outliers: if outliers.is_empty() { OUTLIER_POINTS } else { 0 },
        };
        let score = breakdown.total();
        let passed = score >= self.options.pass_threshold
            && (distribution_ok || !self.options.require_font_distribution);

        log::debug!(
            "Validated {} font samples on {} pages: score {} ({} issues)",
            sizes.len(),
            page_count,
            score,
            issues.len()
        );

        ValidationResult {
            score,
            passed,
            font_size_distribution: distribution,
            issues,
            breakdown,
            sample_count: sizes.len(),
            page_count,
            dominant_font_size: sizes.iter().copied().collect::<FontHistogram>().dominant_size(),
        }
    }

    /// Percentage of sizes falling in each category.
    pub fn distribution(&self, sizes: &[f32]) -> FontDistribution {
        if sizes.is_empty() {
            return FontDistribution::default();
        }

        let o = &self.options;
        let (mut body, mut heading, mut title, mut other) = (0usize, 0usize, 0usize, 0usize);
        for &size in sizes {
            if size >= o.title_min_size {
                title += 1;
            } else if size >= o.heading_min_size {
                heading += 1;
            } else if size >= o.body_min_size {
                body += 1;
            } else {
                // Includes NaN, which fails every comparison.
                other += 1;
            }
        }

        let share = |count: usize| count as f32 * 100.0 / sizes.len() as f32;
        FontDistribution {
            body: share(body),
            heading: share(heading),
            title: share(title),
            other: share(other),
        }
    }

    fn distribution_findings(&self, d: &FontDistribution) -> Vec<String> {
        let o = &self.options;
        let mut findings = Vec::new();

        if d.body < o.body_min_share {
            findings.push(format!(
                "body text share {:.1}% is below {:.0}%",
                d.body, o.body_min_share
            ));
        }
        let headings_ok = d.heading >= o.heading_min_share;
        if !headings_ok {
            findings.push(format!(
                "heading share {:.1}% is below {:.0}%",
                d.heading, o.heading_min_share
            ));
        }
        // Too much body text is the same problem as missing headings.
        if headings_ok && d.body > o.body_max_share {
            findings.push(format!(
                "body text share {:.1}% is above {:.0}%",
                d.body, o.body_max_share
            ));
        }
        if d.title > o.title_max_share {
            findings.push(format!(
                "title share {:.1}% is above {:.0}%",
                d.title, o.title_max_share
            ));
        }
        findings
    }

    fn in_range(&self, size: f32) -> bool {
        size >= self.options.min_font_size && size <= self.options.max_font_size
    }

    fn describe_outliers(&self, outliers: &[f32]) -> String {
        let listed: Vec<String> = outliers
            .iter()
            .take(5)
            .map(|size| format!("{:.1}", size))
            .collect();
        let more = if outliers.len() > listed.len() {
            ", ..."
        } else {
            ""
        };
        format!(
            "{} font sizes outside {:.1}-{:.1}pt: {}{}",
            outliers.len(),
            self.options.min_font_size,
            self.options.max_font_size,
            listed.join(", "),
            more
        )
    }
}
