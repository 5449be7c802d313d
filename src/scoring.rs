// ./src/scoring.rs
//! Proof-of-contribution score dimensions.
//!
//! Each dimension is a [`ScoreDimension`] evaluated against the same
//! [`Evidence`]. Quality, authenticity and uniqueness are constants for now;
//! a content-based implementation slots in by replacing the strategy.

/// Facts gathered during a proof run that dimensions may score on.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Evidence {
    /// Local and remote record ids are both present and equal
    pub valid_data_id: bool,
    /// Aggregate content score of the submission, 0 until content scoring exists
    pub total_score: u64,
}

/// One scored dimension of a proof, in [0, 1].
pub trait ScoreDimension: Send + Sync {
    fn name(&self) -> &'static str;

    fn score(&self, evidence: &Evidence) -> f64;
}

/// Does the data belong to the user?
#[derive(Debug, Default, Clone, Copy)]
pub struct Ownership;

impl ScoreDimension for Ownership {
    fn name(&self) -> &'static str {
        "ownership"
    }

    fn score(&self, evidence: &Evidence) -> f64 {
        if evidence.valid_data_id {
            1.0
        } else {
            0.0
        }
    }
}

/// A dimension that always scores the same value.
#[derive(Debug, Clone, Copy)]
pub struct Fixed {
    name: &'static str,
    value: f64,
}

impl Fixed {
    pub const fn new(name: &'static str, value: f64) -> Self {
        Self { name, value }
    }
}

impl ScoreDimension for Fixed {
    fn name(&self) -> &'static str {
        self.name
    }

    fn score(&self, _evidence: &Evidence) -> f64 {
        self.value
    }
}

/// How high quality is the data? Not scored on content yet.
pub const QUALITY: Fixed = Fixed::new("quality", 1.0);

/// Has the data been tampered with? Not implemented.
pub const AUTHENTICITY: Fixed = Fixed::new("authenticity", 0.0);

/// How unique is the data relative to other datasets? Not implemented.
pub const UNIQUENESS: Fixed = Fixed::new("uniqueness", 0.0);

/// Weights of the overall score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProofWeights {
    pub quality: f64,
    pub ownership: f64,
}

impl Default for ProofWeights {
    fn default() -> Self {
        Self {
            quality: 0.6,
            ownership: 0.4,
        }
    }
}

impl ProofWeights {
    pub fn combine(&self, quality: f64, ownership: f64) -> f64 {
        self.quality * quality + self.ownership * ownership
    }
}

/// Per-dimension scores of one proof run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scores {
    pub quality: f64,
    pub ownership: f64,
    pub authenticity: f64,
    pub uniqueness: f64,
    pub score: f64,
}

/// The set of strategies used to score a proof.
pub struct Scorer {
    quality: Box<dyn ScoreDimension>,
    ownership: Box<dyn ScoreDimension>,
    authenticity: Box<dyn ScoreDimension>,
    uniqueness: Box<dyn ScoreDimension>,
    weights: ProofWeights,
}

impl Default for Scorer {
    fn default() -> Self {
        Self {
            quality: Box::new(QUALITY),
            ownership: Box::new(Ownership),
            authenticity: Box::new(AUTHENTICITY),
            uniqueness: Box::new(UNIQUENESS),
            weights: ProofWeights::default(),
        }
    }
}

fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

impl Scorer {
    pub fn with_quality(mut self, quality: impl ScoreDimension + 'static) -> Self {
        self.quality = Box::new(quality);
        self
    }

    pub fn weights(&self) -> ProofWeights {
        self.weights
    }

    /// Scores every dimension; the overall score only uses quality and ownership.
    pub fn score(&self, evidence: &Evidence) -> Scores {
        let quality = clamp_unit(self.quality.score(evidence));
        let ownership = clamp_unit(self.ownership.score(evidence));

        Scores {
            quality,
            ownership,
            authenticity: clamp_unit(self.authenticity.score(evidence)),
            uniqueness: clamp_unit(self.uniqueness.score(evidence)),
            score: self.weights.combine(quality, ownership),
        }
    }
}
