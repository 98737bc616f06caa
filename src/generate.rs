use rand::{rngs::SmallRng, Rng, SeedableRng};
use rand_distr::{Distribution, Normal};
use tracing::{debug, trace};

use crate::error::{Result, SortingHatError};
use crate::params::{ClassParam, ClassParameters};
use crate::table::SampledTable;

// Everything needed to generate one normally-distributed feature for a set of classes
#[derive(Debug, Clone)]
pub struct FeatureSpec<L> {
    pub means: ClassParam<f64>,
    pub stds: ClassParam<f64>,
    pub sample_counts: ClassParam<usize>,
    // Order here decides both the class count and the row grouping of the output
    pub labels: Vec<L>,
    pub feature_name: Option<String>,
    pub min_clamp: Option<f64>,
    pub max_clamp: Option<f64>,
}

impl<L> FeatureSpec<L> {
    pub fn new(
        means: impl Into<ClassParam<f64>>,
        stds: impl Into<ClassParam<f64>>,
        sample_counts: impl Into<ClassParam<usize>>,
        labels: Vec<L>,
    ) -> Self {
        Self {
            means: means.into(),
            stds: stds.into(),
            sample_counts: sample_counts.into(),
            labels,
            feature_name: None,
            min_clamp: None,
            max_clamp: None,
        }
    }

    pub fn feature_name(mut self, name: impl Into<String>) -> Self {
        self.feature_name = Some(name.into());
        self
    }

    pub fn clamp(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.min_clamp = min;
        self.max_clamp = max;
        self
    }
}

// Sample every class from its own normal distribution, using the given RNG.
// Rows come out grouped by label in label order, then get clamped.
pub fn generate_feature<L: Clone>(spec: &FeatureSpec<L>, rng: &mut impl Rng) -> Result<SampledTable<L>> {
    let params = ClassParameters::new(&spec.labels, &spec.means, &spec.stds, &spec.sample_counts)?;
    debug!(
        "Generating {} samples across {} classes",
        params.total_samples(),
        params.len()
    );

    let mut rows = Vec::with_capacity(params.total_samples());
    for (label_index, (label, record)) in params.iter().enumerate() {
        trace!(
            "Class {}: mean={}, std={}, n={}",
            label_index,
            record.mean,
            record.std,
            record.sample_count
        );
        // Normal::new only rejects a non-finite std, so a negative one is caught here.
        // `std >= 0.0` is also false for NaN.
        let normal = Normal::new(record.mean, record.std)
            .ok()
            .filter(|_| record.mean.is_finite() && record.std >= 0.0)
            .ok_or(SortingHatError::InvalidDistribution {
                label_index,
                mean: record.mean,
                std: record.std,
            })?;
        rows.extend(
            normal
                .sample_iter(&mut *rng)
                .take(record.sample_count)
                .map(|value| (value, label.clone())),
        );
    }

    let mut table = SampledTable::new(spec.feature_name.as_deref(), rows);
    table.clamp(spec.min_clamp, spec.max_clamp);
    Ok(table)
}

// Convenience wrapper that builds a local RNG from `seed`, or from OS entropy
// when there is none. Zero is a seed like any other.
pub fn generate_feature_seeded<L: Clone>(
    spec: &FeatureSpec<L>,
    seed: Option<u64>,
) -> Result<SampledTable<L>> {
    let mut rng = match seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_entropy(),
    };
    generate_feature(spec, &mut rng)
}
