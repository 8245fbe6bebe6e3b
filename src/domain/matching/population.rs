//! Population Normalizer - blended population statistics and z-scores.
//!
//! Observed per-dimension statistics are blended with a neutral prior so a
//! pool of one to three people cannot produce an unstable (or zero)
//! standard deviation:
//!
//! ```text
//! w    = min(1, N / 10)
//! stat = w * observed + (1 - w) * prior
//! z    = clamp((raw - mean) / max(std, EPSILON), -3, 3)
//! ```

use serde::{Deserialize, Serialize};

use super::{MatchingError, TraitScores, UserVector, ZScores, TRAIT_COUNT};

/// Prior mean applied to every dimension.
pub const PRIOR_MEAN: f64 = 50.0;

/// Prior standard deviation applied to every dimension.
pub const PRIOR_STD: f64 = 15.0;

/// Population size at which observed statistics are fully trusted.
pub const FULL_TRUST_POPULATION: f64 = 10.0;

/// Floor applied to the blended standard deviation before dividing.
pub const STD_EPSILON: f64 = 1e-6;

/// Immutable, blended statistics of one scoring population.
///
/// Shared read-only across all candidate scoring once constructed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PopulationStats {
    pub population_size: usize,
    /// Weight given to the observed statistics, `min(1, N/10)`.
    pub trust_weight: f64,
    pub mean: [f64; TRAIT_COUNT],
    pub std_dev: [f64; TRAIT_COUNT],
}

impl PopulationStats {
    /// Standardizes raw scores against these statistics.
    pub fn standardize(&self, traits: &TraitScores) -> ZScores {
        let raw = traits.as_array();
        let mut z = [0.0; TRAIT_COUNT];
        for (i, slot) in z.iter_mut().enumerate() {
            *slot = (raw[i] - self.mean[i]) / self.std_dev[i].max(STD_EPSILON);
        }
        ZScores::clamped(z)
    }
}

/// Population normalization functions.
pub struct PopulationNormalizer;

impl PopulationNormalizer {
    /// Computes blended statistics over every trait vector in `users`.
    ///
    /// # Edge Cases
    /// - Empty population: `MatchingError::EmptyPopulation`
    /// - Single user: observed std is 0, so the prior dominates (w = 0.1)
    /// - Uniform dimension: blended std still carries the prior share
    pub fn fit(users: &[UserVector]) -> Result<PopulationStats, MatchingError> {
        Self::fit_traits(users.iter().map(|user| &user.traits))
    }

    /// Computes blended statistics over raw trait vectors.
    ///
    /// The iterator is walked twice (mean, then deviation).
    pub fn fit_traits<'a, I>(traits: I) -> Result<PopulationStats, MatchingError>
    where
        I: IntoIterator<Item = &'a TraitScores>,
        I::IntoIter: Clone,
    {
        let traits = traits.into_iter();
        let population_size = traits.clone().count();
        if population_size == 0 {
            return Err(MatchingError::EmptyPopulation);
        }

        let n = population_size as f64;
        let trust_weight = (n / FULL_TRUST_POPULATION).min(1.0);

        let mut observed_mean = [0.0; TRAIT_COUNT];
        for scores in traits.clone() {
            for (sum, value) in observed_mean.iter_mut().zip(scores.as_array()) {
                *sum += value;
            }
        }
        for sum in observed_mean.iter_mut() {
            *sum /= n;
        }

        let mut observed_std = [0.0; TRAIT_COUNT];
        if population_size > 1 {
            for scores in traits {
                for (i, value) in scores.as_array().iter().enumerate() {
                    let diff = value - observed_mean[i];
                    observed_std[i] += diff * diff;
                }
            }
            for acc in observed_std.iter_mut() {
                *acc = (*acc / (n - 1.0)).sqrt();
            }
        }

        let mut mean = [0.0; TRAIT_COUNT];
        let mut std_dev = [0.0; TRAIT_COUNT];
        for i in 0..TRAIT_COUNT {
            mean[i] = blend(trust_weight, observed_mean[i], PRIOR_MEAN);
            std_dev[i] = blend(trust_weight, observed_std[i], PRIOR_STD).max(STD_EPSILON);
        }

        Ok(PopulationStats {
            population_size,
            trust_weight,
            mean,
            std_dev,
        })
    }
}

/// `w * observed + (1 - w) * prior`, written so that `observed == prior`
/// reproduces the prior exactly.
fn blend(weight: f64, observed: f64, prior: f64) -> f64 {
    prior + weight * (observed - prior)
}

/// Returns every user with z-scores attached, raw fields untouched.
///
/// # Errors
///
/// `MatchingError::EmptyPopulation` if `users` is empty.
pub fn normalize_population(users: Vec<UserVector>) -> Result<Vec<UserVector>, MatchingError> {
    let stats = PopulationNormalizer::fit(&users)?;
    Ok(users
        .into_iter()
        .map(|user| {
            let z = stats.standardize(&user.traits);
            user.with_z_scores(z)
        })
        .collect())
}
