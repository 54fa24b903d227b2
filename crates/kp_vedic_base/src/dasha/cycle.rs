//! Lord cycles: the ordered lords and their weights that drive both the
//! period hierarchy and the star/sub-lord tables.
//!
//! Vimshottari (120 years, 9 grahas) is the built-in cycle; a caller may
//! inject any other validated table.

use crate::error::VedicError;
use crate::graha::Graha;

/// Vimshottari graha sequence: Ketu, Shukra, Surya, Chandra, Mangal, Rahu, Guru, Shani, Buddh.
pub const VIMSHOTTARI_GRAHAS: [Graha; 9] = [
    Graha::Ketu,
    Graha::Shukra,
    Graha::Surya,
    Graha::Chandra,
    Graha::Mangal,
    Graha::Rahu,
    Graha::Guru,
    Graha::Shani,
    Graha::Buddh,
];

/// Vimshottari periods in years, matching [`VIMSHOTTARI_GRAHAS`].
pub const VIMSHOTTARI_YEARS: [f64; 9] = [7.0, 20.0, 6.0, 10.0, 7.0, 18.0, 16.0, 19.0, 17.0];

/// An ordered, weighted, cyclic list of lords.
///
/// Weights are in years; only their ratios matter for subdivision.
#[derive(Debug, Clone, PartialEq)]
pub struct LordCycle {
    lords: Vec<Graha>,
    weights: Vec<f64>,
    total: f64,
}

impl LordCycle {
    /// Build and validate a cycle from `(lord, weight_years)` pairs.
    pub fn new(entries: &[(Graha, f64)]) -> Result<Self, VedicError> {
        if entries.is_empty() {
            return Err(VedicError::InvalidCycle("cycle has no lords"));
        }
        let mut lords = Vec::with_capacity(entries.len());
        let mut weights = Vec::with_capacity(entries.len());
        for &(lord, weight) in entries {
            if !weight.is_finite() || weight <= 0.0 {
                return Err(VedicError::InvalidCycle("weights must be finite and positive"));
            }
            if lords.contains(&lord) {
                return Err(VedicError::InvalidCycle("lord listed twice"));
            }
            lords.push(lord);
            weights.push(weight);
        }
        let total = weights.iter().sum();
        Ok(Self {
            lords,
            weights,
            total,
        })
    }

    /// The Vimshottari cycle.
    pub fn vimshottari() -> Self {
        Self {
            lords: VIMSHOTTARI_GRAHAS.to_vec(),
            weights: VIMSHOTTARI_YEARS.to_vec(),
            total: 120.0,
        }
    }

    /// Number of lords in the cycle.
    pub fn len(&self) -> usize {
        self.lords.len()
    }

    /// Always false for a validated cycle.
    pub fn is_empty(&self) -> bool {
        self.lords.is_empty()
    }

    /// Lords in cycle order.
    pub fn lords(&self) -> &[Graha] {
        &self.lords
    }

    /// Sum of all weights, in years.
    pub fn total_weight(&self) -> f64 {
        self.total
    }

    /// Position of `lord` in the cycle.
    pub fn position(&self, lord: Graha) -> Option<usize> {
        self.lords.iter().position(|&l| l == lord)
    }

    /// Weight in years of `lord`.
    pub fn weight_of(&self, lord: Graha) -> Option<f64> {
        self.position(lord).map(|i| self.weights[i])
    }

    /// Lord and weight at `pos`, wrapping around the cycle.
    pub fn entry_at(&self, pos: usize) -> (Graha, f64) {
        let i = pos % self.lords.len();
        (self.lords[i], self.weights[i])
    }

    /// Star lord of a 27-scheme segment: segment `i` belongs to lord `i mod n`.
    pub fn segment_lord(&self, segment_index: u8) -> Graha {
        self.entry_at(segment_index as usize).0
    }

    /// All entries starting at `pos` and wrapping once around.
    pub fn rotated(&self, pos: usize) -> impl Iterator<Item = (Graha, f64)> + '_ {
        (0..self.lords.len()).map(move |k| self.entry_at(pos + k))
    }
}

impl Default for LordCycle {
    fn default() -> Self {
        Self::vimshottari()
    }
}
