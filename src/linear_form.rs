//! Linear forms of threshold functions.
//!
//! A linear form `[w₀, …, wₙ₋₁; T]` realizes f when `f(x) = 1 ⇔ Σ wᵢxᵢ ≥ T`
//! for every assignment x.

use std::fmt;

use crate::ilp::SolverError;
use crate::truth_table::TruthTable;
use crate::unate::FlipMask;

/// Integer weights followed by the threshold.
///
/// # Invariants
///
/// - The underlying vector is never empty: its last element is the threshold
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct LinearForm(Vec<i64>);

impl LinearForm {
    /// Creates a linear form from weights and a threshold.
    pub fn new(weights: impl IntoIterator<Item = i64>, threshold: i64) -> Self {
        let mut values: Vec<i64> = weights.into_iter().collect();
        values.push(threshold);
        LinearForm(values)
    }

    /// Maps a solution of the flipped problem back to the original variables.
    ///
    /// `raw` holds one weight per variable followed by the threshold. Every
    /// flipped variable was substituted by `1 - xᵢ` before solving, and
    /// `rᵢ(1 - xᵢ) = -rᵢxᵢ + rᵢ`, so its weight is negated and `rᵢ` moves to
    /// the threshold side. The corrections add up, so their order does not
    /// matter.
    pub fn from_solution(raw: &[i64], flips: &FlipMask) -> Result<Self, SolverError> {
        if raw.len() != flips.len() + 1 {
            return Err(SolverError::new(format!(
                "solution has {} values, expected {}",
                raw.len(),
                flips.len() + 1
            )));
        }

        let overflow = || SolverError::new("linear form does not fit into i64");
        let mut threshold = raw[flips.len()];
        let mut weights = Vec::with_capacity(flips.len());
        for (&r, flipped) in raw.iter().zip(flips.iter()) {
            if flipped {
                weights.push(r.checked_neg().ok_or_else(overflow)?);
                threshold = threshold.checked_sub(r).ok_or_else(overflow)?;
            } else {
                weights.push(r);
            }
        }

        Ok(LinearForm::new(weights, threshold))
    }

    pub fn num_vars(&self) -> usize {
        self.0.len() - 1
    }

    pub fn weights(&self) -> &[i64] {
        &self.0[..self.num_vars()]
    }

    pub fn threshold(&self) -> i64 {
        self.0[self.num_vars()]
    }

    /// Returns weights and threshold as one slice, threshold last.
    pub fn as_slice(&self) -> &[i64] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<i64> {
        self.0
    }

    /// Returns `Σ wᵢxᵢ` for the assignment encoded by `row`.
    pub fn weighted_sum(&self, row: usize) -> i128 {
        self.weights()
            .iter()
            .enumerate()
            .filter(|&(i, _)| (row >> i) & 1 == 1)
            .map(|(_, &w)| w as i128)
            .sum()
    }

    /// Evaluates the threshold gate at the assignment encoded by `row`.
    pub fn evaluate(&self, row: usize) -> bool {
        self.weighted_sum(row) >= self.threshold() as i128
    }

    /// Checks that this form agrees with `tt` on every row.
    pub fn realizes(&self, tt: &TruthTable) -> bool {
        self.num_vars() == tt.num_vars() && (0..tt.num_bits()).all(|row| self.evaluate(row) == tt.get_bit(row))
    }
}

impl fmt::Display for LinearForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, w) in self.weights().iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", w)?;
        }
        write!(f, "; {}]", self.threshold())
    }
}

impl From<LinearForm> for Vec<i64> {
    fn from(form: LinearForm) -> Self {
        form.0
    }
}
