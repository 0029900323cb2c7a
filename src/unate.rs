//! Unateness analysis.
//!
//! A threshold function is unate in every variable. This module classifies each
//! variable as positive or negative unate by comparing its cofactors, and
//! complements the negative ones so that the resulting function is monotone
//! non-decreasing in every variable.

use std::fmt;

use log::debug;

use crate::truth_table::TruthTable;

/// Direction in which a function is monotone in one variable.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Polarity {
    /// f is non-decreasing in the variable: `f|x=0 ⇒ f|x=1`.
    Positive,
    /// f is non-increasing in the variable: `f|x=1 ⇒ f|x=0`.
    Negative,
}

/// Per-variable record of which variables were complemented.
///
/// Only [`analyze`] creates flip masks; they are never modified afterwards.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct FlipMask(Vec<bool>);

impl FlipMask {
    /// Returns the number of variables covered by the mask.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the mask covers no variables.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns true if variable `var` was complemented.
    pub fn is_flipped(&self, var: usize) -> bool {
        self.0[var]
    }

    /// Returns the polarity in which the original function is monotone in `var`.
    pub fn polarity(&self, var: usize) -> Polarity {
        if self.is_flipped(var) {
            Polarity::Negative
        } else {
            Polarity::Positive
        }
    }

    /// Returns the number of complemented variables.
    pub fn count(&self) -> usize {
        self.0.iter().filter(|&&b| b).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        self.0.iter().copied()
    }
}

impl fmt::Display for FlipMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &b in &self.0 {
            write!(f, "{}", if b { '1' } else { '0' })?;
        }
        Ok(())
    }
}

/// Result of a successful analysis: every variable is unate.
#[derive(Debug, Clone)]
pub struct Unate {
    pub flips: FlipMask,
    /// The input function with every flipped variable complemented.
    /// It is positive unate in all variables.
    pub monotone: TruthTable,
}

/// The function depends on `var` in both polarities.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Binate {
    pub var: usize,
}

impl fmt::Display for Binate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "variable x{} is binate", self.var)
    }
}

/// Classifies every variable of `tt` and builds the monotone table.
///
/// Variables are checked in increasing order, and the analysis stops at the
/// first binate one. A variable the function does not depend on satisfies
/// both implications and is reported as negative (flipped).
pub fn analyze(tt: &TruthTable) -> Result<Unate, Binate> {
    let num_vars = tt.num_vars();
    let mut flips = Vec::with_capacity(num_vars);
    let mut monotone = tt.clone();

    for var in 0..num_vars {
        let f0 = tt.cofactor0(var);
        let f1 = tt.cofactor1(var);

        if f1.implies(&f0) {
            debug!("x{} is negative unate, flipping", var);
            monotone = monotone.flip(var);
            flips.push(true);
        } else if f0.implies(&f1) {
            debug!("x{} is positive unate", var);
            flips.push(false);
        } else {
            debug!("x{} is binate, {} is not a threshold function", var, tt);
            return Err(Binate { var });
        }
    }

    debug_assert!(
        (0..num_vars).all(|var| monotone.is_positive_unate(var)),
        "flipped table {} is not positive unate",
        monotone
    );

    Ok(Unate {
        flips: FlipMask(flips),
        monotone,
    })
}
