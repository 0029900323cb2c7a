//! Capability interface to an integer linear program solver.
//!
//! The identification algorithm only needs to build one model, solve it once
//! and read back the assignment. Any solver exposing these operations can be
//! plugged in by implementing [`Solver`] and [`Model`].
//!
//! Columns are addressed by 0-based index. Every column has lower bound zero
//! and no upper bound. A model is an owned value: dropping it releases all
//! solver state, on every exit path.

use std::fmt;
use std::time::Duration;

/// Comparison between a row's linear expression and its bound.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Relation {
    /// `expr >= bound`
    Ge,
    /// `expr <= bound`
    Le,
    /// `expr == bound`
    Eq,
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Relation::Ge => write!(f, ">="),
            Relation::Le => write!(f, "<="),
            Relation::Eq => write!(f, "="),
        }
    }
}

/// Optimization direction of the objective.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub enum Direction {
    #[default]
    Minimize,
    Maximize,
}

/// Outcome of [`Model::solve`].
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum SolveOutcome {
    /// An optimal assignment, one value per column.
    Optimal(Vec<i64>),
    /// The constraints have no integer solution.
    Infeasible,
    /// The solver failed (unbounded objective, resource exhaustion, ...).
    Error(String),
}

/// Error raised while building a model.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct SolverError {
    message: String,
}

impl SolverError {
    pub fn new(message: impl Into<String>) -> Self {
        SolverError { message: message.into() }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for SolverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Solver error: {}", self.message)
    }
}

impl std::error::Error for SolverError {}

/// A solver that can create fresh models.
///
/// Each identification call creates its own model, so a solver may be shared
/// between calls as long as its models are not.
pub trait Solver {
    type Model: Model;

    /// Creates an empty model with `num_vars` continuous columns.
    fn create_model(&self, num_vars: usize) -> Self::Model;
}

/// A single integer linear program under construction.
pub trait Model {
    /// Returns the number of columns.
    fn num_vars(&self) -> usize;

    /// Adds the row `Σ coeff·x[var] (relation) bound`.
    fn add_constraint(&mut self, coeffs: &[(usize, i64)], relation: Relation, bound: i64) -> Result<(), SolverError>;

    /// Restricts column `var` to integer values.
    fn mark_integer(&mut self, var: usize) -> Result<(), SolverError>;

    /// Sets the objective `Σ coeff·x[var]`, replacing any previous one.
    fn set_objective(&mut self, coeffs: &[(usize, i64)], direction: Direction) -> Result<(), SolverError>;

    /// Limits the time spent in [`Model::solve`].
    ///
    /// Solvers without time limits may ignore this.
    fn set_time_limit(&mut self, _limit: Duration) {}

    /// Solves the model.
    fn solve(&mut self) -> SolveOutcome;
}

/// Checks that every column index in `coeffs` is below `num_vars`.
pub fn check_columns(coeffs: &[(usize, i64)], num_vars: usize) -> Result<(), SolverError> {
    match coeffs.iter().find(|&&(var, _)| var >= num_vars) {
        Some(&(var, _)) => Err(SolverError::new(format!(
            "column {} out of range for a model with {} columns",
            var, num_vars
        ))),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_columns() {
        assert!(check_columns(&[(0, 1), (2, -1)], 3).is_ok());
        let err = check_columns(&[(0, 1), (3, -1)], 3).unwrap_err();
        assert_eq!(err.message(), "column 3 out of range for a model with 3 columns");
        assert_eq!(err.to_string(), "Solver error: column 3 out of range for a model with 3 columns");
    }

    #[test]
    fn test_relation_display() {
        assert_eq!(Relation::Ge.to_string(), ">=");
        assert_eq!(Relation::Le.to_string(), "<=");
        assert_eq!(Relation::Eq.to_string(), "=");
    }
}
