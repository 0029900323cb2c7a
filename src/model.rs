//! Translation of a monotone truth table into an integer linear program.
//!
//! Columns `0..n` are the weights w₀…wₙ₋₁ and column `n` is the threshold T.
//! Every truth-table row `b` becomes exactly one constraint:
//!
//! ```text
//! f(b) = 1:  Σ bⱼ·wⱼ - T >=  0
//! f(b) = 0:  Σ bⱼ·wⱼ - T <= -1
//! ```
//!
//! The objective minimizes `Σ wⱼ + T`, which picks a small canonical solution
//! among the many equivalent ones.

use log::debug;

use crate::ilp::{Direction, Model, Relation, SolverError};
use crate::truth_table::TruthTable;

/// Writes the coefficients of row `index` into `coeffs`.
///
/// Only non-zero coefficients are emitted: one `+1` per set bit of `index`,
/// followed by `-1` on the threshold column.
fn fill_row(num_vars: usize, index: usize, coeffs: &mut Vec<(usize, i64)>) {
    coeffs.clear();
    coeffs.extend((0..num_vars).filter(|&j| (index >> j) & 1 == 1).map(|j| (j, 1)));
    coeffs.push((num_vars, -1));
}

/// Returns the coefficients of the constraint for truth-table row `index`.
pub fn row(num_vars: usize, index: usize) -> Vec<(usize, i64)> {
    let mut coeffs = Vec::with_capacity(num_vars + 1);
    fill_row(num_vars, index, &mut coeffs);
    coeffs
}

/// Returns the relation and bound of the constraint for a row with value `bit`.
pub fn bound(bit: bool) -> (Relation, i64) {
    if bit {
        (Relation::Ge, 0)
    } else {
        (Relation::Le, -1)
    }
}

/// Encodes `tt` into `model`, which must have `tt.num_vars() + 1` columns.
pub fn build<M: Model>(tt: &TruthTable, model: &mut M) -> Result<(), SolverError> {
    let num_vars = tt.num_vars();
    if model.num_vars() != num_vars + 1 {
        return Err(SolverError::new(format!(
            "model has {} columns, expected {}",
            model.num_vars(),
            num_vars + 1
        )));
    }

    let mut coeffs = Vec::with_capacity(num_vars + 1);
    for index in 0..tt.num_bits() {
        fill_row(num_vars, index, &mut coeffs);
        let (relation, bound) = bound(tt.get_bit(index));
        model.add_constraint(&coeffs, relation, bound)?;
    }

    for var in 0..=num_vars {
        model.mark_integer(var)?;
    }

    let objective: Vec<(usize, i64)> = (0..=num_vars).map(|var| (var, 1)).collect();
    model.set_objective(&objective, Direction::Minimize)?;

    debug!("built model with {} columns and {} rows", num_vars + 1, tt.num_bits());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::ilp::SolveOutcome;

    use test_log::test;

    /// Records every call, for checking the encoding.
    #[derive(Default)]
    struct RecordingModel {
        num_vars: usize,
        rows: Vec<(Vec<(usize, i64)>, Relation, i64)>,
        integer: Vec<usize>,
        objective: Option<(Vec<(usize, i64)>, Direction)>,
    }

    impl Model for RecordingModel {
        fn num_vars(&self) -> usize {
            self.num_vars
        }

        fn add_constraint(&mut self, coeffs: &[(usize, i64)], relation: Relation, bound: i64) -> Result<(), SolverError> {
            self.rows.push((coeffs.to_vec(), relation, bound));
            Ok(())
        }

        fn mark_integer(&mut self, var: usize) -> Result<(), SolverError> {
            self.integer.push(var);
            Ok(())
        }

        fn set_objective(&mut self, coeffs: &[(usize, i64)], direction: Direction) -> Result<(), SolverError> {
            self.objective = Some((coeffs.to_vec(), direction));
            Ok(())
        }

        fn solve(&mut self) -> SolveOutcome {
            SolveOutcome::Error("not a solver".to_string())
        }
    }

    #[test]
    fn test_row() {
        assert_eq!(row(0, 0), vec![(0, -1)]);
        assert_eq!(row(3, 0), vec![(3, -1)]);
        assert_eq!(row(3, 5), vec![(0, 1), (2, 1), (3, -1)]);
        assert_eq!(row(3, 7), vec![(0, 1), (1, 1), (2, 1), (3, -1)]);
    }

    #[test]
    fn test_build_and() {
        let and = TruthTable::from_fn(2, |x| x[0] && x[1]);
        let mut model = RecordingModel {
            num_vars: 3,
            ..Default::default()
        };
        build(&and, &mut model).unwrap();

        assert_eq!(
            model.rows,
            vec![
                (vec![(2, -1)], Relation::Le, -1),
                (vec![(0, 1), (2, -1)], Relation::Le, -1),
                (vec![(1, 1), (2, -1)], Relation::Le, -1),
                (vec![(0, 1), (1, 1), (2, -1)], Relation::Ge, 0),
            ]
        );
        assert_eq!(model.integer, vec![0, 1, 2]);
        assert_eq!(
            model.objective,
            Some((vec![(0, 1), (1, 1), (2, 1)], Direction::Minimize))
        );
    }

    #[test]
    fn test_one_row_per_bit() {
        let f = TruthTable::from_fn(5, |x| x[0] || (x[1] && x[4]));
        let mut model = RecordingModel {
            num_vars: 6,
            ..Default::default()
        };
        build(&f, &mut model).unwrap();

        assert_eq!(model.rows.len(), 32);
        for (index, (coeffs, relation, bound)) in model.rows.iter().enumerate() {
            assert_eq!(coeffs, &row(5, index));
            assert_eq!((*relation, *bound), super::bound(f.get_bit(index)));
        }
    }

    #[test]
    fn test_column_mismatch() {
        let mut model = RecordingModel {
            num_vars: 2,
            ..Default::default()
        };
        let err = build(&TruthTable::one(2), &mut model).unwrap_err();
        assert_eq!(err.message(), "model has 2 columns, expected 3");
        assert!(model.rows.is_empty());
    }
}
