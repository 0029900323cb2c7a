//! Default [`Solver`] backed by the pure-Rust `microlp` crate.
//!
//! The model is buffered until [`Model::solve`], because `microlp` fixes a
//! column's integrality when the column is created. The buffered model prints
//! itself in LP format, which is logged at `trace` level before solving.

use std::fmt;
use std::time::Duration;

use log::{debug, trace, warn};
use microlp::{ComparisonOp, LinearExpr, OptimizationDirection, Problem};

use crate::ilp::{check_columns, Direction, Model, Relation, SolveOutcome, Solver, SolverError};

#[derive(Debug, Default, Copy, Clone)]
pub struct MicroLpSolver;

impl Solver for MicroLpSolver {
    type Model = MicroLpModel;

    fn create_model(&self, num_vars: usize) -> MicroLpModel {
        MicroLpModel::new(num_vars)
    }
}

#[derive(Debug, Clone)]
struct Row {
    coeffs: Vec<(usize, i64)>,
    relation: Relation,
    bound: i64,
}

/// A buffered model for [`MicroLpSolver`].
#[derive(Debug, Clone)]
pub struct MicroLpModel {
    integer: Vec<bool>,
    rows: Vec<Row>,
    objective: Vec<i64>,
    direction: Direction,
}

impl MicroLpModel {
    pub fn new(num_vars: usize) -> Self {
        Self {
            integer: vec![false; num_vars],
            rows: Vec::new(),
            objective: vec![0; num_vars],
            direction: Direction::Minimize,
        }
    }

    /// Returns the number of rows added so far.
    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    fn to_problem(&self) -> (Problem, Vec<microlp::Variable>) {
        let direction = match self.direction {
            Direction::Minimize => OptimizationDirection::Minimize,
            Direction::Maximize => OptimizationDirection::Maximize,
        };
        let mut problem = Problem::new(direction);

        let columns: Vec<_> = (0..self.num_vars())
            .map(|var| {
                let cost = self.objective[var] as f64;
                if self.integer[var] {
                    problem.add_integer_var(cost, (0, i32::MAX))
                } else {
                    problem.add_var(cost, (0.0, f64::INFINITY))
                }
            })
            .collect();

        for row in &self.rows {
            let mut expr = LinearExpr::empty();
            for &(var, coeff) in &row.coeffs {
                expr.add(columns[var], coeff as f64);
            }
            let op = match row.relation {
                Relation::Ge => ComparisonOp::Ge,
                Relation::Le => ComparisonOp::Le,
                Relation::Eq => ComparisonOp::Eq,
            };
            problem.add_constraint(expr, op, row.bound as f64);
        }

        (problem, columns)
    }
}

impl Model for MicroLpModel {
    fn num_vars(&self) -> usize {
        self.integer.len()
    }

    fn add_constraint(&mut self, coeffs: &[(usize, i64)], relation: Relation, bound: i64) -> Result<(), SolverError> {
        check_columns(coeffs, self.num_vars())?;
        self.rows.push(Row {
            coeffs: coeffs.to_vec(),
            relation,
            bound,
        });
        Ok(())
    }

    fn mark_integer(&mut self, var: usize) -> Result<(), SolverError> {
        check_columns(&[(var, 1)], self.num_vars())?;
        self.integer[var] = true;
        Ok(())
    }

    fn set_objective(&mut self, coeffs: &[(usize, i64)], direction: Direction) -> Result<(), SolverError> {
        check_columns(coeffs, self.num_vars())?;
        self.objective.iter_mut().for_each(|c| *c = 0);
        for &(var, coeff) in coeffs {
            self.objective[var] += coeff;
        }
        self.direction = direction;
        Ok(())
    }

    fn set_time_limit(&mut self, limit: Duration) {
        warn!("microlp does not support time limits, ignoring limit of {:?}", limit);
    }

    fn solve(&mut self) -> SolveOutcome {
        trace!("model:\n{}", self);
        let (problem, columns) = self.to_problem();

        match problem.solve() {
            Ok(solution) => {
                debug!("objective = {}", solution.objective());
                let mut values = Vec::with_capacity(columns.len());
                for &column in &columns {
                    let value = solution[column];
                    if !value.is_finite() || value.abs() > i64::MAX as f64 {
                        return SolveOutcome::Error(format!("column value {} is not representable", value));
                    }
                    values.push(value.round() as i64);
                }
                SolveOutcome::Optimal(values)
            }
            Err(microlp::Error::Infeasible) => SolveOutcome::Infeasible,
            Err(err) => SolveOutcome::Error(err.to_string()),
        }
    }
}

fn write_expr(f: &mut fmt::Formatter<'_>, coeffs: impl IntoIterator<Item = (usize, i64)>) -> fmt::Result {
    let mut empty = true;
    for (var, coeff) in coeffs {
        if coeff == 0 {
            continue;
        }
        match coeff {
            1 => write!(f, " +C{}", var + 1)?,
            -1 => write!(f, " -C{}", var + 1)?,
            c => write!(f, " {:+} C{}", c, var + 1)?,
        }
        empty = false;
    }
    if empty {
        write!(f, " 0")?;
    }
    Ok(())
}

/// LP text format, one row per line.
impl fmt::Display for MicroLpModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let direction = match self.direction {
            Direction::Minimize => "min",
            Direction::Maximize => "max",
        };
        write!(f, "{}:", direction)?;
        write_expr(f, self.objective.iter().copied().enumerate())?;
        writeln!(f, ";")?;

        for (i, row) in self.rows.iter().enumerate() {
            write!(f, "R{}:", i + 1)?;
            write_expr(f, row.coeffs.iter().copied())?;
            writeln!(f, " {} {};", row.relation, row.bound)?;
        }

        let integers: Vec<String> = (0..self.num_vars())
            .filter(|&var| self.integer[var])
            .map(|var| format!("C{}", var + 1))
            .collect();
        if !integers.is_empty() {
            writeln!(f, "int {};", integers.join(","))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use test_log::test;

    #[test]
    fn test_small_ilp() {
        // min x + y  s.t.  x + y >= 3, x - y <= -1 (integers)
        let mut model = MicroLpSolver.create_model(2);
        model.add_constraint(&[(0, 1), (1, 1)], Relation::Ge, 3).unwrap();
        model.add_constraint(&[(0, 1), (1, -1)], Relation::Le, -1).unwrap();
        model.mark_integer(0).unwrap();
        model.mark_integer(1).unwrap();
        model.set_objective(&[(0, 1), (1, 1)], Direction::Minimize).unwrap();

        match model.solve() {
            SolveOutcome::Optimal(values) => {
                assert_eq!(values.len(), 2);
                assert_eq!(values[0] + values[1], 3);
                assert!(values[0] - values[1] <= -1);
            }
            other => panic!("expected optimal solution, got {:?}", other),
        }
    }

    #[test]
    fn test_infeasible() {
        let mut model = MicroLpSolver.create_model(1);
        model.add_constraint(&[(0, 1)], Relation::Le, -1).unwrap();
        model.mark_integer(0).unwrap();
        model.set_objective(&[(0, 1)], Direction::Minimize).unwrap();

        assert_eq!(model.solve(), SolveOutcome::Infeasible);
    }

    #[test]
    fn test_column_out_of_range() {
        let mut model = MicroLpSolver.create_model(2);
        assert!(model.add_constraint(&[(2, 1)], Relation::Ge, 0).is_err());
        assert!(model.mark_integer(5).is_err());
        assert!(model.set_objective(&[(0, 1), (9, 1)], Direction::Minimize).is_err());
        assert_eq!(model.num_rows(), 0);
    }

    #[test]
    fn test_lp_format() {
        let mut model = MicroLpSolver.create_model(3);
        model.add_constraint(&[(0, 1), (2, -1)], Relation::Ge, 0).unwrap();
        model.add_constraint(&[(2, -1)], Relation::Le, -1).unwrap();
        model.add_constraint(&[(1, 2), (2, -3)], Relation::Eq, 4).unwrap();
        model.mark_integer(0).unwrap();
        model.mark_integer(2).unwrap();
        model.set_objective(&[(0, 1), (1, 1), (2, 1)], Direction::Minimize).unwrap();

        let expected = "min: +C1 +C2 +C3;\n\
                        R1: +C1 -C3 >= 0;\n\
                        R2: -C3 <= -1;\n\
                        R3: +2 C2 -3 C3 = 4;\n\
                        int C1,C3;\n";
        assert_eq!(model.to_string(), expected);
    }
}
