//! Threshold function identification.
//!
//! The identification of a truth table runs through three stages:
//!
//! 1. [`unate::analyze`] rejects functions with a binate variable and flips the
//!    negative unate variables.
//! 2. [`model::build`] encodes the monotone table as an ILP, which a [`Solver`]
//!    solves. Infeasibility means the function is unate but not a threshold
//!    function (e.g. `x₀x₁ ∨ x₂x₃`).
//! 3. [`LinearForm::from_solution`] undoes the flips.
//!
//! All failures end in [`Identification::Rejected`]; a linear form is only
//! returned for an optimal solution.

use std::fmt;
use std::time::Duration;

use log::{debug, warn};

use crate::ilp::{Model, SolveOutcome, Solver, SolverError};
use crate::linear_form::LinearForm;
use crate::microlp_backend::MicroLpSolver;
use crate::model;
use crate::truth_table::TruthTable;
use crate::unate::{self, Binate, Unate};

/// Outcome of identifying one truth table.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Identification {
    /// The function is a threshold function realized by the linear form.
    Accepted(LinearForm),
    /// The function is not a threshold function, or no linear form was found.
    Rejected,
}

impl Identification {
    pub fn is_threshold(&self) -> bool {
        matches!(self, Identification::Accepted(_))
    }

    pub fn linear_form(&self) -> Option<&LinearForm> {
        match self {
            Identification::Accepted(form) => Some(form),
            Identification::Rejected => None,
        }
    }

    pub fn into_linear_form(self) -> Option<LinearForm> {
        match self {
            Identification::Accepted(form) => Some(form),
            Identification::Rejected => None,
        }
    }
}

impl From<Result<LinearForm, Rejection>> for Identification {
    fn from(result: Result<LinearForm, Rejection>) -> Self {
        match result {
            Ok(form) => Identification::Accepted(form),
            Err(_) => Identification::Rejected,
        }
    }
}

/// Why a truth table was rejected.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Rejection {
    /// The function is not unate in `var`.
    Binate { var: usize },
    /// The function is unate, but no linear form exists.
    Infeasible,
    /// The solver failed, or returned an unusable solution.
    Solver(SolverError),
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::Binate { var } => write!(f, "Not a threshold function: variable x{} is binate", var),
            Rejection::Infeasible => write!(f, "Not a threshold function: no linear form exists"),
            Rejection::Solver(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for Rejection {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Rejection::Solver(err) => Some(err),
            _ => None,
        }
    }
}

impl From<Binate> for Rejection {
    fn from(binate: Binate) -> Self {
        Rejection::Binate { var: binate.var }
    }
}

impl From<SolverError> for Rejection {
    fn from(err: SolverError) -> Self {
        Rejection::Solver(err)
    }
}

/// Options for [`Identifier`].
#[derive(Debug, Clone)]
pub struct IdentifierConfig {
    /// Passed to [`Model::set_time_limit`] when set.
    pub time_limit: Option<Duration>,
    /// Check the linear form against the input table before accepting it.
    pub verify: bool,
}

impl Default for IdentifierConfig {
    fn default() -> Self {
        Self {
            time_limit: None,
            verify: true,
        }
    }
}

impl IdentifierConfig {
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    pub fn with_verify(mut self, verify: bool) -> Self {
        self.verify = verify;
        self
    }
}

/// Threshold function identification over a pluggable [`Solver`].
#[derive(Debug, Clone, Default)]
pub struct Identifier<S = MicroLpSolver> {
    solver: S,
    config: IdentifierConfig,
}

impl<S: Solver> Identifier<S> {
    pub fn new(solver: S) -> Self {
        Self::with_config(solver, IdentifierConfig::default())
    }

    pub fn with_config(solver: S, config: IdentifierConfig) -> Self {
        Self { solver, config }
    }

    pub fn solver(&self) -> &S {
        &self.solver
    }

    pub fn config(&self) -> &IdentifierConfig {
        &self.config
    }

    /// Decides whether `tt` is a threshold function.
    pub fn identify(&self, tt: &TruthTable) -> Identification {
        self.classify(tt).into()
    }

    /// Like [`Identifier::identify`], but reports why a table was rejected.
    pub fn classify(&self, tt: &TruthTable) -> Result<LinearForm, Rejection> {
        debug!("identifying {:?}", tt);

        let Unate { flips, monotone } = unate::analyze(tt)?;
        debug!("flips = {}, monotone = {}", flips, monotone);

        let raw = {
            let mut model = self.solver.create_model(tt.num_vars() + 1);
            if let Some(limit) = self.config.time_limit {
                model.set_time_limit(limit);
            }
            model::build(&monotone, &mut model)?;

            match model.solve() {
                SolveOutcome::Optimal(raw) => raw,
                SolveOutcome::Infeasible => {
                    debug!("{} is unate but not a threshold function", tt);
                    return Err(Rejection::Infeasible);
                }
                SolveOutcome::Error(reason) => {
                    debug!("solver failed on {}: {}", tt, reason);
                    return Err(Rejection::Solver(SolverError::new(reason)));
                }
            }
        };
        debug!("raw solution = {:?}", raw);

        let form = LinearForm::from_solution(&raw, &flips)?;
        if self.config.verify && !form.realizes(tt) {
            warn!("solver returned {}, which does not realize {}", form, tt);
            return Err(Rejection::Solver(SolverError::new(format!(
                "linear form {} does not realize {}",
                form, tt
            ))));
        }

        debug!("{} is a threshold function: {}", tt, form);
        Ok(form)
    }
}

/// Decides whether `tt` is a threshold function using the default solver.
///
/// ```
/// use threshold_rs::identify::identify;
/// use threshold_rs::truth_table::TruthTable;
///
/// let and = TruthTable::from_fn(2, |x| x[0] && x[1]);
/// let form = identify(&and).into_linear_form().unwrap();
/// assert_eq!(form.as_slice(), &[1, 1, 2]);
///
/// let xor = TruthTable::from_fn(2, |x| x[0] ^ x[1]);
/// assert!(!identify(&xor).is_threshold());
/// ```
pub fn identify(tt: &TruthTable) -> Identification {
    Identifier::new(MicroLpSolver).identify(tt)
}
