//! # threshold-rs: Threshold Logic Function Identification
//!
//! **`threshold-rs`** decides whether a completely specified Boolean function,
//! given as a truth table, is a **threshold function** (TF), and if so, finds
//! a linear form witnessing it.
//!
//! ## What is a threshold function?
//!
//! A Boolean function f(x₀, …, xₙ₋₁) is a threshold function if there are
//! integer weights wᵢ and an integer threshold T such that
//!
//! ```text
//! f(x) = 1  ⇔  Σ wᵢxᵢ ≥ T
//! ```
//!
//! The vector `[w₀, …, wₙ₋₁; T]` is called a **linear form** of f.
//! AND, OR and MAJORITY are threshold functions; XOR is not.
//!
//! ## How it works
//!
//! 1. **Unateness check** ([`unate`]): every TF is monotone in each variable.
//!    Variables in which f is decreasing are complemented; a variable in which f
//!    is neither increasing nor decreasing (binate) rejects f immediately.
//! 2. **ILP** ([`model`], [`ilp`]): each of the 2ⁿ rows of the now monotone
//!    table becomes a linear constraint on the weights and the threshold. The
//!    program is feasible iff the function is a TF.
//! 3. **Back-transformation** ([`linear_form`]): the complemented variables are
//!    undone in the solved weights and threshold.
//!
//! ## Basic Usage
//!
//! ```rust
//! use threshold_rs::identify::{identify, Identification};
//! use threshold_rs::truth_table::TruthTable;
//!
//! // MAJ(x₀, x₁, x₂)
//! let maj = TruthTable::from_hex(3, "e8").unwrap();
//!
//! match identify(&maj) {
//!     Identification::Accepted(form) => assert_eq!(form.as_slice(), &[1, 1, 1, 2]),
//!     Identification::Rejected => unreachable!("majority is a threshold function"),
//! }
//! ```
//!
//! ## Core Components
//!
//! - **[`truth_table`]**: Bit-packed truth tables with cofactors, flips and implication.
//! - **[`identify`]**: The entry point, [`identify::identify`], and the configurable [`identify::Identifier`].
//! - **[`ilp`]**: The solver interface. The default solver lives in [`microlp_backend`].
//!
//! The library logs through the [`log`] facade and installs no logger itself.

pub mod identify;
pub mod ilp;
pub mod linear_form;
pub mod microlp_backend;
pub mod model;
pub mod truth_table;
pub mod unate;
