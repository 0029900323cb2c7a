//! Truth table representation for completely specified Boolean functions.
//!
//! A Boolean function f: {0,1}ⁿ → {0,1} is stored as a vector of 2ⁿ bits packed
//! into `u64` words. Bit `b` holds the value of f at the assignment whose j-th
//! bit is xⱼ, so x₀ is the least significant bit of the row index.
//!
//! # Example
//!
//! For n=2:
//! - Row 0 (binary 00): x₀=0, x₁=0
//! - Row 1 (binary 01): x₀=1, x₁=0
//! - Row 2 (binary 10): x₀=0, x₁=1
//! - Row 3 (binary 11): x₀=1, x₁=1

use std::fmt;

use num_bigint::BigUint;

/// Masks selecting the rows where variable `i < 6` is set, within one word.
const PROJECTIONS: [u64; 6] = [
    0xAAAA_AAAA_AAAA_AAAA,
    0xCCCC_CCCC_CCCC_CCCC,
    0xF0F0_F0F0_F0F0_F0F0,
    0xFF00_FF00_FF00_FF00,
    0xFFFF_0000_FFFF_0000,
    0xFFFF_FFFF_0000_0000,
];

/// Error returned when parsing a truth table from text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The input contains no digits.
    Empty,
    /// The input contains a character that is not a hexadecimal digit.
    InvalidDigit(String),
    /// The parsed value does not fit into the `2^num_vars` rows.
    TooManyBits { num_vars: usize, bits: u64 },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::Empty => write!(f, "Empty truth table"),
            ParseError::InvalidDigit(s) => write!(f, "Invalid hexadecimal truth table: {:?}", s),
            ParseError::TooManyBits { num_vars, bits } => write!(
                f,
                "Truth table has {} significant bits, but {} variables allow only {}",
                bits,
                num_vars,
                1u64 << num_vars
            ),
        }
    }
}

impl std::error::Error for ParseError {}

/// A truth table for a Boolean function on `n` variables.
///
/// Truth tables are immutable values: cofactors and flips return new tables.
///
/// # Invariants
///
/// - `words.len() == max(1, 2ⁿ / 64)`
/// - Bits beyond row `2ⁿ - 1` in the last word are always zero
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct TruthTable {
    /// Number of variables.
    num_vars: usize,
    /// Storage: each u64 holds 64 rows.
    words: Vec<u64>,
}

impl TruthTable {
    /// Largest supported number of variables.
    pub const MAX_VARS: usize = 32;

    const BITS_PER_WORD: usize = 64;

    fn num_words(num_vars: usize) -> usize {
        let num_bits = 1usize << num_vars;
        (num_bits + Self::BITS_PER_WORD - 1) / Self::BITS_PER_WORD
    }

    /// Mask of the valid bits in the last word.
    fn last_mask(&self) -> u64 {
        let num_bits = self.num_bits();
        if num_bits >= Self::BITS_PER_WORD {
            u64::MAX
        } else {
            (1u64 << num_bits) - 1
        }
    }

    fn with_words(num_vars: usize, words: Vec<u64>) -> Self {
        let mut tt = TruthTable { num_vars, words };
        tt.normalize();
        tt
    }

    /// Clears the unused high bits of a table with fewer than 6 variables.
    fn normalize(&mut self) {
        let mask = self.last_mask();
        if let Some(last) = self.words.last_mut() {
            *last &= mask;
        }
    }

    fn check_num_vars(num_vars: usize) {
        assert!(
            num_vars <= Self::MAX_VARS,
            "Truth tables support at most {} variables, got {}",
            Self::MAX_VARS,
            num_vars
        );
    }

    /// Creates the constant zero function.
    pub fn zero(num_vars: usize) -> Self {
        Self::check_num_vars(num_vars);
        TruthTable {
            num_vars,
            words: vec![0; Self::num_words(num_vars)],
        }
    }

    /// Creates the constant one function.
    pub fn one(num_vars: usize) -> Self {
        Self::check_num_vars(num_vars);
        Self::with_words(num_vars, vec![u64::MAX; Self::num_words(num_vars)])
    }

    /// Creates the projection function for variable `var` (0-indexed).
    pub fn nth_var(num_vars: usize, var: usize) -> Self {
        assert!(var < num_vars, "Variable x{} out of range for {}-variable function", var, num_vars);
        TruthTable::from_fn(num_vars, move |x| x[var])
    }

    /// Creates a truth table by evaluating `f` on every assignment.
    ///
    /// The closure receives `[x₀, x₁, ..., xₙ₋₁]`.
    ///
    /// ```
    /// use threshold_rs::truth_table::TruthTable;
    ///
    /// // f = x₀ ∧ x₁
    /// let f = TruthTable::from_fn(2, |x| x[0] && x[1]);
    /// assert!(f.get_bit(3));
    /// assert!(!f.get_bit(1));
    /// ```
    pub fn from_fn(num_vars: usize, f: impl Fn(&[bool]) -> bool) -> Self {
        let mut tt = Self::zero(num_vars);
        let mut assignment = vec![false; num_vars];
        for row in 0..tt.num_bits() {
            for (j, val) in assignment.iter_mut().enumerate() {
                *val = (row >> j) & 1 == 1;
            }
            if f(&assignment) {
                tt.set_bit(row);
            }
        }
        tt
    }

    /// Creates a truth table from row values, row 0 first.
    ///
    /// # Panics
    ///
    /// Panics if the iterator does not yield exactly `2^num_vars` values.
    pub fn from_bits(num_vars: usize, bits: impl IntoIterator<Item = bool>) -> Self {
        let mut tt = Self::zero(num_vars);
        let mut count = 0;
        for (row, bit) in bits.into_iter().enumerate() {
            assert!(row < tt.num_bits(), "Too many bits for {} variables", num_vars);
            if bit {
                tt.set_bit(row);
            }
            count += 1;
        }
        assert_eq!(count, tt.num_bits(), "Expected {} bits for {} variables, got {}", tt.num_bits(), num_vars, count);
        tt
    }

    /// Parses a hexadecimal truth table, most significant row first.
    ///
    /// An optional `0x` prefix is accepted. Shorter inputs are zero-extended.
    ///
    /// ```
    /// use threshold_rs::truth_table::TruthTable;
    ///
    /// let maj = TruthTable::from_hex(3, "e8").unwrap();
    /// assert_eq!(maj, TruthTable::from_fn(3, |x| x.iter().filter(|&&b| b).count() >= 2));
    /// ```
    pub fn from_hex(num_vars: usize, text: &str) -> Result<Self, ParseError> {
        Self::check_num_vars(num_vars);
        let digits = text.trim();
        let digits = digits
            .strip_prefix("0x")
            .or_else(|| digits.strip_prefix("0X"))
            .unwrap_or(digits);
        if digits.is_empty() {
            return Err(ParseError::Empty);
        }
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ParseError::InvalidDigit(text.to_string()));
        }
        let value = BigUint::parse_bytes(digits.as_bytes(), 16).ok_or_else(|| ParseError::InvalidDigit(text.to_string()))?;
        let bits = value.bits();
        if bits > (1u64 << num_vars) {
            return Err(ParseError::TooManyBits { num_vars, bits });
        }

        let mut words = value.to_u64_digits();
        words.resize(Self::num_words(num_vars), 0);
        Ok(Self::with_words(num_vars, words))
    }

    /// Formats the table as hexadecimal, most significant row first.
    ///
    /// The result is zero-padded to one digit per four rows (at least one digit).
    pub fn to_hex(&self) -> String {
        let bytes: Vec<u8> = self.words.iter().flat_map(|w| w.to_le_bytes()).collect();
        let value = BigUint::from_bytes_le(&bytes);
        let width = (self.num_bits() / 4).max(1);
        format!("{:0width$x}", value, width = width)
    }

    /// Returns the number of variables.
    pub fn num_vars(&self) -> usize {
        self.num_vars
    }

    /// Returns the number of rows (2ⁿ).
    pub fn num_bits(&self) -> usize {
        1 << self.num_vars
    }

    /// Gets the word index and bit position for a given row.
    #[inline]
    fn word_and_bit(row: usize) -> (usize, usize) {
        (row / Self::BITS_PER_WORD, row % Self::BITS_PER_WORD)
    }

    /// Returns the function value at the given row.
    #[inline]
    pub fn get_bit(&self, row: usize) -> bool {
        assert!(row < self.num_bits(), "Row {} out of range for {}-variable function", row, self.num_vars);
        let (word_idx, bit_idx) = Self::word_and_bit(row);
        (self.words[word_idx] >> bit_idx) & 1 == 1
    }

    fn set_bit(&mut self, row: usize) {
        let (word_idx, bit_idx) = Self::word_and_bit(row);
        self.words[word_idx] |= 1u64 << bit_idx;
    }

    /// Returns the number of rows where the function is true.
    pub fn count_ones(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Checks if this is the constant zero function.
    pub fn is_const0(&self) -> bool {
        self.words.iter().all(|&w| w == 0)
    }

    /// Checks if this is the constant one function.
    pub fn is_const1(&self) -> bool {
        self.count_ones() == self.num_bits()
    }

    fn check_var(&self, var: usize) {
        assert!(var < self.num_vars, "Variable x{} out of range for {}-variable function", var, self.num_vars);
    }

    /// Applies `in_word` to every word (for variables inside a word), or
    /// `across` to every pair of (x=0, x=1) word blocks otherwise.
    fn map_var(&self, var: usize, in_word: impl Fn(u64, u64, u32) -> u64, across: impl Fn(&mut [u64], &mut [u64])) -> Self {
        self.check_var(var);
        let mut words = self.words.clone();
        if var < 6 {
            let shift = 1u32 << var;
            for w in words.iter_mut() {
                *w = in_word(*w, PROJECTIONS[var], shift);
            }
        } else {
            let step = 1usize << (var - 6);
            for block in words.chunks_mut(2 * step) {
                let (lo, hi) = block.split_at_mut(step);
                across(lo, hi);
            }
        }
        Self::with_words(self.num_vars, words)
    }

    /// Negative cofactor: f with `var` fixed to 0, over the same n variables.
    pub fn cofactor0(&self, var: usize) -> Self {
        self.map_var(
            var,
            |w, mask, shift| (w & !mask) | ((w & !mask) << shift),
            |lo, hi| hi.copy_from_slice(lo),
        )
    }

    /// Positive cofactor: f with `var` fixed to 1, over the same n variables.
    pub fn cofactor1(&self, var: usize) -> Self {
        self.map_var(
            var,
            |w, mask, shift| (w & mask) | ((w & mask) >> shift),
            |lo, hi| lo.copy_from_slice(hi),
        )
    }

    /// Complements variable `var`, i.e. returns `f(.., ¬x_var, ..)`.
    pub fn flip(&self, var: usize) -> Self {
        self.map_var(
            var,
            |w, mask, shift| ((w & mask) >> shift) | ((w & !mask) << shift),
            |lo, hi| lo.swap_with_slice(hi),
        )
    }

    /// Checks whether `self` implies `other`: every row set here is set there.
    ///
    /// # Panics
    ///
    /// Panics if the tables have different numbers of variables.
    pub fn implies(&self, other: &Self) -> bool {
        assert_eq!(self.num_vars, other.num_vars, "Variable count mismatch");
        self.words.iter().zip(&other.words).all(|(&a, &b)| a & !b == 0)
    }

    /// Checks whether f is monotone non-decreasing in `var`.
    pub fn is_positive_unate(&self, var: usize) -> bool {
        self.cofactor0(var).implies(&self.cofactor1(var))
    }

    /// Checks whether f is monotone non-increasing in `var`.
    pub fn is_negative_unate(&self, var: usize) -> bool {
        self.cofactor1(var).implies(&self.cofactor0(var))
    }
}

impl fmt::Display for TruthTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Debug for TruthTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TruthTable(n={}, 0x{})", self.num_vars, self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use test_log::test;

    fn majority3() -> TruthTable {
        TruthTable::from_fn(3, |x| x.iter().filter(|&&b| b).count() >= 2)
    }

    #[test]
    fn test_constants() {
        let zero = TruthTable::zero(3);
        let one = TruthTable::one(3);

        assert!(zero.is_const0());
        assert!(!zero.is_const1());
        assert!(one.is_const1());
        assert!(!one.is_const0());
        assert_eq!(one.count_ones(), 8);
        assert_eq!(one.to_hex(), "ff");
    }

    #[test]
    fn test_zero_vars() {
        let zero = TruthTable::zero(0);
        let one = TruthTable::one(0);

        assert_eq!(one.num_bits(), 1);
        assert!(one.get_bit(0));
        assert!(!zero.get_bit(0));
        assert_eq!(one.to_hex(), "1");
        assert_eq!(zero.to_hex(), "0");
    }

    #[test]
    fn test_from_fn_row_order() {
        let f = TruthTable::from_fn(2, |x| x[0] && !x[1]);
        assert!(!f.get_bit(0));
        assert!(f.get_bit(1));
        assert!(!f.get_bit(2));
        assert!(!f.get_bit(3));
        assert_eq!(f.to_hex(), "2");
    }

    #[test]
    fn test_hex() {
        assert_eq!(majority3().to_hex(), "e8");
        assert_eq!(TruthTable::from_hex(3, "e8").unwrap(), majority3());
        assert_eq!(TruthTable::from_hex(3, "0xE8").unwrap(), majority3());
        assert_eq!(TruthTable::from_hex(4, "1").unwrap().to_hex(), "0001");
        assert_eq!(format!("{}", TruthTable::nth_var(2, 1)), "c");
    }

    #[test]
    fn test_hex_wide() {
        let f = TruthTable::from_fn(7, |x| x[6] && x[0]);
        let text = f.to_hex();
        assert_eq!(text.len(), 32);
        assert_eq!(TruthTable::from_hex(7, &text).unwrap(), f);
    }

    #[test]
    fn test_hex_errors() {
        assert_eq!(TruthTable::from_hex(2, ""), Err(ParseError::Empty));
        assert!(matches!(TruthTable::from_hex(2, "xyz"), Err(ParseError::InvalidDigit(_))));
        assert_eq!(
            TruthTable::from_hex(2, "1f"),
            Err(ParseError::TooManyBits { num_vars: 2, bits: 5 })
        );
    }

    #[test]
    fn test_from_bits() {
        let f = TruthTable::from_bits(2, [false, false, false, true]);
        assert_eq!(f, TruthTable::from_fn(2, |x| x[0] && x[1]));
    }

    #[test]
    #[should_panic(expected = "Expected 4 bits for 2 variables")]
    fn test_from_bits_too_few() {
        TruthTable::from_bits(2, [true, false]);
    }

    #[test]
    fn test_cofactors_small() {
        let f = TruthTable::from_fn(2, |x| x[0] && x[1]);

        // f|x₀=0 = 0
        assert!(f.cofactor0(0).is_const0());
        // f|x₀=1 = x₁
        assert_eq!(f.cofactor1(0), TruthTable::nth_var(2, 1));
        assert_eq!(f.cofactor1(1), TruthTable::nth_var(2, 0));
    }

    #[test]
    fn test_cofactors_match_definition() {
        let f = TruthTable::from_fn(8, |x| (x[0] ^ x[7]) || (x[3] && !x[6]));
        for var in 0..8 {
            let f0 = f.cofactor0(var);
            let f1 = f.cofactor1(var);
            for row in 0..f.num_bits() {
                assert_eq!(f0.get_bit(row), f.get_bit(row & !(1 << var)), "cofactor0(x{}) at row {}", var, row);
                assert_eq!(f1.get_bit(row), f.get_bit(row | (1 << var)), "cofactor1(x{}) at row {}", var, row);
            }
        }
    }

    #[test]
    fn test_flip_matches_definition() {
        let f = TruthTable::from_fn(7, |x| x[0] && (x[2] || !x[6]) && !x[5]);
        for var in 0..7 {
            let g = f.flip(var);
            for row in 0..f.num_bits() {
                assert_eq!(g.get_bit(row), f.get_bit(row ^ (1 << var)), "flip(x{}) at row {}", var, row);
            }
            assert_eq!(g.flip(var), f);
        }
    }

    #[test]
    fn test_implies() {
        let and = TruthTable::from_fn(2, |x| x[0] && x[1]);
        let or = TruthTable::from_fn(2, |x| x[0] || x[1]);

        assert!(and.implies(&or));
        assert!(!or.implies(&and));
        assert!(TruthTable::zero(2).implies(&and));
        assert!(and.implies(&TruthTable::one(2)));
    }

    #[test]
    fn test_unate_helpers() {
        let f = TruthTable::from_fn(2, |x| x[0] && !x[1]);
        assert!(f.is_positive_unate(0));
        assert!(!f.is_negative_unate(0));
        assert!(f.is_negative_unate(1));
        assert!(!f.is_positive_unate(1));

        let xor = TruthTable::from_fn(2, |x| x[0] ^ x[1]);
        assert!(!xor.is_positive_unate(0));
        assert!(!xor.is_negative_unate(0));
    }

    #[test]
    fn test_debug() {
        assert_eq!(format!("{:?}", majority3()), "TruthTable(n=3, 0xe8)");
    }
}
