//! Explicit rounding direction for arithmetic operations.

/// Rounding direction for division.
///
/// Every division in the engine takes an explicit `Rounding` so that the
/// direction always favours the pool: outputs round down and required
/// inputs round up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rounding {
    /// Round towards positive infinity (ceiling).
    Up,
    /// Round towards zero (floor).
    Down,
}
