//! Arithmetic shared by every program calculator.
//!
//! Amounts are rounded to the cent, half away from zero, once per program.
//! Income-tested programs share the "gross entitlement minus income-based
//! reduction" shape captured by [`phase_out`].

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Rounds an amount to the cent, half away from zero.
///
/// # Examples
///
/// ```
/// use disposable_income_engine::calculation::round_cents;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// assert_eq!(round_cents(Decimal::from_str("23.705").unwrap()), Decimal::from_str("23.71").unwrap());
/// assert_eq!(round_cents(Decimal::from_str("10.004").unwrap()), Decimal::from_str("10.00").unwrap());
/// ```
pub fn round_cents(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Returns `amount` floored at zero.
pub fn non_negative(amount: Decimal) -> Decimal {
    amount.max(Decimal::ZERO)
}

/// Returns the portion of `income` above `threshold`, never negative.
pub fn excess_over(income: Decimal, threshold: Decimal) -> Decimal {
    non_negative(income - threshold)
}

/// Income-based reduction: `rate × (income − threshold)` when positive.
pub fn phase_out(income: Decimal, threshold: Decimal, rate: Decimal) -> Decimal {
    rate * excess_over(income, threshold)
}

/// Where a household sits on a phased program's schedule.
///
/// Programs that grow with work income before being reduced with family
/// income report the phase their final amount was computed in. Being in
/// [`ProgramPhase::Ineligible`] or [`ProgramPhase::Zero`] is a valid outcome,
/// not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgramPhase {
    /// The household does not meet the program's conditions.
    Ineligible,
    /// The amount is still growing with income.
    Growth,
    /// The amount is at its maximum and not reduced.
    Maximum,
    /// The amount is being reduced by income.
    Reduction,
    /// The reduction has consumed the whole entitlement.
    Zero,
}

impl ProgramPhase {
    /// Classifies a phased program from its grown amount, its maximum, the
    /// reduction applied and the final amount.
    pub fn classify(grown: Decimal, maximum: Decimal, reduction: Decimal, amount: Decimal) -> Self {
        if amount <= Decimal::ZERO {
            ProgramPhase::Zero
        } else if reduction > Decimal::ZERO {
            ProgramPhase::Reduction
        } else if grown < maximum {
            ProgramPhase::Growth
        } else {
            ProgramPhase::Maximum
        }
    }
}

/// A typed outcome for programs that phase in with work income and phase out
/// with family income.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhasedBenefitResult {
    /// Phase the final amount was computed in.
    pub phase: ProgramPhase,
    /// Amount reached by the growth phase, capped at the maximum.
    pub gross: Decimal,
    /// Income-based reduction applied.
    pub reduction: Decimal,
    /// Final amount.
    pub amount: Decimal,
}

impl PhasedBenefitResult {
    /// An ineligible outcome with every amount at zero.
    pub fn ineligible() -> Self {
        Self {
            phase: ProgramPhase::Ineligible,
            gross: Decimal::ZERO,
            reduction: Decimal::ZERO,
            amount: Decimal::ZERO,
        }
    }

    /// Grows `rate × (work_income − start)` up to `maximum`, then subtracts
    /// `reduction`.
    pub(crate) fn grow_then_reduce(
        work_income: Decimal,
        start: Decimal,
        rate: Decimal,
        maximum: Decimal,
        reduction: Decimal,
    ) -> Self {
        if work_income <= start {
            return Self::ineligible();
        }
        let grown = (rate * (work_income - start)).min(maximum);
        let amount = round_cents(non_negative(grown - reduction));
        Self {
            phase: ProgramPhase::classify(grown, maximum, reduction, amount),
            gross: round_cents(grown),
            reduction: round_cents(reduction),
            amount,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_round_cents_half_away_from_zero() {
        assert_eq!(round_cents(dec("0.005")), dec("0.01"));
        assert_eq!(round_cents(dec("0.0049")), dec("0.00"));
        assert_eq!(round_cents(dec("-0.005")), dec("-0.01"));
        assert_eq!(round_cents(dec("4160")), dec("4160"));
    }

    #[test]
    fn test_phase_out_below_threshold_is_zero() {
        assert_eq!(phase_out(dec("1000"), dec("2000"), dec("0.05")), Decimal::ZERO);
        assert_eq!(phase_out(dec("2000"), dec("2000"), dec("0.05")), Decimal::ZERO);
        assert_eq!(phase_out(dec("3000"), dec("2000"), dec("0.05")), dec("50"));
    }

    #[test]
    fn test_classify_phases() {
        let max = dec("100");
        assert_eq!(
            ProgramPhase::classify(dec("50"), max, Decimal::ZERO, dec("50")),
            ProgramPhase::Growth
        );
        assert_eq!(
            ProgramPhase::classify(max, max, Decimal::ZERO, max),
            ProgramPhase::Maximum
        );
        assert_eq!(
            ProgramPhase::classify(max, max, dec("10"), dec("90")),
            ProgramPhase::Reduction
        );
        assert_eq!(
            ProgramPhase::classify(max, max, dec("150"), Decimal::ZERO),
            ProgramPhase::Zero
        );
    }

    #[test]
    fn test_grow_then_reduce_walks_every_phase() {
        let run = |work: &str, reduction: &str| {
            PhasedBenefitResult::grow_then_reduce(
                dec(work),
                dec("2400"),
                dec("0.09"),
                dec("1058.40"),
                dec(reduction),
            )
        };

        assert_eq!(run("2400", "0").phase, ProgramPhase::Ineligible);

        let growth = run("7400", "0");
        assert_eq!(growth.phase, ProgramPhase::Growth);
        assert_eq!(growth.amount, dec("450.00"));

        let maximum = run("14160", "0");
        assert_eq!(maximum.phase, ProgramPhase::Maximum);
        assert_eq!(maximum.amount, dec("1058.40"));

        let reduced = run("16160", "200");
        assert_eq!(reduced.phase, ProgramPhase::Reduction);
        assert_eq!(reduced.amount, dec("858.40"));

        let zero = run("30000", "2000");
        assert_eq!(zero.phase, ProgramPhase::Zero);
        assert_eq!(zero.amount, Decimal::ZERO);
    }

    #[test]
    fn test_phase_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&ProgramPhase::Ineligible).unwrap(),
            "\"ineligible\""
        );
    }
}
