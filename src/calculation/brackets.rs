//! Bracket table evaluation.
//!
//! Two lookups are used across the engine: a progressive evaluation, where
//! each bracket's rate applies to the slice of income inside it (income tax),
//! and a band lookup, where the single bracket containing the income supplies
//! the rate for the whole base (childcare credit).

use rust_decimal::Decimal;

use crate::config::Bracket;

/// Evaluates a progressive bracket table.
///
/// Brackets are visited in order; each contributes `rate × (min(income, max) − min)`
/// for the income inside it. Evaluation stops once income is exhausted. The
/// last bracket's `max` is `None` and treated as unbounded.
///
/// # Examples
///
/// ```
/// use disposable_income_engine::calculation::progressive_tax;
/// use disposable_income_engine::config::Bracket;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let d = |s: &str| Decimal::from_str(s).unwrap();
/// let brackets = vec![
///     Bracket { min: d("0"), max: Some(d("100")), rate: d("0.10") },
///     Bracket { min: d("100"), max: None, rate: d("0.20") },
/// ];
/// assert_eq!(progressive_tax(d("150"), &brackets), d("20.00"));
/// ```
pub fn progressive_tax(income: Decimal, brackets: &[Bracket]) -> Decimal {
    let mut tax = Decimal::ZERO;
    for bracket in brackets {
        if income <= bracket.min {
            break;
        }
        let top = bracket.max.map_or(income, |max| income.min(max));
        tax += bracket.rate * (top - bracket.min);
    }
    tax
}

/// Returns the rate of the band containing `income`, if any.
pub fn band_rate(income: Decimal, brackets: &[Bracket]) -> Option<Decimal> {
    brackets.iter().find(|b| b.contains(income)).map(|b| b.rate)
}

/// Returns the rate of the band containing `income`.
pub fn marginal_rate(income: Decimal, brackets: &[Bracket]) -> Decimal {
    band_rate(income, brackets).unwrap_or(Decimal::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigLoader;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn quebec_2024() -> Vec<Bracket> {
        ConfigLoader::embedded_year(2024).unwrap().quebec_tax.brackets
    }

    #[test]
    fn test_zero_income_pays_nothing() {
        assert_eq!(progressive_tax(Decimal::ZERO, &quebec_2024()), Decimal::ZERO);
    }

    #[test]
    fn test_income_inside_first_bracket() {
        assert_eq!(progressive_tax(dec("10000"), &quebec_2024()), dec("1400.00"));
    }

    #[test]
    fn test_income_at_first_boundary() {
        // 51780 × 0.14
        assert_eq!(progressive_tax(dec("51780"), &quebec_2024()), dec("7249.20"));
    }

    #[test]
    fn test_income_spanning_three_brackets() {
        // 7249.20 + 51765 × 0.19 + 6455 × 0.24
        let tax = progressive_tax(dec("110000"), &quebec_2024());
        assert_eq!(tax, dec("18633.75"));
    }

    #[test]
    fn test_income_in_unbounded_bracket() {
        // 7249.20 + 9835.35 + 22455 × 0.24 + 74000 × 0.2575
        let tax = progressive_tax(dec("200000"), &quebec_2024());
        assert_eq!(tax, dec("41528.75"));
    }

    #[test]
    fn test_tax_is_continuous_across_boundaries() {
        let brackets = quebec_2024();
        let cent = dec("0.01");
        for bracket in &brackets {
            if let Some(max) = bracket.max {
                let below = progressive_tax(max - cent, &brackets);
                let at = progressive_tax(max, &brackets);
                let above = progressive_tax(max + cent, &brackets);
                assert!(at - below <= cent);
                assert!(above - at <= cent);
            }
        }
    }

    #[test]
    fn test_band_rate_lookup() {
        let schedule = ConfigLoader::embedded_year(2024)
            .unwrap()
            .childcare_credit
            .rate_schedule;
        assert_eq!(band_rate(Decimal::ZERO, &schedule), Some(dec("0.78")));
        assert_eq!(band_rate(dec("24355"), &schedule), Some(dec("0.78")));
        assert_eq!(band_rate(dec("24355.01"), &schedule), Some(dec("0.75")));
        assert_eq!(band_rate(dec("500000"), &schedule), Some(dec("0.67")));
    }

    #[test]
    fn test_marginal_rate() {
        let brackets = quebec_2024();
        assert_eq!(marginal_rate(dec("50000"), &brackets), dec("0.14"));
        assert_eq!(marginal_rate(dec("60000"), &brackets), dec("0.19"));
        assert_eq!(marginal_rate(dec("130000"), &brackets), dec("0.2575"));
    }
}
