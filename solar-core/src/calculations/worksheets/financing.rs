//! Loan financing worksheet.
//!
//! Estimates monthly payments for the four financing scenarios shown on
//! the proposal: 15- and 20-year terms, each with and without the federal
//! tax credit applied to the balance. The with-credit scenarios finance
//! 70% of the net customer cost over a term shortened by two years,
//! approximating the forced early payoff once the credit is received.

use rust_decimal::{Decimal, MathematicalOps};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::calculations::common::round_half_up;
use crate::models::{PricingConfig, PricingConfigError};

/// One financing scenario and its estimated payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanScenario {
    pub principal: Decimal,
    /// Annual interest rate, in percent (8.5 = 8.5%).
    pub annual_rate: Decimal,
    pub term_years: u32,
    pub monthly_payment: Decimal,
}

/// Result of the financing worksheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinancingResult {
    pub with_credit_short: LoanScenario,
    pub with_credit_long: LoanScenario,
    pub without_credit_short: LoanScenario,
    pub without_credit_long: LoanScenario,
}

/// Monthly payment on a standard amortizing loan.
///
/// `annual_rate` is in percent. A zero rate degrades to the straight-line
/// payment `principal / months`; a non-positive principal or zero term
/// yields zero.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use solar_core::calculations::monthly_payment;
///
/// assert_eq!(monthly_payment(dec!(20000), dec!(8.5), 15), dec!(196.95));
/// ```
pub fn monthly_payment(
    principal: Decimal,
    annual_rate: Decimal,
    term_years: u32,
) -> Decimal {
    if principal <= Decimal::ZERO || term_years == 0 {
        warn!(%principal, term_years, "degenerate loan; payment reported as zero");
        return Decimal::ZERO;
    }

    let months = term_years * 12;
    let monthly_rate = annual_rate / dec!(100) / dec!(12);

    if monthly_rate <= Decimal::ZERO {
        if monthly_rate < Decimal::ZERO {
            warn!(%annual_rate, "negative loan rate treated as zero");
        }
        return round_half_up(principal / Decimal::from(months));
    }

    let growth = (Decimal::ONE + monthly_rate).powi(i64::from(months));
    let payment = principal * (monthly_rate + monthly_rate / (growth - Decimal::ONE));
    round_half_up(payment)
}

/// Calculator for the financing worksheet.
#[derive(Debug, Clone)]
pub struct FinancingWorksheet {
    config: PricingConfig,
}

impl FinancingWorksheet {
    pub fn new(config: PricingConfig) -> Self {
        Self { config }
    }

    /// Builds the four financing scenarios.
    ///
    /// `net_customer_cost` is the project cost after the tax credit;
    /// `net_cost_after_deposit` additionally subtracts the deposit and is
    /// the balance financed when the credit is not applied to the loan.
    pub fn calculate(
        &self,
        net_customer_cost: Decimal,
        net_cost_after_deposit: Decimal,
        rate_short: Decimal,
        rate_long: Decimal,
    ) -> Result<FinancingResult, PricingConfigError> {
        self.config.validate()?;

        let credit_principal =
            round_half_up(net_customer_cost * self.config.itc_principal_factor);
        let short_reduced = self.config.term_short_years - self.config.itc_term_reduction_years;
        let long_reduced = self.config.term_long_years - self.config.itc_term_reduction_years;

        Ok(FinancingResult {
            with_credit_short: scenario(credit_principal, rate_short, short_reduced),
            with_credit_long: scenario(credit_principal, rate_long, long_reduced),
            without_credit_short: scenario(
                net_cost_after_deposit,
                rate_short,
                self.config.term_short_years,
            ),
            without_credit_long: scenario(
                net_cost_after_deposit,
                rate_long,
                self.config.term_long_years,
            ),
        })
    }
}

fn scenario(
    principal: Decimal,
    annual_rate: Decimal,
    term_years: u32,
) -> LoanScenario {
    LoanScenario {
        principal,
        annual_rate,
        term_years,
        monthly_payment: monthly_payment(principal, annual_rate, term_years),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    // =========================================================================
    // monthly_payment tests
    // =========================================================================

    #[test]
    fn payment_matches_the_amortization_formula() {
        assert_eq!(monthly_payment(dec!(20000), dec!(8.5), 15), dec!(196.95));
    }

    #[test]
    fn payment_for_the_reference_project_scenarios() {
        assert_eq!(monthly_payment(dec!(19054.87), dec!(8.5), 15), dec!(187.64));
        assert_eq!(monthly_payment(dec!(19054.87), dec!(9.5), 20), dec!(177.62));
    }

    #[test]
    fn zero_rate_degrades_to_straight_line() {
        assert_eq!(monthly_payment(dec!(12000), Decimal::ZERO, 10), dec!(100.00));
    }

    #[test]
    fn negative_rate_is_treated_as_zero() {
        assert_eq!(monthly_payment(dec!(12000), dec!(-1.0), 10), dec!(100.00));
    }

    #[test]
    fn zero_principal_yields_zero_payment() {
        assert_eq!(monthly_payment(Decimal::ZERO, dec!(8.5), 15), Decimal::ZERO);
    }

    #[test]
    fn zero_term_yields_zero_payment() {
        assert_eq!(monthly_payment(dec!(20000), dec!(8.5), 0), Decimal::ZERO);
    }

    // =========================================================================
    // FinancingWorksheet tests
    // =========================================================================

    fn worksheet() -> FinancingWorksheet {
        FinancingWorksheet::new(PricingConfig::default())
    }

    #[test]
    fn with_credit_scenarios_finance_70_percent_over_reduced_terms() {
        let result = worksheet()
            .calculate(dec!(19054.87), dec!(19054.87), dec!(8.5), dec!(9.5))
            .unwrap();

        assert_eq!(result.with_credit_short.principal, dec!(13338.41));
        assert_eq!(result.with_credit_short.term_years, 13);
        assert_eq!(result.with_credit_short.monthly_payment, dec!(141.54));

        assert_eq!(result.with_credit_long.principal, dec!(13338.41));
        assert_eq!(result.with_credit_long.term_years, 19);
        assert_eq!(result.with_credit_long.monthly_payment, dec!(126.56));
    }

    #[test]
    fn without_credit_scenarios_finance_the_full_net_cost() {
        let result = worksheet()
            .calculate(dec!(19054.87), dec!(19054.87), dec!(8.5), dec!(9.5))
            .unwrap();

        assert_eq!(result.without_credit_short.principal, dec!(19054.87));
        assert_eq!(result.without_credit_short.term_years, 15);
        assert_eq!(result.without_credit_short.monthly_payment, dec!(187.64));

        assert_eq!(result.without_credit_long.principal, dec!(19054.87));
        assert_eq!(result.without_credit_long.term_years, 20);
        assert_eq!(result.without_credit_long.monthly_payment, dec!(177.62));
    }

    #[test]
    fn deposit_lowers_only_the_without_credit_principal() {
        let result = worksheet()
            .calculate(dec!(19054.87), dec!(14054.87), dec!(8.5), dec!(9.5))
            .unwrap();

        assert_eq!(result.with_credit_short.principal, dec!(13338.41));
        assert_eq!(result.without_credit_short.principal, dec!(14054.87));
    }

    #[test]
    fn scenario_rates_follow_the_inputs() {
        let result = worksheet()
            .calculate(dec!(19054.87), dec!(19054.87), dec!(7.25), dec!(8.75))
            .unwrap();

        assert_eq!(result.with_credit_short.annual_rate, dec!(7.25));
        assert_eq!(result.without_credit_long.annual_rate, dec!(8.75));
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = PricingConfig {
            itc_principal_factor: Decimal::ZERO,
            ..Default::default()
        };
        let worksheet = FinancingWorksheet::new(config);

        let result = worksheet.calculate(dec!(19054.87), dec!(19054.87), dec!(8.5), dec!(9.5));

        assert_eq!(
            result,
            Err(PricingConfigError::InvalidPrincipalFactor(Decimal::ZERO))
        );
    }
}
