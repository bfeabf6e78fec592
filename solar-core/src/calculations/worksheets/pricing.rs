//! Project pricing worksheet.
//!
//! Derives the customer-facing figures from the array size and the fixed
//! project cost: tiered $/watt pricing, federal tax credit, net customer
//! cost, sales commission, and the margin above fixed job costs.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::calculations::common::round_half_up;
use crate::models::{PricingConfig, PricingConfigError};

/// Result of the pricing worksheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingResult {
    /// The $/watt rate the project was priced at (tier default or the
    /// user's override).
    pub per_watt_rate: Decimal,

    /// Output watts × $/watt: the gross system cost to the customer.
    pub total_project_cost: Decimal,

    /// Total project cost back over output watts; zero for a zero-watt
    /// array.
    pub actual_cost_per_watt: Decimal,

    /// Sales commission on the total project cost.
    pub sales_commission: Decimal,

    /// Federal Investment Tax Credit.
    pub federal_tax_credit: Decimal,

    /// Total project cost less the tax credit.
    pub net_customer_cost: Decimal,

    /// Net customer cost less the deposit.
    pub net_cost_after_deposit: Decimal,

    /// Margin above fixed job costs:
    /// margin factor × total project cost − grand total.
    pub margin: Decimal,

    /// Margin over the grand total, in percent. `None` when the grand
    /// total is zero (reported as N/A, not 0%).
    pub margin_pct: Option<Decimal>,
}

/// Calculator for the pricing worksheet.
#[derive(Debug, Clone)]
pub struct PricingWorksheet {
    config: PricingConfig,
}

impl PricingWorksheet {
    pub fn new(config: PricingConfig) -> Self {
        Self { config }
    }

    /// The default $/watt rate for an array: the ground-mount rate, or the
    /// wattage-bracket tier for roof mounts.
    pub fn default_per_watt_rate(
        &self,
        output_watts: Decimal,
        ground_mount: bool,
    ) -> Decimal {
        if ground_mount {
            self.config.ground_mount_rate
        } else if output_watts < self.config.tier1_max_watts {
            self.config.tier1_rate
        } else if output_watts < self.config.tier2_max_watts {
            self.config.tier2_rate
        } else {
            self.config.tier3_rate
        }
    }

    /// Runs the pricing worksheet.
    ///
    /// `per_watt_override` replaces the tier default when the rate was
    /// edited on the form; `grand_total` is the fixed project cost from
    /// the itemized worksheet.
    pub fn calculate(
        &self,
        output_watts: Decimal,
        grand_total: Decimal,
        ground_mount: bool,
        per_watt_override: Option<Decimal>,
        deposit: Decimal,
    ) -> Result<PricingResult, PricingConfigError> {
        self.config.validate()?;

        let per_watt_rate =
            per_watt_override.unwrap_or_else(|| self.default_per_watt_rate(output_watts, ground_mount));

        let total_project_cost = round_half_up(output_watts * per_watt_rate);
        let actual_cost_per_watt = self.actual_cost_per_watt(total_project_cost, output_watts);
        let sales_commission = round_half_up(total_project_cost * self.config.commission_rate);
        let federal_tax_credit = round_half_up(total_project_cost * self.config.itc_rate);
        let net_customer_cost = round_half_up(total_project_cost - federal_tax_credit);
        let net_cost_after_deposit = round_half_up(net_customer_cost - deposit);
        let margin = round_half_up(total_project_cost * self.config.margin_factor - grand_total);
        let margin_pct = self.margin_pct(margin, grand_total);

        Ok(PricingResult {
            per_watt_rate,
            total_project_cost,
            actual_cost_per_watt,
            sales_commission,
            federal_tax_credit,
            net_customer_cost,
            net_cost_after_deposit,
            margin,
            margin_pct,
        })
    }

    fn actual_cost_per_watt(
        &self,
        total_project_cost: Decimal,
        output_watts: Decimal,
    ) -> Decimal {
        if output_watts <= Decimal::ZERO {
            warn!(%output_watts, "zero-watt array; cost per watt reported as zero");
            return Decimal::ZERO;
        }
        round_half_up(total_project_cost / output_watts)
    }

    fn margin_pct(
        &self,
        margin: Decimal,
        grand_total: Decimal,
    ) -> Option<Decimal> {
        if grand_total == Decimal::ZERO {
            warn!("grand total is zero; margin percentage undefined");
            return None;
        }
        Some(round_half_up(margin / grand_total * Decimal::ONE_HUNDRED))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn worksheet() -> PricingWorksheet {
        PricingWorksheet::new(PricingConfig::default())
    }

    // =========================================================================
    // default_per_watt_rate tests
    // =========================================================================

    #[test]
    fn tier_one_below_12kw() {
        assert_eq!(worksheet().default_per_watt_rate(dec!(8925), false), dec!(3.05));
    }

    #[test]
    fn tier_two_from_12kw_to_18kw() {
        let ws = worksheet();

        assert_eq!(ws.default_per_watt_rate(dec!(12000), false), dec!(2.98));
        assert_eq!(ws.default_per_watt_rate(dec!(17999), false), dec!(2.98));
    }

    #[test]
    fn tier_three_at_18kw_and_above() {
        assert_eq!(worksheet().default_per_watt_rate(dec!(18000), false), dec!(2.90));
    }

    #[test]
    fn ground_mount_rate_wins_regardless_of_size() {
        assert_eq!(worksheet().default_per_watt_rate(dec!(20000), true), dec!(1.40));
    }

    // =========================================================================
    // calculate tests
    // =========================================================================

    #[test]
    fn prices_the_reference_project() {
        let result = worksheet()
            .calculate(dec!(8925), dec!(20982.22), false, None, Decimal::ZERO)
            .unwrap();

        assert_eq!(result.per_watt_rate, dec!(3.05));
        assert_eq!(result.total_project_cost, dec!(27221.25));
        assert_eq!(result.actual_cost_per_watt, dec!(3.05));
        assert_eq!(result.sales_commission, dec!(3266.55));
        assert_eq!(result.federal_tax_credit, dec!(8166.38));
        assert_eq!(result.net_customer_cost, dec!(19054.87));
        assert_eq!(result.margin, dec!(4877.97));
        assert_eq!(result.margin_pct, Some(dec!(23.25)));
    }

    #[test]
    fn deposit_reduces_the_financed_cost_only() {
        let result = worksheet()
            .calculate(dec!(8925), dec!(20982.22), false, None, dec!(5000))
            .unwrap();

        assert_eq!(result.net_customer_cost, dec!(19054.87));
        assert_eq!(result.net_cost_after_deposit, dec!(14054.87));
    }

    #[test]
    fn per_watt_override_replaces_the_tier_default() {
        let result = worksheet()
            .calculate(dec!(8925), dec!(20982.22), false, Some(dec!(2.75)), Decimal::ZERO)
            .unwrap();

        assert_eq!(result.per_watt_rate, dec!(2.75));
        assert_eq!(result.total_project_cost, dec!(24543.75));
    }

    #[test]
    fn zero_watt_array_reports_zero_cost_per_watt() {
        let result = worksheet()
            .calculate(Decimal::ZERO, dec!(900.00), false, None, Decimal::ZERO)
            .unwrap();

        assert_eq!(result.total_project_cost, Decimal::ZERO);
        assert_eq!(result.actual_cost_per_watt, Decimal::ZERO);
    }

    #[test]
    fn zero_grand_total_reports_margin_pct_as_none() {
        let result = worksheet()
            .calculate(dec!(8925), Decimal::ZERO, false, None, Decimal::ZERO)
            .unwrap();

        assert_eq!(result.margin_pct, None);
        // The dollar margin is still defined.
        assert_eq!(result.margin, dec!(25860.19));
    }

    #[test]
    fn negative_margin_when_costs_exceed_the_price() {
        let result = worksheet()
            .calculate(dec!(1000), dec!(10000.00), false, None, Decimal::ZERO)
            .unwrap();

        // 0.95 × 3050 − 10000
        assert_eq!(result.margin, dec!(-7102.50));
        assert_eq!(result.margin_pct, Some(dec!(-71.03)));
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = PricingConfig {
            itc_rate: dec!(2.0),
            ..Default::default()
        };
        let worksheet = PricingWorksheet::new(config);

        let result = worksheet.calculate(dec!(8925), dec!(20982.22), false, None, Decimal::ZERO);

        assert_eq!(result, Err(PricingConfigError::InvalidItcRate(dec!(2.0))));
    }
}
