use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when a [`PricingConfig`] carries out-of-range values.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PricingConfigError {
    #[error("production factor must be positive, got {0}")]
    InvalidProductionFactor(Decimal),

    #[error("tax credit rate must be between 0 and 1, got {0}")]
    InvalidItcRate(Decimal),

    #[error("commission rate must be between 0 and 1, got {0}")]
    InvalidCommissionRate(Decimal),

    #[error("margin factor must be between 0 and 1, got {0}")]
    InvalidMarginFactor(Decimal),

    #[error("per-watt tier rates must be positive")]
    InvalidPerWattTiers,

    #[error("tier thresholds must be ascending and positive")]
    InvalidTierThresholds,

    #[error("financed principal factor must be between 0 and 1, got {0}")]
    InvalidPrincipalFactor(Decimal),

    #[error("loan terms must be longer than the tax credit term reduction")]
    InvalidTermReduction,
}

/// Pricing and financing parameters.
///
/// The defaults reproduce the company's current rate sheet; the UI seeds
/// its editable fields from here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingConfig {
    /// Production factor applied to array watts to estimate annual kWh.
    pub production_factor: Decimal,

    /// Federal Investment Tax Credit rate.
    pub itc_rate: Decimal,

    /// Sales commission as a share of total project cost.
    pub commission_rate: Decimal,

    /// Share of total project cost counted against fixed costs when
    /// computing margin.
    pub margin_factor: Decimal,

    // $/watt tiers for the total project cost
    pub ground_mount_rate: Decimal,
    pub tier1_max_watts: Decimal,
    pub tier2_max_watts: Decimal,
    pub tier1_rate: Decimal,
    pub tier2_rate: Decimal,
    pub tier3_rate: Decimal,

    // Financing scenarios
    pub term_short_years: u32,
    pub term_long_years: u32,
    pub rate_short_default: Decimal,
    pub rate_long_default: Decimal,

    /// Share of the net customer cost financed when the tax credit is
    /// applied to the loan.
    pub itc_principal_factor: Decimal,

    /// Years shaved off the term in the with-credit scenarios to
    /// approximate the forced early payoff.
    pub itc_term_reduction_years: u32,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            production_factor: dec!(1.15),
            itc_rate: dec!(0.30),
            commission_rate: dec!(0.12),
            margin_factor: dec!(0.95),
            ground_mount_rate: dec!(1.40),
            tier1_max_watts: dec!(12000),
            tier2_max_watts: dec!(18000),
            tier1_rate: dec!(3.05),
            tier2_rate: dec!(2.98),
            tier3_rate: dec!(2.90),
            term_short_years: 15,
            term_long_years: 20,
            rate_short_default: dec!(8.5),
            rate_long_default: dec!(9.5),
            itc_principal_factor: dec!(0.70),
            itc_term_reduction_years: 2,
        }
    }
}

impl PricingConfig {
    /// Validates the configuration values.
    pub fn validate(&self) -> Result<(), PricingConfigError> {
        if self.production_factor <= Decimal::ZERO {
            return Err(PricingConfigError::InvalidProductionFactor(
                self.production_factor,
            ));
        }
        if self.itc_rate < Decimal::ZERO || self.itc_rate > Decimal::ONE {
            return Err(PricingConfigError::InvalidItcRate(self.itc_rate));
        }
        if self.commission_rate < Decimal::ZERO || self.commission_rate > Decimal::ONE {
            return Err(PricingConfigError::InvalidCommissionRate(
                self.commission_rate,
            ));
        }
        if self.margin_factor <= Decimal::ZERO || self.margin_factor > Decimal::ONE {
            return Err(PricingConfigError::InvalidMarginFactor(self.margin_factor));
        }
        if self.ground_mount_rate <= Decimal::ZERO
            || self.tier1_rate <= Decimal::ZERO
            || self.tier2_rate <= Decimal::ZERO
            || self.tier3_rate <= Decimal::ZERO
        {
            return Err(PricingConfigError::InvalidPerWattTiers);
        }
        if self.tier1_max_watts <= Decimal::ZERO || self.tier2_max_watts <= self.tier1_max_watts {
            return Err(PricingConfigError::InvalidTierThresholds);
        }
        if self.itc_principal_factor <= Decimal::ZERO || self.itc_principal_factor > Decimal::ONE {
            return Err(PricingConfigError::InvalidPrincipalFactor(
                self.itc_principal_factor,
            ));
        }
        if self.term_short_years <= self.itc_term_reduction_years
            || self.term_long_years <= self.itc_term_reduction_years
        {
            return Err(PricingConfigError::InvalidTermReduction);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert_eq!(PricingConfig::default().validate(), Ok(()));
    }

    #[test]
    fn validate_rejects_zero_production_factor() {
        let config = PricingConfig {
            production_factor: Decimal::ZERO,
            ..Default::default()
        };

        assert_eq!(
            config.validate(),
            Err(PricingConfigError::InvalidProductionFactor(Decimal::ZERO))
        );
    }

    #[test]
    fn validate_rejects_itc_rate_above_one() {
        let config = PricingConfig {
            itc_rate: dec!(1.5),
            ..Default::default()
        };

        assert_eq!(
            config.validate(),
            Err(PricingConfigError::InvalidItcRate(dec!(1.5)))
        );
    }

    #[test]
    fn validate_rejects_inverted_tier_thresholds() {
        let config = PricingConfig {
            tier2_max_watts: dec!(10000),
            ..Default::default()
        };

        assert_eq!(
            config.validate(),
            Err(PricingConfigError::InvalidTierThresholds)
        );
    }

    #[test]
    fn validate_rejects_term_shorter_than_reduction() {
        let config = PricingConfig {
            term_short_years: 2,
            ..Default::default()
        };

        assert_eq!(
            config.validate(),
            Err(PricingConfigError::InvalidTermReduction)
        );
    }
}
