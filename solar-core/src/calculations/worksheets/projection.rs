//! Panel projection worksheet.
//!
//! Sizes the array from the client's annual usage: panel count, array
//! output in watts, estimated annual production, and the production
//! offset against current usage.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

/// Errors that can occur during projection calculations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProjectionError {
    /// The production factor must be positive.
    #[error("production factor must be positive, got {0}")]
    InvalidProductionFactor(Decimal),
}

/// Result of the panel projection worksheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectionResult {
    /// Panels needed to cover the annual usage, `ceil(kWh / wattage)`.
    pub projected_panels: u32,

    /// Extra panels requested on top of the projection.
    pub additional_panels: u32,

    /// Projected plus additional panels.
    pub total_panels: u32,

    /// Array DC output: total panels × panel wattage.
    pub output_watts: Decimal,

    /// Estimated annual production: output watts × production factor.
    pub output_kwh: Decimal,

    /// Output watts over annual usage, as a ratio (1.05 = 105% offset).
    /// Zero when the annual usage is zero.
    pub production_offset: Decimal,
}

/// Calculator for the panel projection worksheet.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use solar_core::calculations::ProjectionWorksheet;
///
/// let worksheet = ProjectionWorksheet::new(dec!(1.15));
/// let result = worksheet.calculate(dec!(8500), dec!(425), 1).unwrap();
///
/// assert_eq!(result.projected_panels, 20);
/// assert_eq!(result.total_panels, 21);
/// assert_eq!(result.output_watts, dec!(8925));
/// ```
#[derive(Debug, Clone)]
pub struct ProjectionWorksheet {
    production_factor: Decimal,
}

impl ProjectionWorksheet {
    pub fn new(production_factor: Decimal) -> Self {
        Self { production_factor }
    }

    /// Runs the projection for the given annual usage and panel choice.
    ///
    /// Degenerate inputs degrade instead of failing: zero or negative
    /// wattage projects zero panels, zero annual usage yields a zero
    /// offset. Only an invalid production factor is an error.
    pub fn calculate(
        &self,
        annual_kwh: Decimal,
        panel_wattage: Decimal,
        additional_panels: u32,
    ) -> Result<ProjectionResult, ProjectionError> {
        if self.production_factor <= Decimal::ZERO {
            return Err(ProjectionError::InvalidProductionFactor(
                self.production_factor,
            ));
        }

        let annual_kwh = clamp_non_negative(annual_kwh, "annual kWh");
        let panel_wattage = clamp_non_negative(panel_wattage, "panel wattage");

        let projected_panels = self.projected_panels(annual_kwh, panel_wattage);
        let total_panels = projected_panels + additional_panels;
        let output_watts = Decimal::from(total_panels) * panel_wattage;
        let output_kwh = output_watts * self.production_factor;
        let production_offset = self.production_offset(output_watts, annual_kwh);

        Ok(ProjectionResult {
            projected_panels,
            additional_panels,
            total_panels,
            output_watts,
            output_kwh,
            production_offset,
        })
    }

    fn projected_panels(
        &self,
        annual_kwh: Decimal,
        panel_wattage: Decimal,
    ) -> u32 {
        if panel_wattage <= Decimal::ZERO {
            warn!(%panel_wattage, "panel wattage is zero; projecting zero panels");
            return 0;
        }
        (annual_kwh / panel_wattage).ceil().to_u32().unwrap_or(0)
    }

    fn production_offset(
        &self,
        output_watts: Decimal,
        annual_kwh: Decimal,
    ) -> Decimal {
        if annual_kwh <= Decimal::ZERO {
            warn!(%annual_kwh, "annual usage is zero; production offset undefined");
            return Decimal::ZERO;
        }
        output_watts / annual_kwh
    }
}

fn clamp_non_negative(
    value: Decimal,
    field: &str,
) -> Decimal {
    if value < Decimal::ZERO {
        warn!(%value, field, "negative input treated as zero");
        Decimal::ZERO
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;
    use tracing_subscriber::fmt::format::FmtSpan;

    use super::*;

    fn worksheet() -> ProjectionWorksheet {
        ProjectionWorksheet::new(dec!(1.15))
    }

    /// Initializes tracing subscriber for tests that verify log output.
    fn init_test_tracing() -> tracing::subscriber::DefaultGuard {
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::WARN)
            .with_span_events(FmtSpan::NONE)
            .with_test_writer()
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    #[test]
    fn projects_twenty_panels_for_8500_kwh_at_425w() {
        let result = worksheet().calculate(dec!(8500), dec!(425), 0).unwrap();

        assert_eq!(result.projected_panels, 20);
    }

    #[test]
    fn projection_rounds_partial_panels_up() {
        // 8501 / 425 = 20.002..., which needs a 21st panel.
        let result = worksheet().calculate(dec!(8501), dec!(425), 0).unwrap();

        assert_eq!(result.projected_panels, 21);
    }

    #[test]
    fn additional_panels_add_to_the_projection() {
        let result = worksheet().calculate(dec!(8500), dec!(425), 1).unwrap();

        assert_eq!(result.total_panels, 21);
        assert_eq!(result.output_watts, dec!(8925));
    }

    #[test]
    fn output_kwh_applies_production_factor() {
        let result = worksheet().calculate(dec!(8500), dec!(425), 1).unwrap();

        assert_eq!(result.output_kwh, dec!(10263.75));
    }

    #[test]
    fn offset_is_output_watts_over_annual_usage() {
        let result = worksheet().calculate(dec!(8500), dec!(425), 1).unwrap();

        assert_eq!(result.production_offset, dec!(1.05));
    }

    #[test]
    fn zero_wattage_projects_zero_panels_without_panicking() {
        let _guard = init_test_tracing();
        let result = worksheet().calculate(dec!(8500), Decimal::ZERO, 1).unwrap();

        assert_eq!(result.projected_panels, 0);
        assert_eq!(result.total_panels, 1);
        assert_eq!(result.output_watts, Decimal::ZERO);
    }

    #[test]
    fn zero_annual_usage_yields_zero_offset() {
        let result = worksheet().calculate(Decimal::ZERO, dec!(425), 1).unwrap();

        assert_eq!(result.projected_panels, 0);
        assert_eq!(result.production_offset, Decimal::ZERO);
    }

    #[test]
    fn negative_inputs_are_treated_as_zero() {
        let _guard = init_test_tracing();
        let result = worksheet().calculate(dec!(-8500), dec!(425), 0).unwrap();

        assert_eq!(result.projected_panels, 0);
        assert_eq!(result.output_watts, Decimal::ZERO);
    }

    #[test]
    fn invalid_production_factor_is_an_error() {
        let worksheet = ProjectionWorksheet::new(Decimal::ZERO);

        let result = worksheet.calculate(dec!(8500), dec!(425), 0);

        assert_eq!(
            result,
            Err(ProjectionError::InvalidProductionFactor(Decimal::ZERO))
        );
    }
}
