use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::{FinancingResult, PricingResult, ProjectionResult};
use crate::models::ClientInfo;

/// Everything the proposal document needs, captured at export time.
///
/// This is a plain snapshot; assembling it is the caller's job so the
/// renderer never recomputes worksheet figures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposalFigures {
    pub client: ClientInfo,
    pub prepared_on: NaiveDate,

    // Form inputs echoed on the proposal
    pub annual_kwh: Decimal,
    pub monthly_bill: Decimal,
    pub panel_name: String,
    pub rate_short: Decimal,
    pub rate_long: Decimal,

    // Worksheet results
    pub projection: ProjectionResult,
    pub pricing: PricingResult,
    pub financing: FinancingResult,
}
