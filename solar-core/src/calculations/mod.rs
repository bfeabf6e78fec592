//! Calculation modules for the solar proposal worksheets.
//!
//! Each worksheet mirrors one section of the estimator form: panel
//! projection, itemized costs, project pricing, and loan financing.

pub mod common;
pub mod worksheets;

pub use worksheets::costs::{CostSummary, ItemTotal, summarize_costs};
pub use worksheets::financing::{
    FinancingResult, FinancingWorksheet, LoanScenario, monthly_payment,
};
pub use worksheets::pricing::{PricingResult, PricingWorksheet};
pub use worksheets::projection::{ProjectionError, ProjectionResult, ProjectionWorksheet};
