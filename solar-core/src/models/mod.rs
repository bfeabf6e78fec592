mod client;
mod cost_item;
mod panel;
mod pricing_config;

pub use client::ClientInfo;
pub use cost_item::{
    CostBasis, CostLineItem, ExtraCostItem, apply_panel_defaults, extra_cost_items,
    standard_cost_schedule,
};
pub use panel::{PanelSpec, builtin_catalog};
pub use pricing_config::{PricingConfig, PricingConfigError};
