//! Application state for the proposal estimator UI.
//!
//! This holds the in-memory session that flows between worksheet views
//! through cursive's user data. Nothing is persisted; a new proposal
//! resets everything except the catalog and configuration.

use std::path::PathBuf;

use chrono::Local;
use rust_decimal::Decimal;
use tracing::warn;

use solar_core::calculations::{
    CostSummary, FinancingResult, FinancingWorksheet, PricingResult, PricingWorksheet,
    ProjectionResult, ProjectionWorksheet, summarize_costs,
};
use solar_core::models::{
    ClientInfo, CostLineItem, ExtraCostItem, PanelSpec, PricingConfig, apply_panel_defaults,
    extra_cost_items, standard_cost_schedule,
};
use solar_core::proposal::ProposalFigures;

/// Application-wide state stored in cursive's user data.
pub struct AppState {
    pub config: PricingConfig,

    /// Built-in catalog plus any CSV or "Add New" extensions.
    pub catalog: Vec<PanelSpec>,
    pub selected_panel: usize,

    pub client: ClientInfo,

    // Panel projection inputs
    pub annual_kwh: Decimal,
    pub monthly_bill: Decimal,
    pub additional_panels: u32,
    pub production_factor: Decimal,

    // Itemized cost worksheet
    pub schedule: Vec<CostLineItem>,
    pub extras: Vec<ExtraCostItem>,

    // Pricing & financing inputs
    pub deposit: Decimal,
    pub rate_short: Decimal,
    pub rate_long: Decimal,
    /// `Some` when the user replaced the tier default on the form.
    pub per_watt_override: Option<Decimal>,

    // Export settings
    pub renderer_override: Option<PathBuf>,
    pub out_dir: PathBuf,
    pub last_export: Option<PathBuf>,

    // Workflow completion ticks
    pub client_saved: bool,
    pub projection_saved: bool,
    pub costs_saved: bool,
    pub extras_saved: bool,
    pub financing_saved: bool,
}

impl AppState {
    pub fn new(
        config: PricingConfig,
        catalog: Vec<PanelSpec>,
        renderer_override: Option<PathBuf>,
        out_dir: PathBuf,
    ) -> Self {
        let catalog = if catalog.is_empty() {
            warn!("empty panel catalog; falling back to the built-in list");
            solar_core::models::builtin_catalog()
        } else {
            catalog
        };
        let schedule = standard_cost_schedule(&catalog[0]);
        let production_factor = config.production_factor;
        let rate_short = config.rate_short_default;
        let rate_long = config.rate_long_default;

        Self {
            config,
            catalog,
            selected_panel: 0,
            client: ClientInfo::default(),
            annual_kwh: Decimal::ZERO,
            monthly_bill: Decimal::ZERO,
            additional_panels: 1,
            production_factor,
            schedule,
            extras: extra_cost_items(),
            deposit: Decimal::ZERO,
            rate_short,
            rate_long,
            per_watt_override: None,
            renderer_override,
            out_dir,
            last_export: None,
            client_saved: false,
            projection_saved: false,
            costs_saved: false,
            extras_saved: false,
            financing_saved: false,
        }
    }

    /// The currently selected panel spec.
    pub fn panel(&self) -> &PanelSpec {
        &self.catalog[self.selected_panel]
    }

    /// Selects a catalog entry and re-resolves the panel-dependent cost
    /// defaults on the schedule.
    pub fn select_panel(
        &mut self,
        index: usize,
    ) {
        if index >= self.catalog.len() {
            warn!(index, "panel selection out of range; ignored");
            return;
        }
        self.selected_panel = index;
        apply_panel_defaults(&mut self.schedule, &self.catalog[index]);
    }

    /// Adds a user-defined panel to the catalog and selects it.
    /// Returns its catalog index.
    pub fn add_custom_panel(
        &mut self,
        name: String,
        wattage: Decimal,
    ) -> usize {
        let name = if name.trim().is_empty() {
            "Custom Panel".to_string()
        } else {
            name.trim().to_string()
        };
        self.catalog.push(PanelSpec::custom(name, wattage));
        let index = self.catalog.len() - 1;
        self.select_panel(index);
        index
    }

    /// Clears everything session-scoped for a fresh proposal.
    pub fn reset_proposal(&mut self) {
        self.selected_panel = 0;
        self.client = ClientInfo::default();
        self.annual_kwh = Decimal::ZERO;
        self.monthly_bill = Decimal::ZERO;
        self.additional_panels = 1;
        self.production_factor = self.config.production_factor;
        self.schedule = standard_cost_schedule(&self.catalog[0]);
        self.extras = extra_cost_items();
        self.deposit = Decimal::ZERO;
        self.rate_short = self.config.rate_short_default;
        self.rate_long = self.config.rate_long_default;
        self.per_watt_override = None;
        self.last_export = None;
        self.client_saved = false;
        self.projection_saved = false;
        self.costs_saved = false;
        self.extras_saved = false;
        self.financing_saved = false;
    }

    // --- Derived worksheet results -------------------------------------

    /// The projection for the currently saved inputs. `None` only when the
    /// production factor has been edited into an invalid value.
    pub fn projection(&self) -> Option<ProjectionResult> {
        ProjectionWorksheet::new(self.production_factor)
            .calculate(
                self.annual_kwh,
                self.panel().wattage,
                self.additional_panels,
            )
            .ok()
    }

    /// Cost summary for the given projection, using the saved schedule and
    /// extras.
    pub fn cost_summary(
        &self,
        projection: &ProjectionResult,
    ) -> CostSummary {
        summarize_costs(
            &self.schedule,
            &self.extras,
            projection.total_panels,
            projection.output_watts,
        )
    }

    pub fn pricing(
        &self,
        projection: &ProjectionResult,
        costs: &CostSummary,
    ) -> Option<PricingResult> {
        PricingWorksheet::new(self.config.clone())
            .calculate(
                projection.output_watts,
                costs.grand_total,
                self.panel().ground_mount,
                self.per_watt_override,
                self.deposit,
            )
            .ok()
    }

    pub fn financing(
        &self,
        pricing: &PricingResult,
    ) -> Option<FinancingResult> {
        self.financing_with_rates(pricing, self.rate_short, self.rate_long)
    }

    /// Financing scenarios at explicit rates, for live recalculation from
    /// unsaved form fields.
    pub fn financing_with_rates(
        &self,
        pricing: &PricingResult,
        rate_short: Decimal,
        rate_long: Decimal,
    ) -> Option<FinancingResult> {
        FinancingWorksheet::new(self.config.clone())
            .calculate(
                pricing.net_customer_cost,
                pricing.net_cost_after_deposit,
                rate_short,
                rate_long,
            )
            .ok()
    }

    /// Runs the whole pipeline on the saved inputs and snapshots the
    /// figures for the proposal document.
    pub fn proposal_figures(&self) -> Option<ProposalFigures> {
        let projection = self.projection()?;
        let costs = self.cost_summary(&projection);
        let pricing = self.pricing(&projection, &costs)?;
        let financing = self.financing(&pricing)?;

        Some(ProposalFigures {
            client: self.client.clone(),
            prepared_on: Local::now().date_naive(),
            annual_kwh: self.annual_kwh,
            monthly_bill: self.monthly_bill,
            panel_name: self.panel().name.clone(),
            rate_short: self.rate_short,
            rate_long: self.rate_long,
            projection,
            pricing,
            financing,
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use solar_core::models::builtin_catalog;

    fn state() -> AppState {
        AppState::new(
            PricingConfig::default(),
            builtin_catalog(),
            None,
            PathBuf::from("."),
        )
    }

    #[test]
    fn new_state_seeds_defaults_from_the_config() {
        let state = state();

        assert_eq!(state.additional_panels, 1);
        assert_eq!(state.production_factor, dec!(1.15));
        assert_eq!(state.rate_short, dec!(8.5));
        assert_eq!(state.rate_long, dec!(9.5));
        assert_eq!(state.schedule.len(), 13);
        assert_eq!(state.extras.len(), 10);
    }

    #[test]
    fn selecting_a_panel_re_resolves_cost_defaults() {
        let mut state = state();

        state.select_panel(4); // ground-mount SunModo entry

        assert!(state.panel().ground_mount);
        let trunk = state
            .schedule
            .iter()
            .find(|i| i.label == "A/C Trunk Cable")
            .unwrap();
        assert_eq!(trunk.rate, dec!(22));
    }

    #[test]
    fn out_of_range_selection_is_ignored() {
        let mut state = state();

        state.select_panel(99);

        assert_eq!(state.selected_panel, 0);
    }

    #[test]
    fn custom_panels_join_the_catalog_and_get_selected() {
        let mut state = state();

        let index = state.add_custom_panel("Acme 500".into(), dec!(500));

        assert_eq!(state.selected_panel, index);
        assert_eq!(state.panel().wattage, dec!(500));
        assert_eq!(state.panel().panel_cost, Decimal::ZERO);
    }

    #[test]
    fn blank_custom_panel_names_get_a_placeholder() {
        let mut state = state();

        state.add_custom_panel("   ".into(), dec!(425));

        assert_eq!(state.panel().name, "Custom Panel");
    }

    #[test]
    fn reset_clears_the_session_but_keeps_the_catalog() {
        let mut state = state();
        state.add_custom_panel("Acme 500".into(), dec!(500));
        state.annual_kwh = dec!(8500);
        state.client_saved = true;

        state.reset_proposal();

        assert_eq!(state.selected_panel, 0);
        assert_eq!(state.annual_kwh, Decimal::ZERO);
        assert!(!state.client_saved);
        // The custom panel stays available for the next proposal.
        assert_eq!(state.catalog.len(), 6);
    }

    #[test]
    fn proposal_figures_runs_the_full_pipeline() {
        let mut state = state();
        state.client.name = "Jane Doe".into();
        state.annual_kwh = dec!(8500);
        state.monthly_bill = dec!(185);

        let figures = state.proposal_figures().unwrap();

        assert_eq!(figures.projection.total_panels, 21);
        assert_eq!(figures.pricing.total_project_cost, dec!(27221.25));
        assert_eq!(
            figures.financing.without_credit_short.monthly_payment,
            dec!(187.64)
        );
    }

    #[test]
    fn proposal_figures_handles_a_blank_session() {
        let state = state();

        let figures = state.proposal_figures().unwrap();

        // One additional panel on a zero-usage projection.
        assert_eq!(figures.projection.total_panels, 1);
        assert!(figures.pricing.margin_pct.is_some());
    }
}
