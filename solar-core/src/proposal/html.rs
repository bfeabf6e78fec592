//! The proposal HTML document.
//!
//! Pure formatting over [`ProposalFigures`]; no business logic. The
//! document is sized for Letter paper and converted to PDF by
//! [`crate::proposal::pdf`].

use crate::calculations::common::{fmt_currency, fmt_ratio_percent, fmt_whole};
use crate::proposal::ProposalFigures;

/// Renders the full proposal document as a standalone HTML page.
pub fn render_proposal(figures: &ProposalFigures) -> String {
    let client_line = escape_html(&figures.client.summary_line());
    let prepared = figures.prepared_on.format("%m/%d/%Y");
    let panel_name = escape_html(&figures.panel_name);
    let total_panels = figures.projection.total_panels;
    let output_watts = fmt_whole(figures.projection.output_watts);
    let output_kwh = fmt_whole(figures.projection.output_kwh);
    let annual_kwh = fmt_whole(figures.annual_kwh);
    let offset = fmt_ratio_percent(figures.projection.production_offset);
    let monthly_bill = fmt_currency(figures.monthly_bill);
    let gross_cost = fmt_currency(figures.pricing.total_project_cost);
    let tax_credit = fmt_currency(figures.pricing.federal_tax_credit);
    let net_cost = fmt_currency(figures.pricing.net_customer_cost);
    let pymt_short = fmt_currency(figures.financing.without_credit_short.monthly_payment);
    let pymt_long = fmt_currency(figures.financing.without_credit_long.monthly_payment);
    let pymt_short_credit = fmt_currency(figures.financing.with_credit_short.monthly_payment);
    let pymt_long_credit = fmt_currency(figures.financing.with_credit_long.monthly_payment);
    let rate_short = figures.rate_short;
    let rate_long = figures.rate_long;

    format!(
        r#"<html>
<head>
    <style>
        @page {{ size: Letter; margin: .5in; }}
        body {{ font-family: Arial, sans-serif; margin: 0; }}
        h2, h3 {{ color: #003366; }}
        ul {{ margin-top: -10px; }}
        .section {{ margin-top: 0px; }}
        .pagebreak {{ page-break-before: always; }}
    </style>
</head>
<body>
    <h2>Solar Investment Details Prepared on {prepared}</h2>
    <p><strong>Client:</strong> {client_line}</p>

    <div class="section">
        <h3>Included:</h3>
        <ul>
            <li>Construction of a {output_watts}W solar array</li>
            <li>({total_panels}) {panel_name} solar modules</li>
            <li>({total_panels}) Enphase IQ 8m AC micro inverters</li>
            <li>IronRidge Black anodized aluminum rail mount system</li>
            <li>Configured with My Enlighten monitoring system</li>
            <li>Full permitting, inspection, and installation services</li>
            <li>12-year workmanship warranty</li>
            <li>25-year panel &amp; inverter warranties</li>
            <li>30-year 3rd-party warranty coverage</li>
        </ul>
    </div>

    <div class="section">
        <h3>System Information</h3>
        <ul>
            <li>Annual Usage (kWh): <strong>{annual_kwh}</strong></li>
            <li>Panel Count: <strong>{total_panels}</strong></li>
            <li>Array Output (DC Watts): <strong>{output_watts}</strong></li>
            <li>Estimated Annual Production (kWh): <strong>{output_kwh}</strong></li>
            <li>Monthly Electric Bill: <strong>{monthly_bill}</strong></li>
            <li>Production Offset: <strong>{offset}</strong></li>
        </ul>
    </div>

    <div class="section">
        <h3>Financing Overview</h3>
        <p>Gross System Cost: <strong>{gross_cost}</strong></p>
        <p>Federal Tax Credit: <strong>{tax_credit}</strong></p>
        <p>Net Cost After Incentives: <strong>{net_cost}</strong></p>
        <p>15yr Loan w/o ITC: <strong>{pymt_short}</strong></p>
        <p>20yr Loan w/o ITC: <strong>{pymt_long}</strong></p>
        <p>15yr Loan w/ ITC: <strong>{pymt_short_credit}</strong></p>
        <p>20yr Loan w/ ITC: <strong>{pymt_long_credit}</strong></p>
        <p>15-Year Rate: <strong>{rate_short:.2}%</strong></p>
        <p>20-Year Rate: <strong>{rate_long:.2}%</strong></p>
    </div>

    <div class="section">
        <h3>Contact</h3>
        <p>J4 Energy Solutions<br>
        (603) 270-6127<br>
        info@j4nrg.com<br>
        www.j4energysolutions.com<br>
        11 South Main St, Concord, NH 03301</p>
    </div>

    <div class="pagebreak"></div>

    <div class="section">
        <h2 style="font-size: 32pt; text-align: center; margin-bottom: 20px;">Additional Services</h2>
        <p style="font-size: 20pt; text-align: center;"><strong>Enhance your solar investment with these premium upgrades:</strong></p>
        <ul style="font-size: 18pt;">
            <li><strong>Whole Home Generac Generator</strong></li>
            <li><strong>Battery Back-up</strong></li>
            <li><strong>High-Efficiency Heat Pumps</strong></li>
            <li><strong>New Asphalt or Metal Roof</strong></li>
        </ul>
        <p style="font-size: 14pt; text-align: center;">Ask your sales rep for more info on our additional services.</p>
    </div>

    <div class="section">
        <h3 style="font-size: 18pt; text-align: center;">Our Promise</h3>
        <p style="font-size: 16pt; text-align: center;">
            We will match or beat any legitimate solar estimate provided to us for review.<br><br>
            From my family to yours, we appreciate your time and the opportunity to earn your business.<br><br>
            <strong>Team J4</strong><br>
            <em>Family owned and operated</em>
        </p>
    </div>
</body>
</html>
"#
    )
}

/// Minimal HTML escaping for the free-text client fields.
fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::calculations::{FinancingWorksheet, PricingWorksheet, ProjectionWorksheet};
    use crate::models::{ClientInfo, PricingConfig};

    fn reference_figures() -> ProposalFigures {
        let config = PricingConfig::default();
        let projection = ProjectionWorksheet::new(dec!(1.15))
            .calculate(dec!(8500), dec!(425), 1)
            .unwrap();
        let pricing = PricingWorksheet::new(config.clone())
            .calculate(
                projection.output_watts,
                dec!(20982.22),
                false,
                None,
                Decimal::ZERO,
            )
            .unwrap();
        let financing = FinancingWorksheet::new(config)
            .calculate(
                pricing.net_customer_cost,
                pricing.net_cost_after_deposit,
                dec!(8.5),
                dec!(9.5),
            )
            .unwrap();

        ProposalFigures {
            client: ClientInfo {
                name: "Jane & Joe Doe".into(),
                address: "12 Elm St".into(),
                city: "Concord".into(),
                state: "NH".into(),
                zip: "03301".into(),
                phone: "555-0100".into(),
                email: "jane@example.com".into(),
            },
            prepared_on: NaiveDate::from_ymd_opt(2026, 8, 7).unwrap(),
            annual_kwh: dec!(8500),
            monthly_bill: dec!(185),
            panel_name: "Qcell Qtron+ 425w cell Blk/blk".into(),
            rate_short: dec!(8.5),
            rate_long: dec!(9.5),
            projection,
            pricing,
            financing,
        }
    }

    #[test]
    fn proposal_embeds_the_computed_figures() {
        let html = render_proposal(&reference_figures());

        assert!(html.contains("Prepared on 08/07/2026"));
        assert!(html.contains("8,925W solar array"));
        assert!(html.contains("Gross System Cost: <strong>$27,221.25</strong>"));
        assert!(html.contains("Federal Tax Credit: <strong>$8,166.38</strong>"));
        assert!(html.contains("Net Cost After Incentives: <strong>$19,054.87</strong>"));
        assert!(html.contains("15yr Loan w/o ITC: <strong>$187.64</strong>"));
        assert!(html.contains("20yr Loan w/ ITC: <strong>$126.56</strong>"));
        assert!(html.contains("Production Offset: <strong>105%</strong>"));
    }

    #[test]
    fn proposal_escapes_client_free_text() {
        let mut figures = reference_figures();
        figures.client.name = "Jane <script> & Joe".into();

        let html = render_proposal(&figures);

        assert!(html.contains("Jane &lt;script&gt; &amp; Joe"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn proposal_includes_the_contact_block() {
        let html = render_proposal(&reference_figures());

        assert!(html.contains("J4 Energy Solutions"));
        assert!(html.contains("(603) 270-6127"));
    }
}
