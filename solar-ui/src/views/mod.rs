//! UI views for the proposal estimator.
//!
//! This module organizes all view/screen implementations:
//! - `main_menu` - Application entry point
//! - `workflow` - Coordinates the proposal worksheets
//! - `client_info` - Client contact form
//! - `projection` - Panel projection worksheet
//! - `costs` - Itemized cost worksheet
//! - `extras` - Optional additional costs
//! - `financing` - Pricing and financing grid
//! - `export` - Proposal PDF export

pub mod client_info;
pub mod costs;
pub mod export;
pub mod extras;
pub mod financing;
pub mod main_menu;
pub mod projection;
pub mod status_bar;
pub mod workflow;

pub use main_menu::show_main_menu;
