//! Client-facing proposal rendering: figure collection, the HTML
//! document, and PDF conversion through an external renderer.

pub mod figures;
pub mod html;
pub mod pdf;

pub use figures::ProposalFigures;
pub use html::render_proposal;
pub use pdf::{PdfError, PdfRenderer, default_file_name};
