//! Proposal document composition.
//!
//! The composer turns a proposal into a story of blocks, the layout engine
//! flows that story onto A4 pages, and the writer serializes the pages with
//! `lopdf` using the standard Helvetica faces.

pub mod composer;
pub mod content;
pub mod error;
pub mod fonts;
pub mod images;
pub mod layout;
pub mod text;
pub mod writer;

pub use composer::{
    CHART_PLACEMENT_CM, DocumentSettings, LoadedImages, ProposalComposer, ProposalImages,
    TABLE_PLACEMENT_CM, inverter_line, module_line,
};
pub use content::{ContentError, ContentTemplates};
pub use error::ComposeError;
pub use writer::{DocumentInfo, write_pdf};

use std::path::Path;
use sunquote_finance::DerivedSummary;
use sunquote_types::ProposalInput;

/// Composes a proposal with the given content and settings in one call.
pub fn compose_proposal(
    input: &ProposalInput,
    summary: &DerivedSummary,
    production_chart: Option<&Path>,
    return_table: Option<&Path>,
    content: &ContentTemplates,
    settings: &DocumentSettings,
) -> Result<Vec<u8>, ComposeError> {
    let images = ProposalImages { production_chart, return_table };
    ProposalComposer::new(content, settings).compose(input, summary, &images)
}
