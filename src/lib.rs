//! # sunquote
//!
//! Commercial proposals for photovoltaic installations, rendered to PDF.
//!
//! A [`ProposalInput`] goes through four stages:
//!
//! 1. boundary validation ([`ProposalInput::validate`])
//! 2. financial derivation: investment total, payback year and the
//!    twenty-five year economy ([`derive_summary`])
//! 3. the production chart and the return table, rasterized to PNG in a
//!    scratch directory
//! 4. composition of the A4 document around those images
//!
//! ```ignore
//! let pdf = sunquote::generate(&input)?;
//! std::fs::write("proposta.pdf", pdf)?;
//! ```
//!
//! Use [`GeneratorBuilder`] to change the work directory, the image
//! resolution, the document metadata or the boilerplate text.

pub mod error;
pub mod pipeline;

pub use error::PipelineError;
pub use pipeline::{
    GeneratedProposal, GeneratorBuilder, GeneratorConfig, ProposalGenerator, proposal_file_name,
};

// Re-export the member crates' public surface so callers need one dependency.
pub use sunquote_finance::{
    DerivedSummary, Payback, derive_summary, format_currency, format_kwh, format_number,
};
pub use sunquote_graphics::{GraphicsError, ImageArtifact};
pub use sunquote_render_pdf::{ComposeError, ContentError, ContentTemplates, DocumentSettings};
pub use sunquote_types::{
    Client, Investment, InverterSpec, ModuleSpec, MonthKey, MonthlyProduction, Palette,
    ProposalInput, ProposalRequest, SystemSpec, ValidationError, ValidationErrors, YearlyReturn,
};

/// Generates a proposal with the default configuration and returns the PDF bytes.
pub fn generate(input: &ProposalInput) -> Result<Vec<u8>, PipelineError> {
    let generator = GeneratorBuilder::new().build()?;
    Ok(generator.generate(input)?.bytes)
}
