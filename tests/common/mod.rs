pub mod fixtures;
pub mod pdf_assertions;

use lopdf::Document as LopdfDocument;
use std::path::Path;
use sunquote::{
    GeneratedProposal, GeneratorBuilder, PipelineError, ProposalGenerator, ProposalInput,
};

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Wrapper around a generated PDF with helper methods
pub struct GeneratedPdf {
    pub bytes: Vec<u8>,
    pub doc: LopdfDocument,
}

impl GeneratedPdf {
    /// Create a GeneratedPdf from raw bytes
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, Box<dyn std::error::Error>> {
        let doc = LopdfDocument::load_mem(&bytes)?;
        Ok(Self { bytes, doc })
    }

    /// Get the number of pages in the PDF
    pub fn page_count(&self) -> usize {
        self.doc.get_pages().len()
    }

    /// Save PDF to a file for manual debugging
    #[allow(dead_code)]
    pub fn save_for_debug(&self, name: &str) -> std::io::Result<()> {
        std::fs::write(format!("test_output_{}.pdf", name), &self.bytes)
    }
}

/// A generator whose scratch directories live under `work_dir`.
pub fn generator_in(work_dir: &Path) -> Result<ProposalGenerator, PipelineError> {
    GeneratorBuilder::new().with_work_dir(work_dir).with_raster_dpi(72.0).build()
}

/// Generate a proposal and parse the resulting document.
pub fn generate_pdf(
    generator: &ProposalGenerator,
    input: &ProposalInput,
) -> Result<(GeneratedProposal, GeneratedPdf), Box<dyn std::error::Error>> {
    let proposal = generator.generate(input)?;
    let pdf = GeneratedPdf::from_bytes(proposal.bytes.clone())?;
    Ok((proposal, pdf))
}
