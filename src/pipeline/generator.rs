// src/pipeline/generator.rs
use super::config::GeneratorConfig;
use crate::error::PipelineError;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use std::path::Path;
use sunquote_finance::{DerivedSummary, derive_summary};
use sunquote_graphics::{ChartLabels, ImageArtifact, RasterOptions, TableLabels};
use sunquote_render_pdf::{ProposalComposer, ProposalImages};
use sunquote_types::{MonthlyProduction, ProposalInput, YearlyReturn};

#[cfg(feature = "rayon-executor")]
use rayon::prelude::*;

/// A finished proposal document.
#[derive(Debug, Clone)]
pub struct GeneratedProposal {
    pub bytes: Vec<u8>,
    pub summary: DerivedSummary,
    /// Suggested download name, `proposta_<client slug>_<token>.pdf`.
    pub file_name: String,
}

impl GeneratedProposal {
    /// The document encoded for transfer inside a JSON payload.
    pub fn to_base64(&self) -> String {
        STANDARD.encode(&self.bytes)
    }
}

/// `proposta_<slug>_<8 hex>.pdf`. The token keeps two proposals for the same
/// client apart.
pub fn proposal_file_name(client_name: &str) -> String {
    let slug = slug::slugify(client_name);
    let slug = if slug.is_empty() { "cliente".to_string() } else { slug };
    format!("proposta_{}_{:08x}.pdf", slug, rand::random::<u32>())
}

/// Runs the whole proposal pipeline: validation, derivation, image rendering
/// and composition.
///
/// A generator is immutable and can be shared between threads; each request
/// works in its own scratch directory under the configured work directory.
#[derive(Debug, Clone)]
pub struct ProposalGenerator {
    config: GeneratorConfig,
    raster: RasterOptions,
}

impl ProposalGenerator {
    pub(crate) fn new(config: GeneratorConfig) -> Self {
        let raster = RasterOptions {
            dpi: config.raster_dpi,
            palette: config.palette,
            ..RasterOptions::default()
        };
        Self { config, raster }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    fn chart_labels(&self) -> ChartLabels {
        let text = &self.config.content.benefit;
        ChartLabels {
            title: text.chart_title.clone(),
            subtitle: text.chart_subtitle.clone(),
            axis: text.chart_axis.clone(),
            average: text.chart_average.clone(),
        }
    }

    fn table_labels(&self) -> TableLabels {
        let headings = &self.config.content.returns.table;
        TableLabels {
            year: headings.year.clone(),
            balance: headings.balance.clone(),
            monthly_saving: headings.monthly_saving.clone(),
            annual_saving: headings.annual_saving.clone(),
        }
    }

    /// Renders the production chart into `dir`. The caller owns the file.
    pub fn render_production_chart(
        &self,
        months: &[MonthlyProduction],
        module_quantity: u32,
        dir: &Path,
    ) -> Result<ImageArtifact, PipelineError> {
        Ok(sunquote_graphics::render_production_chart(
            months,
            module_quantity,
            dir,
            &self.chart_labels(),
            &self.raster,
        )?)
    }

    /// Renders the return table into `dir`. The caller owns the file.
    pub fn render_return_table(
        &self,
        returns: &[YearlyReturn],
        dir: &Path,
    ) -> Result<ImageArtifact, PipelineError> {
        Ok(sunquote_graphics::render_return_table(
            returns,
            dir,
            &self.table_labels(),
            &self.raster,
        )?)
    }

    /// Generates one proposal.
    ///
    /// The intermediate images live in a scratch directory that is removed
    /// when this call returns, whether it succeeds or not.
    pub fn generate(&self, input: &ProposalInput) -> Result<GeneratedProposal, PipelineError> {
        input.validate()?;
        let summary = derive_summary(&input.investment, &input.yearly_returns);
        log::debug!("Generating proposal for '{}'", input.client.name);

        let scratch = tempfile::Builder::new()
            .prefix("proposal_")
            .tempdir_in(&self.config.work_dir)?;

        let chart = self.render_production_chart(
            &input.monthly_production,
            input.system.modules.quantity,
            scratch.path(),
        )?;
        let table = self.render_return_table(&input.yearly_returns, scratch.path())?;

        let images = ProposalImages {
            production_chart: Some(chart.path()),
            return_table: Some(table.path()),
        };
        let bytes = ProposalComposer::new(&self.config.content, &self.config.document)
            .with_palette(self.config.palette)
            .compose(input, &summary, &images)?;

        let file_name = proposal_file_name(&input.client.name);
        log::info!("Generated {} ({} bytes)", file_name, bytes.len());
        Ok(GeneratedProposal { bytes, summary, file_name })
    }

    /// Generates independent proposals, in parallel when the `rayon-executor`
    /// feature is on. Results come back in input order.
    pub fn generate_batch(
        &self,
        inputs: &[ProposalInput],
    ) -> Vec<Result<GeneratedProposal, PipelineError>> {
        log::debug!("Generating a batch of {} proposals", inputs.len());
        #[cfg(feature = "rayon-executor")]
        {
            inputs.par_iter().map(|input| self.generate(input)).collect()
        }
        #[cfg(not(feature = "rayon-executor"))]
        {
            inputs.iter().map(|input| self.generate(input)).collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_names_carry_the_client_slug() {
        let name = proposal_file_name("João da Silva & Filhos");
        assert!(name.starts_with("proposta_joao-da-silva-filhos_"), "{}", name);
        assert!(name.ends_with(".pdf"));
        assert_eq!(name.len(), "proposta_joao-da-silva-filhos_".len() + 8 + ".pdf".len());
    }

    #[test]
    fn unsluggable_names_fall_back() {
        assert!(proposal_file_name("***").starts_with("proposta_cliente_"));
    }

    #[test]
    fn base64_of_the_bytes() {
        let proposal = GeneratedProposal {
            bytes: b"%PDF".to_vec(),
            summary: DerivedSummary { investment_total: 0.0, payback: None, economy_25_years: 0.0 },
            file_name: "x.pdf".into(),
        };
        assert_eq!(proposal.to_base64(), "JVBERg==");
    }

    #[test]
    fn labels_follow_the_content_templates() {
        let mut config = GeneratorConfig::default();
        config.content.returns.table.year = "Year".into();
        config.content.benefit.chart_average = "Avg".into();
        let generator = ProposalGenerator::new(config);
        assert_eq!(generator.table_labels().year, "Year");
        assert_eq!(generator.chart_labels().average, "Avg");
    }
}
