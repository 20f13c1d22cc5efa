mod common;

use common::fixtures::{
    proposal_with_full_schedule, proposal_with_payback, proposal_without_payback,
};
use common::pdf_assertions::{count_images, page_lines};
use common::{GeneratedPdf, TestResult, generate_pdf, generator_in, init_logger};
use std::fs;
use sunquote::{
    DocumentSettings, GeneratorBuilder, GeneratorConfig, PipelineError, ProposalRequest,
    ValidationError,
};

#[test]
fn proposal_without_payback_omits_the_payback_sentence() -> TestResult {
    init_logger();
    let work = tempfile::tempdir()?;
    let generator = generator_in(work.path())?;

    let (proposal, pdf) = generate_pdf(&generator, &proposal_without_payback())?;

    assert!((proposal.summary.investment_total - 76028.29).abs() < 1e-9);
    assert_eq!(proposal.summary.payback, None);
    assert_eq!(proposal.summary.economy_25_years, -58508.29);

    assert_pdf_contains_text!(pdf, "R$ 46.028,29");
    assert_pdf_contains_text!(pdf, "R$ 30.000,00");
    assert_pdf_contains_text!(pdf, "R$ 76.028,29");
    assert_pdf_contains_text!(pdf, "Economia acumulada de -R$ 58.508,29");
    assert_pdf_not_contains_text!(pdf, "Lucro a partir do");
    Ok(())
}

#[test]
fn proposal_with_payback_shows_both_sentences() -> TestResult {
    init_logger();
    let work = tempfile::tempdir()?;
    let generator = generator_in(work.path())?;

    let (proposal, pdf) = generate_pdf(&generator, &proposal_with_payback())?;

    assert_eq!(proposal.summary.payback_year(), Some(2));
    assert_eq!(proposal.summary.payback_value(), Some(5000.0));
    assert_eq!(proposal.summary.economy_25_years, 20000.0);

    assert_pdf_contains_text!(pdf, "Lucro a partir do 2º ano:");
    assert_pdf_contains_text!(pdf, "R$ 5.000,00");
    assert_pdf_contains_text!(pdf, "Economia acumulada de R$ 20.000,00");
    Ok(())
}

#[test]
fn document_follows_the_section_order() -> TestResult {
    init_logger();
    let work = tempfile::tempdir()?;
    let generator = generator_in(work.path())?;
    let (_, pdf) = generate_pdf(&generator, &proposal_with_payback())?;

    assert_pdf_min_pages!(pdf, 4);
    assert_pdf_page_size!(pdf, 1, 595.0, 842.0);
    assert_pdf_has_font!(pdf, "Helvetica");
    assert_pdf_has_font!(pdf, "Helvetica-Bold");

    let cover = page_lines(&pdf.doc, 1);
    assert!(cover.iter().any(|l| l == "PROPOSTA"), "{:?}", cover);
    assert!(cover.iter().any(|l| l == "COMÉRCIO BOM SOL LTDA"), "{:?}", cover);

    let text = common::pdf_assertions::extract_text(&pdf.doc);
    let order = [
        "PROPOSTA",
        "QUEM SOMOS",
        "DESCRIÇÃO DOS ITENS:",
        "• 60 Módulos Fotovoltaicos 665W Mono Canadian Solar - PROCEL",
        "• 01 inversor fotovoltaico 20.00 kW, fabricado pela Growatt",
        "CUSTO X BENEFÍCIO",
        "RETORNO DO INVESTIMENTO",
        "Lucro a partir do 2º ano:",
        "Retorno significativo em 25 anos:",
    ];
    let positions: Vec<usize> = order
        .iter()
        .map(|needle| {
            text.find(needle).unwrap_or_else(|| panic!("missing '{}' in:\n{}", needle, text))
        })
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]), "sections out of order: {:?}", positions);
    Ok(())
}

#[test]
fn both_images_are_embedded() -> TestResult {
    init_logger();
    let work = tempfile::tempdir()?;
    let generator = generator_in(work.path())?;
    let (_, pdf) = generate_pdf(&generator, &proposal_with_full_schedule())?;
    assert_eq!(count_images(&pdf.doc), 2);
    Ok(())
}

#[test]
fn empty_return_schedule_still_generates() -> TestResult {
    init_logger();
    let work = tempfile::tempdir()?;
    let generator = generator_in(work.path())?;
    let mut input = proposal_without_payback();
    input.yearly_returns.clear();

    let (proposal, pdf) = generate_pdf(&generator, &input)?;

    assert_eq!(proposal.summary.economy_25_years, 0.0);
    assert_pdf_contains_text!(pdf, "Economia acumulada de R$ 0,00");
    assert_pdf_not_contains_text!(pdf, "Lucro a partir do");
    assert_eq!(count_images(&pdf.doc), 2);
    Ok(())
}

#[test]
fn empty_production_fails_and_cleans_up() -> TestResult {
    init_logger();
    let work = tempfile::tempdir()?;
    let generator = generator_in(work.path())?;
    let mut input = proposal_without_payback();
    input.monthly_production.clear();

    let result = generator.generate(&input);

    assert!(matches!(result, Err(PipelineError::Render(_))), "{:?}", result.err());
    assert_eq!(fs::read_dir(work.path())?.count(), 0, "scratch directory left behind");
    Ok(())
}

#[test]
fn scratch_directories_are_removed_after_success() -> TestResult {
    init_logger();
    let work = tempfile::tempdir()?;
    let generator = generator_in(work.path())?;
    generator.generate(&proposal_with_payback())?;
    assert_eq!(fs::read_dir(work.path())?.count(), 0);
    Ok(())
}

#[test]
fn invalid_input_reports_every_violation() -> TestResult {
    let work = tempfile::tempdir()?;
    let generator = generator_in(work.path())?;
    let mut input = proposal_without_payback();
    input.client.name = "  ".into();
    input.investment.kit_cost = -1.0;

    match generator.generate(&input) {
        Err(PipelineError::Validation(errors)) => {
            assert_eq!(errors.0.len(), 2);
            assert_eq!(errors.0[0], ValidationError::EmptyClientName);
        }
        other => panic!("expected validation errors, got {:?}", other.map(|p| p.file_name)),
    }
    Ok(())
}

#[test]
fn identical_inputs_produce_identical_documents() -> TestResult {
    init_logger();
    let work = tempfile::tempdir()?;
    let generator = generator_in(work.path())?;
    let input = proposal_with_payback();

    let first = generator.generate(&input)?;
    let second = generator.generate(&input)?;

    assert_eq!(first.bytes, second.bytes);
    assert_ne!(first.file_name, second.file_name);
    Ok(())
}

#[test]
fn creation_date_is_written_when_configured() -> TestResult {
    let work = tempfile::tempdir()?;
    let settings = DocumentSettings {
        creation_date: Some("2026-03-01T12:00:00Z".parse()?),
        ..Default::default()
    };
    let generator = GeneratorBuilder::new()
        .with_work_dir(work.path())
        .with_raster_dpi(72.0)
        .with_document_settings(settings)
        .build()?;

    let proposal = generator.generate(&proposal_without_payback())?;
    let pdf = GeneratedPdf::from_bytes(proposal.bytes)?;
    let info_id = pdf.doc.trailer.get(b"Info")?.as_reference()?;
    let info = pdf.doc.get_object(info_id)?.as_dict()?;
    assert_eq!(info.get(b"CreationDate")?.as_str()?, b"D:20260301120000Z");
    assert_eq!(info.get(b"Title")?.as_str()?, b"Proposta Comercial - Maria Souza");
    Ok(())
}

#[test]
fn file_name_and_base64_payload() -> TestResult {
    let work = tempfile::tempdir()?;
    let generator = generator_in(work.path())?;
    let proposal = generator.generate(&proposal_with_payback())?;

    assert!(proposal.file_name.starts_with("proposta_comercio-bom-sol-ltda_"));
    assert!(proposal.file_name.ends_with(".pdf"));
    // "%PDF-" encodes to this prefix.
    assert!(proposal.to_base64().starts_with("JVBERi0"));
    Ok(())
}

#[test]
fn batch_results_keep_input_order() -> TestResult {
    init_logger();
    let work = tempfile::tempdir()?;
    let generator = generator_in(work.path())?;
    let mut broken = proposal_without_payback();
    broken.monthly_production.clear();
    let inputs = vec![proposal_with_payback(), broken, proposal_without_payback()];

    let results = generator.generate_batch(&inputs);

    assert_eq!(results.len(), 3);
    assert_eq!(results[0].as_ref().map(|p| p.summary.payback_year()).ok(), Some(Some(2)));
    assert!(matches!(results[1], Err(PipelineError::Render(_))));
    assert_eq!(results[2].as_ref().map(|p| p.summary.payback_year()).ok(), Some(None));
    assert_eq!(fs::read_dir(work.path())?.count(), 0);
    Ok(())
}

#[test]
fn flat_requests_generate_the_same_document() -> TestResult {
    let work = tempfile::tempdir()?;
    let generator = generator_in(work.path())?;
    let flat = serde_json::json!({
        "client_name": "Maria Souza",
        "module_quantity": 60,
        "module_spec": "Canadian Solar",
        "module_power_w": 665,
        "inverter_quantity": 1,
        "inverter_spec": "Growatt",
        "inverter_power_kw": 20.0,
        "kit_cost": 46028.29,
        "labor_cost": 30000.0,
        "monthly_production": serde_json::to_value(proposal_without_payback().monthly_production)?,
        "yearly_returns": serde_json::to_value(proposal_without_payback().yearly_returns)?,
    });
    let request: ProposalRequest = serde_json::from_value(flat)?;

    let from_flat = generator.generate(&request.into_input())?;
    let from_nested = generator.generate(&proposal_without_payback())?;
    assert_eq!(from_flat.bytes, from_nested.bytes);
    Ok(())
}

#[test]
fn content_overrides_reach_the_document() -> TestResult {
    let work = tempfile::tempdir()?;
    let mut config = GeneratorConfig {
        work_dir: work.path().to_path_buf(),
        raster_dpi: 72.0,
        ..Default::default()
    };
    config.content.company.name = "SOLARIS".into();
    let generator = GeneratorBuilder::from_config(config).build()?;

    let (_, pdf) = generate_pdf(&generator, &proposal_without_payback())?;
    assert_pdf_contains_text!(pdf, "SOLARIS");
    assert_pdf_not_contains_text!(pdf, "LEVEL5");
    Ok(())
}

#[test]
fn default_generate_returns_pdf_bytes() -> TestResult {
    let bytes = sunquote::generate(&proposal_with_payback())?;
    assert!(bytes.starts_with(b"%PDF-1.5"));
    Ok(())
}
