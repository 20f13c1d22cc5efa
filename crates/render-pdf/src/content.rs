//! Boilerplate text of the proposal, kept as versioned data.
//!
//! The composer reads every literal it prints from [`ContentTemplates`], so a
//! company can ship its own wording as JSON without touching layout code.
//! Missing fields in an override fall back to the built-in content.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Version of the built-in content.
pub const CONTENT_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentTemplates {
    pub version: u32,
    pub company: CompanyIdentity,
    pub cover: CoverText,
    pub about: TextSection,
    pub operation: TextSection,
    pub equipment: EquipmentText,
    pub warranty: ListSection,
    pub investment: InvestmentText,
    pub payment: ListSection,
    pub insurance: ListSection,
    pub benefit: ChartText,
    pub returns: ReturnText,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyIdentity {
    pub name: String,
    pub tagline: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoverText {
    /// Each entry is set on its own line.
    pub heading: Vec<String>,
    pub client_label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextSection {
    pub title: String,
    pub paragraphs: Vec<String>,
}

/// One bullet; a non-empty label is set in bold before the text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListItem {
    #[serde(default)]
    pub label: String,
    pub text: String,
}

impl ListItem {
    fn labelled(label: &str, text: &str) -> Self {
        Self { label: label.to_string(), text: text.to_string() }
    }

    fn plain(text: &str) -> Self {
        Self { label: String::new(), text: text.to_string() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListSection {
    pub title: String,
    pub intro: String,
    pub items: Vec<ListItem>,
    #[serde(default)]
    pub closing: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquipmentText {
    pub title: String,
    pub module_description: String,
    /// Appended to the module line, e.g. a certification seal.
    #[serde(default)]
    pub module_suffix: String,
    pub inverter_singular: String,
    pub inverter_plural: String,
    pub inverter_description: String,
    pub manufacturer: String,
    /// Joins the optional inverter features to the line.
    pub features_joiner: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvestmentText {
    pub title: String,
    pub kit_label: String,
    pub labor_label: String,
    pub total_label: String,
}

/// The cost/benefit section and the labels drawn inside the chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartText {
    pub title: String,
    pub intro: String,
    pub chart_title: String,
    /// `{modules}` is replaced with the module quantity.
    pub chart_subtitle: String,
    pub chart_axis: String,
    pub chart_average: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnText {
    pub title: String,
    pub intro: String,
    /// `{year}` is replaced with the payback year.
    pub payback_label: String,
    pub payback_text: String,
    pub economy_label: String,
    pub economy_text: String,
    pub closing: String,
    pub table: TableHeadings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableHeadings {
    pub year: String,
    pub balance: String,
    pub monthly_saving: String,
    pub annual_saving: String,
}

impl ContentTemplates {
    /// Loads an override from a JSON file.
    pub fn from_json_file(path: &Path) -> Result<Self, ContentError> {
        let raw = fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    pub fn from_json_str(raw: &str) -> Result<Self, ContentError> {
        let content: Self = serde_json::from_str(raw)?;
        if content.version > CONTENT_VERSION {
            log::warn!(
                "Content templates declare version {}, newer than the supported {}",
                content.version,
                CONTENT_VERSION
            );
        }
        Ok(content)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    #[error("Could not read content templates: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid content templates: {0}")]
    Json(#[from] serde_json::Error),
}

impl Default for ContentTemplates {
    fn default() -> Self {
        Self {
            version: CONTENT_VERSION,
            company: CompanyIdentity::default(),
            cover: CoverText::default(),
            about: TextSection {
                title: "QUEM SOMOS?".into(),
                paragraphs: vec![
                    "Somos uma empresa especializada no segmento de engenharia elétrica, com foco no \
                     desenvolvimento de projetos elétricos e na instalação de sistemas fotovoltaicos. \
                     Desde 2019, temos trabalhado para oferecer soluções eficientes e sustentáveis, \
                     sempre com alto padrão de qualidade. Ao longo de nossa trajetória, já realizamos \
                     mais de 700 projetos fotovoltaicos, contribuindo para a geração de energia limpa \
                     e a redução de custos energéticos de nossos clientes. Nosso compromisso é entregar \
                     excelência em cada etapa do processo, desde o planejamento até a execução, \
                     garantindo resultados que superam expectativas."
                        .into(),
                ],
            },
            operation: TextSection {
                title: "FUNCIONAMENTO DO SISTEMA FOTOVOLTAICO".into(),
                paragraphs: vec![
                    "O sistema fotovoltaico é composto principalmente por três componentes: painéis \
                     solares, inversor e medidor bidirecional. Os painéis captam a energia solar e a \
                     convertem em energia elétrica de corrente contínua (CC). Em seguida, o inversor \
                     transforma essa corrente contínua em corrente alternada (CA), que pode ser \
                     utilizada pelos equipamentos elétricos. O medidor bidirecional desempenha um \
                     papel essencial ao monitorar a energia produzida pelo sistema. Ele controla o \
                     fluxo de energia, permitindo o uso da eletricidade da concessionária quando \
                     necessário e acumulando créditos para a energia excedente gerada pelo sistema \
                     solar. Isso elimina a necessidade de baterias para armazenar a energia \
                     excedente, tornando o sistema mais econômico e eficiente."
                        .into(),
                ],
            },
            equipment: EquipmentText::default(),
            warranty: ListSection {
                title: "GARANTIA".into(),
                intro: "A garantia do sistema fotovoltaico é composta por:".into(),
                items: vec![
                    ListItem::labelled(
                        "Módulos Fotovoltaicos:",
                        "Garantia de desempenho linear de 25 anos e garantia contra defeitos de \
                         fabricação de 15 anos, fornecida pelo fabricante.",
                    ),
                    ListItem::labelled(
                        "Inversor:",
                        "Garantia de 10 anos contra defeitos de fabricação, conforme especificado \
                         pelo fabricante.",
                    ),
                    ListItem::labelled(
                        "Estrutura de Fixação:",
                        "Garantia contra corrosão e defeitos de fabricação, de acordo com as \
                         especificações do fabricante.",
                    ),
                    ListItem::labelled(
                        "Serviço de Instalação:",
                        "Garantia de 1 ano, cobrindo a qualidade e a execução técnica do serviço \
                         realizado.",
                    ),
                ],
                closing: String::new(),
            },
            investment: InvestmentText::default(),
            payment: ListSection {
                title: "FORMAS DE PAGAMENTO".into(),
                intro: "Oferecemos diversas formas de pagamento para facilitar a aquisição do seu \
                        sistema fotovoltaico. Entre as opções disponíveis estão:"
                    .into(),
                items: vec![
                    ListItem::labelled(
                        "Pagamento à Vista:",
                        "Desconto especial para pagamentos realizados à vista.",
                    ),
                    ListItem::labelled(
                        "Financiamento Bancário:",
                        "Parcerias com instituições financeiras que permitem financiar o sistema \
                         em até 120 meses, com condições acessíveis e taxas competitivas.",
                    ),
                    ListItem::labelled(
                        "Pagamento Parcelado:",
                        "Possibilidade de parcelamento direto no cartão",
                    ),
                ],
                closing: "Todas as opções são planejadas para proporcionar flexibilidade e \
                          viabilizar o investimento em energia solar de forma prática e acessível."
                    .into(),
            },
            insurance: ListSection {
                title: "DIFERENCIAL !".into(),
                intro: "Em parceria com a Yelum Seguradora, disponibilizamos uma excelente opção de \
                        seguro para os equipamentos do seu sistema fotovoltaico, proporcionando \
                        proteção completa e total tranquilidade. O valor do seguro varia entre 1% e \
                        1,5% do custo total do sistema por ano e oferece cobertura para:"
                    .into(),
                items: vec![
                    ListItem::plain("Danos acidentais de origem externa;"),
                    ListItem::plain("Vendavais e chuvas de granizo;"),
                    ListItem::plain("Incêndios, quedas de raio e explosões;"),
                    ListItem::plain("Roubo ou furto."),
                ],
                closing: "Essa parceria reforça nosso compromisso em oferecer não apenas soluções \
                          de qualidade e eficiência, mas também a segurança necessária para o seu \
                          investimento em energia solar. Caso tenha interesse, realizamos a \
                          simulação do valor do seguro no momento do fechamento do projeto \
                          fotovoltaico e finalizamos o processo diretamente com a seguradora."
                    .into(),
            },
            benefit: ChartText::default(),
            returns: ReturnText::default(),
        }
    }
}

impl Default for CompanyIdentity {
    fn default() -> Self {
        Self { name: "LEVEL5".into(), tagline: "ENGENHARIA ELÉTRICA".into() }
    }
}

impl Default for CoverText {
    fn default() -> Self {
        Self {
            heading: vec!["PROPOSTA".into(), "COMERCIAL".into()],
            client_label: "CLIENTE:".into(),
        }
    }
}

impl Default for EquipmentText {
    fn default() -> Self {
        Self {
            title: "DESCRIÇÃO DOS ITENS:".into(),
            module_description: "Módulos Fotovoltaicos".into(),
            module_suffix: " - PROCEL".into(),
            inverter_singular: "inversor".into(),
            inverter_plural: "inversores".into(),
            inverter_description: "fotovoltaico".into(),
            manufacturer: "fabricado pela".into(),
            features_joiner: "com".into(),
        }
    }
}

impl Default for InvestmentText {
    fn default() -> Self {
        Self {
            title: "INVESTIMENTO".into(),
            kit_label: "KIT FOTOVOLTAICO".into(),
            labor_label: "MÃO DE OBRA, PROJETO E PERIFÉRICOS".into(),
            total_label: "INVESTIMENTO TOTAL".into(),
        }
    }
}

impl Default for ChartText {
    fn default() -> Self {
        Self {
            title: "CUSTO X BENEFÍCIO".into(),
            intro: "O gráfico abaixo ilustra a produção estimada de energia mês a mês. Essa \
                    estimativa considera a variação de irradiância solar ao longo do ano, \
                    garantindo uma visão realista do desempenho do sistema em diferentes períodos."
                .into(),
            chart_title: "Produção mensal estimada".into(),
            chart_subtitle: "Sistema com {modules} módulos fotovoltaicos".into(),
            chart_axis: "Mês".into(),
            chart_average: "Média".into(),
        }
    }
}

impl Default for ReturnText {
    fn default() -> Self {
        Self {
            title: "RETORNO DO INVESTIMENTO".into(),
            intro: "Uma das etapas mais importantes para avaliar o custo-benefício do sistema \
                    fotovoltaico é o cálculo do retorno sobre o investimento. Com base nos dados \
                    fornecidos, projetamos os seguintes resultados:"
                .into(),
            payback_label: "Lucro a partir do {year}º ano:".into(),
            payback_text: "O sistema começará a gerar um retorno acumulado de".into(),
            economy_label: "Retorno significativo em 25 anos:".into(),
            economy_text: "Economia acumulada de".into(),
            closing: "Com essas premissas, o investimento no sistema fotovoltaico se mostra \
                      altamente vantajoso, garantindo economia no curto prazo e uma valorização \
                      significativa no longo prazo."
                .into(),
            table: TableHeadings::default(),
        }
    }
}

impl Default for TableHeadings {
    fn default() -> Self {
        Self {
            year: "Ano".into(),
            balance: "Saldo".into(),
            monthly_saving: "Economia média mensal".into(),
            annual_saving: "Economia anual".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn built_in_content_has_four_warranty_clauses() {
        let content = ContentTemplates::default();
        assert_eq!(content.version, CONTENT_VERSION);
        assert_eq!(content.warranty.items.len(), 4);
        assert!(content.warranty.items.iter().all(|i| !i.label.is_empty()));
        assert_eq!(content.insurance.items.len(), 4);
        assert!(content.insurance.items.iter().all(|i| i.label.is_empty()));
    }

    #[test]
    fn partial_override_keeps_the_rest() {
        let content = ContentTemplates::from_json_str(
            r#"{ "company": { "name": "SOLAR SUL", "tagline": "ENERGIA" },
                 "equipment": { "title": "ITENS", "module_description": "Painéis",
                                "inverter_singular": "inversor", "inverter_plural": "inversores",
                                "inverter_description": "solar", "manufacturer": "da marca",
                                "features_joiner": "com" } }"#,
        )
        .unwrap();
        assert_eq!(content.company.name, "SOLAR SUL");
        assert_eq!(content.equipment.module_suffix, "");
        assert_eq!(content.returns, ReturnText::default());
    }

    #[test]
    fn round_trips_through_json() {
        let json = serde_json::to_string(&ContentTemplates::default()).unwrap();
        assert_eq!(ContentTemplates::from_json_str(&json).unwrap(), ContentTemplates::default());
    }

    #[test]
    fn malformed_json_is_reported() {
        assert!(matches!(
            ContentTemplates::from_json_str("{ \"version\": \"one\" }"),
            Err(ContentError::Json(_))
        ));
    }
}
