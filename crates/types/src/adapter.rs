//! Flat request shape accepted at the transport boundary.
//!
//! Older clients send every field at the top level instead of the nested
//! `client`/`system`/`investment` groups. Both shapes collapse into the one
//! canonical [`ProposalInput`].

use crate::model::{
    Client, Investment, InverterSpec, ModuleSpec, MonthlyProduction, ProposalInput, SystemSpec,
    YearlyReturn,
};
use serde::Deserialize;

fn default_module_kind() -> String {
    "Mono".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct FlatProposalRequest {
    pub client_name: String,
    pub module_quantity: u32,
    pub module_spec: String,
    pub module_power_w: u32,
    #[serde(default = "default_module_kind")]
    pub module_kind: String,
    pub inverter_quantity: u32,
    pub inverter_spec: String,
    pub inverter_power_kw: f64,
    #[serde(default)]
    pub inverter_features: String,
    pub kit_cost: f64,
    pub labor_cost: f64,
    #[serde(default)]
    pub monthly_production: Vec<MonthlyProduction>,
    #[serde(default)]
    pub yearly_returns: Vec<YearlyReturn>,
}

impl From<FlatProposalRequest> for ProposalInput {
    fn from(flat: FlatProposalRequest) -> Self {
        ProposalInput {
            client: Client { name: flat.client_name },
            system: SystemSpec {
                modules: ModuleSpec {
                    quantity: flat.module_quantity,
                    brand: flat.module_spec,
                    power_w: flat.module_power_w,
                    kind: flat.module_kind,
                },
                inverters: InverterSpec {
                    quantity: flat.inverter_quantity,
                    brand: flat.inverter_spec,
                    power_kw: flat.inverter_power_kw,
                    features: flat.inverter_features,
                },
            },
            investment: Investment { kit_cost: flat.kit_cost, labor_cost: flat.labor_cost },
            monthly_production: flat.monthly_production,
            yearly_returns: flat.yearly_returns,
        }
    }
}

/// Either request shape, as found on the wire.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ProposalRequest {
    Nested(ProposalInput),
    Flat(FlatProposalRequest),
}

impl ProposalRequest {
    pub fn into_input(self) -> ProposalInput {
        match self {
            ProposalRequest::Nested(input) => input,
            ProposalRequest::Flat(flat) => flat.into(),
        }
    }
}

impl From<ProposalRequest> for ProposalInput {
    fn from(request: ProposalRequest) -> Self {
        request.into_input()
    }
}
