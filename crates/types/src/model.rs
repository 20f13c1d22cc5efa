//! The proposal input model.
//!
//! Every entity here is a plain value object built fresh for one generation
//! request. Nothing is shared between requests.

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// The customer the proposal is addressed to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
    pub name: String,
}

fn default_module_kind() -> String {
    "Mono".to_string()
}

/// Photovoltaic modules of the installation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleSpec {
    pub quantity: u32,
    /// Brand and model label, printed verbatim.
    pub brand: String,
    pub power_w: u32,
    /// Cell technology tag, e.g. "Mono" or "Poly".
    #[serde(default = "default_module_kind")]
    pub kind: String,
}

/// Inverters of the installation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InverterSpec {
    pub quantity: u32,
    pub brand: String,
    pub power_kw: f64,
    /// Optional feature annotation such as "AFCI". Empty when absent.
    #[serde(default)]
    pub features: String,
}

impl InverterSpec {
    pub fn features(&self) -> Option<&str> {
        let trimmed = self.features.trim();
        (!trimmed.is_empty()).then_some(trimmed)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemSpec {
    pub modules: ModuleSpec,
    pub inverters: InverterSpec,
}

/// Up-front cost split into hardware and services.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Investment {
    /// Photovoltaic kit (modules, inverters, mounting).
    pub kit_cost: f64,
    /// Labor, project and peripherals.
    pub labor_cost: f64,
}

impl Investment {
    pub fn total(&self) -> f64 {
        self.kit_cost + self.labor_cost
    }
}

/// Identifies an entry of the monthly production series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MonthKey {
    /// Calendar month, 1 to 12.
    Month(u8),
    /// The yearly average, drawn apart from the chronological months.
    Average,
}

impl MonthKey {
    pub fn is_average(self) -> bool {
        matches!(self, MonthKey::Average)
    }

    fn parse_sentinel(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "average" | "média" | "media" => Some(MonthKey::Average),
            other => other.parse::<u8>().ok().map(MonthKey::Month),
        }
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MonthKey::Month(m) => write!(f, "{}", m),
            MonthKey::Average => f.write_str("average"),
        }
    }
}

impl Serialize for MonthKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            MonthKey::Month(m) => serializer.serialize_u8(*m),
            MonthKey::Average => serializer.serialize_str("average"),
        }
    }
}

impl<'de> Deserialize<'de> for MonthKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct MonthKeyVisitor;

        impl Visitor<'_> for MonthKeyVisitor {
            type Value = MonthKey;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a month number or the \"average\" sentinel")
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<MonthKey, E> {
                u8::try_from(v)
                    .map(MonthKey::Month)
                    .map_err(|_| E::custom(format!("month out of range: {}", v)))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<MonthKey, E> {
                u8::try_from(v)
                    .map(MonthKey::Month)
                    .map_err(|_| E::custom(format!("month out of range: {}", v)))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<MonthKey, E> {
                MonthKey::parse_sentinel(v)
                    .ok_or_else(|| E::custom(format!("unknown month key: {:?}", v)))
            }
        }

        deserializer.deserialize_any(MonthKeyVisitor)
    }
}

/// Estimated generation for one month (or the average).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonthlyProduction {
    pub month: MonthKey,
    pub generation_kwh: f64,
}

impl MonthlyProduction {
    pub fn month(month: u8, generation_kwh: f64) -> Self {
        Self { month: MonthKey::Month(month), generation_kwh }
    }

    pub fn average(generation_kwh: f64) -> Self {
        Self { month: MonthKey::Average, generation_kwh }
    }
}

/// One year of the payback schedule.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YearlyReturn {
    pub year: u32,
    /// Cumulative balance; negative until the investment is paid back.
    pub balance: f64,
    pub monthly_saving: f64,
    pub annual_saving: f64,
}

impl YearlyReturn {
    pub fn new(year: u32, balance: f64, monthly_saving: f64, annual_saving: f64) -> Self {
        Self { year, balance, monthly_saving, annual_saving }
    }
}

/// Everything needed to generate one proposal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProposalInput {
    pub client: Client,
    pub system: SystemSpec,
    pub investment: Investment,
    #[serde(default)]
    pub monthly_production: Vec<MonthlyProduction>,
    #[serde(default)]
    pub yearly_returns: Vec<YearlyReturn>,
}
