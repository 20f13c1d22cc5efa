use sunquote::{
    Client, Investment, InverterSpec, ModuleSpec, MonthlyProduction, ProposalInput, SystemSpec,
    YearlyReturn,
};

/// Twelve months of production followed by the yearly average.
pub fn production() -> Vec<MonthlyProduction> {
    let kwh = [
        1548.0, 1458.0, 1512.0, 1390.0, 1301.0, 1205.0, 1262.0, 1398.0, 1425.0, 1507.0, 1530.0,
        1584.0,
    ];
    let mut months: Vec<MonthlyProduction> = kwh
        .iter()
        .enumerate()
        .map(|(i, kwh)| MonthlyProduction::month(i as u8 + 1, *kwh))
        .collect();
    months.push(MonthlyProduction::average(1460.0));
    months
}

fn returns(balances: &[f64]) -> Vec<YearlyReturn> {
    balances
        .iter()
        .enumerate()
        .map(|(i, balance)| YearlyReturn::new(i as u32 + 1, *balance, 1460.0, 17520.0))
        .collect()
}

/// The reference proposal: no year reaches a positive balance.
pub fn proposal_without_payback() -> ProposalInput {
    ProposalInput {
        client: Client { name: "Maria Souza".into() },
        system: SystemSpec {
            modules: ModuleSpec {
                quantity: 60,
                brand: "Canadian Solar".into(),
                power_w: 665,
                kind: "Mono".into(),
            },
            inverters: InverterSpec {
                quantity: 1,
                brand: "Growatt".into(),
                power_kw: 20.0,
                features: String::new(),
            },
        },
        investment: Investment { kit_cost: 46028.29, labor_cost: 30000.00 },
        monthly_production: production(),
        yearly_returns: returns(&[-76028.29, -58508.29]),
    }
}

/// Same system, paying back in the second year.
pub fn proposal_with_payback() -> ProposalInput {
    ProposalInput {
        client: Client { name: "Comércio Bom Sol Ltda".into() },
        yearly_returns: returns(&[-76028.29, 5000.0, 20000.0]),
        ..proposal_without_payback()
    }
}

/// A full twenty-five year schedule.
pub fn proposal_with_full_schedule() -> ProposalInput {
    let balances: Vec<f64> = (0..25).map(|i| -76028.29 + 17520.0 * i as f64).collect();
    ProposalInput { yearly_returns: returns(&balances), ..proposal_without_payback() }
}
