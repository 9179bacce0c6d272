use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::models::SaleRecord;

struct DemoModel {
    id: &'static str,
    name: &'static str,
    /// Upper bound on units per salesperson in one batch.
    demand: i64,
}

const MODELS: &[DemoModel] = &[
    DemoModel { id: "camry", name: "Camry", demand: 14 },
    DemoModel { id: "corolla", name: "Corolla", demand: 18 },
    DemoModel { id: "rav4", name: "RAV4", demand: 16 },
    DemoModel { id: "land-cruiser", name: "Land Cruiser", demand: 4 },
    DemoModel { id: "hilux", name: "Hilux", demand: 7 },
    DemoModel { id: "highlander", name: "Highlander", demand: 6 },
];

struct DemoDealer {
    id: &'static str,
    name: &'static str,
    staff: &'static [(&'static str, &'static str)],
}

const DEALERS: &[DemoDealer] = &[
    DemoDealer {
        id: "d-central",
        name: "Central Motors",
        staff: &[("u-101", "Alina Sadykova"), ("u-102", "Timur Bekov"), ("u-103", "Dana Ospanova")],
    },
    DemoDealer {
        id: "d-north",
        name: "North Auto",
        staff: &[("u-201", "Ruslan Akhmetov"), ("u-202", "Madina Karimova")],
    },
    DemoDealer {
        id: "d-airport",
        name: "Airport Cars",
        staff: &[("u-301", "Erlan Nurpeisov"), ("u-302", "Saule Zhanova"), ("u-303", "Arman Tulegenov"), ("u-304", "Aigerim Seitova")],
    },
    DemoDealer {
        id: "d-east",
        name: "East Side Toyota",
        staff: &[("u-401", "Nurlan Iskakov"), ("u-402", "Zarina Abenova")],
    },
    DemoDealer {
        id: "d-riverside",
        name: "Riverside Auto Center",
        staff: &[("u-501", "Dias Omarov"), ("u-502", "Kamila Serikova"), ("u-503", "Asel Mukanova")],
    },
];

/// Chance that a given dealer carries a given model in the batch.
const CARRY_RATE: f64 = 0.75;

/// Deterministic demo batch for `seed`. Units are never negative.
pub fn generate_records(seed: u64) -> Vec<SaleRecord> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut records = Vec::new();

    for model in MODELS {
        let mut carried = 0;
        for (i, dealer) in DEALERS.iter().enumerate() {
            // Every model lands at one dealer at least
            let last_chance = carried == 0 && i == DEALERS.len() - 1;
            if !last_chance && !rng.gen_bool(CARRY_RATE) {
                continue;
            }
            carried += 1;
            for &(user_id, user_name) in dealer.staff {
                records.push(SaleRecord {
                    model_id: model.id.to_string(),
                    dealer_id: dealer.id.to_string(),
                    salesperson_id: user_id.to_string(),
                    model_name: model.name.to_string(),
                    dealer_name: dealer.name.to_string(),
                    salesperson_name: user_name.to_string(),
                    units: rng.gen_range(0..=model.demand),
                });
            }
        }
    }

    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::summarize_models;

    #[test]
    fn test_same_seed_same_records() {
        assert_eq!(generate_records(42), generate_records(42));
    }

    #[test]
    fn test_different_seeds_differ() {
        assert_ne!(generate_records(1), generate_records(2));
    }

    #[test]
    fn test_no_negative_units() {
        for seed in 0..20 {
            assert!(generate_records(seed).iter().all(|r| r.units >= 0));
        }
    }

    #[test]
    fn test_every_model_present() {
        for seed in 0..20 {
            let models = summarize_models(&generate_records(seed));
            assert_eq!(models.len(), MODELS.len(), "seed {seed}");
        }
    }

    #[test]
    fn test_names_populated() {
        let records = generate_records(3);
        assert!(records
            .iter()
            .all(|r| !r.model_name.is_empty() && !r.dealer_name.is_empty() && !r.salesperson_name.is_empty()));
    }
}
