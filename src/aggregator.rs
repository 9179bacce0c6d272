use std::collections::HashMap;

use crate::models::{DealerSummary, ModelSummary, SaleRecord, SalespersonSummary, Summary};

// ---------------------------------------------------------------------------
// Grouping helper
// ---------------------------------------------------------------------------

/// Group records by `key`, summing units. Groups come out in first-seen order
/// and each keeps the display name of its first record.
fn group<'a, K, T>(
    records: impl Iterator<Item = &'a SaleRecord>,
    key: K,
    mut make: impl FnMut(&'a SaleRecord) -> T,
    units: impl Fn(&mut T) -> &mut i64,
) -> Vec<T>
where
    K: Fn(&'a SaleRecord) -> &'a str,
{
    let mut index: HashMap<&'a str, usize> = HashMap::new();
    let mut out: Vec<T> = Vec::new();
    for r in records {
        let k = key(r);
        match index.get(k) {
            Some(&i) => {
                let total = units(&mut out[i]);
                *total = total.saturating_add(r.units);
            }
            None => {
                index.insert(k, out.len());
                let mut entry = make(r);
                *units(&mut entry) = r.units;
                out.push(entry);
            }
        }
    }
    out
}

// ---------------------------------------------------------------------------
// Summary levels
// ---------------------------------------------------------------------------

pub fn summarize_models(records: &[SaleRecord]) -> Vec<ModelSummary> {
    group(
        records.iter(),
        |r| r.model_id.as_str(),
        |r| ModelSummary {
            model_id: r.model_id.clone(),
            name: r.model_name.clone(),
            total_units: 0,
        },
        |s| &mut s.total_units,
    )
}

pub fn summarize_dealers(records: &[SaleRecord], model_id: &str) -> Vec<DealerSummary> {
    group(
        records.iter().filter(|r| r.model_id == model_id),
        |r| r.dealer_id.as_str(),
        |r| DealerSummary {
            model_id: r.model_id.clone(),
            dealer_id: r.dealer_id.clone(),
            name: r.dealer_name.clone(),
            units: 0,
        },
        |s| &mut s.units,
    )
}

pub fn summarize_salespeople(
    records: &[SaleRecord],
    model_id: &str,
    dealer_id: &str,
) -> Vec<SalespersonSummary> {
    group(
        records
            .iter()
            .filter(|r| r.model_id == model_id && r.dealer_id == dealer_id),
        |r| r.salesperson_id.as_str(),
        |r| SalespersonSummary {
            model_id: r.model_id.clone(),
            dealer_id: r.dealer_id.clone(),
            salesperson_id: r.salesperson_id.clone(),
            name: r.salesperson_name.clone(),
            units: 0,
        },
        |s| &mut s.units,
    )
}

// ---------------------------------------------------------------------------
// Ranking and shares
// ---------------------------------------------------------------------------

/// The `n` items with the largest `by` value, descending. Ties keep their input order.
pub fn top_n<T: Clone>(summaries: &[T], n: usize, by: impl Fn(&T) -> i64) -> Vec<T> {
    let mut ranked: Vec<&T> = summaries.iter().collect();
    // sort_by is stable
    ranked.sort_by(|a, b| by(b).cmp(&by(a)));
    ranked.into_iter().take(n).cloned().collect()
}

pub fn total_units(records: &[SaleRecord]) -> i64 {
    records.iter().fold(0i64, |acc, r| acc.saturating_add(r.units))
}

/// Percentage of the level total held by each summary, aligned with the input.
pub fn shares<S: Summary>(summaries: &[S]) -> Vec<f64> {
    let total = summaries
        .iter()
        .fold(0i64, |acc, s| acc.saturating_add(s.units()));
    summaries
        .iter()
        .map(|s| {
            if total != 0 {
                s.units() as f64 / total as f64 * 100.0
            } else {
                0.0
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::seq::SliceRandom;
    use rand::SeedableRng;

    use super::*;

    fn rec(model: &str, dealer: &str, person: &str, units: i64) -> SaleRecord {
        SaleRecord {
            model_id: model.to_string(),
            dealer_id: dealer.to_string(),
            salesperson_id: person.to_string(),
            model_name: format!("Model {model}"),
            dealer_name: format!("Dealer {dealer}"),
            salesperson_name: format!("Person {person}"),
            units,
        }
    }

    fn worked_example() -> Vec<SaleRecord> {
        vec![
            rec("m1", "d1", "s1", 5),
            rec("m1", "d1", "s2", 3),
            rec("m1", "d2", "s3", 2),
        ]
    }

    fn mixed() -> Vec<SaleRecord> {
        vec![
            rec("m2", "d1", "s1", 4),
            rec("m1", "d1", "s1", 7),
            rec("m2", "d3", "s9", 1),
            rec("m1", "d2", "s4", 2),
            rec("m3", "d1", "s2", 0),
            rec("m2", "d1", "s5", 6),
            rec("m1", "d1", "s1", 1),
        ]
    }

    #[test]
    fn test_worked_example() {
        let r = worked_example();
        let models = summarize_models(&r);
        assert_eq!(models.len(), 1);
        assert_eq!(models[0].model_id, "m1");
        assert_eq!(models[0].total_units, 10);

        let dealers = summarize_dealers(&r, "m1");
        assert_eq!(dealers.len(), 2);
        assert!(dealers.iter().any(|d| d.dealer_id == "d1" && d.units == 8));
        assert!(dealers.iter().any(|d| d.dealer_id == "d2" && d.units == 2));

        let people = summarize_salespeople(&r, "m1", "d1");
        assert_eq!(people.len(), 2);
        assert!(people.iter().any(|p| p.salesperson_id == "s1" && p.units == 5));
        assert!(people.iter().any(|p| p.salesperson_id == "s2" && p.units == 3));
    }

    #[test]
    fn test_empty_input() {
        assert!(summarize_models(&[]).is_empty());
        assert!(summarize_dealers(&[], "x").is_empty());
        assert!(summarize_salespeople(&[], "x", "y").is_empty());
        assert_eq!(total_units(&[]), 0);
    }

    #[test]
    fn test_unknown_parent_yields_empty() {
        let r = worked_example();
        assert!(summarize_dealers(&r, "nope").is_empty());
        assert!(summarize_salespeople(&r, "m1", "nope").is_empty());
    }

    #[test]
    fn test_negative_units_pass_through() {
        let r = vec![rec("m1", "d1", "s1", -2)];
        let models = summarize_models(&r);
        assert_eq!(models[0].total_units, -2);
        assert_eq!(summarize_dealers(&r, "m1")[0].units, -2);
    }

    #[test]
    fn test_first_seen_order() {
        let models = summarize_models(&mixed());
        let ids: Vec<&str> = models.iter().map(|m| m.model_id.as_str()).collect();
        assert_eq!(ids, vec!["m2", "m1", "m3"]);
    }

    #[test]
    fn test_first_seen_name_wins() {
        let mut a = rec("m1", "d1", "s1", 1);
        a.model_name = "Sedan".to_string();
        let mut b = rec("m1", "d1", "s1", 1);
        b.model_name = "Sedan (renamed)".to_string();
        let models = summarize_models(&[a, b]);
        assert_eq!(models[0].name, "Sedan");
        assert_eq!(models[0].total_units, 2);
    }

    #[test]
    fn test_model_totals_conserve_units() {
        let r = mixed();
        let sum: i64 = summarize_models(&r).iter().map(|m| m.total_units).sum();
        assert_eq!(sum, total_units(&r));
    }

    #[test]
    fn test_dealer_totals_match_parent_model() {
        let r = mixed();
        for m in summarize_models(&r) {
            let dealers = summarize_dealers(&r, &m.model_id);
            let sum: i64 = dealers.iter().map(|d| d.units).sum();
            assert_eq!(sum, m.total_units, "model {}", m.model_id);
            for d in dealers {
                let people = summarize_salespeople(&r, &m.model_id, &d.dealer_id);
                let psum: i64 = people.iter().map(|p| p.units).sum();
                assert_eq!(psum, d.units, "dealer {}", d.dealer_id);
            }
        }
    }

    #[test]
    fn test_shuffle_keeps_summary_multiset() {
        let r = mixed();
        let mut expected = summarize_models(&r);
        expected.sort_by(|a, b| a.model_id.cmp(&b.model_id));

        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..10 {
            let mut shuffled = r.clone();
            shuffled.shuffle(&mut rng);
            let mut got = summarize_models(&shuffled);
            got.sort_by(|a, b| a.model_id.cmp(&b.model_id));
            assert_eq!(got, expected);
        }
    }

    #[test]
    fn test_input_not_mutated() {
        let r = mixed();
        let before = r.clone();
        let _ = summarize_models(&r);
        let _ = summarize_dealers(&r, "m1");
        assert_eq!(r, before);
    }

    #[test]
    fn test_top_n_descending_and_stable() {
        let items = vec![("a", 3), ("b", 5), ("c", 3), ("d", 1), ("e", 5)];
        let top = top_n(&items, 4, |i| i.1);
        let keys: Vec<&str> = top.iter().map(|i| i.0).collect();
        assert_eq!(keys, vec!["b", "e", "a", "c"]);
    }

    #[test]
    fn test_top_n_larger_than_input() {
        let models = summarize_models(&mixed());
        let top = top_n(&models, 50, |m| m.total_units);
        assert_eq!(top.len(), models.len());
        assert_eq!(top[0].model_id, "m2");
        assert!(top_n(&models, 0, |m| m.total_units).is_empty());
    }

    #[test]
    fn test_shares() {
        let dealers = summarize_dealers(&worked_example(), "m1");
        let pct = shares(&dealers);
        assert_eq!(pct.len(), 2);
        assert!((pct[0] - 80.0).abs() < 1e-9);
        assert!((pct[1] - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_shares_zero_total() {
        let r = vec![rec("m1", "d1", "s1", 0), rec("m2", "d1", "s1", 0)];
        let pct = shares(&summarize_models(&r));
        assert_eq!(pct, vec![0.0, 0.0]);
    }

    #[test]
    fn test_saturating_sum() {
        let r = vec![rec("m1", "d1", "s1", i64::MAX), rec("m1", "d1", "s2", 10)];
        assert_eq!(summarize_models(&r)[0].total_units, i64::MAX);
    }
}
