use colored::Colorize;
use comfy_table::{Cell, CellAlignment, Table};

use super::{ensure_dealer, ensure_model, load_records, SourceArgs};
use crate::aggregator::{shares, summarize_dealers, summarize_models, summarize_salespeople, top_n};
use crate::error::Result;
use crate::fmt::{pct, units};
use crate::models::Summary;
use crate::settings::load_settings;

/// Resolve the row limit: explicit flag, else settings. Zero means no limit.
fn row_limit(top: Option<usize>, len: usize) -> usize {
    match top.unwrap_or_else(|| load_settings().top_n) {
        0 => len,
        n => n,
    }
}

fn units_cell(count: i64) -> Cell {
    let text = if count < 0 {
        units(count).red().to_string()
    } else {
        units(count)
    };
    Cell::new(text).set_alignment(CellAlignment::Right)
}

/// Ranked table of one summary level. Shares are relative to the whole level,
/// so the percentages of a truncated table need not add up to 100.
pub(crate) fn summary_table<S: Summary + Clone>(summaries: &[S], limit: usize) -> Table {
    let total = summaries
        .iter()
        .fold(0i64, |acc, s| acc.saturating_add(s.units()));
    let with_share: Vec<(S, f64)> = summaries.iter().cloned().zip(shares(summaries)).collect();
    let ranked = top_n(&with_share, limit, |(s, _)| s.units());

    let mut table = Table::new();
    table.set_header(vec!["#", "Name", "ID", "Units", "Share"]);
    for (i, (s, share)) in ranked.iter().enumerate() {
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(s.name()),
            Cell::new(s.key()),
            units_cell(s.units()),
            Cell::new(pct(*share)).set_alignment(CellAlignment::Right),
        ]);
    }
    if ranked.len() < summaries.len() {
        table.add_row(vec![
            Cell::new(""),
            Cell::new(format!("… {} more", summaries.len() - ranked.len()).dimmed()),
            Cell::new(""),
            Cell::new(""),
            Cell::new(""),
        ]);
    }
    table.add_row(vec![
        Cell::new(""),
        Cell::new("Total".bold()),
        Cell::new(""),
        units_cell(total),
        Cell::new(""),
    ]);
    table
}

pub fn models(source: &SourceArgs, top: Option<usize>) -> Result<()> {
    let records = load_records(source)?;
    let data = summarize_models(&records);
    if data.is_empty() {
        println!("No sales records found.");
        return Ok(());
    }
    let table = summary_table(&data, row_limit(top, data.len()));
    println!("{}\n{table}", "Units by Model".bold());
    Ok(())
}

pub fn dealers(source: &SourceArgs, model: &str, top: Option<usize>) -> Result<()> {
    let records = load_records(source)?;
    ensure_model(&records, model)?;
    let data = summarize_dealers(&records, model);
    let table = summary_table(&data, row_limit(top, data.len()));
    println!("{}\n{table}", format!("Units by Dealer — model {model}").bold());
    Ok(())
}

pub fn salespeople(source: &SourceArgs, model: &str, dealer: &str, top: Option<usize>) -> Result<()> {
    let records = load_records(source)?;
    ensure_dealer(&records, model, dealer)?;
    let data = summarize_salespeople(&records, model, dealer);
    let table = summary_table(&data, row_limit(top, data.len()));
    println!(
        "{}\n{table}",
        format!("Units by Salesperson — model {model}, dealer {dealer}").bold()
    );
    Ok(())
}
