use tracing::{info, warn};

use super::{ensure_dealer, ensure_model, load_dashboard, output_writer, LevelArg, SourceArgs};
use crate::error::{Result, SalesError};
use crate::export::{write_level, ExportFormat};

pub fn run(
    source: &SourceArgs,
    level: LevelArg,
    model: Option<&str>,
    dealer: Option<&str>,
    format: ExportFormat,
    output: Option<&str>,
) -> Result<()> {
    let mut dash = load_dashboard(source)?;

    match level {
        LevelArg::Models => {}
        LevelArg::Dealers => {
            let model = model.ok_or_else(|| {
                SalesError::Other("--model is required for the dealers level".to_string())
            })?;
            ensure_model(dash.records(), model)?;
            dash.select_model(model)?;
        }
        LevelArg::Salespeople => {
            let (model, dealer) = model.zip(dealer).ok_or_else(|| {
                SalesError::Other(
                    "--model and --dealer are required for the salespeople level".to_string(),
                )
            })?;
            ensure_dealer(dash.records(), model, dealer)?;
            dash.select_model(model)?;
            dash.select_dealer(dealer)?;
        }
    }

    let data = dash.level();
    if data.is_empty() {
        let sel = dash.selection();
        warn!(model = ?sel.model_id, dealer = ?sel.dealer_id, "no summaries for selection");
    }
    let writer = output_writer(output)?;
    write_level(writer, &data, format)?;
    info!(level = dash.view().label(), rows = data.len(), ?format, "exported summaries");
    if let Some(path) = output {
        eprintln!("Exported {} rows to {path}", data.len());
    }
    Ok(())
}
