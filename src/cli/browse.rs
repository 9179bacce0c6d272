use super::{load_dashboard, load_records, SourceArgs};
use crate::browser::DrillBrowser;
use crate::error::Result;
use crate::tui::run_view;

pub fn run(source: &SourceArgs) -> Result<()> {
    let dash = load_dashboard(source)?;
    if dash.records().is_empty() {
        println!("No sales records found.");
        return Ok(());
    }
    let source = source.clone();
    let mut browser = DrillBrowser::new(dash).with_reload(move || load_records(&source));
    run_view(&mut browser)
}
