use std::io::Write;

use super::{output_writer, SourceArgs};
use crate::demo::generate_records;
use crate::error::Result;
use crate::settings::load_settings;

/// Write a demo batch as a flat record list, ready to be fed back via `--input`.
pub fn run(source: &SourceArgs, output: Option<&str>) -> Result<()> {
    let seed = source.seed.unwrap_or_else(|| load_settings().demo_seed);
    let records = generate_records(seed);

    let mut writer = output_writer(output)?;
    serde_json::to_writer_pretty(&mut writer, &records)?;
    writeln!(writer)?;

    if let Some(path) = output {
        eprintln!("Wrote {} demo records (seed {seed}) to {path}", records.len());
    }
    Ok(())
}
