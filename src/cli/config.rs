use comfy_table::{Cell, Table};

use crate::error::Result;
use crate::settings::{load_settings, save_settings, settings_path, shellexpand_path};

pub fn run(
    data_file: Option<String>,
    demo_seed: Option<u64>,
    top_n: Option<usize>,
    fallback_to_demo: Option<bool>,
) -> Result<()> {
    let mut settings = load_settings();
    let changed = data_file.is_some() || demo_seed.is_some() || top_n.is_some() || fallback_to_demo.is_some();

    if let Some(f) = data_file {
        settings.data_file = shellexpand_path(&f);
    }
    if let Some(s) = demo_seed {
        settings.demo_seed = s;
    }
    if let Some(n) = top_n {
        settings.top_n = n;
    }
    if let Some(fb) = fallback_to_demo {
        settings.fallback_to_demo = fb;
    }
    if changed {
        save_settings(&settings)?;
        println!("Settings saved to {}", settings_path().display());
    }

    let mut table = Table::new();
    table.set_header(vec!["Setting", "Value"]);
    table.add_row(vec![Cell::new("data_file"), Cell::new(&settings.data_file)]);
    table.add_row(vec![Cell::new("demo_seed"), Cell::new(settings.demo_seed)]);
    table.add_row(vec![Cell::new("top_n"), Cell::new(settings.top_n)]);
    table.add_row(vec![Cell::new("fallback_to_demo"), Cell::new(settings.fallback_to_demo)]);
    println!("{table}");
    Ok(())
}
