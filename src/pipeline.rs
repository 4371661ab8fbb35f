use std::path::PathBuf;

use anyhow::{Context, Result, bail};

use crate::chart::render::render_figure;
use crate::config::Config;
use crate::data::loader::load_csv;
use crate::data::model::LaptopTable;
use crate::data::transform::{categorize_prices, normalize, reorder, COLUMN_ORDER};
use crate::preview;

/// Load and reshape the listings: normalize storage, reorder columns,
/// bucket prices.
pub fn prepare(config: &Config) -> Result<LaptopTable> {
    let raw = load_csv(&config.input)?;
    log::info!("loaded {} listings from {}", raw.len(), config.input.display());
    if raw.is_empty() {
        bail!("{} has no rows", config.input.display());
    }

    let normalized = normalize(&raw);
    let reordered = reorder(&normalized, &COLUMN_ORDER);
    let table = categorize_prices(&reordered);
    log::debug!("prepared {} rows x {} columns", table.len(), table.columns.len());
    Ok(table)
}

/// Render every figure of the configured profile. Returns the written paths.
pub fn render_all(table: &LaptopTable, config: &Config) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(&config.output_dir)
        .with_context(|| format!("creating {}", config.output_dir.display()))?;

    let mut written = Vec::new();
    for fig in config.profile.figures() {
        let path = config.output_dir.join(&fig.file_name);
        render_figure(table, &fig, &path, config.dpi)
            .with_context(|| format!("rendering {}", path.display()))?;
        log::info!("wrote {}", path.display());
        written.push(path);
    }
    Ok(written)
}

/// One batch run: prepare, preview, render.
pub fn run(config: &Config) -> Result<()> {
    let table = prepare(config)?;
    println!("{}", preview::head(&table, config.preview_rows));

    let written = render_all(&table, config)?;
    log::info!("{} chart(s) written to {}", written.len(), config.output_dir.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::data::model::PriceCategory;

    const HEADER: &str = "Brand,Processor,RAM (GB),Storage,GPU,Screen Size (inch),Resolution,Battery Life (hours),Weight (kg),Operating System,Price ($)";

    fn config_for(input: PathBuf) -> Config {
        Config {
            input,
            ..Config::default()
        }
    }

    #[test]
    fn prepare_runs_every_stage() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "{HEADER}").unwrap();
        writeln!(file, "Apple,Apple M2,16,1TB SSD,Integrated,14.2,3024x1964,18,1.6,macOS,2499").unwrap();
        writeln!(file, "Acer,Intel i3,4,64GB eMMC,Integrated,11.6,1366x768,10,1.2,Chrome OS,299").unwrap();
        writeln!(file, "Asus,Intel i5,8,eMMC,Integrated,14,1920x1080,8,1.4,Windows,450").unwrap();

        let table = prepare(&config_for(file.path().to_path_buf())).unwrap();

        assert_eq!(table.len(), 3);
        assert_eq!(table.columns.len(), COLUMN_ORDER.len() + 1);
        assert_eq!(table.rows[0].storage_size_gb, Some(1024.0));
        assert_eq!(table.rows[0].price_category, Some(PriceCategory::HighEnd));
        assert_eq!(table.rows[1].storage_type.as_deref(), Some("eMMC"));
        assert_eq!(table.rows[2].storage_size_gb, None);
    }

    #[test]
    fn empty_input_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "{HEADER}").unwrap();

        let err = prepare(&config_for(file.path().to_path_buf())).unwrap_err();
        assert!(err.to_string().contains("has no rows"));
    }

    #[test]
    fn missing_input_aborts() {
        let dir = tempfile::tempdir().unwrap();
        assert!(prepare(&config_for(dir.path().join("laptop_prices.csv"))).is_err());
    }
}
