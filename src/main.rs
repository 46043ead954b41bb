//! Kubus CLI - convert a CKAN dataset into an RDF Data Cube in N-Triples.
//!
//! Usage:
//!   kubus --dataset-id jumlah-penduduk
//!   kubus --dataset-id apbd-2014 --ckan-url http://data.go.id/ --output apbd.nt
//!   kubus --dataset-id jumlah-penduduk --csv penduduk.csv --descriptor package.json
//!   kubus --config kubus.json --sample-rows 50

use clap::{Parser, ValueEnum};
use kubus::config::ConfigFile;
use kubus::sink::NTriplesSink;
use kubus::sources::{CkanSource, DataSource, LocalSource};
use kubus::{Configuration, Error, Pipeline, Result};
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;
use std::sync::atomic::Ordering;

#[derive(Parser, Debug)]
#[command(name = "kubus")]
#[command(about = "Convert a CSV resource and its CKAN catalog record into an RDF Data Cube")]
struct Args {
    /// CKAN dataset id or name
    #[arg(short, long)]
    dataset_id: Option<String>,

    /// Base URL of the CKAN instance
    #[arg(long)]
    ckan_url: Option<String>,

    /// Namespace for the dataset, its observations and components
    #[arg(long)]
    base: Option<String>,

    /// URI of the Data Structure Definition
    #[arg(long)]
    dsd: Option<String>,

    /// Columns that never become components or values (comma-separated, replaces the defaults)
    #[arg(long, value_delimiter = ',')]
    ignored_fields: Option<Vec<String>>,

    /// Skip the Data Structure Definition
    #[arg(long)]
    no_dsd: bool,

    /// Rows sampled when deciding column roles
    #[arg(long)]
    sample_rows: Option<usize>,

    /// JSON configuration file; flags override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Local CSV file to read instead of the CKAN resource
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Local package_show JSON to read instead of querying CKAN (requires --csv)
    #[arg(long, requires = "csv")]
    descriptor: Option<PathBuf>,

    /// Output file, "-" for stdout
    #[arg(short, long, default_value = "-")]
    output: String,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Ntriples)]
    format: OutputFormat,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    /// One triple per line
    Ntriples,
}

impl Args {
    fn configuration(&self) -> Result<Configuration> {
        let file = match &self.config {
            Some(path) => ConfigFile::from_path(path)?,
            None => ConfigFile::default(),
        };
        let mut config = file.into_configuration(self.dataset_id.clone())?;

        if let Some(url) = &self.ckan_url {
            config = config.with_ckan_url(url.as_str());
        }
        if let Some(base) = &self.base {
            config = config.with_base_namespace(base.as_str());
        }
        if let Some(dsd) = &self.dsd {
            config = config.with_dsd_uri(dsd.as_str());
        }
        if let Some(fields) = &self.ignored_fields {
            config = config.with_ignored_fields(fields.iter().map(|f| f.trim().to_string()));
        }
        if self.no_dsd {
            config = config.with_generate_dsd(false);
        }
        if let Some(rows) = self.sample_rows {
            config = config.with_inference_sample_rows(rows);
        }
        config.validated()
    }

    fn source(&self, config: &Configuration) -> Result<Box<dyn DataSource>> {
        match &self.csv {
            Some(csv) => Ok(Box::new(LocalSource::new(self.descriptor.clone(), csv.clone()))),
            None => Ok(Box::new(CkanSource::new(config.ckan_url.as_str())?)),
        }
    }

    fn writer(&self) -> Result<Box<dyn Write + Send>> {
        if self.output == "-" {
            return Ok(Box::new(std::io::stdout()));
        }
        let file = File::create(&self.output).map_err(|e| {
            Error::Sink(format!("cannot create output file {}: {}", self.output, e))
        })?;
        Ok(Box::new(file))
    }
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    if let Err(e) = run(args).await {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<()> {
    let config = args.configuration()?;
    let source = args.source(&config)?;
    let mut sink = match args.format {
        OutputFormat::Ntriples => NTriplesSink::new(args.writer()?),
    };

    let mut pipeline = Pipeline::new(config, source);

    let stop = pipeline.stop_handle();
    ctrlc::set_handler(move || {
        log::warn!("Interrupt received, stopping after the current row");
        stop.store(true, Ordering::Relaxed);
    })
    .map_err(|e| Error::Config(format!("cannot install Ctrl-C handler: {}", e)))?;

    let summary = pipeline.run(&mut sink).await?;
    log::info!(
        "Wrote {} triples ({} components, {} observations, {:.0} rows/s)",
        sink.written(),
        summary.dsd_components,
        summary.observations,
        summary.rows_per_second()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_defaults_to_ntriples() {
        let args = Args::try_parse_from(["kubus", "--dataset-id", "apbd"]).unwrap();
        assert_eq!(args.format, OutputFormat::Ntriples);
        assert_eq!(args.output, "-");
    }

    #[test]
    fn test_unknown_format_is_rejected_by_parser() {
        let err = Args::try_parse_from(["kubus", "--dataset-id", "apbd", "--format", "turtle"])
            .unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::InvalidValue);
    }

    #[test]
    fn test_flags_override_defaults() {
        let args = Args::try_parse_from([
            "kubus",
            "--dataset-id",
            "apbd",
            "--ignored-fields",
            "tahun,catatan",
            "--no-dsd",
            "--sample-rows",
            "5",
        ])
        .unwrap();
        let config = args.configuration().unwrap();
        assert!(config.is_ignored("catatan"));
        assert!(!config.is_ignored("kode_kabkota"));
        assert!(!config.generate_dsd);
        assert_eq!(config.inference_sample_rows, 5);
    }
}
