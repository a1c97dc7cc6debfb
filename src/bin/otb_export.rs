use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::Parser;
use tracing::info;

use otb_tools_lib::config::ExportConfig;
use otb_tools_lib::item::ServerItemList;
use otb_tools_lib::otb::OtbWriter;

/// Export an item catalog (JSON) to OTB and/or XML.
///
/// Examples:
///   otb-export items.json --otb items.otb
///   otb-export items.json --otb items.otb --xml items.xml --client-version 1098
#[derive(Parser, Debug)]
#[command(name = "otb-export")]
#[command(about = "Write an item catalog as OTB and/or XML")]
struct Args {
    /// Item catalog in JSON format
    catalog: PathBuf,

    /// Destination of the OTB file
    #[arg(long)]
    otb: Option<PathBuf>,

    /// Destination of the XML dump
    #[arg(long)]
    xml: Option<PathBuf>,

    /// Export configuration file (JSON)
    #[arg(long, env = "OTB_EXPORT_CONFIG")]
    config: Option<PathBuf>,

    /// Override the catalog's major version
    #[arg(long)]
    major_version: Option<u32>,

    /// Override the catalog's minor version
    #[arg(long)]
    minor_version: Option<u32>,

    /// Override the client version (major * 100 + minor)
    #[arg(long)]
    client_version: Option<u32>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("otb_tools_lib=info,otb_export=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    if args.otb.is_none() && args.xml.is_none() {
        bail!("nothing to do: pass --otb and/or --xml");
    }

    let file_config = match &args.config {
        Some(path) => ExportConfig::from_file(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?,
        None => ExportConfig::default(),
    };
    let config = file_config.merged(&ExportConfig {
        major_version: args.major_version,
        minor_version: args.minor_version,
        client_version: args.client_version,
        ..Default::default()
    });

    let items = ServerItemList::from_json_file(&args.catalog)
        .with_context(|| format!("Failed to load catalog: {}", args.catalog.display()))?;

    info!(
        catalog = %args.catalog.display(),
        items = items.count(),
        "Exporting item catalog"
    );

    let writer = OtbWriter::with_config(&items, config);

    if let Some(path) = &args.otb {
        writer
            .write(path)
            .with_context(|| format!("Failed to write OTB: {}", path.display()))?;
    }

    if let Some(path) = &args.xml {
        writer
            .write_to_xml(path)
            .with_context(|| format!("Failed to write XML: {}", path.display()))?;
    }

    let version = writer.version_info()?;
    info!(build = version.build_number, csd = %version.csd_version, "Export complete");

    Ok(())
}
