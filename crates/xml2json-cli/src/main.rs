use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use xml2json::{json, xml, ConvertOptions, Direction, TextMode};

#[derive(Debug, Parser)]
#[command(
    name = "xml2json",
    version,
    about = "Converts XML to JSON or the other way around",
    override_usage = "xml2json -t xml2json -o file.json file.xml"
)]
struct Args {
    /// Input file (defaults to stdin)
    #[arg(value_name = "INPUT")]
    input: Option<PathBuf>,
    /// Conversion type; inferred from the input extension when omitted
    #[arg(short = 't', long = "type", value_enum)]
    kind: Option<TypeArg>,
    /// Write to OUT instead of stdout
    #[arg(short, long, value_name = "OUT")]
    out: Option<PathBuf>,
    /// Indent output by N spaces
    #[arg(long, value_name = "N", num_args = 0..=1, default_missing_value = "2")]
    pretty: Option<usize>,
    /// Keep whitespace around XML text content instead of trimming it
    #[arg(long)]
    preserve_whitespace: bool,
    /// Emit an XML declaration (json2xml only)
    #[arg(long)]
    declaration: bool,
    /// Maximum nesting depth for either parser (0 means unlimited)
    #[arg(long, value_name = "DEPTH")]
    max_depth: Option<u16>,
    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum TypeArg {
    #[value(name = "xml2json")]
    XmlToJson,
    #[value(name = "json2xml")]
    JsonToXml,
}

impl From<TypeArg> for Direction {
    fn from(value: TypeArg) -> Self {
        match value {
            TypeArg::XmlToJson => Self::XmlToJson,
            TypeArg::JsonToXml => Self::JsonToXml,
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let input_data = read_input(args.input.as_deref())?;
    let direction = match args
        .kind
        .map(Direction::from)
        .or_else(|| infer_direction(args.input.as_deref()))
    {
        Some(direction) => direction,
        None => {
            bail!(
                "could not infer conversion type; pass --type or provide an input file with a .xml or .json extension"
            );
        }
    };
    info!(%direction, bytes = input_data.len(), "converting");

    let options = build_options(&args);
    debug!(?options, "conversion options");

    let output = xml2json::convert_with_options(&input_data, direction, &options)
        .with_context(|| format!("{direction} conversion failed"))?;

    write_output(args.out.as_deref(), &output)?;
    Ok(())
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .without_time()
        .with_writer(io::stderr)
        .init();
}

fn build_options(args: &Args) -> ConvertOptions {
    let mut options = ConvertOptions::default();
    if args.preserve_whitespace {
        options.xml.text_mode = TextMode::Preserve;
    }
    if let Some(depth) = args.max_depth {
        options.xml.max_depth = depth;
        options.json.max_depth = depth;
    }
    options.json_output = json::WriterOptions {
        indent: args.pretty,
    };
    options.xml_output = xml::WriterOptions {
        declaration: args.declaration,
        indent: args.pretty,
    };
    options
}

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read input file {}", path.display())),
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("failed to read stdin")?;
            if buffer.trim().is_empty() {
                bail!("no input provided on stdin");
            }
            Ok(buffer)
        }
    }
}

fn write_output(path: Option<&Path>, data: &str) -> Result<()> {
    match path {
        Some(path) => std::fs::write(path, data)
            .with_context(|| format!("failed to write output file {}", path.display())),
        None => {
            let mut stdout = io::stdout().lock();
            writeln!(stdout, "{data}").context("failed to write stdout")?;
            Ok(())
        }
    }
}

fn infer_direction(path: Option<&Path>) -> Option<Direction> {
    let ext = path?.extension().and_then(|s| s.to_str())?;
    match ext.to_ascii_lowercase().as_str() {
        "xml" => Some(Direction::XmlToJson),
        "json" => Some(Direction::JsonToXml),
        _ => None,
    }
}
