use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use sidera::{ConstellationRequest, OutputStore, PipelineError, SideraConfig};
use sidera_core::{Constellation, EdgeThresholds, ErrorClass, RenderOptions};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

#[derive(Debug)]
enum CliError {
    Io(std::io::Error),
    Json(serde_json::Error),
    Config(sidera_core::Error),
    Render(sidera_render::Error),
    Pipeline(PipelineError),
}

impl CliError {
    /// 2 for bad canvas/config settings, 3 for bad input documents, 1 for everything else.
    fn exit_code(&self) -> i32 {
        fn by_class(class: ErrorClass) -> i32 {
            match class {
                ErrorClass::Configuration => 2,
                ErrorClass::Validation => 3,
            }
        }

        match self {
            CliError::Json(_) => 3,
            CliError::Config(err) | CliError::Pipeline(PipelineError::Config(err)) => {
                by_class(err.class())
            }
            CliError::Render(err) | CliError::Pipeline(PipelineError::Render(err)) => {
                err.input_class().map_or(1, by_class)
            }
            CliError::Pipeline(PipelineError::InvalidProjectId { .. }) => 3,
            CliError::Io(_) | CliError::Pipeline(_) => 1,
        }
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
            CliError::Config(err) => write!(f, "{err}"),
            CliError::Render(err) => write!(f, "{err}"),
            CliError::Pipeline(err) => write!(f, "{err}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

impl From<sidera_core::Error> for CliError {
    fn from(value: sidera_core::Error) -> Self {
        Self::Config(value)
    }
}

impl From<sidera_render::Error> for CliError {
    fn from(value: sidera_render::Error) -> Self {
        Self::Render(value)
    }
}

impl From<PipelineError> for CliError {
    fn from(value: PipelineError) -> Self {
        Self::Pipeline(value)
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "sidera-cli",
    about = "Project constellation graphs and render guide images",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the pixel position of every node as JSON
    Project {
        #[command(flatten)]
        canvas: CanvasArgs,
        #[arg(long, default_value_t = false)]
        pretty: bool,
        /// Constellation JSON (request or bare graph); '-' or omitted reads stdin
        input: Option<String>,
    },
    /// Render the guide skeleton to a PNG
    Skeleton {
        #[command(flatten)]
        canvas: CanvasArgs,
        /// Output path (defaults to next to the input, or ./out.png for stdin)
        #[arg(long, value_name = "PNG")]
        out: Option<PathBuf>,
        input: Option<String>,
    },
    /// Render the edge-map control image to a PNG
    Control {
        #[command(flatten)]
        canvas: CanvasArgs,
        /// Lower hysteresis threshold
        #[arg(long, default_value_t = 50.0)]
        low: f64,
        /// Upper hysteresis threshold
        #[arg(long, default_value_t = 150.0)]
        high: f64,
        #[arg(long, value_name = "PNG")]
        out: Option<PathBuf>,
        input: Option<String>,
    },
    /// Store the skeleton as the project's final image and print the outcome
    Simple {
        #[command(flatten)]
        canvas: CanvasArgs,
        /// JSON configuration file; SIDERA_OUTPUT_DIR overrides its output root
        #[arg(long, value_name = "JSON")]
        config: Option<PathBuf>,
        #[arg(long, default_value_t = false)]
        pretty: bool,
        /// Constellation request JSON; '-' or omitted reads stdin
        input: Option<String>,
    },
}

#[derive(Args, Debug)]
struct CanvasArgs {
    /// Canvas width in pixels
    #[arg(long)]
    width: Option<u32>,
    /// Canvas height in pixels
    #[arg(long)]
    height: Option<u32>,
    /// Margin as a fraction of the canvas width, in [0, 0.5)
    #[arg(long)]
    padding: Option<f64>,
}

impl CanvasArgs {
    fn apply(&self, base: RenderOptions) -> RenderOptions {
        RenderOptions {
            width: self.width.unwrap_or(base.width),
            height: self.height.unwrap_or(base.height),
            padding_ratio: self.padding.unwrap_or(base.padding_ratio),
        }
    }
}

fn read_input(input: Option<&str>) -> Result<String, CliError> {
    match input {
        None | Some("-") => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
        Some(path) => Ok(std::fs::read_to_string(path)?),
    }
}

/// Accepts a full request document as well as a bare `{nodes, edges}` graph.
fn parse_constellation(text: &str) -> Result<Constellation, CliError> {
    Ok(serde_json::from_str(text)?)
}

fn write_json(value: &impl Serialize, pretty: bool) -> Result<(), CliError> {
    let mut out = std::io::stdout().lock();
    if pretty {
        serde_json::to_writer_pretty(&mut out, value)?;
    } else {
        serde_json::to_writer(&mut out, value)?;
    }
    writeln!(out)?;
    Ok(())
}

fn default_png_out_path(input: Option<&str>, suffix: &str) -> PathBuf {
    match input {
        Some(path) if path != "-" => {
            let p = Path::new(path);
            let stem = p.file_stem().map(|s| s.to_string_lossy()).unwrap_or_default();
            p.with_file_name(format!("{stem}{suffix}.png"))
        }
        _ => PathBuf::from(format!("out{suffix}.png")),
    }
}

fn write_png(image: &sidera_render::RgbImage, path: &Path) -> Result<(), CliError> {
    let bytes = sidera_render::encode_png(image)?;
    std::fs::write(path, bytes)?;
    tracing::info!(path = %path.display(), "wrote png");
    Ok(())
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::Project {
            canvas,
            pretty,
            input,
        } => {
            let constellation = parse_constellation(&read_input(input.as_deref())?)?;
            let options = canvas.apply(RenderOptions::default());
            let pixels = sidera_render::project(&constellation.nodes, &options)?;
            write_json(&pixels, pretty)
        }
        Command::Skeleton { canvas, out, input } => {
            let constellation = parse_constellation(&read_input(input.as_deref())?)?;
            let options = canvas.apply(RenderOptions::default());
            let image = sidera_render::render_skeleton(&constellation, &options)?;
            let out = out.unwrap_or_else(|| default_png_out_path(input.as_deref(), ""));
            write_png(&image, &out)
        }
        Command::Control {
            canvas,
            low,
            high,
            out,
            input,
        } => {
            let constellation = parse_constellation(&read_input(input.as_deref())?)?;
            let options = canvas.apply(RenderOptions::default());
            let image =
                sidera_render::render_control(&constellation, &options, EdgeThresholds { low, high })?;
            let out = out.unwrap_or_else(|| default_png_out_path(input.as_deref(), "_control"));
            write_png(&image, &out)
        }
        Command::Simple {
            canvas,
            config,
            pretty,
            input,
        } => {
            let mut config = match config {
                Some(path) => SideraConfig::from_path(&path)?,
                None => SideraConfig::default(),
            };
            config.apply_env();
            config.render = canvas.apply(config.render);

            let request: ConstellationRequest = serde_json::from_str(&read_input(input.as_deref())?)?;
            let store = OutputStore::new(&config.output);
            let outcome = sidera::generate_simple(&store, &config.render, &request)?;
            write_json(&outcome, pretty)
        }
    }
}

fn main() {
    let cli = Cli::parse();

    if std::env::var_os("RUST_LOG").is_some() {
        tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_writer(std::io::stderr)
            .init();
    }

    if let Err(err) = run(cli) {
        eprintln!("{err}");
        std::process::exit(err.exit_code());
    }
}
