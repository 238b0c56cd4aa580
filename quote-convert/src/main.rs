use clap::Parser;
use quote_convert_rs::{export_quote, CustomFont, ExportResolution, FontConfig, QuoteSettings};
use std::path::PathBuf;
use std::process::ExitCode;
use std::str::FromStr;
use std::sync::Arc;

/// quote-convert: render a quote settings file to a PNG image
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Path to the input settings JSON file
    #[clap(short, long)]
    pub input_settings_file: String,

    /// Path of the PNG file to create (default: quote-<size>px-<timestamp>.png)
    #[clap(short, long)]
    pub output_png_file: Option<PathBuf>,

    /// Output resolution: 1080, hd (1920), 2k (2560), 4k (4096), or a pixel size
    #[clap(short, long, default_value = "1080")]
    pub resolution: String,

    /// Additional directory to scan for font files (repeatable)
    #[clap(long)]
    pub font_dir: Vec<PathBuf>,

    /// Font file (TTF/OTF) to register explicitly (repeatable)
    #[clap(long)]
    pub font_file: Vec<PathBuf>,

    /// Do not load fonts installed on the system
    #[clap(long)]
    pub no_system_fonts: bool,

    /// Pixels per inch recorded in the PNG metadata
    #[clap(long)]
    pub ppi: Option<f32>,
}

fn main() -> ExitCode {
    env_logger::init();
    let args: Args = Args::parse();

    // Parse resolution
    let resolution = match ExportResolution::from_str(&args.resolution) {
        Ok(resolution) => resolution,
        Err(err) => {
            eprintln!("{}", err);
            return ExitCode::FAILURE;
        }
    };

    // Read input file
    let input_path = shellexpand::tilde(&args.input_settings_file).to_string();
    let settings_str = match std::fs::read_to_string(&input_path) {
        Ok(settings_str) => settings_str,
        Err(err) => {
            eprintln!("Failed to read input file: {}\n{}", input_path, err);
            return ExitCode::FAILURE;
        }
    };

    // Parse and validate settings
    let settings = match QuoteSettings::from_json(&settings_str) {
        Ok(settings) => settings,
        Err(err) => {
            eprintln!("Failed to load settings: {}", err);
            return ExitCode::FAILURE;
        }
    };

    // Resolve fonts once; named families missing from the database fall
    // back to sans-serif at draw time
    let mut font_config = FontConfig {
        load_system_fonts: !args.no_system_fonts,
        font_dirs: args.font_dir.clone(),
        ..FontConfig::default()
    };
    for path in &args.font_file {
        match std::fs::read(path) {
            Ok(data) => font_config.custom_fonts.push(CustomFont {
                data: Arc::new(data),
            }),
            Err(err) => {
                eprintln!("Failed to read font file: {}\n{}", path.display(), err);
                return ExitCode::FAILURE;
            }
        }
    }
    let fonts = font_config.resolve();
    if fonts.face_count() == 0 {
        log::warn!("No font faces available; text will not render");
    }

    // Render and write the PNG
    match export_quote(
        &settings,
        resolution,
        &fonts,
        args.output_png_file.as_deref(),
        args.ppi,
    ) {
        Ok(path) => {
            println!("Wrote {}", path.display());
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("Rendering failed: {}", err);
            ExitCode::FAILURE
        }
    }
}
