//! favicon-theme CLI
//!
//! Usage:
//!   favicon-theme [OPTIONS] [FILE]
//!
//! Options:
//!   -l, --light <COLOR>     Paint color for light mode [default: #000000]
//!   -d, --dark <COLOR>      Paint color for dark mode [default: #FFFFFF]
//!   -p, --preview <MODE>    Print the resolved preview for a mode instead
//!   -o, --output <PATH>     Write to a file (or directory) instead of stdout
//!       --png <PATH>        Rasterize the preview to a PNG
//!       --size <PX>         PNG size in pixels [default: 64]
//!   -h, --help              Print help

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;

use favicon_theme::{
    ColorPair, ExportArtifact, SvgUpload, ThemeMode, ingest_and_inject, render_preview,
    resolve_preview,
};

#[derive(Parser)]
#[command(name = "favicon-theme")]
#[command(about = "Make SVG favicons follow the light/dark color scheme")]
struct Cli {
    /// Input SVG file (reads from stdin if not provided)
    input: Option<PathBuf>,

    /// Paint color for light mode
    #[arg(short, long, default_value = "#000000")]
    light: String,

    /// Paint color for dark mode
    #[arg(short, long, default_value = "#FFFFFF")]
    dark: String,

    /// Print the resolved preview for this mode instead of the adaptive SVG
    #[arg(short, long, value_enum)]
    preview: Option<ThemeMode>,

    /// Output file or directory (writes to stdout if not provided)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Rasterize the preview (light unless --preview is given) to this PNG file
    #[arg(long)]
    png: Option<PathBuf>,

    /// Size of the PNG in pixels
    #[arg(long, default_value_t = 64)]
    size: u32,
}

fn main() {
    let cli = Cli::parse();
    let colors = ColorPair::new(cli.light, cli.dark);

    let upload = match &cli.input {
        Some(path) => match fs::read(path) {
            Ok(bytes) => {
                let name = path.file_name().and_then(|n| n.to_str());
                SvgUpload::file(bytes, None, name)
            }
            Err(e) => {
                eprintln!("Error reading file '{}': {}", path.display(), e);
                process::exit(1);
            }
        },
        None => {
            let mut buffer = String::new();
            if let Err(e) = io::stdin().read_to_string(&mut buffer) {
                eprintln!("Error reading from stdin: {}", e);
                process::exit(1);
            }
            SvgUpload::paste(buffer)
        }
    };

    let adaptive = match ingest_and_inject(&upload, &colors) {
        Ok((_, adaptive)) => adaptive,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    let output = match cli.preview {
        Some(mode) => resolve_preview(&adaptive, mode, &colors),
        None => adaptive.clone(),
    };

    match &cli.output {
        Some(path) => {
            if let Err(e) = save(path, output) {
                eprintln!("Error writing '{}': {}", path.display(), e);
                process::exit(1);
            }
        }
        None => println!("{}", output),
    }

    if let Some(path) = &cli.png {
        let mode = cli.preview.unwrap_or_default();
        let preview = resolve_preview(&adaptive, mode, &colors);
        let Some(image) = render_preview(&preview, cli.size) else {
            eprintln!("Error: the {} preview could not be rasterized", mode);
            process::exit(1);
        };
        if let Err(e) = image.save(path) {
            eprintln!("Error writing '{}': {}", path.display(), e);
            process::exit(1);
        }
    }
}

/// Writes `contents` to `path`, or to `favicon-adaptive.svg` inside it when
/// `path` is a directory.
fn save(path: &Path, contents: String) -> io::Result<PathBuf> {
    let artifact = ExportArtifact::new(contents);
    if path.is_dir() {
        return artifact.save_in(path);
    }
    let dir = path.parent().unwrap_or(Path::new("."));
    match path.file_name().and_then(|n| n.to_str()) {
        Some(name) => artifact.with_file_name(name).save_in(dir),
        None => artifact.save_in(dir),
    }
}
