use clap::Parser;
use petty_flow::{DirectoryResourceProvider, FlowAppError, FontLibrary, FontProvider, Script};
use std::path::PathBuf;
use std::sync::Arc;

/// Render a JSON flow script to PDF.
#[derive(Parser, Debug)]
#[command(name = "petty-flow", version, about)]
struct Cli {
    /// Path to the flow script.
    script: PathBuf,

    /// Where to write the PDF.
    output: PathBuf,

    /// Directory of .ttf/.otf fonts to register (repeatable).
    ///
    /// These fonts are measured but not embedded, so only the standard PDF
    /// families (Helvetica, Courier) render exactly as laid out.
    #[arg(long = "font-dir")]
    font_dirs: Vec<PathBuf>,

    /// Register the fonts installed on this system. Not embedded, like
    /// `--font-dir`.
    #[arg(long)]
    system_fonts: bool,

    /// Directory images are loaded from. Defaults to the script's directory.
    #[arg(long)]
    resources: Option<PathBuf>,
}

fn main() -> Result<(), FlowAppError> {
    env_logger::init();
    let cli = Cli::parse();

    let fonts = FontLibrary::with_standard_fonts();
    for dir in &cli.font_dirs {
        let loaded = fonts.add_font_dir(dir)?;
        log::info!("Loaded {} fonts from {}", loaded, dir.display());
    }
    if cli.system_fonts {
        load_system_fonts(&fonts);
    }
    log::debug!("Available font families: {:?}", fonts.families());

    let resource_dir = cli.resources.clone().unwrap_or_else(|| {
        cli.script
            .parent()
            .filter(|dir| !dir.as_os_str().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."))
    });

    println!("Loading script from {}", cli.script.display());
    let script = Script::from_file(&cli.script)?;

    println!("Rendering {} blocks...", script.blocks.len());
    let canvas = script.render(&fonts, Arc::new(DirectoryResourceProvider::new(resource_dir)))?;
    let pages = canvas.page_count();
    canvas.save_to_file(&cli.output)?;

    println!("Wrote {} ({} pages)", cli.output.display(), pages);
    Ok(())
}

#[cfg(feature = "system-fonts")]
fn load_system_fonts(fonts: &FontLibrary) {
    let loaded = fonts.load_system_fonts();
    log::info!("Loaded {} system fonts", loaded);
}

#[cfg(not(feature = "system-fonts"))]
fn load_system_fonts(_fonts: &FontLibrary) {
    log::warn!("--system-fonts ignored: built without the `system-fonts` feature");
}
