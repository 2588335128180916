use std::path::{Path, PathBuf};

use brain_icon::{IconRenderer, IconSetWriter, IconTheme, Iconutil, package_icns};
use clap::Parser;
use eyre::WrapErr;

/// Generate the app icon-set and .icns bundle.
#[derive(Debug, Parser)]
#[command(version)]
struct Cli {
    /// Directory the icon-set and .icns are written under.
    ///
    /// All output paths are relative to this directory, not to the location
    /// of the executable. Defaults to the current directory.
    #[arg(long, default_value = ".")]
    root: PathBuf,

    /// App name used for the project directory and the .icns file
    #[arg(long, default_value = "ClaudeMenuBar")]
    app_name: String,

    /// JSON theme file overriding the default colors
    #[arg(long, value_name = "FILE")]
    theme: Option<PathBuf>,

    /// Only write the icon-set; do not run iconutil
    #[arg(long)]
    skip_icns: bool,

    /// Log debug output
    #[arg(short, long)]
    verbose: bool,
}

fn setup_logger(verbose: bool) -> eyre::Result<()> {
    use tracing::Level;
    use tracing_subscriber::{
        Registry, filter::LevelFilter, fmt::layer, layer::SubscriberExt,
        util::SubscriberInitExt,
    };

    let level = if verbose { Level::DEBUG } else { Level::INFO };
    Registry::default()
        .with(LevelFilter::from(level))
        .with(layer().with_ansi(true).with_target(false).without_time())
        .try_init()?;
    Ok(())
}

fn load_theme(path: Option<&Path>) -> eyre::Result<IconTheme> {
    let Some(path) = path else {
        return Ok(IconTheme::default());
    };
    let json = std::fs::read_to_string(path)
        .wrap_err_with(|| format!("failed to read theme file '{}'", path.display()))?;
    IconTheme::from_json(&json)
        .wrap_err_with(|| format!("failed to parse theme file '{}'", path.display()))
}

fn iconset_dir(root: &Path, app_name: &str) -> PathBuf {
    root.join(app_name)
        .join(app_name)
        .join("Assets.xcassets")
        .join("AppIcon.appiconset")
}

fn main() -> eyre::Result<()> {
    let cli = Cli::parse();
    setup_logger(cli.verbose)?;

    let theme = load_theme(cli.theme.as_deref())?;
    let mut renderer = IconRenderer::new(theme);

    let dir = iconset_dir(&cli.root, &cli.app_name);
    let report = IconSetWriter::default()
        .write(&mut renderer, &dir)
        .wrap_err("failed to write icon-set")?;

    if cli.skip_icns {
        return Ok(());
    }

    let output = cli.root.join(format!("{}.icns", cli.app_name));
    // a failed compile is already logged; the icon-set is still usable
    package_icns(&report, &Iconutil::default(), &output, &cli.app_name)
        .wrap_err("failed to package .icns")?;

    Ok(())
}
