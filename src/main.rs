use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;
use url::Url;

use ilheus_map::api::HttpBackend;
use ilheus_map::config::{Config, resolve_language};
use ilheus_map::core::{LoadState, MapViewController};
use ilheus_map::icons::{
    CompositeIconFactory, DirGlyphSource, HttpGlyphSource, Icon, IconFactory, IconSet,
    PrepareReport, VectorIconFactory,
};
use ilheus_map::{Language, SyncPanel};

#[derive(Parser)]
#[command(name = "ilheus-map")]
#[command(about = "Browse the Ilhéus tourism map and sync it from a spreadsheet")]
struct Cli {
    /// Base URL of the map backend
    #[arg(long, env = "MAP_BACKEND_URL", value_name = "URL")]
    backend_url: Url,

    /// Map provider API key, passed to the map widget as is
    #[arg(long, env = "MAP_PROVIDER_KEY", hide_env_values = true)]
    maps_api_key: Option<String>,

    /// Interface language (en, es, pt). Detected from the locale when omitted
    #[arg(long, env = "MAP_LANG", value_name = "LANG")]
    lang: Option<Language>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the category layers
    Layers,

    /// List the pins on the map after toggling layers
    Markers {
        /// Toggle a layer before listing (repeatable)
        #[arg(long = "toggle", value_name = "LAYER")]
        toggles: Vec<String>,

        /// Show the detail popup for this marker
        #[arg(long, value_name = "MARKER")]
        select: Option<String>,

        #[command(flatten)]
        icons: IconArgs,
    },

    /// Render the icon of every layer into a directory
    Icons {
        /// Output directory
        #[arg(long, value_name = "DIR")]
        out: PathBuf,

        #[command(flatten)]
        icons: IconArgs,
    },

    /// Pull listings from a Google Sheet into the backend
    Sync {
        /// Full URL of the shared sheet
        #[arg(value_name = "SHEET_URL")]
        sheet_url: String,
    },

    /// Open the map window
    #[cfg(feature = "gui")]
    Gui {
        #[command(flatten)]
        icons: IconArgs,
    },
}

#[derive(clap::Args)]
struct IconArgs {
    /// Icon strategy
    #[arg(long, value_enum, default_value_t = Strategy::Vector)]
    strategy: Strategy,

    /// Directory or base URL holding the category glyph PNGs
    #[arg(long, value_name = "DIR|URL", default_value = "assets/glyphs")]
    glyphs: String,
}

#[derive(Clone, Copy, ValueEnum)]
enum Strategy {
    Vector,
    Composite,
}

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();
    init_tracing(args.verbose);

    let config = Config::new(args.backend_url.clone())
        .with_maps_api_key(args.maps_api_key.clone())
        .with_language(resolve_language(args.lang));

    #[cfg(feature = "gui")]
    if let Command::Gui { icons } = &args.command {
        let glyph_dir = match icons.strategy {
            Strategy::Vector => None,
            Strategy::Composite if is_remote(&icons.glyphs) => {
                anyhow::bail!("The map window only reads glyphs from a local directory")
            }
            Strategy::Composite => Some(PathBuf::from(&icons.glyphs)),
        };
        return ilheus_map::gui::run(config, glyph_dir);
    }

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(run(args.command, config))
}

fn init_tracing(verbose: bool) {
    let default = if verbose {
        "ilheus_map=debug"
    } else {
        "ilheus_map=warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

async fn run(command: Command, config: Config) -> anyhow::Result<()> {
    let backend = HttpBackend::new(&config.backend_url)?;
    let translator = config.translator();

    match command {
        Command::Layers => {
            let mut map = MapViewController::new(translator);
            if !load(&mut map, &backend).await {
                return Ok(());
            }
            println!("{}", translator.t("appTitle"));
            for layer in map.layers().layers() {
                let label = translator
                    .category_label(&layer.category())
                    .unwrap_or("-");
                let shown = if layer.visible { "on" } else { "off" };
                println!(
                    "  {:<16} {:<8} {:<4} {} ({})",
                    layer.id,
                    layer.color,
                    shown,
                    label,
                    map.markers().markers_in(&layer.id).count()
                );
            }
        }
        Command::Markers {
            toggles,
            select,
            icons,
        } => {
            let mut map = MapViewController::new(translator);
            if !load(&mut map, &backend).await {
                return Ok(());
            }
            for layer_id in &toggles {
                if !map.toggle_layer(layer_id) {
                    eprintln!("Unknown layer: {}", layer_id);
                }
            }
            let factory = build_icons(&icons, &backend, map.layers().layers()).await?;

            let pins = map.pins(&factory);
            println!("{}", map.status_line());
            for pin in &pins {
                println!(
                    "  [{}] {} ({:.4}, {:.4})",
                    pin.layer_id, pin.title, pin.lat, pin.lng
                );
            }
            if pins.len() < map.markers().count_visible() {
                println!(
                    "  ({} markers without an icon are hidden)",
                    map.markers().count_visible() - pins.len()
                );
            }

            if let Some(marker_id) = select {
                if map.select(&marker_id) {
                    if let Some(popup) = map.info_popup() {
                        println!("\n{}", popup.title);
                        println!("{}", popup.description);
                        if let Some(link) = popup.link {
                            println!("{} {}", link.label, link.url);
                        }
                    }
                } else {
                    eprintln!("Marker {} is not on the map", marker_id);
                }
            }
        }
        Command::Icons { out, icons } => {
            let mut map = MapViewController::new(translator);
            if !load(&mut map, &backend).await {
                return Ok(());
            }
            std::fs::create_dir_all(&out)?;
            let factory = build_icons(&icons, &backend, map.layers().layers()).await?;
            for layer in map.layers().layers() {
                let category = layer.category();
                match factory.render(map.color_of(&layer.id), &category) {
                    Some(icon) => {
                        let path = write_icon(&out, &layer.id, &icon)?;
                        println!("  {} -> {}", layer.id, path.display());
                    }
                    None => println!("  {} -> unavailable", layer.id),
                }
            }
        }
        Command::Sync { sheet_url } => {
            let mut panel = SyncPanel::new(translator);
            panel.set_sheet_url(sheet_url);
            if panel.can_submit() {
                println!("{}", translator.t("syncing"));
            }
            let notification = panel.sync(&backend).await;
            if !notification.is_success() {
                anyhow::bail!("{}", notification);
            }
            println!("{}", notification);
        }
        #[cfg(feature = "gui")]
        Command::Gui { .. } => unreachable!("handled before the runtime starts"),
    }

    Ok(())
}

/// Load the map, printing the error toast on failure.
async fn load(map: &mut MapViewController, backend: &HttpBackend) -> bool {
    println!("{}", map.translator().t("loadingMap"));
    if map.load(backend).await == LoadState::Ready {
        return true;
    }
    if let Some(notification) = map.take_notification() {
        eprintln!("{}", notification);
    }
    false
}

async fn build_icons(
    args: &IconArgs,
    backend: &HttpBackend,
    layers: &[ilheus_map::Layer],
) -> anyhow::Result<IconSet> {
    match args.strategy {
        Strategy::Vector => Ok(IconSet::Vector(VectorIconFactory)),
        Strategy::Composite => {
            let mut factory = CompositeIconFactory::default();
            let report: PrepareReport = if is_remote(&args.glyphs) {
                let mut base = Url::parse(&args.glyphs)?;
                if !base.path().ends_with('/') {
                    let path = format!("{}/", base.path());
                    base.set_path(&path);
                }
                let source = HttpGlyphSource::new(backend.client().clone(), base);
                factory.prepare(Arc::new(source), layers).await
            } else {
                let source = DirGlyphSource::new(&args.glyphs);
                factory.prepare(Arc::new(source), layers).await
            };
            for category in &report.unavailable {
                eprintln!("No icon for {}; its markers are hidden", category);
            }
            Ok(IconSet::Composite(factory))
        }
    }
}

fn is_remote(glyphs: &str) -> bool {
    glyphs.starts_with("http://") || glyphs.starts_with("https://")
}

fn write_icon(out: &Path, layer_id: &str, icon: &Icon) -> anyhow::Result<PathBuf> {
    match icon {
        Icon::Vector(vector) => {
            let path = out.join(format!("{}.svg", layer_id));
            std::fs::write(&path, vector.to_svg())?;
            Ok(path)
        }
        Icon::Raster(image) => {
            let path = out.join(format!("{}.png", layer_id));
            image
                .save(&path)
                .map_err(|e| anyhow::anyhow!("Failed to save icon: {}", e))?;
            Ok(path)
        }
    }
}
