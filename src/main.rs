use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use nostalgia_os_release::branding::Branding;
use nostalgia_os_release::image::{self, ImageLayout};

#[derive(Parser)]
#[command(author, version, about = "Brands os-release and restores the /etc/os-release link")]
struct Args {
    /// Root of the image tree to customize
    #[arg(long, default_value = "/")]
    root: PathBuf,

    /// Print a JSON summary of the changes to stdout
    #[arg(long)]
    json: bool,

    /// Increase log verbosity (-v info, -vv debug)
    ///
    /// RUST_LOG, when set, overrides this.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let layout = ImageLayout::new(args.root);
    let report = image::customize(&layout, &Branding::default())?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    }

    Ok(())
}
