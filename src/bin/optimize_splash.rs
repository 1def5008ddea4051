use android_assets::{assets, MissingSource, Scaler, ScalerOpts};
use anyhow::Result;
use clap::Parser;
use console::style;
use std::path::PathBuf;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Project root containing the source assets
    #[clap(long, default_value = ".")]
    root: PathBuf,
}

fn main() {
    use tracing_subscriber::{fmt::format::FmtSpan, EnvFilter};
    tracing_log::LogTracer::init().ok();
    let env = std::env::var("ASSETS_LOG").unwrap_or_else(|_| "error".into());
    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_span_events(FmtSpan::ACTIVE | FmtSpan::CLOSE)
        .with_env_filter(EnvFilter::new(env))
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).ok();
    log_panics::init();
    let args = Args::parse();
    if let Err(err) = run(&args) {
        eprintln!("{} {}", style("[ERROR]").red(), err);
        if err.downcast_ref::<MissingSource>().is_some() {
            eprintln!("expected the splash source at wc2.png (1080x1920 px)");
        }
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<()> {
    let input = args.root.join(assets::WELCOME_SECONDARY);
    let scaler = Scaler::open(&input)?;
    let (sw, sh) = scaler.dimensions();
    let input_bytes = std::fs::metadata(&input)?.len();
    let (width, height) = assets::SPLASH_TARGET;
    let output = assets::res_dir(&args.root)
        .join("drawable-nodpi")
        .join("splash.png");
    scaler.write(&output, ScalerOpts::cover(width, height))?;
    let output_bytes = std::fs::metadata(&output)?.len();
    println!("{}: {sw}x{sh} px", input.display());
    println!("{}: {width}x{height} px", output.display());
    println!(
        "{} KiB -> {} KiB ({} KiB saved)",
        input_bytes / 1024,
        output_bytes / 1024,
        input_bytes.saturating_sub(output_bytes) / 1024,
    );
    if assets::update_styles(&args.root)? {
        println!("styles.xml now references @drawable/splash");
    }
    Ok(())
}
