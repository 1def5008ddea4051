use android_assets::assets;
use android_assets::task::TaskRunner;
use android_assets::MissingSource;
use anyhow::Result;
use clap::{Parser, ValueEnum};
use console::style;
use std::path::PathBuf;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Project root containing the source assets
    #[clap(long, default_value = ".")]
    root: PathBuf,
    /// Skip an asset category
    #[clap(long, value_enum)]
    skip: Vec<Stage>,
}

#[derive(ValueEnum, Clone, Copy, Debug, Eq, PartialEq)]
enum Stage {
    Launcher,
    Notif,
    Welcome,
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
        report(&err);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<()> {
    let mut runner = TaskRunner::new(3);
    let mut total = 0;
    if args.skip.contains(&Stage::Launcher) {
        runner.skip_task("Generate launcher icons");
    } else {
        runner.start_task("Generate launcher icons");
        total += assets::process_launcher(&args.root)?;
        runner.end_task();
    }
    if args.skip.contains(&Stage::Notif) {
        runner.skip_task("Generate notification icons");
    } else {
        runner.start_task("Generate notification icons");
        total += assets::process_notification(&args.root)?;
        runner.end_task();
    }
    if args.skip.contains(&Stage::Welcome) {
        runner.skip_task("Generate welcome and splash screens");
    } else {
        runner.start_task("Generate welcome and splash screens");
        total += assets::process_welcome(&args.root)?;
        runner.end_task();
    }
    println!("{total} asset files written");
    Ok(())
}

fn report(err: &anyhow::Error) {
    eprintln!("{} {}", style("[ERROR]").red(), err);
    if err.downcast_ref::<MissingSource>().is_some() {
        eprintln!("expected source assets in the project root:");
        eprintln!("  logo.png   1024x1024 px");
        eprintln!("  notif.png   512x512 px");
        eprintln!("  wc1.png    1920x1080 px");
        eprintln!("  wc2.png    1080x1920 px");
    }
}
