use clap::Parser;
use tracing_subscriber::prelude::__tracing_subscriber_SubscriberExt;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let cli = tracker::config::Cli::parse();

    let level = if cli.verbose {
        tracing_subscriber::filter::LevelFilter::DEBUG
    } else {
        tracing_subscriber::filter::LevelFilter::INFO
    };
    let registry = tracing_subscriber::Registry::default()
        .with(tracing_subscriber::fmt::layer())
        .with(level)
        .with(tracing_subscriber::filter::filter_fn(|meta| {
            meta.target().contains("tracker") || meta.target().contains("analysis")
        }));
    tracing::subscriber::set_global_default(registry)?;

    tracing::info!("Starting...");

    let options = cli.run_options();
    let client = tracker::steam_api::Client::new(cli.api_key.clone(), cli.api_base.clone(), cli.timeout())?;
    let storage = tracker::FileStorage::new(&cli.players, &cli.baseline, &cli.output);

    let summary = tracker::run(&client, &storage, &options).await?;

    tracing::info!(
        processed = summary.processed,
        skipped = summary.skipped.len(),
        created = summary.created,
        patched = summary.patched,
        baseline_written = summary.baseline_written,
        last_updated = %summary.leaderboard.meta.last_updated,
        "Completed"
    );

    Ok(())
}
