use anyhow::Context;
use bridge::bridge::QueryBridge;
use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::runtime::Builder as TokioBuilder;
use tokio::signal;
use workflow::config::ConsoleConfig;
use workflow::runner::Runner;

mod bridge;
mod generator;
mod report;
mod workflow;

#[derive(Parser)]
#[command(author, version, about = "Ask questions about AIS vessel tracks")]
struct Args {
    /// Load a console config from YAML
    #[arg(long)]
    config: Option<PathBuf>,
    /// AIS CSV export to query (overrides the config file)
    #[arg(long)]
    dataset: Option<PathBuf>,
    /// Use the generated demo tracks even if a dataset is configured
    #[arg(long, default_value_t = false)]
    demo: bool,
    /// Query to answer; may be given several times
    #[arg(long = "query", short = 'q')]
    queries: Vec<String>,
    #[arg(long)]
    fuzzy_threshold: Option<u8>,
    #[arg(long)]
    bind: Option<SocketAddr>,
    /// Print JSON reports instead of text
    #[arg(long, default_value_t = false)]
    json: bool,
    /// Print the known vessel names
    #[arg(long, default_value_t = false)]
    list: bool,
    /// Keep the HTTP bridge alive for incoming queries
    #[arg(long, default_value_t = false)]
    serve: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut config = if let Some(path) = args.config.as_ref() {
        let mut config = ConsoleConfig::load(path)?;
        if let Some(bind) = args.bind {
            config.bind = bind;
        }
        if let Some(threshold) = args.fuzzy_threshold {
            config.analysis.fuzzy_threshold = threshold;
        }
        if args.dataset.is_some() {
            config.dataset = args.dataset.clone();
        }
        config
    } else {
        ConsoleConfig::from_args(args.dataset.clone(), args.bind, args.fuzzy_threshold)
    };
    if args.demo {
        config.dataset = None;
    }

    let runner = Arc::new(Runner::new(&config)?);
    let query_bridge = QueryBridge::new(runner.clone());

    if args.list {
        for name in runner.vessel_names() {
            println!("{}", name);
        }
    }

    for text in &args.queries {
        let query_report = runner.execute(text);
        if args.json {
            let rendered = serde_json::to_string_pretty(&query_report)
                .context("serializing query report")?;
            println!("{}", rendered);
        } else {
            println!("{}", report::render(&query_report));
        }
        query_bridge.publish(&query_report);
    }

    if args.serve {
        query_bridge.serve(config.bind);
        query_bridge.publish_status(&format!(
            "HTTP bridge running on {} (Ctrl+C to stop)...",
            config.bind
        ));
        let runtime = TokioBuilder::new_current_thread()
            .enable_all()
            .build()
            .context("creating runtime for signal handling")?;
        runtime.block_on(async {
            signal::ctrl_c().await.context("awaiting Ctrl+C to exit")?;
            Ok::<(), anyhow::Error>(())
        })?;
    }

    Ok(())
}
