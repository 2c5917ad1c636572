mod i18n;

use clap::{value_parser, Arg, ArgAction, ArgGroup, ArgMatches, Command};
use i18n::{get_messages, Locale, Messages};
use indicatif::{ProgressBar, ProgressStyle};
use orange_splitter::core::events::{self, EventSender, ToolEvent};
use orange_splitter::core::model::PlanMode;
use orange_splitter::core::planner::non_negative;
use orange_splitter::core::splitter::{FileSplitter, SplitContext};
use orange_splitter::plugins::registry::{MergeContext, MergeRegistry};
use orange_splitter::DEFAULT_STREAM_CHUNK_SIZE;
use std::path::PathBuf;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tracing::warn;

const DEFAULT_CHUNK_SIZE_ARG: &str = "2097152";

fn build_cli(registry: &MergeRegistry) -> Command {
    let split = Command::new("split")
        .about("Split a file into contiguous parts named <file>-chunk-<n>")
        .arg(Arg::new("file").help("File to split").required(true).num_args(1))
        .arg(
            Arg::new("parts")
                .long("parts")
                .help("Number of parts; the last part takes the remainder")
                .value_parser(value_parser!(i64))
                .allow_negative_numbers(true)
                .num_args(1),
        )
        .arg(
            Arg::new("max_bytes")
                .long("max-bytes")
                .help("Maximum part size in bytes; the last part may be smaller")
                .value_parser(value_parser!(i64))
                .allow_negative_numbers(true)
                .num_args(1),
        )
        .group(ArgGroup::new("mode").args(["parts", "max_bytes"]).required(true));

    let merge = Command::new("merge")
        .about("Concatenate part files, in the given order, into one file")
        .arg(Arg::new("output").help("Output file").required(true).num_args(1))
        .arg(
            Arg::new("inputs")
                .help("Part files in merge order")
                .action(ArgAction::Append)
                .num_args(1..)
                .required(true),
        )
        .arg(
            Arg::new("strategy")
                .long("strategy")
                .help("Merge strategy")
                .value_parser(registry.names())
                .default_value("stream")
                .num_args(1),
        )
        .arg(
            Arg::new("chunk_size")
                .long("chunk-size")
                .help("Read buffer size in bytes for the stream strategy")
                .value_parser(value_parser!(usize))
                .default_value(DEFAULT_CHUNK_SIZE_ARG)
                .num_args(1),
        );

    Command::new("splitter")
        .about("Split files into parts and merge them back")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("locale")
                .long("locale")
                .help("Message language (en, zh)")
                .default_value("en")
                .global(true)
                .num_args(1),
        )
        .subcommand(split)
        .subcommand(merge)
}

async fn join_progress(ui_task: JoinHandle<anyhow::Result<()>>) {
    match ui_task.await {
        Ok(Ok(())) => {}
        Ok(Err(e)) => warn!("progress display failed: {:#}", e),
        Err(e) => warn!("progress task ended abnormally: {}", e),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let log_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".to_string());
    tracing_subscriber::fmt().with_env_filter(log_filter).init();

    let registry = MergeRegistry::with_defaults();
    let matches = build_cli(&registry).get_matches();

    let locale = matches
        .get_one::<String>("locale")
        .map(|s| Locale::parse(s))
        .unwrap_or_default();
    let msgs = get_messages(locale);

    match matches.subcommand() {
        Some(("split", m)) => run_split(m, msgs).await?,
        Some(("merge", m)) => run_merge(m, &registry, msgs).await?,
        _ => {}
    }

    Ok(())
}

async fn run_split(m: &ArgMatches, msgs: &'static Messages) -> anyhow::Result<()> {
    let file: PathBuf = m
        .get_one::<String>("file")
        .ok_or_else(|| anyhow::anyhow!("missing file"))?
        .into();
    let mode = match (m.get_one::<i64>("parts"), m.get_one::<i64>("max_bytes")) {
        (Some(&n), _) => PlanMode::ByCount(non_negative("--parts", n)?),
        (None, Some(&n)) => PlanMode::ByMaxSize(non_negative("--max-bytes", n)?),
        (None, None) => anyhow::bail!("either --parts or --max-bytes is required"),
    };

    println!("{}: {}", msgs.split_started, file.display());

    let (tx, rx) = events::channel();
    let ui_task = tokio::spawn(render_progress(rx, msgs.parts_label));

    let result = split_with_events(&file, mode, tx).await;
    join_progress(ui_task).await;

    let parts = result?;
    for p in &parts {
        println!("{}", p.display());
    }
    println!("{}: {} {}", msgs.split_finished, parts.len(), msgs.parts_label);
    Ok(())
}

async fn split_with_events(
    file: &std::path::Path,
    mode: PlanMode,
    tx: EventSender,
) -> orange_splitter::Result<Vec<PathBuf>> {
    FileSplitter::new(SplitContext { events: Some(tx) }).split(file, mode).await
}

async fn run_merge(m: &ArgMatches, registry: &MergeRegistry, msgs: &'static Messages) -> anyhow::Result<()> {
    let output: PathBuf = m
        .get_one::<String>("output")
        .ok_or_else(|| anyhow::anyhow!("missing output"))?
        .into();
    let inputs: Vec<PathBuf> = m
        .get_many::<String>("inputs")
        .map(|v| v.map(PathBuf::from).collect())
        .unwrap_or_default();
    let strategy_name = m
        .get_one::<String>("strategy")
        .map(String::as_str)
        .unwrap_or("stream");
    let strategy = registry
        .get(strategy_name)
        .ok_or_else(|| anyhow::anyhow!("unknown merge strategy: {}", strategy_name))?;
    let chunk_size = m
        .get_one::<usize>("chunk_size")
        .copied()
        .unwrap_or(DEFAULT_STREAM_CHUNK_SIZE);

    println!(
        "{}: {} {} -> {} ({})",
        msgs.merge_started,
        inputs.len(),
        msgs.inputs_label,
        output.display(),
        strategy.name()
    );

    let (tx, rx) = events::channel();
    let ui_task = tokio::spawn(render_progress(rx, msgs.inputs_label));

    let ctx = MergeContext { chunk_size, events: Some(tx) };
    let result = strategy.merge(&inputs, &output, &ctx).await;
    drop(ctx);
    join_progress(ui_task).await;

    let out = result?;
    println!("{}: {}", msgs.merge_finished, out.display());
    Ok(())
}

/// Drives a progress bar until every event sender is dropped.
async fn render_progress(mut rx: broadcast::Receiver<ToolEvent>, unit: &'static str) -> anyhow::Result<()> {
    let sty_bar = ProgressStyle::with_template("{prefix} {bar:40.cyan/blue} {pos}/{len} {wide_msg}")?;
    let pb = ProgressBar::new(0);
    pb.set_style(sty_bar);
    pb.set_prefix(format!("[{}]", unit));

    loop {
        let evt = match rx.recv().await {
            Ok(e) => e,
            Err(broadcast::error::RecvError::Lagged(_)) => continue,
            Err(_) => break,
        };

        match evt {
            ToolEvent::PlanReady { parts, total_bytes, .. } => {
                pb.set_length(parts);
                pb.set_message(fmt_bytes(total_bytes));
            }
            ToolEvent::PartWritten { path, bytes, completed, total, .. }
            | ToolEvent::InputMerged { path, bytes, completed, total, .. } => {
                if pb.length() != Some(total) {
                    pb.set_length(total);
                }
                pb.set_position(completed);
                pb.set_message(format!("{} ({})", path.display(), fmt_bytes(bytes)));
            }
            ToolEvent::Finished { .. } => {
                pb.finish_and_clear();
            }
        }
    }
    pb.finish_and_clear();

    Ok(())
}

fn fmt_bytes(n: u64) -> String {
    const KB: f64 = 1024.0;
    const MB: f64 = 1024.0 * 1024.0;
    const GB: f64 = 1024.0 * 1024.0 * 1024.0;
    let f = n as f64;
    if f >= GB {
        format!("{:.2}GiB", f / GB)
    } else if f >= MB {
        format!("{:.2}MiB", f / MB)
    } else if f >= KB {
        format!("{:.2}KiB", f / KB)
    } else {
        format!("{}B", n)
    }
}
