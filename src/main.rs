use clap::Parser;
use anyhow::Result;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use pollwatch::{
    cli::{Cli, OutputFormat},
    config::WatchConfig,
    ChangeEvent, ChangeKind, PatternSet, PollWatcher,
};

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Err(err) = cli.validate() {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }

    cli.setup_logging();

    let config = match WatchConfig::load_or_default(cli.config.as_deref()) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            std::process::exit(1);
        }
    };

    if let Err(err) = config.validate() {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }

    // CLI patterns replace config patterns rather than extending them
    let patterns = if cli.patterns.is_empty() {
        config.watcher.patterns.clone()
    } else {
        cli.patterns.clone()
    };

    let pattern_set = match PatternSet::compile(&patterns) {
        Ok(set) => set,
        Err(err) => {
            eprintln!("Error: {}", err);
            std::process::exit(1);
        }
    };

    let interval = cli
        .interval
        .map(Duration::from_millis)
        .unwrap_or_else(|| config.watcher.poll_interval());
    let color = config.output.color && !cli.no_color;

    let watch_path = cli.get_watch_path();
    tracing::info!("Starting pollwatch on: {}", watch_path.display());

    let mut watcher = match PollWatcher::new(&watch_path, pattern_set) {
        Ok(watcher) => watcher,
        Err(err) => {
            eprintln!("Error: {}", err);
            std::process::exit(1);
        }
    };

    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();
    ctrlc::set_handler(move || {
        r.store(false, Ordering::SeqCst);
    })?;

    match cli.output {
        OutputFormat::Text => run_text_mode(&mut watcher, interval, running, color),
        OutputFormat::Json => run_json_mode(&mut watcher, interval, running),
        OutputFormat::Compact => run_compact_mode(&mut watcher, interval, running),
    }

    Ok(())
}

fn run_text_mode(
    watcher: &mut PollWatcher,
    interval: Duration,
    running: Arc<AtomicBool>,
    color: bool,
) {
    println!("Watching: {}", watcher.root().display());
    println!("Press Ctrl+C to quit");
    println!("---");

    watcher.run(interval, running, |event| print_text_event(event, color));
}

fn run_json_mode(watcher: &mut PollWatcher, interval: Duration, running: Arc<AtomicBool>) {
    watcher.run(interval, running, |event| {
        match serde_json::to_string(event) {
            Ok(line) => println!("{}", line),
            Err(err) => tracing::error!("Failed to serialize event: {}", err),
        }
    });
}

fn run_compact_mode(watcher: &mut PollWatcher, interval: Duration, running: Arc<AtomicBool>) {
    watcher.run(interval, running, print_compact_event);
}

fn print_text_event(event: &ChangeEvent, color: bool) {
    if !color {
        println!("{}", event);
        return;
    }

    let code = match event.kind {
        ChangeKind::Created => "\x1b[32m",  // Green
        ChangeKind::Modified => "\x1b[33m", // Yellow
        ChangeKind::Deleted => "\x1b[31m",  // Red
    };
    println!("{}{}\x1b[0m: {}", code, event.kind, event.path);
}

fn print_compact_event(event: &ChangeEvent) {
    let tag = match event.kind {
        ChangeKind::Created => "C",
        ChangeKind::Modified => "M",
        ChangeKind::Deleted => "D",
    };

    println!("{} {}", tag, event.path);
}
