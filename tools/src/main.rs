//! dash-runner: headless runner for the insurance marketing dashboard core.
//!
//! Usage:
//!   dash-runner --seed 12345 --ticks 30
//!   dash-runner --data-dir ./core/data --config feed.json --live-secs 20
//!   dash-runner --ipc-mode

use anyhow::Result;
use policypulse_core::{
    command::ViewCommand,
    config::FeedConfig,
    dataset::Dataset,
    metrics::{self, round_to_tenth, DashboardSummary},
    session::MonitoringSession,
    snapshot::SessionSnapshot,
};
use std::env;
use std::io::{self, BufRead, Write};
use std::time::{Duration, Instant};

/// Most tick boundaries a single IPC `advance` may cross.
const MAX_TICKS_PER_ADVANCE: u64 = 10_000;

#[derive(Debug, PartialEq, serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum IpcCommand {
    GetState,
    Advance { millis: u64 },
    ToggleLive,
    Pause,
    Resume,
    Summary,
    Quit,
}

impl IpcCommand {
    /// The session command this maps onto, if any.
    fn view_command(&self) -> Option<ViewCommand> {
        match self {
            Self::Advance { millis } => Some(ViewCommand::Advance { millis: *millis }),
            Self::ToggleLive => Some(ViewCommand::ToggleLive),
            Self::Pause => Some(ViewCommand::Pause),
            Self::Resume => Some(ViewCommand::Resume),
            Self::GetState | Self::Summary | Self::Quit => None,
        }
    }
}

#[derive(serde::Serialize)]
struct UiState<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    appended: Option<usize>,
    #[serde(flatten)]
    session: &'a SessionSnapshot,
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let ticks = parse_arg(&args, "--ticks", 20u32);
    let live_secs = parse_arg(&args, "--live-secs", 0u64);
    let ipc_mode = args.iter().any(|a| a == "--ipc-mode");
    let data_dir = str_arg(&args, "--data-dir");
    let config_path = str_arg(&args, "--config");

    let mut config = match config_path {
        Some(path) => FeedConfig::load(path)?,
        None => FeedConfig::default(),
    };
    if let Some(seed) = str_arg(&args, "--seed").and_then(|s| s.parse().ok()) {
        config = config.with_seed(seed);
    }

    let dataset = match data_dir {
        Some(dir) => Dataset::load(dir)?,
        None => Dataset::builtin()?,
    };

    if !ipc_mode {
        println!("Insurance Dashboard: dash-runner");
        println!("  seed:      {}", config.seed);
        println!("  ticks:     {ticks}");
        println!("  data_dir:  {}", data_dir.unwrap_or("(built-in)"));
        println!();
    }

    let start = chrono::Local::now().naive_local();
    let mut session = MonitoringSession::build(&config, dataset.seed_events.clone(), start)?;

    if ipc_mode {
        run_ipc_loop(&mut session, &dataset)?;
    } else if live_secs > 0 {
        run_live_loop(&mut session, Duration::from_secs(live_secs))?;
    } else {
        session.run_ticks(ticks);
        print_summary(&dataset, &session.view());
    }

    let remaining = session.teardown();
    log::info!("session closed with {} events in feed", remaining.len());
    Ok(())
}

fn run_ipc_loop(session: &mut MonitoringSession, dataset: &Dataset) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut handle = stdin.lock();
    let mut buffer = String::new();

    loop {
        buffer.clear();
        let bytes_read = handle.read_line(&mut buffer)?;
        if bytes_read == 0 {
            break; // EOF
        }
        if buffer.trim().is_empty() {
            continue;
        }

        let cmd: IpcCommand = match serde_json::from_str(&buffer) {
            Ok(c) => c,
            Err(e) => {
                log::warn!("Unparseable command: {}", buffer.trim());
                let err_json = serde_json::json!({ "error": e.to_string() });
                writeln!(stdout, "{}", err_json)?;
                stdout.flush()?;
                continue;
            }
        };

        match cmd {
            IpcCommand::Quit => break,
            IpcCommand::GetState => {
                let view = session.view();
                let state = UiState { appended: None, session: &view };
                writeln!(stdout, "{}", serde_json::to_string(&state)?)?;
            }
            IpcCommand::Summary => {
                let summary = DashboardSummary::compute(dataset);
                writeln!(stdout, "{}", serde_json::to_string(&summary)?)?;
            }
            other => {
                let Some(command) = other.view_command() else { continue };
                let appended = session.apply(&clamp_advance(command, session.interval()));
                let view = session.view();
                let state = UiState { appended: Some(appended), session: &view };
                writeln!(stdout, "{}", serde_json::to_string(&state)?)?;
            }
        }
        stdout.flush()?;
    }
    Ok(())
}

/// Bound an `advance` to `MAX_TICKS_PER_ADVANCE` intervals.
fn clamp_advance(command: ViewCommand, interval: Duration) -> ViewCommand {
    match command {
        ViewCommand::Advance { millis } => {
            let interval_ms = u64::try_from(interval.as_millis()).unwrap_or(u64::MAX);
            let cap = interval_ms.saturating_mul(MAX_TICKS_PER_ADVANCE);
            if millis > cap {
                log::warn!("advance of {millis} ms clamped to {cap} ms");
            }
            ViewCommand::Advance { millis: millis.min(cap) }
        }
        other => other,
    }
}

/// Feed real elapsed time into the session until `duration` has passed.
fn run_live_loop(session: &mut MonitoringSession, duration: Duration) -> Result<()> {
    let poll = Duration::from_millis(250);
    let started = Instant::now();
    let mut last = started;

    println!("Live for {duration:?} (interval {:?}), Ctrl-C to stop", session.interval());
    while started.elapsed() < duration {
        std::thread::sleep(poll);
        let now = Instant::now();
        let appended = session.advance(now - last);
        last = now;

        for event in session.feed().iter().take(appended).collect::<Vec<_>>().into_iter().rev() {
            println!(
                "  {}  {:<10} {:<8} {}  ({})",
                event.timestamp.format("%-I:%M:%S %p"),
                event.category.label(),
                format!("{:?}", event.status),
                event.description,
                event.details
            );
        }
    }
    Ok(())
}

fn print_summary(dataset: &Dataset, view: &SessionSnapshot) {
    let summary = DashboardSummary::compute(dataset);

    println!("=== DASHBOARD SUMMARY ===");
    println!("  customers:          {}", summary.customer_count);
    println!("  avg engagement:     {:.1}%", summary.average_engagement);
    println!("  high engagement:    {}", summary.high_engagement_count);
    println!("  total LTV:          {}", summary.total_lifetime_value);
    println!("  decisions:          {}", summary.decision_count);
    println!("  avg confidence:     {:.1}%", summary.average_confidence);
    println!("  high confidence:    {}", summary.high_confidence_count);
    println!("  total revenue:      {}", summary.total_revenue);
    println!("  avg conversion:     {:.1}%", summary.average_conversion_rate);
    println!("  responsible AI:     {:.1}%", summary.responsible_ai_score);

    println!();
    println!("=== CHANNELS ===");
    for ch in &summary.channels {
        println!(
            "  {:<18} open {:>5.1}% | click {:>5.1}% | conv {:>5.1}%",
            ch.channel,
            round_to_tenth(ch.open_rate),
            round_to_tenth(ch.click_rate),
            round_to_tenth(ch.conversion_rate)
        );
    }

    println!();
    println!("=== CUSTOMER INSIGHTS ===");
    for customer in &dataset.customers {
        println!("  {} ({}): {}", customer.name, customer.life_stage, metrics::customer_insight(customer));
    }

    println!();
    println!(
        "=== LIVE FEED ({}, {} generated, {} shown) ===",
        view.mode.label(),
        view.generated,
        view.events.len()
    );
    for event in &view.events {
        println!(
            "  {}  {:<10} {}  ({})",
            event.timestamp.format("%H:%M:%S"),
            event.category.label(),
            event.description,
            event.details
        );
    }
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}

fn str_arg<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}
