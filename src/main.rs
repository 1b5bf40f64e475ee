//! handpoke - replay a scripted probe over a scene of touchable surfaces

use anyhow::Result;
use handpoke::config::SceneConfig;
use handpoke::headless::{self, HeadlessConfig};
use handpoke::scripted_probe::ScriptedProbePlayer;
use handpoke_interaction::PointerEventKind;
use std::{env, path::PathBuf};
use tracing::info;

fn main() -> Result<()> {
    // INFO by default; override via RUST_LOG.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Starting handpoke v{}", env!("CARGO_PKG_VERSION"));

    let cli = CliOptions::parse(env::args().skip(1));
    if cli.help {
        println!("{USAGE}");
        return Ok(());
    }

    let scene = match cli.scene.as_deref() {
        Some(path) => SceneConfig::load_from_path(path),
        None => {
            info!("No --scene given; using the default scene");
            SceneConfig::default()
        }
    };
    let Some(probe_path) = cli.probe else {
        anyhow::bail!("--probe <file> is required\n\n{USAGE}");
    };
    let probe = ScriptedProbePlayer::from_path(&probe_path)?;

    let summary = headless::run(HeadlessConfig {
        scene,
        probe,
        frame_rate: cli.frame_rate,
        event_log: cli.event_log,
    })?;

    info!(
        frames = summary.frames,
        selects = summary.count(PointerEventKind::Select),
        unselects = summary.count(PointerEventKind::Unselect),
        cancels = summary.count(PointerEventKind::Cancel),
        final_state = ?summary.final_state,
        "replay finished"
    );
    Ok(())
}

const USAGE: &str = "usage: handpoke --probe <probe.json> [--scene <scene.toml>] \
                     [--frame-rate <hz>] [--event-log <events.jsonl>]";

struct CliOptions {
    help: bool,
    scene: Option<PathBuf>,
    probe: Option<PathBuf>,
    frame_rate: f32,
    event_log: Option<PathBuf>,
}

impl CliOptions {
    fn parse<I: Iterator<Item = String>>(mut args: I) -> Self {
        let mut opts = CliOptions {
            help: false,
            scene: None,
            probe: None,
            frame_rate: 90.0,
            event_log: None,
        };

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "-h" | "--help" => opts.help = true,
                "--scene" => {
                    if let Some(path) = args.next() {
                        opts.scene = Some(PathBuf::from(path));
                    } else {
                        tracing::error!("--scene requires a file path");
                    }
                }
                "--probe" => {
                    if let Some(path) = args.next() {
                        opts.probe = Some(PathBuf::from(path));
                    } else {
                        tracing::error!("--probe requires a file path");
                    }
                }
                "--frame-rate" => {
                    if let Some(raw) = args.next() {
                        match raw.parse::<f32>() {
                            Ok(value) if value.is_finite() && value > 0.0 => {
                                opts.frame_rate = value
                            }
                            Ok(value) => tracing::error!(value, "--frame-rate must be positive"),
                            Err(err) => {
                                tracing::error!(%err, value = %raw, "--frame-rate must be a number")
                            }
                        }
                    } else {
                        tracing::error!("--frame-rate requires a number");
                    }
                }
                "--event-log" => {
                    if let Some(path) = args.next() {
                        opts.event_log = Some(PathBuf::from(path));
                    } else {
                        tracing::error!("--event-log requires a file path");
                    }
                }
                other => tracing::warn!(arg = other, "ignoring unknown argument"),
            }
        }

        opts
    }
}
