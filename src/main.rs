use std::{env, fs, process};

use anyhow::{Context, Result, bail};

use storyboard::{
    config::Config,
    player::Player,
    recorder::{self, KeyScript, Recorder, Recording},
    scenes::Program,
};

fn main() {
    init_logging();
    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

const PLAY_USAGE: &str = "storyboard play <network|fight|stories>";
const RECORD_USAGE: &str =
    "storyboard record <network|fight|stories> <ticks> <output.json> [key@tick,...]";

fn run() -> Result<()> {
    let mut args = env::args().skip(1);

    match args.next().as_deref() {
        Some("play") => {
            let program = args.next().context(PLAY_USAGE)?;
            play(&program)
        }
        Some("record") => {
            let program = args.next().context(RECORD_USAGE)?;
            let ticks = args.next().context(RECORD_USAGE)?;
            let output_path = args.next().context(RECORD_USAGE)?;
            let script = args.next().unwrap_or_default();
            record(&program, &ticks, &output_path, &script)
        }
        _ => bail!(
            "storyboard: animated scenes in the terminal\n\nUsage:\n  {PLAY_USAGE}\n  {RECORD_USAGE}"
        ),
    }
}

/// Log to stderr, or to the file named by `STORYBOARD_LOG` so that log lines
/// stay off the canvas while playing.
fn init_logging() {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if let Ok(path) = env::var("STORYBOARD_LOG") {
        match fs::File::create(&path) {
            Ok(file) => {
                builder.target(env_logger::Target::Pipe(Box::new(file)));
            }
            Err(e) => eprintln!("Warning: cannot open log file {path} ({e}), logging to stderr"),
        }
    }
    builder.init();
}

fn play(name: &str) -> Result<()> {
    let program: Program = name.parse()?;
    let config = Config::load();
    let mut player = Player::new(program, &config);
    player.play()
}

fn record(name: &str, ticks: &str, output_path: &str, script: &str) -> Result<()> {
    let program: Program = name.parse()?;
    let ticks = recorder::parse_ticks(ticks)?;
    let config = Config::load();
    let script = KeyScript::parse(script, &config.key_bindings)?;

    let mut driver = program.driver();
    let frames = Recorder::record(&mut driver, ticks, &script);
    let recording = Recording {
        program: program.name().to_string(),
        tick_interval_ms: config.tick_interval_ms.millis(program),
        frames,
    };

    let output_json = serde_json::to_string_pretty(&recording)?;
    fs::write(output_path, &output_json)
        .with_context(|| format!("Failed to write {output_path}"))?;

    eprintln!(
        "Recorded {} frames of {} -> {}",
        recording.frames.len(),
        program,
        output_path,
    );

    Ok(())
}
