//! Playback shared by `play`, `read` and `capture`.

use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Result;
use tracing::{info, warn};

use braille_reader::actuator::{ActuatorSink, SerialActuator};
use braille_reader::braille::SymbolTable;
use braille_reader::cli::PlaybackArgs;
use braille_reader::player::{PlayerEvent, PlayerPhase, SequencePlayer};
use braille_reader::recognition::{recognize, RecognizedSequence};
use braille_reader::tui::{PlayerApp, StatusLine};
use braille_reader::Config;

/// Longest single sleep, so Ctrl-C is noticed promptly.
const MAX_SLEEP: Duration = Duration::from_millis(100);

/// Handle `play <TEXT>`.
#[cfg(not(tarpaulin_include))]
pub fn handle(text: &str, args: &PlaybackArgs, config: Config) -> Result<()> {
    let config = args.apply(config);
    play_text(text, args, &config)
}

/// Filter `raw` through the symbol table and play it.
///
/// Recognition errors are returned untouched so `main` can print guidance.
#[cfg(not(tarpaulin_include))]
pub fn play_text(raw: &str, args: &PlaybackArgs, config: &Config) -> Result<()> {
    let sequence = recognize(raw, SymbolTable::standard())?;
    info!(text = %sequence, "playing");

    let actuator = Arc::new(SerialActuator::new());
    let connected = connect_actuator(&actuator, config);

    let result = if args.line_output() {
        run_plain(sequence, actuator.clone(), config, args.json)
    } else {
        let mut app = PlayerApp::new(
            actuator.clone(),
            config.serial_settings(),
            config.playback_timing(),
        )
        .with_theme(config.theme());
        if let Some(status) = connected {
            app.set_status(status);
        }
        app.run(sequence)
    };

    actuator.disconnect();
    result
}

/// Connect when a device is configured and auto-connect is on.
///
/// A failed connect is reported and playback goes on without the actuator.
fn connect_actuator(actuator: &SerialActuator, config: &Config) -> Option<StatusLine> {
    if !config.actuator.auto_connect {
        return None;
    }
    let settings = config.serial_settings()?;
    match actuator.connect(&settings) {
        Ok(info) => Some(StatusLine::success(format!(
            "Connected to actuator on {}.",
            info.device
        ))),
        Err(e) => {
            warn!(error = %e, "actuator connect failed");
            let status = StatusLine::warning(format!("Actuator unavailable: {}", e));
            eprintln!(
                "{}. Continuing without it.",
                status.to_ansi(&config.theme())
            );
            Some(status)
        }
    }
}

/// Play without the TUI, printing one line per event until completion or
/// Ctrl-C.
#[cfg(not(tarpaulin_include))]
fn run_plain(
    sequence: RecognizedSequence,
    actuator: Arc<SerialActuator>,
    config: &Config,
    json: bool,
) -> Result<()> {
    let interrupted = Arc::new(AtomicBool::new(false));
    let flag = interrupted.clone();
    if let Err(e) = ctrlc::set_handler(move || flag.store(true, Ordering::SeqCst)) {
        warn!(error = %e, "could not install Ctrl-C handler");
    }

    let sink: Arc<dyn ActuatorSink> = actuator.clone();
    let mut player = SequencePlayer::new(sink, config.playback_timing());
    let (tx, events) = mpsc::channel();
    player.subscribe(move |event| {
        let _ = tx.send(event.clone());
    });

    let stdout = io::stdout();
    let mut out = stdout.lock();
    player.load(sequence, Instant::now());

    loop {
        for event in events.try_iter() {
            write_event(&mut out, &event, json)?;
        }
        for failure in actuator.take_failures() {
            warn!(character = ?failure.character, message = %failure.message, "actuator write failed");
        }
        if player.phase() == PlayerPhase::Completed {
            break;
        }
        if interrupted.load(Ordering::SeqCst) {
            player.reset();
            for event in events.try_iter() {
                write_event(&mut out, &event, json)?;
            }
            break;
        }
        let Some(wait) = player.time_until_next(Instant::now()) else {
            break;
        };
        thread::sleep(wait.min(MAX_SLEEP));
        player.poll(Instant::now());
    }
    Ok(())
}

/// Write one event as a line of text or JSON.
pub fn write_event(out: &mut impl Write, event: &PlayerEvent, json: bool) -> Result<()> {
    if json {
        writeln!(out, "{}", serde_json::to_string(event)?)?;
    } else {
        writeln!(out, "{}", describe_event(event))?;
    }
    out.flush()?;
    Ok(())
}

/// Human-readable line for `event`.
pub fn describe_event(event: &PlayerEvent) -> String {
    match event {
        PlayerEvent::Loaded { total } => format!("Loaded {} character(s).", total),
        PlayerEvent::CharacterShown {
            character,
            pattern,
            index,
            total,
        } => {
            let dots = pattern
                .raised_dots()
                .iter()
                .map(u8::to_string)
                .collect::<Vec<_>>()
                .join(",");
            let name = if *character == ' ' {
                "space".to_string()
            } else {
                character.to_string()
            };
            format!(
                "[{}/{}] {} {} dots: {}",
                index,
                total,
                name,
                pattern.to_unicode(),
                if dots.is_empty() { "none" } else { dots.as_str() }
            )
        }
        PlayerEvent::Completed => "Braille text completed.".to_string(),
        PlayerEvent::Reset => "Reset.".to_string(),
        PlayerEvent::ActuatorSendFailed { character, reason } => {
            format!("Could not send {:?} to actuator: {}", character, reason)
        }
    }
}
