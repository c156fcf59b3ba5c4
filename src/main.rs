//! RustMotionConfig - config shell
//!
//! Feeds console lines from stdin to the config verbs, the way the firmware
//! event loop does:
//! 1. Locate the config file below ROOT (default `.`)
//! 2. Dispatch each line to `config-get` / `config-set` / `config-load`
//! 3. Print serial output on stdout, drained log entries on stderr
//!
//! On ESP-IDF, ROOT is `/` and stdin/stdout are the UART console.

use std::fmt;
use std::io::{self, BufRead, Write as _};

use rust_motion_config::console::CommandContext;
use rust_motion_config::hash::NameOf;
use rust_motion_config::logging::drain_to;
use rust_motion_config::storage::HostFs;
use rust_motion_config::{Config, ConfigCommands, Dispatch, Event, EventSink, CONFIG_LOG};

/// Serial sink over stdout.
struct StdoutSerial(io::Stdout);

impl fmt::Write for StdoutSerial {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.0.write_all(s.as_bytes()).map_err(|_| fmt::Error)
    }
}

/// Log sink over stderr.
struct StderrLog(io::Stderr);

impl fmt::Write for StderrLog {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.0.write_all(s.as_bytes()).map_err(|_| fmt::Error)
    }
}

/// Stand-in bus: the shell has no other modules to notify.
struct ShellBus {
    reloads: u32,
}

impl EventSink for ShellBus {
    fn publish(&mut self, event: Event<'_>) {
        if event == Event::ConfigReload {
            self.reloads += 1;
            println!("# config reload broadcast");
        }
    }
}

fn main() {
    #[cfg(target_os = "espidf")]
    esp_idf_svc::sys::link_patches();

    let root = std::env::args().nth(1).unwrap_or_else(|| default_root().to_string());

    let mut config = Config::new(HostFs::new(&root));
    let mut commands = ConfigCommands::new();
    let mut serial = StdoutSerial(io::stdout());
    let mut logs = StderrLog(io::stderr());
    let mut bus = ShellBus { reloads: 0 };

    match config.config_file() {
        Some(path) => eprintln!("config: {}", config.filesystem().resolve(path).display()),
        None => eprintln!("config: no config file below {}", root),
    }
    drain_to(&CONFIG_LOG, &mut logs);

    for line in io::stdin().lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                eprintln!("stdin: {}", e);
                break;
            }
        };

        let mut ctx = CommandContext {
            settings: &mut config,
            serial: &mut serial,
            bus: &mut bus,
        };
        let event = Event::ConsoleLineReceived(&line);
        if commands.on_event(&event, &mut ctx) == Dispatch::Ignored && !line.trim().is_empty() {
            let verb = line.split_whitespace().next().unwrap_or("");
            eprintln!("unknown verb {} ({})", verb, NameOf(rust_motion_config::name_hash(verb)));
        }

        let _ = serial.0.flush();
        drain_to(&CONFIG_LOG, &mut logs);
    }

    eprintln!("config: {} reload broadcast(s)", bus.reloads);
}

fn default_root() -> &'static str {
    if cfg!(target_os = "espidf") {
        "/"
    } else {
        "."
    }
}
