//! Build script for bodyctl-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates body.toml at compile time
//! - Generates `tuning.rs` constants from body.toml

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Keys every module table must carry, with their kind
const TIMING_KEYS: &[(&str, Kind)] = &[("tick_ms", Kind::Millis)];

const HEADLIGHT_KEYS: &[(&str, Kind)] = &[
    ("debounce_ms", Kind::Millis),
    ("debounce_active_low", Kind::Flag),
    ("seat_active_low", Kind::Flag),
    ("lights_on", Kind::Ratio),
    ("lights_off", Kind::Ratio),
    ("dusk", Kind::Ratio),
    ("daylight", Kind::Ratio),
    ("dusk_delay_ms", Kind::Millis),
    ("daylight_delay_ms", Kind::Millis),
];

const WIPER_KEYS: &[(&str, Kind)] = &[
    ("debounce_ms", Kind::Millis),
    ("debounce_active_low", Kind::Flag),
    ("seat_active_low", Kind::Flag),
    ("speed_off_max", Kind::Ratio),
    ("speed_low_max", Kind::Ratio),
    ("speed_interval_max", Kind::Ratio),
    ("interval_short_max", Kind::Ratio),
    ("interval_medium_max", Kind::Ratio),
    ("interval_long_max", Kind::Ratio),
    ("gate_ms", Kind::Millis),
    ("duty_min", Kind::Ratio),
    ("duty_max", Kind::Ratio),
    ("step_low", Kind::Ratio),
    ("ramp_time_low_ms", Kind::Millis),
    ("step_high", Kind::Ratio),
    ("ramp_time_high_ms", Kind::Millis),
    ("pause_short_ms", Kind::Millis),
    ("pause_medium_ms", Kind::Millis),
    ("pause_long_ms", Kind::Millis),
    ("pwm_period_ms", Kind::Millis),
];

#[derive(Clone, Copy)]
enum Kind {
    /// Positive integer milliseconds
    Millis,
    /// Number in [0, 1]
    Ratio,
    Flag,
}

fn main() {
    setup_linker();
    let config = validate_config();
    generate_tuning(&config);
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate body.toml at compile time
fn validate_config() -> toml::Value {
    println!("cargo:rerun-if-changed=body.toml");

    let config_path = Path::new("body.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: body.toml not found!                                     ║\n\
            ║                                                                  ║\n\
            ║  The firmware requires a body.toml tuning file in the            ║\n\
            ║  bodyctl-firmware directory.                                     ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read body.toml                                 ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    let config: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => {
            let error_msg = e.to_string();
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in body.toml                         ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                ║                                                                  ║\n\
                {}\n\
                ║                                                                  ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    };

    let mut errors = Vec::new();
    validate_table(&config, "timing", TIMING_KEYS, &mut errors);
    validate_table(&config, "headlight", HEADLIGHT_KEYS, &mut errors);
    validate_table(&config, "wiper", WIPER_KEYS, &mut errors);
    if errors.is_empty() {
        validate_ordering(&config, &mut errors);
    }

    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid tuning in body.toml                              ║\n\
            ╠══════════════════════════════════════════════════════════════════╣\n\
            {}\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            errors
                .iter()
                .map(|e| format!("║  • {:<62} ║", e))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }

    println!("cargo:warning=body.toml validated successfully");
    config
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.len() > 64 {
                format!("{}...", &line[..61])
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Check that a section exists and carries every key with the right kind
fn validate_table(
    config: &toml::Value,
    section: &str,
    keys: &[(&str, Kind)],
    errors: &mut Vec<String>,
) {
    let table = match config.get(section) {
        Some(toml::Value::Table(t)) => t,
        Some(_) => {
            errors.push(format!("[{}] must be a table", section));
            return;
        }
        None => {
            errors.push(format!("Missing [{}] section", section));
            return;
        }
    };

    for (key, kind) in keys {
        let Some(value) = table.get(*key) else {
            errors.push(format!("[{}] missing '{}'", section, key));
            continue;
        };
        match kind {
            Kind::Millis => match value.as_integer() {
                Some(ms) if ms > 0 && ms <= u32::MAX as i64 => {}
                _ => errors.push(format!("[{}] {} must be a positive integer", section, key)),
            },
            Kind::Ratio => match number(value) {
                Some(ratio) if (0.0..=1.0).contains(&ratio) => {}
                _ => errors.push(format!("[{}] {} must be 0.0-1.0", section, key)),
            },
            Kind::Flag => {
                if value.as_bool().is_none() {
                    errors.push(format!("[{}] {} must be true or false", section, key));
                }
            }
        }
    }
}

/// Cross-key checks once every key is known to be present and typed
fn validate_ordering(config: &toml::Value, errors: &mut Vec<String>) {
    let tick = integer(config, "timing", "tick_ms");

    for section in ["headlight", "wiper"] {
        if integer(config, section, "debounce_ms") < tick {
            errors.push(format!("[{}] debounce_ms shorter than tick_ms", section));
        }
    }

    let ratio = |key| ratio(config, "headlight", key);
    if ratio("lights_on") >= ratio("lights_off") {
        errors.push("[headlight] lights_on must be below lights_off".into());
    }
    if ratio("dusk") >= ratio("daylight") {
        errors.push("[headlight] dusk must be below daylight".into());
    }

    let ratio = |key| self::ratio(config, "wiper", key);
    if !(ratio("speed_off_max") < ratio("speed_low_max")
        && ratio("speed_low_max") < ratio("speed_interval_max"))
    {
        errors.push("[wiper] speed thresholds must increase".into());
    }
    if !(ratio("interval_short_max") < ratio("interval_medium_max")
        && ratio("interval_medium_max") < ratio("interval_long_max"))
    {
        errors.push("[wiper] interval thresholds must increase".into());
    }
    if ratio("duty_min") >= ratio("duty_max") {
        errors.push("[wiper] duty_min must be below duty_max".into());
    }

    let gate = integer(config, "wiper", "gate_ms");
    if gate < tick {
        errors.push("[wiper] gate_ms shorter than tick_ms".into());
    }
    let sweep = 2 * integer(config, "wiper", "ramp_time_low_ms");
    if integer(config, "wiper", "pause_short_ms") <= sweep {
        errors.push("[wiper] pause_short_ms must exceed a Low sweep".into());
    }
}

fn number(value: &toml::Value) -> Option<f64> {
    value
        .as_float()
        .or_else(|| value.as_integer().map(|i| i as f64))
}

fn integer(config: &toml::Value, section: &str, key: &str) -> i64 {
    config[section][key].as_integer().unwrap_or_default()
}

fn ratio(config: &toml::Value, section: &str, key: &str) -> f64 {
    number(&config[section][key]).unwrap_or_default()
}

/// Write `tuning.rs` into OUT_DIR
fn generate_tuning(config: &toml::Value) {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let mut out = String::from("// Generated from body.toml by build.rs\n");

    for (section, keys) in [
        ("timing", TIMING_KEYS),
        ("headlight", HEADLIGHT_KEYS),
        ("wiper", WIPER_KEYS),
    ] {
        out.push('\n');
        for (key, kind) in keys {
            let name = format!("{}_{}", section, key).to_uppercase();
            let value = &config[section][*key];
            let line = match kind {
                Kind::Millis => {
                    let ms = value.as_integer().unwrap_or_default();
                    format!("pub const {}: u32 = {};\n", name, ms)
                }
                Kind::Ratio => {
                    let ratio = number(value).unwrap_or_default();
                    format!("pub const {}: f32 = {:?};\n", name, ratio)
                }
                Kind::Flag => {
                    let flag = value.as_bool().unwrap_or_default();
                    format!("pub const {}: bool = {};\n", name, flag)
                }
            };
            out.push_str(&line);
        }
    }

    fs::write(out_dir.join("tuning.rs"), out).unwrap();
}
