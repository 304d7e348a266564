//! Build script for orderbolt-daemon
//!
//! Validates the embedded orderbolt.toml at compile time so a broken default
//! never ships. Runtime overrides passed with --config are checked again by
//! the loader.

use std::fs;
use std::path::Path;

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    validate_config();
}

/// Validate orderbolt.toml at compile time
fn validate_config() {
    println!("cargo:rerun-if-changed=orderbolt.toml");

    let config_path = Path::new("orderbolt.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: orderbolt.toml not found!                                ║\n\
            ║                                                                  ║\n\
            ║  The daemon embeds orderbolt.toml as its default configuration.  ║\n\
            ║  Please create one in the orderbolt-daemon directory.            ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read orderbolt.toml                            ║\n\
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
                ║  ERROR: Invalid TOML syntax in orderbolt.toml                    ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                {}\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    };

    let mut errors = Vec::new();
    validate_required_sections(&config, &mut errors);
    validate_display(&config, &mut errors);
    validate_hardware(&config, &mut errors);

    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid values in orderbolt.toml                         ║\n\
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

    println!("cargo:warning=orderbolt.toml validated successfully");
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.chars().count() > 64 {
                format!("{}...", line.chars().take(61).collect::<String>())
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn validate_required_sections(config: &toml::Value, errors: &mut Vec<String>) {
    for section in ["display", "hardware"] {
        match config.get(section) {
            Some(toml::Value::Table(_)) => {}
            Some(_) => errors.push(format!("[{}] must be a table", section)),
            None => errors.push(format!("Missing [{}] section", section)),
        }
    }
}

/// Check an optional integer field against an inclusive range
fn check_range(
    table: &toml::value::Table,
    section: &str,
    key: &str,
    min: i64,
    max: i64,
    errors: &mut Vec<String>,
) {
    match table.get(key) {
        None => {}
        Some(toml::Value::Integer(v)) if (min..=max).contains(v) => {}
        Some(toml::Value::Integer(_)) => {
            errors.push(format!("[{}] {} must be {}-{}", section, key, min, max))
        }
        Some(_) => errors.push(format!("[{}] {} must be an integer", section, key)),
    }
}

/// Check an optional string field against a list of allowed values
fn check_choice(
    table: &toml::value::Table,
    section: &str,
    key: &str,
    allowed: &[&str],
    errors: &mut Vec<String>,
) {
    match table.get(key) {
        None => {}
        Some(toml::Value::String(s)) if allowed.contains(&s.as_str()) => {}
        Some(_) => errors.push(format!(
            "[{}] {} must be one of: {}",
            section,
            key,
            allowed.join(", ")
        )),
    }
}

fn validate_display(config: &toml::Value, errors: &mut Vec<String>) {
    let display = match config.get("display") {
        Some(toml::Value::Table(t)) => t,
        _ => return,
    };

    check_range(display, "display", "width", 1, 256, errors);
    check_range(display, "display", "height", 1, 128, errors);
    check_range(display, "display", "tick_rate_hz", 1, 100, errors);

    if let Some(banner) = display.get("idle_banner") {
        match banner {
            toml::Value::String(s) if s.chars().count() <= 32 => {}
            _ => errors.push("[display] idle_banner must be a string of at most 32 chars".into()),
        }
    }

    if let Some(toml::Value::Table(scroll)) = display.get("scroll") {
        check_range(scroll, "display.scroll", "speed", 1, 1024, errors);
        check_choice(scroll, "display.scroll", "alignment", &["left", "center"], errors);
    }

    if let Some(toml::Value::Table(timing)) = display.get("timing") {
        for key in ["flash_ticks", "detail_ticks", "item_ticks", "return_ticks"] {
            check_range(timing, "display.timing", key, 1, 100_000, errors);
        }
        for key in ["detail_policy", "item_policy"] {
            check_choice(timing, "display.timing", key, &["fixed", "scroll_pass"], errors);
        }
    }

    if let Some(toml::Value::Table(indicator)) = display.get("indicator") {
        for name in ["arrival", "cycle_start"] {
            match indicator.get(name) {
                None => {}
                Some(toml::Value::Table(pattern)) => {
                    let section = format!("display.indicator.{}", name);
                    check_range(pattern, &section, "cycles", 0, 255, errors);
                    check_range(pattern, &section, "on_ticks", 0, 65_535, errors);
                    check_range(pattern, &section, "off_ticks", 0, 65_535, errors);
                }
                Some(_) => errors.push(format!("[display.indicator] {} must be a table", name)),
            }
        }
    }
}

fn validate_hardware(config: &toml::Value, errors: &mut Vec<String>) {
    let hardware = match config.get("hardware") {
        Some(toml::Value::Table(t)) => t,
        _ => return,
    };

    // 7-bit addresses outside the reserved ranges
    check_range(hardware, "hardware", "panel_address", 0x08, 0x77, errors);
    check_range(hardware, "hardware", "contrast", 0, 255, errors);
    check_range(hardware, "hardware", "indicator_line", 0, 511, errors);

    for key in ["i2c_bus", "gpio_chip"] {
        match hardware.get(key) {
            None => {}
            Some(toml::Value::String(path)) if path.starts_with("/dev/") => {}
            Some(_) => errors.push(format!("[hardware] {} must be a /dev path", key)),
        }
    }

    if let Some(value) = hardware.get("indicator_active_low") {
        if !value.is_bool() {
            errors.push("[hardware] indicator_active_low must be true or false".into());
        }
    }
}
