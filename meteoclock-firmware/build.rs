//! Build script for meteoclock-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates panel.toml at compile time
//! - Generates the `PANEL_CONFIG` constant from it

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use meteoclock_core::config::{ConfigError, PanelConfig};

/// Sections and keys panel.toml may contain
const KNOWN_KEYS: &[(&str, &[&str])] = &[
    (
        "timing",
        &[
            "acquisition_period_ms",
            "input_period_ms",
            "render_period_ms",
            "debounce_ms",
            "edit_timeout_ms",
        ],
    ),
    ("calibration", &["pressure_offset_hpa"]),
    ("edit", &["year_min", "year_max"]),
    (
        "layout",
        &[
            "origin_x",
            "origin_y",
            "cell_width",
            "cell_height",
            "line_pitch",
            "columns",
        ],
    ),
];

fn main() {
    setup_linker();
    let config = validate_config();
    generate_config(&config);
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

    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate panel.toml and return the parsed configuration
fn validate_config() -> PanelConfig {
    println!("cargo:rerun-if-changed=panel.toml");

    let config_path = Path::new("panel.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: panel.toml not found!                                    ║\n\
            ║                                                                  ║\n\
            ║  The firmware requires a panel.toml configuration file.          ║\n\
            ║  Please create one in the meteoclock-firmware directory.         ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read panel.toml                                ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    // Parse and validate TOML syntax
    let value: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => fail("Invalid TOML syntax in panel.toml", &error_lines(&e.to_string())),
    };

    validate_known_keys(&value);

    // Field types and values
    let config: PanelConfig = match value.try_into() {
        Ok(config) => config,
        Err(e) => fail("Invalid value in panel.toml", &error_lines(&e.to_string())),
    };

    if let Err(e) = config.validate() {
        fail("Invalid panel configuration", &[describe(e).to_string()]);
    }

    println!("cargo:warning=panel.toml validated successfully");
    config
}

/// Reject sections and keys the firmware does not know
///
/// Unknown keys would otherwise fall back to defaults silently.
fn validate_known_keys(config: &toml::Value) {
    let mut errors = Vec::new();

    let Some(root) = config.as_table() else {
        return;
    };

    for (section, body) in root {
        let Some((_, keys)) = KNOWN_KEYS.iter().find(|(name, _)| name == section) else {
            errors.push(format!("Unknown section [{}]", section));
            continue;
        };

        let Some(body) = body.as_table() else {
            errors.push(format!("[{}] must be a table", section));
            continue;
        };

        for key in body.keys() {
            if !keys.contains(&key.as_str()) {
                errors.push(format!("[{}] unknown key '{}'", section, key));
            }
        }
    }

    if !errors.is_empty() {
        fail("Unknown entries in panel.toml", &errors);
    }
}

/// Human readable validation error
fn describe(error: ConfigError) -> &'static str {
    match error {
        ConfigError::ZeroPeriod => "periods, debounce and edit timeout must be non-zero",
        ConfigError::InputNotFastest => "input_period_ms must be below the other periods",
        ConfigError::TimeoutTooShort => "edit_timeout_ms must exceed debounce_ms",
        ConfigError::InvalidYearRange => "year range must be ordered and within 2000-2099",
        ConfigError::InvalidCalibration => "pressure_offset_hpa must be within +/-50 hPa",
        ConfigError::InvalidLayout => "cells must be non-empty and line_pitch >= cell_height",
    }
}

/// Write `PANEL_CONFIG` into OUT_DIR
fn generate_config(config: &PanelConfig) {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let t = &config.timing;
    let c = &config.calibration;
    let e = &config.edit;
    let l = &config.layout;

    let source = format!(
        "/// Panel configuration from panel.toml\n\
         pub const PANEL_CONFIG: PanelConfig = PanelConfig {{\n\
         \x20   timing: TimingConfig {{\n\
         \x20       acquisition_period_ms: {},\n\
         \x20       input_period_ms: {},\n\
         \x20       render_period_ms: {},\n\
         \x20       debounce_ms: {},\n\
         \x20       edit_timeout_ms: {},\n\
         \x20   }},\n\
         \x20   calibration: CalibrationConfig {{\n\
         \x20       pressure_offset_hpa: {:?}_f32,\n\
         \x20   }},\n\
         \x20   edit: EditConfig {{\n\
         \x20       year_min: {},\n\
         \x20       year_max: {},\n\
         \x20   }},\n\
         \x20   layout: LayoutConfig {{\n\
         \x20       origin_x: {},\n\
         \x20       origin_y: {},\n\
         \x20       cell_width: {},\n\
         \x20       cell_height: {},\n\
         \x20       line_pitch: {},\n\
         \x20       columns: {},\n\
         \x20   }},\n\
         }};\n",
        t.acquisition_period_ms,
        t.input_period_ms,
        t.render_period_ms,
        t.debounce_ms,
        t.edit_timeout_ms,
        c.pressure_offset_hpa,
        e.year_min,
        e.year_max,
        l.origin_x,
        l.origin_y,
        l.cell_width,
        l.cell_height,
        l.line_pitch,
        l.columns,
    );

    fs::write(out_dir.join("panel_config.rs"), source).unwrap();
}

/// Abort the build with a boxed error report
fn fail(title: &str, errors: &[String]) -> ! {
    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: {:<56} ║\n\
        ╠══════════════════════════════════════════════════════════════════╣\n\
        {}\n\
        ╚══════════════════════════════════════════════════════════════════╝\n",
        title,
        errors
            .iter()
            .map(|e| format!("║  • {:<62} ║", e))
            .collect::<Vec<_>>()
            .join("\n")
    );
}

/// Split a multi-line parser error into box-sized lines
fn error_lines(msg: &str) -> Vec<String> {
    msg.lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| {
            if line.chars().count() > 62 {
                format!("{}...", line.chars().take(59).collect::<String>())
            } else {
                line.to_string()
            }
        })
        .collect()
}
