//! Light/dark color scheme detection.
//!
//! Resolution order: the `TRELLIS_COLOR_MODE` environment variable wins when
//! set to a recognized value, then the platform preference, then
//! [`ColorMode::Light`]. Platform probes shell out (or read the registry),
//! so results are cached for one second.

use std::cell::{Cell, RefCell};
use std::env;
use std::time::{Duration, Instant};

/// The two rendering palettes an app can follow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMode {
    /// Dark content on a light background.
    #[default]
    Light,
    /// Light content on a dark background.
    Dark,
}

/// Environment variable overriding detection; `"light"` or `"dark"`.
const ENV_COLOR_MODE: &str = "TRELLIS_COLOR_MODE";

/// How long a platform probe result stays valid.
const PROBE_INTERVAL: Duration = Duration::from_secs(1);

/// The effective color mode when the app has no explicit override.
pub(crate) fn detect() -> ColorMode {
    if let Ok(raw) = env::var(ENV_COLOR_MODE) {
        match parse_mode(&raw) {
            Some(mode) => return mode,
            None => warn_invalid_once(&raw),
        }
    }
    cached_system_mode()
}

/// Parse an environment override. Unrecognized values yield `None`.
fn parse_mode(raw: &str) -> Option<ColorMode> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "light" => Some(ColorMode::Light),
        "dark" => Some(ColorMode::Dark),
        _ => None,
    }
}

/// Log one warning for an unusable override, then stay quiet.
fn warn_invalid_once(raw: &str) {
    thread_local! {
        static WARNED: Cell<bool> = const { Cell::new(false) };
    }
    WARNED.with(|warned| {
        if !warned.replace(true) {
            tracing::warn!("ignoring unrecognized {ENV_COLOR_MODE} value {raw:?}");
        }
    });
}

/// Probe the platform preference, reusing a recent result.
fn cached_system_mode() -> ColorMode {
    thread_local! {
        static CACHE: RefCell<Option<(Instant, ColorMode)>> = const { RefCell::new(None) };
    }
    CACHE.with(|cache| {
        let mut cache = cache.borrow_mut();
        if let Some((probed_at, mode)) = *cache {
            if probed_at.elapsed() < PROBE_INTERVAL {
                return mode;
            }
        }
        let mode = system_mode();
        *cache = Some((Instant::now(), mode));
        mode
    })
}

/// macOS stores the style globally; `defaults read` fails when the key is
/// absent, which means light.
#[cfg(target_os = "macos")]
fn system_mode() -> ColorMode {
    use std::process::Command;

    let out = Command::new("defaults")
        .args(["read", "-g", "AppleInterfaceStyle"])
        .output();
    match out {
        Ok(out) if out.status.success() && String::from_utf8_lossy(&out.stdout).contains("Dark") => {
            ColorMode::Dark
        }
        _ => ColorMode::Light,
    }
}

/// GNOME names its theme through gsettings; a theme name containing "dark"
/// selects the dark palette. Other desktops fall back to light.
#[cfg(target_os = "linux")]
fn system_mode() -> ColorMode {
    use std::process::Command;

    let out = Command::new("gsettings")
        .args(["get", "org.gnome.desktop.interface", "gtk-theme"])
        .output();
    match out {
        Ok(out)
            if out.status.success()
                && String::from_utf8_lossy(&out.stdout)
                    .to_ascii_lowercase()
                    .contains("dark") =>
        {
            ColorMode::Dark
        }
        _ => ColorMode::Light,
    }
}

/// Windows keeps the preference in the per-user registry.
#[cfg(target_os = "windows")]
fn system_mode() -> ColorMode {
    use std::io;

    use winreg::RegKey;
    use winreg::enums::HKEY_CURRENT_USER;

    let value: io::Result<u32> = RegKey::predef(HKEY_CURRENT_USER)
        .open_subkey("Software\\Microsoft\\Windows\\CurrentVersion\\Themes\\Personalize")
        .and_then(|key| key.get_value("AppsUseLightTheme"));
    match value {
        Ok(0) => ColorMode::Dark,
        _ => ColorMode::Light,
    }
}

/// No probe on this platform.
#[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
fn system_mode() -> ColorMode {
    ColorMode::Light
}
