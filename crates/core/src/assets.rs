//! Well-known locations and embedded defaults.
use once_cell::sync::Lazy;
use std::path::PathBuf;

const APP_DIR: &str = "askbot";

static PLATFORM_DATA_DIR: Lazy<PathBuf> = Lazy::new(|| {
    dirs::data_local_dir()
        .map(|p| p.join(APP_DIR))
        .unwrap_or_else(|| PathBuf::from("~/.local/share/askbot"))
});

static PLATFORM_CONFIG_DIR: Lazy<PathBuf> = Lazy::new(|| {
    dirs::config_dir()
        .map(|p| p.join(APP_DIR))
        .unwrap_or_else(|| PathBuf::from("~/.config/askbot"))
});

/// `$<xdg_var>/askbot` when the variable is set, `fallback` otherwise.
fn app_dir(xdg_var: &str, fallback: &Lazy<PathBuf>) -> PathBuf {
    match std::env::var_os(xdg_var) {
        Some(base) if !base.is_empty() => PathBuf::from(base).join(APP_DIR),
        _ => fallback.to_path_buf(),
    }
}

/// Directory holding `askbot.yml`.
pub fn get_config_dir() -> PathBuf {
    app_dir("XDG_CONFIG_HOME", &PLATFORM_CONFIG_DIR)
}

/// Directory for logs and REPL history, created on demand.
pub fn get_data_dir() -> std::io::Result<PathBuf> {
    let path = app_dir("XDG_DATA_HOME", &PLATFORM_DATA_DIR);
    std::fs::create_dir_all(&path)?;
    Ok(path)
}

pub fn get_default_config() -> &'static str {
    include_str!("../data/config.yml")
}
