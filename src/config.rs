use clap::{ArgAction, Parser, ValueEnum, ValueHint};
use dirs_next::home_dir;
use std::{fs, path::{Path, PathBuf}};
use thiserror::Error;

use crate::display::timings::{PanelPlatformData, VideoTimings};

/// Error type for config loading/validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Top-level tool configuration.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, Default)]
pub struct Config {
    pub log_level: Option<String>,     // e.g., "info" | "debug"
    pub panel: Option<PanelConfig>,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, Default)]
pub struct PanelConfig {
    pub driver: Option<String>,     // e.g. "panel-sharp-lq070k1sx"
    pub x_res: Option<u16>,         // platform data, visible width
    pub y_res: Option<u16>,         // platform data, visible height
    pub realtime: Option<bool>,     // honour panel delays on the wall clock
    pub timings: Option<VideoTimings>, // mode offered to `check`
}

impl PanelConfig {
    /// Platform data handed to probe, native resolution where unset
    pub fn platform_data(&self) -> PanelPlatformData {
        let native = PanelPlatformData::default();
        PanelPlatformData {
            x_res: self.x_res.unwrap_or(native.x_res),
            y_res: self.y_res.unwrap_or(native.y_res),
        }
    }
}

/// What the bring-up tool does once the panel is probed
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Action {
    /// Probe and remove, reporting channel allocation
    Probe,
    /// Print resolution and timings
    Timings,
    /// Check the configured timings against the panel
    Check,
    /// Enable then disable the panel once
    Cycle,
    /// Enable and keep the panel on until a signal arrives
    Hold,
}

/// CLI overrides. All fields are Options so we can layer them over YAML.
#[derive(Debug, Parser, Clone)]
#[command(name = "lq070k1sx", version, about = "Sharp LQ070K1SX panel bring-up tool")]
pub struct Cli {
    #[arg(value_enum, default_value_t = Action::Cycle)]
    pub action: Action,
    /// Path to a YAML config file (overrides search)
    #[arg(long, short = 'c', value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,
    #[arg(long)]
    pub log_level: Option<String>,
    /// Enable debug log level
    #[arg(long, short = 'v', alias = "verbose", action = ArgAction::SetTrue)]
    pub debug: bool,
    #[arg(long)]
    pub driver: Option<String>,
    #[arg(long)]
    pub x_res: Option<u16>,
    #[arg(long)]
    pub y_res: Option<u16>,
    #[arg(long, action = ArgAction::Set)]
    pub realtime: Option<bool>,
    /// dump fully merged config (after overrides) and exit
    #[arg(long, action = ArgAction::SetTrue)]
    pub dump_config: bool,
}

/// Read YAML, merge CLI overrides, validate.
pub fn load(cli: &Cli) -> Result<Config, ConfigError> {
    // 1) defaults (from `Default` impl)
    let mut cfg = Config::default();

    // 2) YAML file (explicit path or search)
    if let Some(p) = cli.config.as_ref() {
        if p.exists() {
            let y = read_yaml(p)?;
            merge(&mut cfg, y);
        } else {
            return Err(ConfigError::Validation(format!(
                "Config file not found: {}",
                p.display()
            )));
        }
    } else if let Some(p) = find_config_file() {
        let y = read_yaml(&p)?;
        merge(&mut cfg, y);
    }

    // 3) CLI overrides (highest precedence)
    apply_cli_overrides(&mut cfg, cli);

    // 4) Validate
    validate(&cfg)?;

    Ok(cfg)
}

/// Try common locations in order (first hit wins).
fn find_config_file() -> Option<PathBuf> {
    // XDG-style: ~/.config/lq070k1sx/config.yaml
    if let Some(home) = home_dir() {
        let p = home.join(".config/lq070k1sx/config.yaml");
        if p.exists() { return Some(p) }
        let p = home.join(".config/lq070k1sx.yaml");
        if p.exists() { return Some(p) }
    }
    for candidate in &["lq070k1sx.yaml", "config/lq070k1sx.yaml"] {
        let p = PathBuf::from(candidate);
        if p.exists() { return Some(p) }
    }
    None
}

fn read_yaml(path: &Path) -> Result<Config, ConfigError> {
    let s = fs::read_to_string(path)?;
    parse_yaml(&s)
}

pub fn parse_yaml(s: &str) -> Result<Config, ConfigError> {
    let cfg: Config = serde_yaml::from_str(s)?;
    Ok(cfg)
}

/// Shallow merge `src` into `dst`, Option-by-Option.
pub fn merge(dst: &mut Config, src: Config) {
    if src.log_level.is_some()      { dst.log_level = src.log_level; }
    match (&mut dst.panel, src.panel) {
        (None, Some(c)) => dst.panel = Some(c),
        (Some(d), Some(s)) => merge_panel(d, s),
        _ => {}
    }
}

fn merge_panel(dst: &mut PanelConfig, src: PanelConfig) {
    if src.driver.is_some()     { dst.driver = src.driver; }
    if src.x_res.is_some()      { dst.x_res = src.x_res; }
    if src.y_res.is_some()      { dst.y_res = src.y_res; }
    if src.realtime.is_some()   { dst.realtime = src.realtime; }
    if src.timings.is_some()    { dst.timings = src.timings; }
}

pub fn apply_cli_overrides(cfg: &mut Config, cli: &Cli) {
    if cli.log_level.is_some()      { cfg.log_level = cli.log_level.clone(); }
    if cli.debug                    { cfg.log_level = Some("debug".to_string()); }

    let any_panel = cli.driver.is_some()
        || cli.x_res.is_some()
        || cli.y_res.is_some()
        || cli.realtime.is_some();

    if any_panel && cfg.panel.is_none() {
        cfg.panel = Some(PanelConfig::default());
    }
    if let Some(panel) = cfg.panel.as_mut() {
        if cli.driver.is_some()     { panel.driver = cli.driver.clone(); }
        if cli.x_res.is_some()      { panel.x_res = cli.x_res; }
        if cli.y_res.is_some()      { panel.y_res = cli.y_res; }
        if cli.realtime.is_some()   { panel.realtime = cli.realtime; }
    }
}

/// Put any invariants here (required fields, ranges, etc.)
pub fn validate(cfg: &Config) -> Result<(), ConfigError> {
    if let Some(level) = cfg.log_level.as_deref() {
        match level {
            "off" | "error" | "warn" | "info" | "debug" | "trace" => {},
            _ => return Err(ConfigError::Validation(format!("unknown log_level {}", level))),
        }
    }
    if let Some(panel) = cfg.panel.as_ref() {
        if panel.x_res == Some(0) || panel.y_res == Some(0) {
            return Err(ConfigError::Validation("panel x_res/y_res must be > 0".into()));
        }
        if panel.driver.as_deref().is_some_and(str::is_empty) {
            return Err(ConfigError::Validation("panel driver must not be empty".into()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(args: &[&str]) -> Cli {
        let mut argv = vec!["lq070k1sx"];
        argv.extend_from_slice(args);
        Cli::parse_from(argv)
    }

    #[test]
    fn test_parse_yaml() {
        let cfg = parse_yaml(
            "log_level: debug\npanel:\n  driver: panel-sharp-lq070k1sx\n  x_res: 800\n  y_res: 1280\n",
        ).unwrap();

        assert_eq!(cfg.log_level.as_deref(), Some("debug"));
        let panel = cfg.panel.unwrap();
        assert_eq!(panel.driver.as_deref(), Some("panel-sharp-lq070k1sx"));
        assert_eq!(panel.platform_data(), PanelPlatformData { x_res: 800, y_res: 1280 });
        assert_eq!(panel.realtime, None);
    }

    #[test]
    fn test_platform_data_defaults_to_native() {
        let panel = PanelConfig { y_res: Some(1024), ..Default::default() };
        assert_eq!(panel.platform_data(), PanelPlatformData { x_res: 800, y_res: 1024 });
    }

    #[test]
    fn test_merge_keeps_unset_fields() {
        let mut dst = parse_yaml("panel:\n  driver: a\n  x_res: 640\n").unwrap();
        let src = parse_yaml("panel:\n  x_res: 720\n").unwrap();

        merge(&mut dst, src);

        let panel = dst.panel.unwrap();
        assert_eq!(panel.driver.as_deref(), Some("a"));
        assert_eq!(panel.x_res, Some(720));
    }

    #[test]
    fn test_cli_overrides_win() {
        let mut cfg = parse_yaml("log_level: info\npanel:\n  x_res: 640\n").unwrap();
        let args = cli(&["hold", "--x-res", "800", "-v", "--realtime", "true"]);

        apply_cli_overrides(&mut cfg, &args);

        assert_eq!(args.action, Action::Hold);
        assert_eq!(cfg.log_level.as_deref(), Some("debug"));
        let panel = cfg.panel.unwrap();
        assert_eq!(panel.x_res, Some(800));
        assert_eq!(panel.realtime, Some(true));
    }

    #[test]
    fn test_cli_creates_panel_section() {
        let mut cfg = Config::default();
        apply_cli_overrides(&mut cfg, &cli(&["--y-res", "1024"]));
        assert_eq!(cfg.panel.unwrap().y_res, Some(1024));
    }

    #[test]
    fn test_default_action() {
        assert_eq!(cli(&[]).action, Action::Cycle);
    }

    #[test]
    fn test_parse_timings() {
        let cfg = parse_yaml(
            "panel:\n  timings:\n    x_res: 800\n    y_res: 1280\n    pixel_clock: 0\n    hsw: 64\n    hfp: 64\n    hbp: 64\n    vsw: 1\n    vfp: 6\n    vbp: 12\n",
        ).unwrap();

        let timings = cfg.panel.unwrap().timings.unwrap();
        assert_eq!(timings, crate::display::timings::NATIVE_TIMINGS);
    }

    #[test]
    fn test_validate() {
        assert!(validate(&Config::default()).is_ok());
        assert!(validate(&parse_yaml("panel:\n  x_res: 0\n").unwrap()).is_err());
        assert!(validate(&parse_yaml("panel:\n  driver: ''\n").unwrap()).is_err());
        assert!(validate(&parse_yaml("log_level: loud\n").unwrap()).is_err());
    }

    #[test]
    fn test_missing_config_file() {
        let result = load(&cli(&["--config", "/nonexistent/lq070k1sx.yaml"]));
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }
}
