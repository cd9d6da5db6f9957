/*
 *  main.rs
 *
 *  sharp-lq070k1sx - Sharp LQ070K1SX DSI video mode panel driver
 *  (c) 2026 Stuart Hunter
 *
 *  Bring-up tool: runs the panel driver against a recording DSI host and
 *  prints every host call with its timing.
 *
 *  This program is free software: you can redistribute it and/or modify
 *  it under the terms of the GNU General Public License as published by
 *  the Free Software Foundation, version 2 of the License.
 *
 *  This program is distributed in the hope that it will be useful,
 *  but WITHOUT ANY WARRANTY; without even the implied warranty of
 *  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *  GNU General Public License for more details.
 *
 *  See <http://www.gnu.org/licenses/> to get a copy of the GNU General
 *  Public License.
 *
 */

use anyhow::{Context, bail};
use clap::Parser;
use env_logger::Env;
use linux_embedded_hal::Delay;
use log::{error, info};

use tokio::signal::unix::{signal, SignalKind};

use lq070k1sx::config::{self, Action, Cli, PanelConfig};
use lq070k1sx::display::drivers::lq070k1sx::DRIVER_NAME;
use lq070k1sx::display::{BoxedDriver, PanelDriverFactory, TraceRecorder};

include!(concat!(env!("OUT_DIR"), "/build_info.rs"));

/// Waits for SIGINT, SIGTERM or SIGHUP.
async fn signal_handler() -> anyhow::Result<()> {
    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sighup = signal(SignalKind::hangup())?;

    tokio::select! {
        _ = sigint.recv() => {
            info!("SIGINT received. Powering panel down.");
        }
        _ = sigterm.recv() => {
            info!("SIGTERM received. Powering panel down.");
        }
        _ = sighup.recv() => {
            info!("SIGHUP received. Powering panel down.");
        }
    }
    Ok(())
}

fn bind(panel_cfg: &PanelConfig, recorder: &TraceRecorder) -> anyhow::Result<BoxedDriver> {
    let panel = if panel_cfg.realtime.unwrap_or(false) {
        PanelDriverFactory::create_from_config(panel_cfg, recorder.host(), recorder.delay_with(Delay))
    } else {
        PanelDriverFactory::create_from_config(panel_cfg, recorder.host(), recorder.delay())
    };
    panel.context("binding panel driver")
}

/// Print and clear the host calls recorded so far
fn dump_trace(title: &str, recorder: &TraceRecorder) {
    let ops = recorder.ops();
    println!("{} ({} calls, {} ms of delays)", title, ops.len(), recorder.total_delay_ms());
    for op in &ops {
        println!("  {}", op);
    }
    recorder.clear_ops();
}

fn run_blocking<T>(f: impl FnOnce() -> T) -> T {
    tokio::task::block_in_place(f)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut cfg = config::load(&cli)?;

    let level = cfg.log_level.clone().unwrap_or_else(|| "info".to_string());
    env_logger::Builder::from_env(Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();

    info!("{} v.{} built {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"), BUILD_DATE);

    let panel_cfg = cfg.panel.get_or_insert_with(PanelConfig::default);
    if panel_cfg.driver.is_none() {
        panel_cfg.driver = Some(DRIVER_NAME.to_string());
    }

    if cli.dump_config {
        let s = serde_yaml::to_string(&cfg)?;
        println!("{s}");
        return Ok(());
    }

    let panel_cfg = cfg.panel.clone().unwrap_or_default();
    let recorder = TraceRecorder::new();
    let panel = bind(&panel_cfg, &recorder)?;
    dump_trace("probe", &recorder);

    match cli.action {
        Action::Probe => {}
        Action::Timings => {
            let (x, y) = panel.resolution();
            println!("{}: {}x{} @ {} bpp", panel.name(), x, y, panel.recommended_bpp());
            print!("{}", serde_yaml::to_string(panel.panel_info())?);
        }
        Action::Check => {
            let requested = panel_cfg.timings.unwrap_or_else(|| panel.timings());
            match panel.check_timings(&requested) {
                Ok(()) => println!("timings accepted"),
                Err(e) => {
                    panel.remove();
                    bail!("timings rejected: {}", e);
                }
            }
        }
        Action::Cycle => {
            run_blocking(|| panel.enable()).context("enabling panel")?;
            dump_trace("enable", &recorder);
            run_blocking(|| panel.disable());
            dump_trace("disable", &recorder);
        }
        Action::Hold => {
            run_blocking(|| panel.enable()).context("enabling panel")?;
            dump_trace("enable", &recorder);
            info!("Panel on, waiting for a signal");
            if let Err(e) = signal_handler().await {
                error!("signal handling failed: {}", e);
            }
            run_blocking(|| panel.disable());
            dump_trace("disable", &recorder);
        }
    }

    panel.remove();
    dump_trace("remove", &recorder);

    Ok(())
}
