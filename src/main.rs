// src/main.rs
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]
mod config;
mod gui;
use std::fs;
use anyhow::Context;
use eframe::egui;
use log::info;
use waveview::{render_frame_png, WaveStyle};
use crate::config::{SnapshotConfig, ViewerConfig};
fn write_snapshot(snapshot: &SnapshotConfig) -> anyhow::Result<()> {
    let png = render_frame_png(
        snapshot.elapsed_ms,
        snapshot.width,
        snapshot.height,
        &WaveStyle::default(),
    )
    .context("failed to render snapshot")?;
    fs::write(&snapshot.path, png)
        .with_context(|| format!("failed to write {}", snapshot.path.display()))?;
    info!(
        "wrote {}x{} frame at {}ms to {}",
        snapshot.width,
        snapshot.height,
        snapshot.elapsed_ms,
        snapshot.path.display()
    );
    Ok(())
}
fn main() -> anyhow::Result<()> {
    env_logger::init();
    let config = ViewerConfig::load()?;
    if let Some(snapshot) = &config.snapshot {
        return write_snapshot(snapshot);
    }
    info!("opening {}x{} viewer", config.width, config.height);
    let viewport = egui::ViewportBuilder::default()
        .with_inner_size([config.width, config.height])
        .with_min_inner_size([config.min_width, config.min_height])
        .with_title(config.title.clone());
    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };
    eframe::run_native(
        "waveview",
        options,
        Box::new(|_cc| Box::new(gui::WaveViewApp::new(WaveStyle::default()))),
    )
    .map_err(|err| anyhow::anyhow!("viewer exited with an error: {err}"))
}
