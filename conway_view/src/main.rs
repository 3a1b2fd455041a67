// main.rs - Window host for a scripted Game of Life simulation
//
// conway_view <script-file>

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::{Context, Result, bail};
use conway::{LifeConfig, PatternStore, Simulation, interpret, logging};
use eframe::egui;
use egui::Color32;

mod ui;

fn main() -> Result<()> {
    logging::init_tracing();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let [script_path] = args.as_slice() else {
        bail!("usage: conway_view <script-file>");
    };
    let script_path = PathBuf::from(script_path);

    let cwd = std::env::current_dir().context("reading working directory")?;
    let config = LifeConfig::load_or_default(&cwd).context("loading conway.toml")?;
    let app = GameOfLife::load(&script_path, &config)?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([800.0, 950.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Conway's Game of Life",
        options,
        Box::new(|_cc| Box::new(app)),
    )
    .map_err(|e| anyhow::anyhow!("window failed: {e}"))
}

/// Viewer state around one simulation.
pub struct GameOfLife {
    script_path: PathBuf,
    store: PatternStore,
    sim: Simulation,

    pub is_running: bool,
    pub last_update: Instant,
    pub update_interval: Duration,
    pub cell_size: f32,
    pub live_color: Color32,
    pub dead_color: Color32,
    pub last_error: Option<String>,
}

impl GameOfLife {
    fn load(script_path: &Path, config: &LifeConfig) -> Result<Self> {
        let store = PatternStore::new(config.patterns.source()?);
        let sim = build_simulation(script_path, &store)?;
        let [lr, lg, lb] = config.view.live_color;
        let [dr, dg, db] = config.view.dead_color;

        Ok(Self {
            script_path: script_path.to_path_buf(),
            store,
            sim,
            is_running: false,
            last_update: Instant::now(),
            update_interval: Duration::from_millis(config.view.update_interval_ms),
            cell_size: config.view.cell_size,
            live_color: Color32::from_rgb(lr, lg, lb),
            dead_color: Color32::from_rgb(dr, dg, db),
            last_error: None,
        })
    }

    pub fn simulation(&self) -> &Simulation {
        &self.sim
    }

    pub fn update_generation(&mut self) {
        self.sim.step();
    }

    /// Re-reads the script from disk. Patterns already loaded stay cached.
    pub fn reload(&mut self) {
        match build_simulation(&self.script_path, &self.store) {
            Ok(sim) => {
                self.sim = sim;
                self.last_error = None;
            }
            Err(e) => {
                tracing::error!("reload failed: {e:#}");
                self.last_error = Some(format!("{e:#}"));
            }
        }
        self.is_running = false;
    }
}

fn build_simulation(script_path: &Path, store: &PatternStore) -> Result<Simulation> {
    let script = std::fs::read_to_string(script_path)
        .with_context(|| format!("reading {}", script_path.display()))?;
    interpret(&script, store).with_context(|| format!("interpreting {}", script_path.display()))
}
