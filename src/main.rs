//! Saturn Strike entry point
//!
//! Native builds run a headless demo: the autopilot flies one full run with
//! logging audio and rendering backends.
//!
//! Usage: `saturn-strike [settings.json] [tuning.json]`

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::path::Path;

    use saturn_strike::audio::{AudioManager, LogAudio};
    use saturn_strike::platform::HeldInput;
    use saturn_strike::renderer::LogRenderer;
    use saturn_strike::sim::GameState;
    use saturn_strike::{Runner, Settings, Tuning};

    /// Ten minutes of play
    const MAX_TICKS: u64 = 60 * 60 * 10;

    env_logger::init();
    log::info!("Saturn Strike (native) starting...");

    let mut args = std::env::args().skip(1);
    let settings = args
        .next()
        .map(|p| Settings::load(Path::new(&p)))
        .unwrap_or_default();
    let tuning = match args.next() {
        Some(path) => Tuning::load(Path::new(&path)).unwrap_or_else(|err| {
            log::warn!("Tuning not loaded ({err}), using defaults");
            Tuning::default()
        }),
        None => Tuning::default(),
    };

    let seed = settings.seed.unwrap_or_else(|| {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0)
    });
    log::info!("Seed {seed}, quality {}", settings.quality.as_str());

    let state = GameState::with_options(seed, tuning, settings.quality.star_count());
    let mut runner = Runner::new(
        state,
        HeldInput::autopilot(),
        AudioManager::new(Box::new(LogAudio)),
        LogRenderer::default(),
    )
    .with_settings(&settings);

    let outcome = runner.run(MAX_TICKS);
    let state = &runner.state;
    log::info!(
        "{outcome:?} after {}s: {} kills, {} lives left, power {}",
        state.seconds,
        state.kill_count,
        state.lives,
        state.player.power_level,
    );
    if runner.audio().failures() > 0 {
        log::warn!("{} audio calls failed", runner.audio().failures());
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // No browser host yet; the library is driven by the embedding page
}
