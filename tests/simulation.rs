//! Whole-run scenarios driven through the public API

use glam::Vec2;

use saturn_strike::audio::{AudioManager, MusicTrack};
use saturn_strike::platform::HeldInput;
use saturn_strike::renderer::LogRenderer;
use saturn_strike::sim::enemy::fighter::FIGHTER_SHOT_SPEED;
use saturn_strike::sim::player::HOME_Y;
use saturn_strike::sim::{
    Cruiser, Enemy, EnemyContext, Fighter, GameEvent, GamePhase, GameState, Projectile,
    ProjectileKind, TickInput, tick,
};
use saturn_strike::{RunOutcome, Runner, Tuning};

fn armed_state(seed: u64) -> GameState {
    let tuning = Tuning {
        invulnerable_ticks: 0,
        ..Tuning::immediate()
    };
    let mut state = GameState::with_tuning(seed, tuning);
    state.player.arriving = false;
    state.player.body.pos.y = HOME_Y;
    state
}

#[test]
fn fighter_fires_one_aimed_shot() {
    let mut state = armed_state(1);
    let target = state.player.rect();

    // Bottom 250 px above the player's top, centre 300 px to the left
    let mut fighter = Fighter::new(100, 0.0);
    fighter.body.pos = Vec2::new(
        (target.center_x() - 300 - 24) as f32,
        (target.top() - 250 - 48) as f32,
    );
    let muzzle = {
        let r = fighter.rect();
        Vec2::new(r.center_x() as f32, r.bottom() as f32)
    };

    let mut ctx = EnemyContext {
        target: state.target(),
        ids: &mut state.ids,
        rng: &mut state.rng,
        events: &mut state.events,
    };
    fighter.decide(&mut ctx);
    fighter.decide(&mut ctx);
    let shots = fighter.drain_fired();

    assert_eq!(shots.len(), 1);
    let vel = shots[0].body.vel;
    assert!((vel.length() - FIGHTER_SHOT_SPEED).abs() < 1e-4);
    let aim = (target.center() - muzzle).normalize();
    assert!((vel.normalize() - aim).length() < 1e-4);
    assert!(fighter.has_shot());
}

#[test]
fn boss_arrives_on_the_ninety_ninth_kill() {
    let mut state = armed_state(2);
    state.kill_count = 99;
    tick(&mut state, &TickInput::default());
    assert!(state.boss.is_some());
    assert_eq!(state.phase, GamePhase::BossFight);

    for _ in 0..100 {
        tick(&mut state, &TickInput::default());
    }
    let spawns = state
        .events
        .iter()
        .filter(|e| **e == GameEvent::BossSpawned)
        .count();
    assert_eq!(spawns, 1);
    assert!(state.events.contains(&GameEvent::Music(MusicTrack::Boss)));
}

#[test]
fn last_hit_on_boss_ends_in_victory() {
    let mut state = armed_state(3);
    let mut boss = Cruiser::new(state.ids.next_id());
    boss.body.pos.y = 100.0;
    boss.health = 1;
    let center = boss.body.center();
    state.boss = Some(boss);
    state.boss_spawned = true;
    state.kill_count = 99;

    let shot = Projectile::new(
        state.ids.next_id(),
        ProjectileKind::PlayerShot,
        center + Vec2::new(0.0, 12.0),
        Vec2::new(0.0, -12.0),
    );
    state.player.bullets.push(shot);

    tick(&mut state, &TickInput::default());
    assert_eq!(state.boss.as_ref().map(|b| b.health), Some(0));
    assert!(!state.boss_defeated);

    tick(&mut state, &TickInput::default());
    assert!(state.boss_defeated);
    assert!(state.boss.is_none());
    assert_eq!(state.phase, GamePhase::Victory);

    let mut guard = 0;
    while state.running && guard < 1000 {
        tick(&mut state, &TickInput::default());
        guard += 1;
    }
    assert!(!state.running);
    assert!(state.player.rect().bottom() <= 0);
    assert!(state.enemy_bullets.is_empty());
}

#[test]
fn same_seed_same_run() {
    let run = |seed| {
        let mut state = GameState::with_tuning(seed, Tuning::immediate());
        let input = TickInput {
            autopilot: true,
            ..Default::default()
        };
        for _ in 0..2000 {
            tick(&mut state, &input);
        }
        (state.kill_count, state.lives, state.time_ticks, state.player.body.pos)
    };
    assert_eq!(run(77), run(77));
}

#[test]
fn collections_never_hold_dead_entities() {
    for seed in 0..4 {
        let mut state = GameState::with_tuning(seed, Tuning::immediate());
        let input = TickInput {
            autopilot: true,
            ..Default::default()
        };
        for _ in 0..1500 {
            tick(&mut state, &input);
            assert!(state.all_alive(), "seed {seed} tick {}", state.time_ticks);
            assert_eq!(state.purge_dead(), 0);
            assert_eq!(state.sweep_out_of_bounds(), 0);
        }
    }
}

#[test]
fn headless_demo_run_finishes_cleanly() {
    let mut runner = Runner::new(
        GameState::with_tuning(5, Tuning::immediate()),
        HeldInput::autopilot(),
        AudioManager::silent(),
        LogRenderer::default(),
    );
    let outcome = runner.run(3000);
    assert!(matches!(
        outcome,
        RunOutcome::TimedOut | RunOutcome::GameOver | RunOutcome::Victory
    ));
    assert_eq!(runner.renderer().frames(), runner.state.time_ticks);
    assert!(runner.state.events.is_empty());
}
