//! Fixed timestep simulation tick
//!
//! One call advances the run by one frame. The passes run in a fixed order
//! and every pass that can kill something purges the collections before the
//! next pass reads them.

use glam::Vec2;
use rand::Rng;

use super::collision::{mask_collide, rect_collide};
use super::enemy::fighter::SPAWN_LANES;
use super::enemy::frigate::SPAWN_ROWS;
use super::enemy::{Cruiser, Enemy, EnemyContext, Fighter, Frigate};
use super::events::GameEvent;
use super::player::{HOME_Y, PLAYER_SPEED};
use super::powerup::PowerUp;
use super::projectile::Side;
use super::state::{
    CRUISE_STAR_SPEED, GamePhase, GameState, HYPERDRIVE_STAR_SPEED, STAR_DECAY_TICKS,
    VICTORY_STAR_SPEED, enemies_mut,
};
use crate::audio::{MusicTrack, SoundEffect};
use crate::consts::{SCREEN_HALF_WIDTH, TICKS_PER_SECOND};

/// Enemies above this row cannot be hit by player bullets yet
const HITTABLE_FROM_Y: i32 = 10;

/// Intents held during one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub fire: bool,
    /// End the run once this tick completes
    pub quit: bool,
    /// Demo mode - the sim flies the ship itself
    pub autopilot: bool,
}

impl TickInput {
    /// Steering direction, each component in -1..=1
    pub fn direction(&self) -> Vec2 {
        let axis = |neg: bool, pos: bool| f32::from(i8::from(pos) - i8::from(neg));
        Vec2::new(axis(self.left, self.right), axis(self.up, self.down))
    }
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput) {
    if !state.running {
        return;
    }

    apply_input(state, input);
    update_entities(state);

    if state.warmed_up() {
        spawn_enemies(state);
        enemy_decisions(state);
        resolve_collisions(state);
        state.sweep_out_of_bounds();
    }

    update_star_speed(state);
    if state.boss_defeated {
        victory_epilogue(state);
    }
    state.stars.advance(state.star_speed, &mut state.rng);

    advance_clock(state, input);
}

fn apply_input(state: &mut GameState, input: &TickInput) {
    if state.boss_defeated || !state.player.is_controllable() {
        return;
    }
    let (dir, fire) = if input.autopilot {
        autopilot(state)
    } else {
        (input.direction(), input.fire)
    };
    if dir != Vec2::ZERO {
        state.player.steer(dir);
    }
    if fire {
        state.player.fire(&mut state.ids, &mut state.events);
    }
}

/// Line up under the lowest enemy on screen and keep firing
fn autopilot(state: &GameState) -> (Vec2, bool) {
    let me = state.player.rect();
    let quarry = state
        .enemies()
        .map(|e| e.rect())
        .filter(|r| r.bottom() > 0 && r.top() < me.top())
        .max_by_key(|r| r.bottom());

    let goal_x = quarry.map_or(SCREEN_HALF_WIDTH as i32, |r| r.center_x());
    let dx = goal_x - me.center_x();
    let dy = HOME_Y as i32 - me.top();
    let step = |d: i32| {
        if d.abs() < PLAYER_SPEED as i32 {
            0.0
        } else {
            d.signum() as f32
        }
    };
    (Vec2::new(step(dx), step(dy)), quarry.is_some())
}

fn update_entities(state: &mut GameState) {
    state.player.update(&mut state.events);

    let target = state.target();
    let mut ctx = EnemyContext {
        target,
        ids: &mut state.ids,
        rng: &mut state.rng,
        events: &mut state.events,
    };
    for enemy in enemies_mut(&mut state.fighters, &mut state.frigates, &mut state.boss) {
        enemy.update(&mut ctx);
    }

    for bullet in &mut state.enemy_bullets {
        bullet.update();
    }
    for powerup in &mut state.powerups {
        powerup.update();
    }
    state.purge_dead();
}

fn spawn_enemies(state: &mut GameState) {
    if !state.boss_defeated && !state.player.dead {
        if state.boss.is_none()
            && !state.boss_spawned
            && state.kill_count >= state.tuning.boss_kill_threshold
        {
            state.boss = Some(Cruiser::new(state.ids.next_id()));
            state.boss_spawned = true;
            state.events.push(GameEvent::Music(MusicTrack::Boss));
            state.events.push(GameEvent::BossSpawned);
            log::info!("Cruiser inbound after {} kills", state.kill_count);
        }

        if state.boss.is_none() {
            if (state.fighters.len() as u32) < state.max_fighters {
                state.spawn_timer += 1;
                if state.spawn_timer >= state.tuning.fighter_spawn_interval {
                    let x = SPAWN_LANES[state.rng.random_range(0..SPAWN_LANES.len())];
                    state.fighters.push(Fighter::new(state.ids.next_id(), x));
                    state.spawn_timer = 0;
                }
            }
            if state.frigates.is_empty() {
                let top = SPAWN_ROWS[state.rng.random_range(0..SPAWN_ROWS.len())];
                state.frigates.push(Frigate::new(state.ids.next_id(), top));
                log::debug!("Frigate launched on row {top}");
            }
        }
    }

    if state.kills_since_cap_increase >= state.tuning.kills_per_cap_increase {
        state.max_fighters += 1;
        state.kills_since_cap_increase = 0;
        log::info!("Fighter cap raised to {}", state.max_fighters);
    }
}

fn enemy_decisions(state: &mut GameState) {
    let target = state.target();
    let player_down = state.player.dead;
    let mut ctx = EnemyContext {
        target,
        ids: &mut state.ids,
        rng: &mut state.rng,
        events: &mut state.events,
    };

    for fighter in &mut state.fighters {
        fighter.decide(&mut ctx);
    }
    for frigate in &mut state.frigates {
        frigate.decide(&mut ctx);
    }

    if let Some(boss) = state.boss.as_mut() {
        if boss.is_destroyed() {
            boss.die(&mut ctx);
            state.boss_defeated = true;
            ctx.events.push(GameEvent::BossDefeated);
            log::info!("Cruiser destroyed");
        } else {
            boss.decide(&mut ctx);
        }

        if player_down {
            boss.clear_fired();
            let boss_id = boss.body.id;
            for bullet in &mut state.enemy_bullets {
                if bullet.source == Some(boss_id) {
                    bullet.body.kill();
                }
            }
        }
    }

    for enemy in enemies_mut(&mut state.fighters, &mut state.frigates, &mut state.boss) {
        state.enemy_bullets.extend(enemy.drain_fired());
    }
    state.purge_dead();
}

fn resolve_collisions(state: &mut GameState) {
    player_vs_enemies(state);
    state.purge_dead();
    player_vs_enemy_bullets(state);
    state.purge_dead();
    player_bullets_vs_enemies(state);
    state.purge_dead();
    beams_vs_enemies(state);
    state.purge_dead();
    player_vs_powerups(state);
    state.purge_dead();
}

fn lose_life(state: &mut GameState) {
    state.player.die(&mut state.events);
    state.lives = state.lives.saturating_sub(1);
    state.events.push(GameEvent::PlayerDied {
        lives_left: state.lives,
    });
    log::info!("Player down, {} lives left", state.lives);
}

/// Ramming: the enemy takes contact damage, the player loses the ship
fn player_vs_enemies(state: &mut GameState) {
    if !state.player.is_vulnerable() {
        return;
    }
    let (sprite, rect) = (state.player.sprite(), state.player.rect());
    let damage = state.tuning.contact_damage;

    let mut rammed = false;
    for enemy in enemies_mut(&mut state.fighters, &mut state.frigates, &mut state.boss) {
        if mask_collide(sprite, &rect, enemy.sprite(), &enemy.rect()) {
            enemy.damage(damage);
            rammed = true;
            break;
        }
    }
    if rammed {
        lose_life(state);
    }
}

/// Box test only; enemy fire is harsher than ramming
fn player_vs_enemy_bullets(state: &mut GameState) {
    if !state.player.is_vulnerable() {
        return;
    }
    let rect = state.player.rect();
    let struck = match state
        .enemy_bullets
        .iter_mut()
        .find(|b| b.owner == Side::Enemy && rect_collide(&rect, &b.rect()))
    {
        Some(bullet) => {
            bullet.body.kill();
            true
        }
        None => false,
    };
    if struck {
        lose_life(state);
    }
}

fn player_bullets_vs_enemies(state: &mut GameState) {
    let pierce = state.player.power_level > state.tuning.pierce_power_level;
    let odds = state.tuning.power_up_drop_odds.max(1);

    for bullet in state.player.bullets.iter_mut().filter(|b| b.owner == Side::Player) {
        let (sprite, rect) = (bullet.sprite(), bullet.rect());
        for enemy in enemies_mut(&mut state.fighters, &mut state.frigates, &mut state.boss) {
            if !bullet.body.alive {
                break;
            }
            if enemy.health() <= 0 || enemy.rect().y < HITTABLE_FROM_Y {
                continue;
            }
            if !mask_collide(sprite, &rect, enemy.sprite(), &enemy.rect()) {
                continue;
            }

            state.events.push(bullet.on_hit());
            state.events.push(GameEvent::Sound(SoundEffect::Hit));
            enemy.mark_hit();
            enemy.damage(1);
            if !pierce {
                bullet.body.kill();
            }

            if enemy.health() <= 0 {
                state.kills_since_cap_increase += 1;
                state.kill_count += 1;
                if state.rng.random_range(1..=odds) == 1 {
                    let drop = PowerUp::new(state.ids.next_id(), enemy.body().pos);
                    state.powerups.push(drop);
                }
            }
        }
    }
}

/// Beams wreck lesser ships outright and keep going
fn beams_vs_enemies(state: &mut GameState) {
    let target = state.target();
    let mut ctx = EnemyContext {
        target,
        ids: &mut state.ids,
        rng: &mut state.rng,
        events: &mut state.events,
    };

    for beam in state.enemy_bullets.iter().filter(|b| b.is_beam()) {
        let (sprite, rect) = (beam.sprite(), beam.rect());
        for fighter in state.fighters.iter_mut().filter(|f| f.is_alive()) {
            if mask_collide(sprite, &rect, fighter.sprite(), &fighter.rect()) {
                fighter.die(&mut ctx);
            }
        }
        for frigate in state.frigates.iter_mut().filter(|f| f.is_alive()) {
            if mask_collide(sprite, &rect, frigate.sprite(), &frigate.rect()) {
                frigate.die(&mut ctx);
            }
        }
    }
}

fn player_vs_powerups(state: &mut GameState) {
    if state.player.dead {
        return;
    }
    let (sprite, rect) = (state.player.sprite(), state.player.rect());
    for powerup in state.powerups.iter_mut().filter(|p| p.body.alive) {
        if mask_collide(sprite, &rect, powerup.sprite(), &powerup.rect()) {
            state.events.push(powerup.on_pickup());
            state.player.collect_power_up();
            log::debug!("Power level {}", state.player.power_level);
        }
    }
}

/// Hyperdrive while arriving, then ease back to cruising speed
fn update_star_speed(state: &mut GameState) {
    if state.player.arriving {
        state.star_speed = HYPERDRIVE_STAR_SPEED;
    } else {
        state.star_counter = state.star_counter.saturating_add(1);
        if state.star_speed > CRUISE_STAR_SPEED && state.star_counter >= STAR_DECAY_TICKS {
            state.star_speed -= 1;
            state.star_counter = 0;
        }
    }
}

fn victory_epilogue(state: &mut GameState) {
    state.enemy_bullets.clear();
    state.star_speed = VICTORY_STAR_SPEED;
    if state.player.dead {
        return;
    }
    state.player.fly_off();
    if state.player.rect().bottom() <= 0 && state.running {
        state.running = false;
        log::info!("Victory with {} kills", state.kill_count);
    }
}

fn advance_clock(state: &mut GameState, input: &TickInput) {
    state.time_ticks += 1;
    state.ticker += 1;
    if state.ticker == TICKS_PER_SECOND {
        state.seconds += 1;
        state.ticker = 0;
    }

    if state.lives == 0 && state.phase != GamePhase::GameOver {
        state.phase = GamePhase::GameOver;
        state.running = false;
        state.events.push(GameEvent::GameOver);
        state.events.push(GameEvent::Music(MusicTrack::Death));
        log::info!("Game over with {} kills", state.kill_count);
        return;
    }

    if input.quit && state.running {
        state.running = false;
        log::info!("Quit requested at tick {}", state.time_ticks);
    }

    let phase = if state.boss_defeated {
        GamePhase::Victory
    } else if state.boss.is_some() {
        GamePhase::BossFight
    } else if !state.warmed_up() {
        GamePhase::Warmup
    } else {
        GamePhase::Playing
    };
    if phase != state.phase {
        log::debug!("Phase {:?} -> {:?}", state.phase, phase);
        state.phase = phase;
    }
}
