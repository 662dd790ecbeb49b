//! Game state and core simulation types
//!
//! Everything one run needs lives here: the typed entity collections, wave
//! counters, clocks, the seeded RNG and the outbound event queue.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::enemy::{Cruiser, Enemy, Fighter, Frigate};
use super::entity::EntityIds;
use super::events::GameEvent;
use super::player::Player;
use super::powerup::PowerUp;
use super::projectile::Projectile;
use super::rect::Rect;
use super::stars::StarField;
use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::tuning::Tuning;

/// Stars in the default field
pub const DEFAULT_STAR_COUNT: usize = 100;
/// Star field speed while the player jumps in
pub const HYPERDRIVE_STAR_SPEED: u32 = 10;
/// Star field speed during the victory exit
pub const VICTORY_STAR_SPEED: u32 = 5;
/// Speed the star field settles to after a hyperdrive burst
pub const CRUISE_STAR_SPEED: u32 = 2;
/// Ticks between one-step star slowdowns
pub const STAR_DECAY_TICKS: u32 = 10;

/// Coarse phase of the run, recomputed at the end of every tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Warm-up seconds: nothing spawns yet
    Warmup,
    /// Fighters and frigates
    Playing,
    /// Cruiser on screen
    BossFight,
    /// Cruiser destroyed, player flying off
    Victory,
    /// Out of lives
    GameOver,
}

/// Complete state of one run
#[derive(Debug, Clone)]
pub struct GameState {
    pub tuning: Tuning,
    pub rng: Pcg32,
    pub ids: EntityIds,

    pub player: Player,
    /// Owned here, not by the ship
    pub lives: u32,

    pub fighters: Vec<Fighter>,
    pub frigates: Vec<Frigate>,
    /// At most one cruiser per run
    pub boss: Option<Cruiser>,
    /// Everything enemies have fired, drained from their outboxes each tick
    pub enemy_bullets: Vec<Projectile>,
    pub powerups: Vec<PowerUp>,

    pub stars: StarField,
    /// Star field steps per tick
    pub star_speed: u32,
    pub(crate) star_counter: u32,

    /// Kills since the fighter cap last went up
    pub kills_since_cap_increase: u32,
    /// Total kills this run; also the score
    pub kill_count: u32,
    /// Current cap on live fighters
    pub max_fighters: u32,
    pub spawn_timer: u32,

    /// Ticks within the current second (0..60)
    pub ticker: u32,
    /// Whole seconds elapsed
    pub seconds: u32,
    /// Ticks elapsed
    pub time_ticks: u64,

    pub boss_spawned: bool,
    pub boss_defeated: bool,
    /// Cleared when the run is over; the host stops ticking
    pub running: bool,
    pub phase: GamePhase,

    /// Drained by the host after every tick
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// New run with default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        Self::with_options(seed, tuning, DEFAULT_STAR_COUNT)
    }

    pub fn with_options(seed: u64, tuning: Tuning, star_count: usize) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let mut ids = EntityIds::default();
        let player = Player::new(ids.next_id(), &tuning);
        let stars = StarField::new(star_count, &mut rng);
        let phase = if tuning.warmup_seconds == 0 {
            GamePhase::Playing
        } else {
            GamePhase::Warmup
        };

        Self {
            lives: tuning.starting_lives,
            max_fighters: tuning.initial_fighter_cap,
            tuning,
            rng,
            ids,
            player,
            fighters: Vec::new(),
            frigates: Vec::new(),
            boss: None,
            enemy_bullets: Vec::new(),
            powerups: Vec::new(),
            stars,
            star_speed: 1,
            star_counter: 0,
            kills_since_cap_increase: 0,
            kill_count: 0,
            spawn_timer: 0,
            ticker: 0,
            seconds: 0,
            time_ticks: 0,
            boss_spawned: false,
            boss_defeated: false,
            running: true,
            phase,
            events: Vec::new(),
        }
    }

    /// Play area in pixels
    pub fn screen_rect() -> Rect {
        Rect::new(0, 0, SCREEN_WIDTH as i32, SCREEN_HEIGHT as i32)
    }

    /// Spawning, enemy AI and collisions are held back until this is true
    pub fn warmed_up(&self) -> bool {
        self.tuning.warmup_seconds == 0 || self.seconds > self.tuning.warmup_seconds
    }

    /// The player's box as enemies see it; `None` while the ship is down
    pub fn target(&self) -> Option<Rect> {
        (!self.player.dead).then(|| self.player.rect())
    }

    /// Every live enemy, fighters first, the cruiser last
    pub fn enemies(&self) -> impl Iterator<Item = &dyn Enemy> {
        self.fighters
            .iter()
            .map(|f| f as &dyn Enemy)
            .chain(self.frigates.iter().map(|f| f as &dyn Enemy))
            .chain(self.boss.iter().map(|b| b as &dyn Enemy))
    }

    pub fn enemy_count(&self) -> usize {
        self.fighters.len() + self.frigates.len() + usize::from(self.boss.is_some())
    }

    /// Take the events queued since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Remove every dead entity from its collection; returns how many went
    pub fn purge_dead(&mut self) -> usize {
        let before = self.entity_count();
        self.player.bullets.retain(|b| b.body.alive);
        self.fighters.retain(|f| f.body.alive);
        self.frigates.retain(|f| f.body.alive);
        if self.boss.as_ref().is_some_and(|b| !b.body.alive) {
            self.boss = None;
        }
        self.enemy_bullets.retain(|b| b.body.alive);
        self.powerups.retain(|p| p.body.alive);
        before - self.entity_count()
    }

    /// Kill and purge anything that drifted further than the margin outside
    /// the screen; returns how many were removed
    pub fn sweep_out_of_bounds(&mut self) -> usize {
        let bounds = Self::screen_rect();
        let margin = self.tuning.bounds_margin;
        let gone = |r: Rect| r.outside(&bounds, margin);

        for b in self.player.bullets.iter_mut().chain(self.enemy_bullets.iter_mut()) {
            if gone(b.rect()) {
                b.body.kill();
            }
        }
        for enemy in enemies_mut(&mut self.fighters, &mut self.frigates, &mut self.boss) {
            if gone(enemy.rect()) {
                enemy.body_mut().kill();
            }
        }
        for p in &mut self.powerups {
            if gone(p.rect()) {
                p.body.kill();
            }
        }
        self.purge_dead()
    }

    /// Entities in every typed collection, the player excluded
    pub fn entity_count(&self) -> usize {
        self.player.bullets.len()
            + self.enemy_count()
            + self.enemy_bullets.len()
            + self.powerups.len()
    }

    /// True when no collection still holds a dead entity
    pub fn all_alive(&self) -> bool {
        self.player.bullets.iter().all(|b| b.body.alive)
            && self.enemies().all(|e| e.is_alive())
            && self.enemy_bullets.iter().all(|b| b.body.alive)
            && self.powerups.iter().all(|p| p.body.alive)
    }
}

/// Mutable view over every enemy, built from the collections directly so the
/// caller can keep borrowing the rest of the state
pub fn enemies_mut<'a>(
    fighters: &'a mut [Fighter],
    frigates: &'a mut [Frigate],
    boss: &'a mut Option<Cruiser>,
) -> impl Iterator<Item = &'a mut dyn Enemy> {
    fighters
        .iter_mut()
        .map(|f| f as &mut dyn Enemy)
        .chain(frigates.iter_mut().map(|f| f as &mut dyn Enemy))
        .chain(boss.iter_mut().map(|b| b as &mut dyn Enemy))
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    #[test]
    fn test_new_run() {
        let state = GameState::new(42);
        assert_eq!(state.lives, 3);
        assert_eq!(state.max_fighters, 5);
        assert_eq!(state.star_speed, 1);
        assert_eq!(state.stars.stars.len(), DEFAULT_STAR_COUNT);
        assert!(state.player.arriving);
        assert!(state.running);
        assert_eq!(state.phase, GamePhase::Warmup);
        assert!(state.target().is_some());
    }

    #[test]
    fn test_warmup_gate_is_strict() {
        let mut state = GameState::new(1);
        state.seconds = 10;
        assert!(!state.warmed_up());
        state.seconds = 11;
        assert!(state.warmed_up());
        assert!(GameState::with_tuning(1, Tuning::immediate()).warmed_up());
    }

    #[test]
    fn test_purge_removes_dead_everywhere() {
        let mut state = GameState::new(5);
        state.fighters.push(Fighter::new(10, 100.0));
        state.fighters.push(Fighter::new(11, 200.0));
        state.frigates.push(Frigate::new(12, 100.0));
        state.boss = Some(Cruiser::new(13));
        state.powerups.push(PowerUp::new(14, Vec2::new(10.0, 10.0)));

        state.fighters[0].body.kill();
        if let Some(boss) = state.boss.as_mut() {
            boss.body.kill();
        }
        state.powerups[0].body.kill();

        assert!(!state.all_alive());
        assert_eq!(state.purge_dead(), 3);
        assert!(state.all_alive());
        assert!(state.boss.is_none());
        assert_eq!(state.fighters.len(), 1);
        assert_eq!(state.purge_dead(), 0);
    }

    #[test]
    fn test_sweep_keeps_staged_frigate() {
        let mut state = GameState::new(5);
        // Parked just off the left edge waiting to cross
        state.frigates.push(Frigate::new(10, 100.0));
        let mut stray = Fighter::new(11, 100.0);
        stray.body.pos = Vec2::new(-2000.0, 100.0);
        state.fighters.push(stray);

        assert_eq!(state.sweep_out_of_bounds(), 1);
        assert_eq!(state.frigates.len(), 1);
        assert_eq!(state.sweep_out_of_bounds(), 0);
    }
}
