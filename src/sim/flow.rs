//! Lifecycle transitions: starting, restarting and advancing levels

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::actor::Player;
use super::backdrop::generate_backdrop;
use super::level::{Level, LevelProvider};
use super::particles::ParticleSystem;
use super::state::{GameEvent, GamePhase, GameState};

impl GameState {
    /// Begin a new game at level 1 with a fresh score
    pub fn start_game<P: LevelProvider + ?Sized>(&mut self, provider: &P) {
        self.events.clear();
        self.score = 0;
        if !self.load_level(provider, 1) {
            self.win();
        }
    }

    /// Restart after game over (or mid-level): reload the current level,
    /// keeping the score. From `GameWon` this starts a new game.
    pub fn restart<P: LevelProvider + ?Sized>(&mut self, provider: &P) {
        match self.phase {
            GamePhase::Menu => {
                log::warn!("restart requested from the menu, starting a new game");
                self.start_game(provider);
            }
            GamePhase::GameWon => self.start_game(provider),
            GamePhase::Playing | GamePhase::GameOver | GamePhase::Victory => {
                self.events.clear();
                if !self.load_level(provider, self.level_index) {
                    self.win();
                }
            }
        }
    }

    /// Replace the level, its entities, the player, camera, particles and
    /// backdrop with fresh state from `provider`, and enter `Playing`.
    ///
    /// Returns false (leaving the state untouched) if the provider has no
    /// such level.
    pub fn load_level<P: LevelProvider + ?Sized>(&mut self, provider: &P, index: u32) -> bool {
        if index == 0 || index > provider.level_count() {
            return false;
        }
        let Some(data) = provider.generate(index) else {
            log::warn!("level provider returned nothing for level {index}");
            return false;
        };

        let (level, entities) = Level::load(index, data);
        let level_seed = self.seed.wrapping_add(u64::from(index));
        self.backdrop = if level.theme.outdoor {
            let mut rng = Pcg32::seed_from_u64(level_seed);
            generate_backdrop(level.tiles().width(), level.tiles().height(), &mut rng)
        } else {
            Vec::new()
        };
        self.player = Player::new(level.start_pos);
        self.entities = entities;
        self.particles = ParticleSystem::new(level_seed);
        self.camera.reset();
        self.game_over_at = None;
        self.level_index = index;
        self.phase = GamePhase::Playing;

        log::info!(
            "loaded level {index} \"{}\": {}x{} tiles, {} entities",
            level.theme.name,
            level.tiles().width(),
            level.tiles().height(),
            self.entities.len()
        );
        self.level = Some(level);
        self.events.push(GameEvent::LevelLoaded { level: index });
        true
    }

    /// Goal reached: pass through `Victory` to the next level or `GameWon`
    pub(crate) fn complete_level<P: LevelProvider + ?Sized>(&mut self, provider: &P) {
        let finished = self.level_index;
        self.phase = GamePhase::Victory;
        self.events.push(GameEvent::LevelCompleted { level: finished });
        log::info!("level {finished} complete, score {}", self.score);

        if !self.load_level(provider, finished + 1) {
            self.win();
        }
    }

    fn win(&mut self) {
        self.phase = GamePhase::GameWon;
        self.game_over_at = None;
        self.events.push(GameEvent::GameWon);
        log::info!("all levels cleared, final score {}", self.score);
    }
}
