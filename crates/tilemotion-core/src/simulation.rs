//! Simulation driver: one world, one actor, a tick counter.
//!
//! The [`Simulation`] is what a game loop talks to. Each [`step`](Simulation::step):
//!
//! 1. **UPDATE**: the player body integrates one step against the world's
//!    solids, reading the supplied input and collecting spawn requests
//! 2. **SYNC**: the body's registered hitbox solid is moved to match its new
//!    bounding box, so other consumers of the world see the actor where it is
//! 3. **ADVANCE**: the tick counter increments
//!
//! The actor's hitbox lives in the world alongside level geometry. The body
//! remembers the hitbox id and skips it during its own collision tests.
//!
//! # Example
//!
//! ```
//! use glam::Vec2;
//! use tilemotion_core::config::MotionConfig;
//! use tilemotion_core::geometry::Rect;
//! use tilemotion_core::input::{Controls, InputState};
//! use tilemotion_core::simulation::Simulation;
//! use tilemotion_core::world::World;
//!
//! let world = World::from_rects([Rect::new(0.0, 64.0, 256.0, 16.0)]).unwrap();
//! let mut sim = Simulation::new(world, MotionConfig::default()).unwrap();
//! sim.spawn_player(Vec2::new(16.0, 0.0)).unwrap();
//!
//! for _ in 0..30 {
//!     sim.step(&InputState::holding(Controls::DOWN)).unwrap();
//! }
//!
//! // Resting on the floor.
//! assert_eq!(sim.tick(), 30);
//! assert_eq!(sim.player().unwrap().position().y, 32.0);
//! ```

use glam::Vec2;
use tracing::{debug, info};

use crate::body::MotionBody;
use crate::config::MotionConfig;
use crate::error::{Error, Result};
use crate::input::{InputSource, ScriptedInput};
use crate::output::StepOutput;
use crate::world::{SolidId, World};

/// Owns the world, the player body and the tick counter.
#[derive(Debug, Clone)]
pub struct Simulation {
    /// Level geometry plus the player's hitbox.
    world: World,
    /// Tuning applied to spawned bodies.
    config: MotionConfig,
    /// The controllable actor, once spawned.
    player: Option<MotionBody>,
    /// Steps completed so far.
    tick: u64,
}

impl Simulation {
    /// Creates a simulation over `world` with no actor.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] if `config` fails validation.
    pub fn new(world: World, config: MotionConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            world,
            config,
            player: None,
            tick: 0,
        })
    }

    /// Spawns the player with its top-left corner at `position`.
    ///
    /// The player's hitbox is registered in the world; its id is returned.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ActorAlreadySpawned`] if a player exists, or
    /// [`Error::DegenerateSolid`] if `position` is not finite.
    pub fn spawn_player(&mut self, position: Vec2) -> Result<SolidId> {
        if self.player.is_some() {
            return Err(Error::ActorAlreadySpawned);
        }
        let mut body = MotionBody::new(position, self.config);
        let hitbox = self.world.add_solid(body.bounding_box())?;
        body = body.with_hitbox_id(hitbox);
        body.set_active(true);

        info!(%hitbox, %position, "player spawned");
        self.player = Some(body);
        Ok(hitbox)
    }

    /// Removes the player and its hitbox from the world.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoActor`] if no player is spawned.
    pub fn despawn_player(&mut self) -> Result<MotionBody> {
        let mut body = self.player.take().ok_or(Error::NoActor)?;
        if let Some(hitbox) = body.hitbox_id() {
            self.world.remove_solid(hitbox)?;
        }
        body.set_active(false);
        info!(position = %body.position(), "player despawned");
        Ok(body)
    }

    /// Runs one step of the player against the world.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoActor`] if no player is spawned, or
    /// [`Error::UnknownSolid`] if the player's hitbox was removed from the
    /// world behind the simulation's back.
    pub fn step<I: InputSource + ?Sized>(&mut self, input: &I) -> Result<StepOutput> {
        let body = self.player.as_mut().ok_or(Error::NoActor)?;
        if let Some(hitbox) = body.hitbox_id() {
            if !self.world.contains(hitbox) {
                return Err(Error::UnknownSolid(hitbox));
            }
        }

        let mut spawns = Vec::new();
        body.update(input, &self.world, &mut spawns);

        if let Some(hitbox) = body.hitbox_id() {
            self.world.move_solid(hitbox, body.bounding_box())?;
        }

        let output = StepOutput {
            tick: self.tick,
            spawns,
        };
        self.tick += 1;

        if !output.spawns.is_empty() {
            debug!(tick = output.tick, count = output.spawns.len(), "spawn requests emitted");
        }
        Ok(output)
    }

    /// Steps once per frame of `script`, in order.
    ///
    /// # Errors
    ///
    /// Stops at and returns the first step error.
    pub fn run(&mut self, script: &ScriptedInput) -> Result<Vec<StepOutput>> {
        script.iter().map(|frame| self.step(frame)).collect()
    }

    /// Steps completed so far.
    #[must_use]
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// The player, if spawned.
    #[must_use]
    pub fn player(&self) -> Option<&MotionBody> {
        self.player.as_ref()
    }

    /// Read access to the world.
    #[must_use]
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Mutable access to the world for level edits between steps.
    ///
    /// Removing the player's hitbox here makes the next [`step`](Self::step)
    /// fail with [`Error::UnknownSolid`].
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Tuning applied to spawned bodies.
    #[must_use]
    pub fn config(&self) -> &MotionConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Rect;
    use crate::input::{Controls, InputState};
    use crate::world::SolidSource;

    fn empty_sim() -> Simulation {
        Simulation::new(World::new(), MotionConfig::default()).unwrap()
    }

    mod lifecycle_tests {
        use super::*;

        #[test]
        fn new_rejects_invalid_config() {
            let config = MotionConfig::with_size(-1.0, 32.0);
            assert!(matches!(
                Simulation::new(World::new(), config),
                Err(Error::InvalidConfig { .. })
            ));
        }

        #[test]
        fn spawn_registers_hitbox() {
            let mut sim = empty_sim();
            let hitbox = sim.spawn_player(Vec2::new(10.0, 20.0)).unwrap();

            assert_eq!(sim.world().get(hitbox), Some(&Rect::new(10.0, 20.0, 32.0, 32.0)));
            let player = sim.player().unwrap();
            assert_eq!(player.hitbox_id(), Some(hitbox));
            assert!(player.is_active());
        }

        #[test]
        fn second_spawn_rejected() {
            let mut sim = empty_sim();
            sim.spawn_player(Vec2::ZERO).unwrap();
            assert!(matches!(
                sim.spawn_player(Vec2::ZERO),
                Err(Error::ActorAlreadySpawned)
            ));
            assert_eq!(sim.world().len(), 1);
        }

        #[test]
        fn non_finite_spawn_rejected() {
            let mut sim = empty_sim();
            assert!(matches!(
                sim.spawn_player(Vec2::new(f32::NAN, 0.0)),
                Err(Error::DegenerateSolid { .. })
            ));
            assert!(sim.player().is_none());
        }

        #[test]
        fn despawn_removes_hitbox() {
            let mut sim = empty_sim();
            sim.spawn_player(Vec2::ZERO).unwrap();
            let body = sim.despawn_player().unwrap();

            assert!(!body.is_active());
            assert!(sim.world().is_empty());
            assert!(sim.player().is_none());
            assert!(matches!(sim.despawn_player(), Err(Error::NoActor)));
        }
    }

    mod step_tests {
        use super::*;

        #[test]
        fn step_without_player_fails() {
            let mut sim = empty_sim();
            assert!(matches!(sim.step(&InputState::idle()), Err(Error::NoActor)));
            assert_eq!(sim.tick(), 0);
        }

        #[test]
        fn step_advances_tick_and_syncs_hitbox() {
            let mut sim = empty_sim();
            let hitbox = sim.spawn_player(Vec2::ZERO).unwrap();
            let right = InputState::holding(Controls::RIGHT);

            let first = sim.step(&right).unwrap();
            let second = sim.step(&right).unwrap();

            assert_eq!(first.tick, 0);
            assert_eq!(second.tick, 1);
            assert_eq!(sim.tick(), 2);
            assert_eq!(sim.world().get(hitbox).unwrap().x, 2.0);
            assert_eq!(sim.player().unwrap().position().x, 2.0);
        }

        #[test]
        fn player_ignores_its_own_hitbox() {
            let mut sim = empty_sim();
            sim.spawn_player(Vec2::ZERO).unwrap();
            for _ in 0..5 {
                sim.step(&InputState::holding(Controls::LEFT | Controls::DOWN))
                    .unwrap();
            }
            assert_eq!(sim.player().unwrap().position(), Vec2::new(-8.0, 8.0));
        }

        #[test]
        fn spawns_are_reported_per_step() {
            let mut sim = empty_sim();
            sim.spawn_player(Vec2::ZERO).unwrap();
            let fire = InputState::new(Controls::FIRE, Vec2::new(64.0, 0.0));

            let output = sim.step(&fire).unwrap();
            assert_eq!(output.spawns.len(), 1);
            assert_eq!(output.spawns[0].origin, Vec2::new(16.0, 16.0));
            assert_eq!(output.spawns[0].target, Vec2::new(64.0, 0.0));

            let quiet = sim.step(&InputState::idle()).unwrap();
            assert!(quiet.spawns.is_empty());
        }

        #[test]
        fn removed_hitbox_is_reported() {
            let mut sim = empty_sim();
            let hitbox = sim.spawn_player(Vec2::ZERO).unwrap();
            sim.world_mut().remove_solid(hitbox).unwrap();
            let before = sim.player().unwrap().clone();

            assert!(matches!(
                sim.step(&InputState::new(Controls::RIGHT | Controls::FIRE, Vec2::ONE)),
                Err(Error::UnknownSolid(id)) if id == hitbox
            ));
            assert_eq!(sim.player(), Some(&before));
            assert_eq!(sim.tick(), 0);
        }

        #[test]
        fn run_replays_script() {
            let mut sim = empty_sim();
            sim.spawn_player(Vec2::ZERO).unwrap();
            let script = ScriptedInput::new()
                .hold(InputState::holding(Controls::RIGHT), 3)
                .hold(InputState::holding(Controls::FIRE), 2);

            let outputs = sim.run(&script).unwrap();

            assert_eq!(outputs.len(), 5);
            assert_eq!(sim.tick(), 5);
            let fired: usize = outputs.iter().map(|o| o.spawns.len()).sum();
            assert_eq!(fired, 2);
        }

        #[test]
        fn hitbox_order_is_stable_across_steps() {
            let mut world = World::new();
            let wall = world.add_solid(Rect::new(200.0, 0.0, 16.0, 16.0)).unwrap();
            let mut sim = Simulation::new(world, MotionConfig::default()).unwrap();
            let hitbox = sim.spawn_player(Vec2::ZERO).unwrap();

            sim.step(&InputState::holding(Controls::RIGHT)).unwrap();

            let ids: Vec<_> = sim.world().solids().iter().map(|s| s.id).collect();
            assert_eq!(ids, vec![wall, hitbox]);
        }
    }
}
