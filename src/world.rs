use crate::{
    ball::{create_ball, single_ball_check, Ball},
    boundary::resolve_boundaries,
    collision::resolve_collisions,
    input::InputEvent,
    integrator::{apply_velocity_change, update_position},
    render::Renderer,
    Simulation,
};
use bevy::prelude::*;
use rand::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    Continue,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnOutcome {
    Spawned(usize),
    /// The candidate would have started inside another ball.
    Overlapping,
    AtCapacity,
}

/// Owns the live balls and their sprite handles and runs one frame at a time.
///
/// `sprites[i]` always belongs to `balls[i]`.
#[derive(Resource)]
pub struct BallWorld<H> {
    sim: Simulation,
    balls: Vec<Ball>,
    sprites: Vec<H>,
    rng: StdRng,
    elapsed: f32,
    since_spawn: f32,
}

impl<H> BallWorld<H> {
    /// Starts with a single ball.
    pub fn new(sim: Simulation, renderer: &mut impl Renderer<Handle = H>) -> Self {
        let rng = match sim.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let mut world = Self {
            balls: Vec::with_capacity(sim.max_balls),
            sprites: Vec::with_capacity(sim.max_balls),
            sim,
            rng,
            elapsed: 0.,
            since_spawn: 0.,
        };
        world.spawn_first(renderer);
        world
    }

    pub fn simulation(&self) -> &Simulation {
        &self.sim
    }

    pub fn balls(&self) -> &[Ball] {
        &self.balls
    }

    pub fn len(&self) -> usize {
        self.balls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.balls.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.balls.len() >= self.sim.max_balls
    }

    /// Seconds since the world was created.
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Seconds since the last successful spawn or reset.
    pub fn since_spawn(&self) -> f32 {
        self.since_spawn
    }

    /// Runs one frame: input, integration, walls, pairs, timers, then drawing.
    pub fn step(
        &mut self,
        renderer: &mut impl Renderer<Handle = H>,
        events: &[InputEvent],
        dt: f32,
    ) -> FrameOutcome {
        self.elapsed += dt;
        self.since_spawn += dt;
        debug!(
            "fps: {:.0} ms: {:.5} balls: {} elapsed: {:.1}",
            1. / dt,
            dt,
            self.balls.len(),
            self.elapsed
        );

        let mut outcome = FrameOutcome::Continue;
        for event in events {
            match *event {
                InputEvent::Quit => outcome = FrameOutcome::Quit,
                InputEvent::PointerDown(at) => {
                    self.try_spawn(renderer, Some(at));
                }
            }
        }

        apply_velocity_change(&mut self.balls, self.sim.gravity, dt);
        update_position(&mut self.balls, dt);
        resolve_boundaries(&mut self.balls, &self.sim);
        resolve_collisions(&mut self.balls, self.sim.collision);

        if !self.is_full() && self.since_spawn > self.sim.spawn_interval {
            self.try_spawn(renderer, None);
        }
        if self.is_full() && self.since_spawn > self.sim.reset_after {
            self.reset(renderer);
        }

        for (ball, sprite) in self.balls.iter().zip(&self.sprites) {
            renderer.draw(sprite, ball.position, ball.diameter());
        }
        outcome
    }

    /// Tries to add one ball, centered on `at` when given. Nothing is acquired
    /// from the renderer unless the ball is kept.
    pub fn try_spawn(
        &mut self,
        renderer: &mut impl Renderer<Handle = H>,
        at: Option<Vec2>,
    ) -> SpawnOutcome {
        if self.is_full() {
            trace!("spawn ignored, {} balls already live", self.balls.len());
            return SpawnOutcome::AtCapacity;
        }
        let mut ball = create_ball(&mut self.rng, &self.sim);
        if let Some(at) = at {
            ball.set_center(at);
            ball.clamp_to(self.sim.width, self.sim.height);
            ball.previous_position = ball.position;
        }
        if single_ball_check(&self.balls, &ball) {
            trace!("spawn at {:?} rejected, overlapping", ball.position);
            return SpawnOutcome::Overlapping;
        }
        SpawnOutcome::Spawned(self.push(renderer, ball))
    }

    /// Releases every sprite and starts over with one fresh ball.
    pub fn reset(&mut self, renderer: &mut impl Renderer<Handle = H>) {
        info!(
            "resetting after {:.1}s with {} balls",
            self.since_spawn,
            self.balls.len()
        );
        self.clear(renderer);
        self.spawn_first(renderer);
    }

    /// Releases every sprite and empties the world.
    pub fn clear(&mut self, renderer: &mut impl Renderer<Handle = H>) {
        for sprite in self.sprites.drain(..) {
            renderer.release(sprite);
        }
        self.balls.clear();
    }

    fn spawn_first(&mut self, renderer: &mut impl Renderer<Handle = H>) {
        let ball = create_ball(&mut self.rng, &self.sim);
        self.push(renderer, ball);
    }

    fn push(&mut self, renderer: &mut impl Renderer<Handle = H>, ball: Ball) -> usize {
        self.sprites.push(renderer.acquire_tinted_sprite(ball.color));
        self.balls.push(ball);
        self.since_spawn = 0.;
        self.balls.len() - 1
    }
}
