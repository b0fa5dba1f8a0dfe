mod ball;
mod boundary;
mod collision;
mod geometry;
mod input;
mod integrator;
mod particle_sim;
mod render;
mod world;

pub use ball::{create_ball, single_ball_check, Ball, BallColor};
pub use boundary::{resolve_boundaries, BoundaryPolicy};
pub use collision::{resolve_collisions, CollisionPolicy};
pub use geometry::distance;
pub use input::InputEvent;
pub use integrator::{apply_velocity_change, update_position};
pub use render::{MeshRenderer, Renderer};
pub use world::{BallWorld, FrameOutcome, SpawnOutcome};

use anyhow::{ensure, Context, Result};
use bevy::{prelude::*, window::WindowResolution};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    ops::Range,
    path::{Path, PathBuf},
};

/// Every tunable of the simulation. Inserted once as a resource and handed by
/// reference to the driver and the resolvers.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Simulation {
    pub title: String,
    pub width: f32,
    pub height: f32,
    /// Downward acceleration in units/s². A tuning constant, not a physical one.
    pub gravity: f32,
    pub max_balls: usize,
    /// Seconds without a spawn before the timer adds a ball.
    pub spawn_interval: f32,
    /// Seconds spent at capacity before the pit is cleared.
    pub reset_after: f32,
    pub radius_range: Range<u32>,
    pub velocity_range: Range<f32>,
    /// Fixed top-left spawn position. `None` samples anywhere on screen.
    pub spawn_point: Option<(f32, f32)>,
    pub mass: f32,
    pub restitution: f32,
    pub boundary: BoundaryPolicy,
    pub collision: CollisionPolicy,
    pub seed: Option<u64>,
    /// File the settings were read from, `None` for the defaults.
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

impl Default for Simulation {
    fn default() -> Self {
        Self {
            title: "Cool Balls".into(),
            width: 1000.,
            height: 1000.,
            gravity: 982.,
            max_balls: 1000,
            spawn_interval: 0.5,
            reset_after: 15.,
            radius_range: 25..26,
            velocity_range: -500.0..500.0,
            spawn_point: Some((475., 0.)),
            mass: 1.,
            restitution: 1.,
            boundary: BoundaryPolicy::default(),
            collision: CollisionPolicy::default(),
            seed: None,
            source: None,
        }
    }
}

impl Simulation {
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data =
            fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        let mut sim: Self =
            ron::from_str(&data).with_context(|| format!("parsing {}", path.display()))?;
        sim.validate()
            .with_context(|| format!("invalid simulation config {}", path.display()))?;
        sim.source = Some(path.to_path_buf());
        Ok(sim)
    }

    /// Like [`Simulation::load_from_file`], but a missing file falls back to
    /// the defaults.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load_from_file(path)
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.width > 0. && self.height > 0.,
            "window must have a positive size, got {}x{}",
            self.width,
            self.height
        );
        ensure!(self.max_balls >= 1, "max_balls must be at least 1");
        ensure!(
            self.radius_range.start >= 1 && !self.radius_range.is_empty(),
            "radius_range must be non-empty and start at 1 or more, got {:?}",
            self.radius_range
        );
        let largest = (self.radius_range.end - 1) as f32 * 2.;
        ensure!(
            largest <= self.width.min(self.height),
            "a ball of radius {} does not fit in the window",
            self.radius_range.end - 1
        );
        if let Some((x, y)) = self.spawn_point {
            ensure!(
                x >= 0. && y >= 0. && x + largest <= self.width && y + largest <= self.height,
                "spawn_point ({x}, {y}) puts a ball of radius {} partly off-screen",
                self.radius_range.end - 1
            );
        }
        ensure!(
            self.velocity_range.start < self.velocity_range.end,
            "velocity_range must be non-empty, got {:?}",
            self.velocity_range
        );
        ensure!(
            (0.0..=1.0).contains(&self.restitution),
            "restitution must be within [0, 1], got {}",
            self.restitution
        );
        ensure!(self.mass > 0., "mass must be positive, got {}", self.mass);
        ensure!(
            self.spawn_interval >= 0. && self.reset_after >= 0.,
            "timer thresholds must not be negative"
        );
        Ok(())
    }

    pub fn simulate(self) {
        let mut app = App::new();
        app.insert_resource(ClearColor(Color::rgb_u8(17, 11, 36)));
        app.add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: self.title.clone(),
                resolution: WindowResolution::new(self.width, self.height),
                resizable: false,
                ..default()
            }),
            close_when_requested: false,
            ..default()
        }));
        app.insert_resource(self);
        app.add_plugin(particle_sim::ParticleSim);
        app.run();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_are_valid() {
        Simulation::default().validate().unwrap();
    }

    #[test]
    fn rejects_bad_ranges() {
        let sim = Simulation {
            radius_range: 0..10,
            ..default()
        };
        assert!(sim.validate().is_err());

        let sim = Simulation {
            velocity_range: 5.0..5.0,
            ..default()
        };
        assert!(sim.validate().is_err());

        let sim = Simulation {
            radius_range: 10..600,
            ..default()
        };
        assert!(sim.validate().is_err());
    }

    #[test]
    fn rejects_out_of_range_restitution() {
        let sim = Simulation {
            restitution: 1.5,
            ..default()
        };
        assert!(sim.validate().is_err());
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            "(gravity: 500.0, max_balls: 20, radius_range: (start: 5, end: 50), boundary: Revert)"
        )
        .unwrap();
        let sim = Simulation::load_from_file(file.path()).unwrap();
        assert_eq!(sim.gravity, 500.);
        assert_eq!(sim.max_balls, 20);
        assert_eq!(sim.radius_range, 5..50);
        assert_eq!(sim.boundary, BoundaryPolicy::Revert);
        assert_eq!(sim.width, Simulation::default().width);
        assert_eq!(sim.collision, CollisionPolicy::Impulse);
        assert_eq!(sim.source.as_deref(), Some(file.path()));
    }

    #[test]
    fn rejects_spawn_point_off_screen() {
        let sim = Simulation {
            spawn_point: Some((960., 0.)),
            ..default()
        };
        assert!(sim.validate().is_err());

        let sim = Simulation {
            spawn_point: Some((10., -1.)),
            ..default()
        };
        assert!(sim.validate().is_err());

        // radius 25: the top-left corner may sit at most 50 from the far walls
        let sim = Simulation {
            spawn_point: Some((950., 950.)),
            ..default()
        };
        sim.validate().unwrap();
    }

    #[test]
    fn invalid_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "(gravity: \"down\")").unwrap();
        assert!(Simulation::load_from_file(file.path()).is_err());

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "(max_balls: 0)").unwrap();
        assert!(Simulation::load_from_file(file.path()).is_err());
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let sim = Simulation::load_or_default(dir.path().join("absent.ron")).unwrap();
        assert_eq!(sim, Simulation::default());
        assert!(sim.source.is_none());
    }
}
