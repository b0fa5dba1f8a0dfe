use bevy::{
    app::AppExit,
    prelude::*,
    window::{PrimaryWindow, WindowCloseRequested},
};

use crate::{
    input::InputEvent,
    render::{CircleMesh, MeshRenderer, SpriteHandle},
    world::{BallWorld, FrameOutcome},
    Simulation,
};

pub struct ParticleSim;

/// Input gathered this frame, consumed by [`step_world`].
#[derive(Resource, Default)]
struct FrameInput(Vec<InputEvent>);

impl Plugin for ParticleSim {
    fn build(&self, app: &mut App) {
        app.init_resource::<FrameInput>();
        app.add_startup_system(setup);
        app.add_systems((gather_input, step_world).chain());
    }
}

fn setup(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    sim: Res<Simulation>,
) {
    commands.spawn(Camera2dBundle::default());
    let circle = CircleMesh::new(&mut meshes);
    let window = Vec2::new(sim.width, sim.height);
    let world = {
        let mut renderer = MeshRenderer::new(&mut commands, &mut materials, &circle, window);
        BallWorld::new(Simulation::clone(&sim), &mut renderer)
    };
    match &sim.source {
        Some(path) => info!("loaded simulation config from {}", path.display()),
        None => info!("no simulation config found, using defaults"),
    }
    info!(
        "simulating up to {} balls in a {}x{} window",
        sim.max_balls, sim.width, sim.height
    );
    commands.insert_resource(world);
    commands.insert_resource(circle);
}

fn gather_input(
    mut input: ResMut<FrameInput>,
    mouse: Res<Input<MouseButton>>,
    keys: Res<Input<KeyCode>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut close_requests: EventReader<WindowCloseRequested>,
) {
    input.0.clear();
    if close_requests.iter().count() > 0 || keys.just_pressed(KeyCode::Escape) {
        input.0.push(InputEvent::Quit);
    }
    if !mouse.just_pressed(MouseButton::Left) {
        return;
    }
    let Ok(window) = windows.get_single() else {
        return;
    };
    // cursor origin is bottom-left, the simulation's is top-left
    if let Some(cursor) = window.cursor_position() {
        input
            .0
            .push(InputEvent::PointerDown(Vec2::new(cursor.x, window.height() - cursor.y)));
    }
}

fn step_world(
    mut commands: Commands,
    mut materials: ResMut<Assets<ColorMaterial>>,
    circle: Res<CircleMesh>,
    mut world: ResMut<BallWorld<SpriteHandle>>,
    input: Res<FrameInput>,
    time: Res<Time>,
    mut exit: EventWriter<AppExit>,
) {
    let window = Vec2::new(world.simulation().width, world.simulation().height);
    let mut renderer = MeshRenderer::new(&mut commands, &mut materials, &circle, window);
    if world.step(&mut renderer, &input.0, time.delta_seconds()) == FrameOutcome::Quit {
        info!("quit after {:.1}s with {} balls", world.elapsed(), world.len());
        exit.send(AppExit);
    }
}
