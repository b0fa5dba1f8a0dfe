use crate::ball::BallColor;
use bevy::{prelude::*, sprite::MaterialMesh2dBundle};

/// Whatever draws the balls. Handles are acquired once per ball and handed
/// back when the ball goes away.
pub trait Renderer {
    type Handle;

    fn acquire_tinted_sprite(&mut self, color: BallColor) -> Self::Handle;
    /// `top_left` is in y-down window coordinates, `size` is the diameter.
    fn draw(&mut self, handle: &Self::Handle, top_left: Vec2, size: f32);
    fn release(&mut self, handle: Self::Handle);
}

/// Unit-diameter circle shared by every ball.
#[derive(Resource)]
pub struct CircleMesh(pub Handle<Mesh>);

impl CircleMesh {
    pub fn new(meshes: &mut Assets<Mesh>) -> Self {
        Self(meshes.add(Mesh::from(shape::Circle::new(0.5))))
    }
}

/// Sprite handle owned by [`MeshRenderer`]. The material is freed once the
/// entity and this handle are both gone.
pub struct SpriteHandle {
    entity: Entity,
    _material: Handle<ColorMaterial>,
}

/// Draws balls as tinted circle meshes through `Commands`.
pub struct MeshRenderer<'a, 'w, 's> {
    commands: &'a mut Commands<'w, 's>,
    materials: &'a mut Assets<ColorMaterial>,
    circle: &'a CircleMesh,
    window: Vec2,
}

impl<'a, 'w, 's> MeshRenderer<'a, 'w, 's> {
    pub fn new(
        commands: &'a mut Commands<'w, 's>,
        materials: &'a mut Assets<ColorMaterial>,
        circle: &'a CircleMesh,
        window: Vec2,
    ) -> Self {
        Self {
            commands,
            materials,
            circle,
            window,
        }
    }

    /// Window space has its origin top-left with y down, the 2d camera looks
    /// at the window center with y up.
    fn to_world(&self, top_left: Vec2, size: f32) -> Vec3 {
        let center = top_left + Vec2::splat(size / 2.);
        Vec3::new(
            center.x - self.window.x / 2.,
            self.window.y / 2. - center.y,
            0.,
        )
    }
}

impl Renderer for MeshRenderer<'_, '_, '_> {
    type Handle = SpriteHandle;

    fn acquire_tinted_sprite(&mut self, color: BallColor) -> SpriteHandle {
        let material = self.materials.add(ColorMaterial::from(Color::from(color)));
        let entity = self
            .commands
            .spawn(MaterialMesh2dBundle {
                mesh: self.circle.0.clone().into(),
                material: material.clone(),
                transform: Transform::from_scale(Vec3::ZERO),
                ..Default::default()
            })
            .id();
        SpriteHandle {
            entity,
            _material: material,
        }
    }

    fn draw(&mut self, handle: &SpriteHandle, top_left: Vec2, size: f32) {
        let transform = Transform {
            translation: self.to_world(top_left, size),
            scale: Vec3::new(size, size, 1.),
            ..Default::default()
        };
        self.commands.entity(handle.entity).insert(transform);
    }

    fn release(&mut self, handle: SpriteHandle) {
        self.commands.entity(handle.entity).despawn_recursive();
    }
}
