use bevy::prelude::*;
use bevy_pancam::{PanCam, PanCamPlugin};

use crate::{prelude::BG_COLOR, state::GameState};

const DEFAULT_SCALE: f32 = 1.0;

pub struct CamPlugin;

impl Plugin for CamPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(PanCamPlugin)
            .insert_resource(ClearColor(BG_COLOR))
            .add_systems(OnEnter(GameState::Load), spawn_cam)
            .add_systems(Update, reset_cam.run_if(not(in_state(GameState::Load))));
    }
}

// Init
fn spawn_cam(mut commands: Commands) {
    commands.spawn((
        Camera2d,
        // zoom with the wheel, pan with the middle button
        PanCam {
            grab_buttons: vec![MouseButton::Middle],
            ..default()
        },
        OrthographicProjection {
            // one world unit per logical pixel, so the canvas maps 1:1 onto the window
            scaling_mode: bevy::render::camera::ScalingMode::WindowSize,
            scale: DEFAULT_SCALE,
            near: -1000.0,
            far: 1000.0,
            ..OrthographicProjection::default_2d()
        },
        Msaa::Off,
    ));
}

/// back to the unzoomed, centered view
fn reset_cam(
    keyboard_input: Res<ButtonInput<KeyCode>>,
    mut cams: Query<(&mut Transform, &mut OrthographicProjection), With<Camera2d>>,
) {
    if !keyboard_input.just_pressed(KeyCode::Home) {
        return;
    }
    for (mut transform, mut projection) in cams.iter_mut() {
        transform.translation.x = 0.0;
        transform.translation.y = 0.0;
        projection.scale = DEFAULT_SCALE;
    }
}
