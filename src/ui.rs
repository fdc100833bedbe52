#![allow(clippy::type_complexity)]

use bevy::prelude::*;

use crate::{
    life::{Board, Settings},
    prelude::*,
    state::GameState,
};

/// User requests, sent by the sidebar and the keyboard and applied by the life plugin.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    TogglePlay,
    Randomize,
    ToggleGradient,
    /// advance a single generation, only while paused
    Step,
    /// step threshold in ms, one of [`FRAME_TIME_CHOICES_MS`]
    SetFrameTime(u32),
    /// pixels per cell, one of [`CELL_SIZE_CHOICES_PX`]
    SetCellSize(u32),
}

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_sidebar).add_systems(
            Update,
            (
                (handle_buttons, handle_kbd).run_if(not(in_state(GameState::Load))),
                update_labels,
                update_status,
            ),
        );
    }
}

// ——> SYSTEMS

fn spawn_sidebar(mut commands: Commands) {
    let settings = Settings::default();
    let font = TextFont {
        font_size: FONT_SIZE,
        ..default()
    };

    commands
        .spawn((
            Node {
                width: Val::Px(SIDEBAR_WIDTH_PX),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                row_gap: Val::Px(6.0),
                padding: UiRect::all(Val::Px(8.0)),
                ..default()
            },
            BackgroundColor(SIDEBAR_COLOR),
        ))
        .with_children(|sidebar| {
            for kind in SidebarButton::ALL {
                sidebar
                    .spawn((
                        Button,
                        kind,
                        Node {
                            padding: UiRect::all(Val::Px(6.0)),
                            justify_content: JustifyContent::Center,
                            ..default()
                        },
                        BackgroundColor(BUTTON_COLOR),
                    ))
                    .with_children(|button| {
                        button.spawn((
                            ButtonLabel(kind),
                            Text::new(kind.label(&settings, false)),
                            font.clone(),
                            TextColor(TEXT_COLOR),
                        ));
                    });
            }
            sidebar.spawn((StatusText, Text::default(), font.clone(), TextColor(TEXT_COLOR)));
        });
}

fn handle_buttons(
    mut buttons: Query<
        (&Interaction, &SidebarButton, &mut BackgroundColor),
        (Changed<Interaction>, With<Button>),
    >,
    settings: Res<Settings>,
    mut actions: EventWriter<Action>,
) {
    for (interaction, kind, mut color) in buttons.iter_mut() {
        match interaction {
            Interaction::Pressed => {
                color.0 = BUTTON_PRESSED_COLOR;
                actions.send(kind.action(&settings, true));
            }
            Interaction::Hovered => color.0 = BUTTON_HOVERED_COLOR,
            Interaction::None => color.0 = BUTTON_COLOR,
        }
    }
}

fn handle_kbd(
    keyboard_input: Res<ButtonInput<KeyCode>>,
    settings: Res<Settings>,
    mut actions: EventWriter<Action>,
) {
    let forward = !keyboard_input.any_pressed([KeyCode::ShiftLeft, KeyCode::ShiftRight]);
    let bindings = [
        (KeyCode::Space, SidebarButton::PlayPause),
        (KeyCode::Enter, SidebarButton::PlayPause),
        (KeyCode::KeyR, SidebarButton::Randomize),
        (KeyCode::KeyG, SidebarButton::Gradient),
        (KeyCode::KeyF, SidebarButton::FrameTime),
        (KeyCode::KeyC, SidebarButton::CellSize),
        (KeyCode::KeyN, SidebarButton::Step),
    ];
    for (key, kind) in bindings {
        if keyboard_input.just_pressed(key) {
            actions.send(kind.action(&settings, forward));
        }
    }
}

fn update_labels(
    settings: Res<Settings>,
    state: Res<State<GameState>>,
    mut labels: Query<(&ButtonLabel, &mut Text)>,
) {
    if !settings.is_changed() && !state.is_changed() {
        return;
    }
    let playing = *state.get() == GameState::Running;
    for (label, mut text) in labels.iter_mut() {
        **text = label.0.label(&settings, playing);
    }
}

fn update_status(board: Res<Board>, mut status: Query<&mut Text, With<StatusText>>) {
    if !board.is_changed() {
        return;
    }
    let Ok(mut text) = status.get_single_mut() else {
        return;
    };
    **text = format!(
        "{}x{} cells\ngeneration {}\nalive {}",
        board.width(),
        board.height(),
        board.generation(),
        board.population()
    );
}

// ——> COMPONENTS

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
enum SidebarButton {
    PlayPause,
    Randomize,
    Gradient,
    FrameTime,
    CellSize,
    Step,
}

impl SidebarButton {
    const ALL: [SidebarButton; 6] = [
        SidebarButton::PlayPause,
        SidebarButton::Randomize,
        SidebarButton::Gradient,
        SidebarButton::FrameTime,
        SidebarButton::CellSize,
        SidebarButton::Step,
    ];

    /// the action a press sends; `forward` picks the direction for the cycling buttons
    fn action(self, settings: &Settings, forward: bool) -> Action {
        match self {
            SidebarButton::PlayPause => Action::TogglePlay,
            SidebarButton::Randomize => Action::Randomize,
            SidebarButton::Gradient => Action::ToggleGradient,
            SidebarButton::FrameTime => Action::SetFrameTime(settings.next_frame_time(forward)),
            SidebarButton::CellSize => Action::SetCellSize(settings.next_cell_size(forward)),
            SidebarButton::Step => Action::Step,
        }
    }

    fn label(self, settings: &Settings, playing: bool) -> String {
        match self {
            SidebarButton::PlayPause if playing => "pause".into(),
            SidebarButton::PlayPause => "play".into(),
            SidebarButton::Randomize => "randomize".into(),
            SidebarButton::Gradient if settings.gradient => "gradient: on".into(),
            SidebarButton::Gradient => "gradient: off".into(),
            SidebarButton::FrameTime => format!("frame time: {} ms", settings.frame_time),
            SidebarButton::CellSize => format!("cell size: {} px", settings.cell_size),
            SidebarButton::Step => "step".into(),
        }
    }
}

#[derive(Component, Debug)]
struct ButtonLabel(SidebarButton);

#[derive(Component)]
struct StatusText;

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn buttons_map_to_actions() {
        let settings = Settings::default();
        assert_eq!(
            Action::TogglePlay,
            SidebarButton::PlayPause.action(&settings, true)
        );
        assert_eq!(
            Action::SetFrameTime(100),
            SidebarButton::FrameTime.action(&settings, true)
        );
        assert_eq!(
            Action::SetCellSize(1),
            SidebarButton::CellSize.action(&settings, false)
        );
    }

    #[test]
    fn labels_follow_settings() {
        let mut settings = Settings::default();
        assert_eq!("play", SidebarButton::PlayPause.label(&settings, false));
        assert_eq!("pause", SidebarButton::PlayPause.label(&settings, true));
        assert_eq!("frame time: 50 ms", SidebarButton::FrameTime.label(&settings, false));

        settings.gradient = true;
        settings.cell_size = 25;
        assert_eq!("gradient: on", SidebarButton::Gradient.label(&settings, false));
        assert_eq!("cell size: 25 px", SidebarButton::CellSize.label(&settings, false));
    }
}
