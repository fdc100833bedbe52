#![allow(clippy::too_many_arguments)]

use bevy::{math::uvec2, prelude::*, window::{PrimaryWindow, WindowResized}};

use crate::{
    canvas::{self, Canvas},
    driver::{AnimationDriver, Simulation},
    grid::Grid,
    prelude::*,
    state::GameState,
    ui::Action,
};

pub struct LifePlugin;

impl Plugin for LifePlugin {
    fn build(&self, app: &mut App) {
        let settings = Settings::default();
        app.insert_resource(settings)
            .insert_resource(Board(Grid::new(0, 0, settings.cell_size)))
            .insert_resource(Driver(AnimationDriver::new(settings.frame_time)))
            .add_event::<Action>()
            .add_systems(OnEnter(GameState::Load), load_canvas_and_board)
            .add_systems(OnEnter(GameState::Running), start_driver)
            .add_systems(OnExit(GameState::Running), stop_driver)
            .add_systems(
                Update,
                (handle_resize, handle_actions, drive_frames)
                    .chain()
                    .run_if(not(in_state(GameState::Load))),
            );
    }
}

// ——> SYSTEMS

/// create the drawing surface and the first board, then wait paused
fn load_canvas_and_board(
    mut commands: Commands,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut images: ResMut<Assets<Image>>,
    mut board: ResMut<Board>,
    settings: Res<Settings>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    let size = windows
        .get_single()
        .map(container_size)
        .unwrap_or_else(|_| fallback_container_size());

    let canvas = Canvas {
        image: images.add(canvas::new_surface(size)),
    };
    commands.spawn((
        CanvasSprite,
        Sprite::from_image(canvas.image.clone()),
        // the sidebar covers the left edge of the window
        Transform::from_xyz(SIDEBAR_WIDTH_PX * 0.5, 0.0, 0.0),
    ));

    **board = Grid::new(size.x, size.y, settings.cell_size);
    canvas.render(&mut images, &board, settings.gradient);
    info!(
        "board of {}x{} cells ready ({} px per cell)",
        board.width(),
        board.height(),
        board.cell_size()
    );

    commands.insert_resource(canvas);
    next_state.set(GameState::Paused);
}

fn start_driver(
    mut driver: ResMut<Driver>,
    mut board: ResMut<Board>,
    canvas: Res<Canvas>,
    mut images: ResMut<Assets<Image>>,
    settings: Res<Settings>,
) {
    let mut frame = Frame {
        grid: &mut board,
        canvas: &canvas,
        images: &mut images,
        gradient: settings.gradient,
    };
    driver.set_playing(true, &mut frame);
    info!("playing");
}

fn stop_driver(
    mut driver: ResMut<Driver>,
    mut board: ResMut<Board>,
    canvas: Res<Canvas>,
    mut images: ResMut<Assets<Image>>,
    settings: Res<Settings>,
) {
    let mut frame = Frame {
        grid: &mut board,
        canvas: &canvas,
        images: &mut images,
        gradient: settings.gradient,
    };
    driver.set_playing(false, &mut frame);
    info!("paused at generation {}", board.generation());
}

/// deliver the frame callback, if the driver asked for one
fn drive_frames(
    time: Res<Time>,
    mut driver: ResMut<Driver>,
    mut board: ResMut<Board>,
    canvas: Res<Canvas>,
    mut images: ResMut<Assets<Image>>,
    settings: Res<Settings>,
) {
    if !driver.take_frame_request() {
        return;
    }
    // most frames only accumulate time, the board is flagged changed only on a step
    let mut frame = Frame {
        grid: board.bypass_change_detection(),
        canvas: &canvas,
        images: &mut images,
        gradient: settings.gradient,
    };
    if driver.on_tick(time.elapsed_secs_f64() * 1000.0, &mut frame) {
        board.set_changed();
    }
}

/// rebuild the surface and the board for the new window size
fn handle_resize(
    mut resized: EventReader<WindowResized>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut board: ResMut<Board>,
    canvas: Res<Canvas>,
    mut images: ResMut<Assets<Image>>,
    settings: Res<Settings>,
) {
    // only the latest size matters
    if resized.read().last().is_none() {
        return;
    }
    let Ok(window) = windows.get_single() else {
        return;
    };
    let size = container_size(window);
    if board.container() == (size.x, size.y) {
        return;
    }

    canvas.resize(&mut images, size);
    board.resize(size.x, size.y);
    canvas.render(&mut images, &board, settings.gradient);
    debug!(
        "resized to {}x{} px, board rebuilt with {}x{} cells",
        size.x,
        size.y,
        board.width(),
        board.height()
    );
}

fn handle_actions(
    mut actions: EventReader<Action>,
    state: Res<State<GameState>>,
    mut next_state: ResMut<NextState<GameState>>,
    mut settings: ResMut<Settings>,
    mut driver: ResMut<Driver>,
    mut board: ResMut<Board>,
    canvas: Res<Canvas>,
    mut images: ResMut<Assets<Image>>,
) {
    for action in actions.read() {
        match *action {
            Action::TogglePlay => {
                if let Some(next) = state.get().toggled() {
                    next_state.set(next);
                }
                continue;
            }
            Action::Randomize => {
                board.randomize();
                info!("board randomized");
            }
            Action::ToggleGradient => {
                settings.gradient = !settings.gradient;
                info!("gradient {}", if settings.gradient { "on" } else { "off" });
            }
            Action::Step => {
                if *state.get() != GameState::Paused {
                    continue;
                }
                board.step();
            }
            Action::SetFrameTime(ms) => {
                if !FRAME_TIME_CHOICES_MS.contains(&ms) {
                    warn!("ignoring unsupported frame time {ms} ms");
                    continue;
                }
                settings.frame_time = ms;
                driver.set_frame_time(ms);
                info!("frame time set to {ms} ms");
                continue;
            }
            Action::SetCellSize(px) => {
                if !CELL_SIZE_CHOICES_PX.contains(&px) {
                    warn!("ignoring unsupported cell size {px} px");
                    continue;
                }
                settings.cell_size = px;
                board.set_cell_size(px);
                info!(
                    "cell size set to {px} px, board now {}x{} cells",
                    board.width(),
                    board.height()
                );
            }
        }
        canvas.render(&mut images, &board, settings.gradient);
    }
}

// ——> HELPERS

/// the canvas area: the window minus the sidebar
fn container_size(window: &Window) -> UVec2 {
    uvec2(
        (window.width() - SIDEBAR_WIDTH_PX).max(0.0) as u32,
        window.height().max(0.0) as u32,
    )
}

fn fallback_container_size() -> UVec2 {
    uvec2(
        (WINDOW_SIZE_PX.0 - SIDEBAR_WIDTH_PX) as u32,
        WINDOW_SIZE_PX.1 as u32,
    )
}

/// cycles through `choices`, starting over from the first entry for unknown values
fn cycle(choices: &[u32], current: u32, forward: bool) -> u32 {
    let len = choices.len();
    let idx = match choices.iter().position(|c| *c == current) {
        Some(pos) if forward => (pos + 1) % len,
        Some(pos) => (pos + len - 1) % len,
        None => 0,
    };
    choices[idx]
}

/// The grid and the canvas, as seen by the animation driver for one tick.
struct Frame<'a> {
    grid: &'a mut Grid,
    canvas: &'a Canvas,
    images: &'a mut Assets<Image>,
    gradient: bool,
}

impl Simulation for Frame<'_> {
    fn step(&mut self) {
        self.grid.step();
    }

    fn render(&mut self) {
        self.canvas.render(self.images, self.grid, self.gradient);
    }
}

// ——> COMPONENTS

#[derive(Component)]
#[require(Sprite)]
struct CanvasSprite;

// ——> RESOURCES

/// user facing simulation parameters
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    /// pixels per cell, one of [`CELL_SIZE_CHOICES_PX`]
    pub cell_size: u32,
    /// step threshold in ms, one of [`FRAME_TIME_CHOICES_MS`]
    pub frame_time: u32,
    /// fill alive cells with the diagonal gradient
    pub gradient: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            cell_size: DEFAULT_CELL_SIZE_PX,
            frame_time: DEFAULT_FRAME_TIME_MS,
            gradient: false,
        }
    }
}

impl Settings {
    #[inline]
    pub fn next_frame_time(&self, forward: bool) -> u32 {
        cycle(&FRAME_TIME_CHOICES_MS, self.frame_time, forward)
    }

    #[inline]
    pub fn next_cell_size(&self, forward: bool) -> u32 {
        cycle(&CELL_SIZE_CHOICES_PX, self.cell_size, forward)
    }
}

#[derive(Resource, Debug, Deref, DerefMut)]
pub struct Board(pub Grid);

#[derive(Resource, Debug, Default, Deref, DerefMut)]
pub struct Driver(pub AnimationDriver);
