pub mod camera;
pub mod canvas;
pub mod driver;
pub mod grid;
pub mod life;
pub mod state;
pub mod ui;

pub mod prelude {
    use bevy::color::Color;

    pub const WINDOW_SIZE_PX: (f32, f32) = (1200., 800.);
    pub const BG_COLOR: Color = Color::srgb(0.95, 0.95, 0.95);

    /// step threshold of the animation driver
    pub const DEFAULT_FRAME_TIME_MS: u32 = 50;
    pub const FRAME_TIME_CHOICES_MS: [u32; 6] = [10, 25, 50, 100, 250, 500];

    /// pixels per cell
    pub const DEFAULT_CELL_SIZE_PX: u32 = 2;
    pub const CELL_SIZE_CHOICES_PX: [u32; 6] = [1, 2, 5, 10, 25, 50];

    /// flat fill for alive cells (rgba)
    pub const CELL_ALIVE_RGBA: [u8; 4] = [0x33, 0x33, 0x33, 0xff];
    /// gradient stops at 0.0, 0.5 and 1.0 along the surface diagonal
    pub const GRADIENT_STOPS_RGB: [[u8; 3]; 3] = [[0xff, 0, 0], [0, 0xff, 0], [0, 0, 0xff]];

    pub const SIDEBAR_WIDTH_PX: f32 = 160.0;
    pub const SIDEBAR_COLOR: Color = Color::srgb(0.15, 0.15, 0.18);
    pub const BUTTON_COLOR: Color = Color::srgb(0.25, 0.25, 0.3);
    pub const BUTTON_HOVERED_COLOR: Color = Color::srgb(0.35, 0.35, 0.42);
    pub const BUTTON_PRESSED_COLOR: Color = Color::srgb(0.2, 0.6, 0.3);
    pub const TEXT_COLOR: Color = Color::srgb(0.95, 0.95, 0.95);
    pub const FONT_SIZE: f32 = 14.0;
}
