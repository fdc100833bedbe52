use bevy::{
    prelude::*,
    render::{
        render_asset::RenderAssetUsages,
        render_resource::{Extent3d, TextureDimension, TextureFormat},
    },
};

use crate::{grid::Grid, prelude::*};

const BYTES_PER_PIXEL: usize = 4;

/// The drawing surface: an RGBA image shown by a sprite next to the sidebar.
#[derive(Resource, Clone)]
pub struct Canvas {
    pub image: Handle<Image>,
}

impl Canvas {
    /// Paints `grid` onto the canvas image. Does nothing while the image is unavailable.
    pub fn render(&self, images: &mut Assets<Image>, grid: &Grid, gradient: bool) {
        let Some(image) = images.get_mut(&self.image) else {
            return;
        };
        let (width, height) = (image.width(), image.height());
        paint(&mut image.data, width, height, grid, gradient);
    }

    /// Resizes the canvas image, wiping its content.
    pub fn resize(&self, images: &mut Assets<Image>, size: UVec2) {
        if let Some(image) = images.get_mut(&self.image) {
            image.resize(extent(size));
            image.data.fill(0);
        }
    }
}

/// a transparent surface of `size` pixels
pub fn new_surface(size: UVec2) -> Image {
    Image::new_fill(
        extent(size),
        TextureDimension::D2,
        &[0; BYTES_PER_PIXEL],
        TextureFormat::Rgba8UnormSrgb,
        RenderAssetUsages::default(),
    )
}

/// textures can't be empty, so a zero sized container still gets one pixel
#[inline]
fn extent(size: UVec2) -> Extent3d {
    Extent3d {
        width: size.x.max(1),
        height: size.y.max(1),
        depth_or_array_layers: 1,
    }
}

/// Clears an RGBA8 surface and fills one `cell_size` square per alive cell.
///
/// Cells are placed at `(x * cell_size, y * cell_size)` and clipped to the surface. With
/// `gradient` set the fill runs red, green, blue from the top left to the bottom right
/// corner, otherwise every cell gets [`CELL_ALIVE_RGBA`]. A buffer too small for the given
/// dimensions is left untouched.
pub fn paint(
    pixels: &mut [u8],
    surface_width: u32,
    surface_height: u32,
    grid: &Grid,
    gradient: bool,
) {
    let (sw, sh) = (surface_width as usize, surface_height as usize);
    if pixels.len() < sw * sh * BYTES_PER_PIXEL {
        return;
    }
    pixels.fill(0);

    let cs = grid.cell_size() as usize;
    let diagonal = Gradient::new(surface_width, surface_height);
    for (y, row) in grid.rows().enumerate() {
        let py = y * cs;
        if py >= sh {
            break;
        }
        for x in row.iter().enumerate().filter(|(_, alive)| **alive).map(|(x, _)| x) {
            let px = x * cs;
            if px >= sw {
                break;
            }
            for yy in py..(py + cs).min(sh) {
                for xx in px..(px + cs).min(sw) {
                    let color = if gradient {
                        diagonal.color_at(xx, yy)
                    } else {
                        CELL_ALIVE_RGBA
                    };
                    let offset = (yy * sw + xx) * BYTES_PER_PIXEL;
                    pixels[offset..offset + BYTES_PER_PIXEL].copy_from_slice(&color);
                }
            }
        }
    }
}

/// linear gradient along the surface diagonal
struct Gradient {
    width: f32,
    height: f32,
    length_sq: f32,
}

impl Gradient {
    fn new(width: u32, height: u32) -> Self {
        let (width, height) = (width as f32, height as f32);
        Self {
            width,
            height,
            length_sq: width * width + height * height,
        }
    }

    /// projects the pixel center onto the diagonal and samples the stops there
    fn color_at(&self, x: usize, y: usize) -> [u8; 4] {
        if self.length_sq <= 0.0 {
            return sample_stops(0.0);
        }
        let (cx, cy) = (x as f32 + 0.5, y as f32 + 0.5);
        sample_stops((cx * self.width + cy * self.height) / self.length_sq)
    }
}

fn sample_stops(t: f32) -> [u8; 4] {
    let t = t.clamp(0.0, 1.0);
    let segments = (GRADIENT_STOPS_RGB.len() - 1) as f32;
    let scaled = t * segments;
    let i = (scaled.floor() as usize).min(GRADIENT_STOPS_RGB.len() - 2);
    let local = scaled - i as f32;
    let (from, to) = (GRADIENT_STOPS_RGB[i], GRADIENT_STOPS_RGB[i + 1]);
    let lerp = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * local).round() as u8;
    [lerp(from[0], to[0]), lerp(from[1], to[1]), lerp(from[2], to[2]), 0xff]
}
