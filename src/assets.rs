use std::path::Path;

use image::RgbaImage;
use ratatui::{buffer::Buffer, layout::Rect, style::Color};
use tracing::{debug, info};

/// Cells in a sprite's destination. Unlike [`Rect`] it may hang off the
/// screen on any side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl CellRect {
    /// Screen cells covered by this rect that also fall inside `clip`
    pub fn visible_cells(&self, clip: Rect) -> impl Iterator<Item = (u16, u16)> + use<> {
        let left = self.x.max(clip.x as i32);
        let top = self.y.max(clip.y as i32);
        let right = (self.x + self.width).min(clip.x as i32 + clip.width as i32);
        let bottom = (self.y + self.height).min(clip.y as i32 + clip.height as i32);

        (top..bottom).flat_map(move |y| (left..right).map(move |x| (x as u16, y as u16)))
    }
}

/// A decoded picture drawn with upper-half-block cells, two pixels per cell
#[derive(Debug, Clone)]
pub struct Sprite {
    pixels: RgbaImage,
}

impl Sprite {
    pub fn new(pixels: RgbaImage) -> Self {
        Self { pixels }
    }

    pub fn open(path: &Path) -> image::ImageResult<Self> {
        Ok(Self::new(image::open(path)?.to_rgba8()))
    }

    /// Scales the picture into `dest` with nearest-neighbour sampling.
    /// Transparent pixels show `backdrop`; fully transparent cells are left
    /// untouched.
    pub fn draw(&self, buf: &mut Buffer, dest: CellRect, clip: Rect, backdrop: Color) {
        let (img_w, img_h) = self.pixels.dimensions();
        if img_w == 0 || img_h == 0 || dest.width <= 0 || dest.height <= 0 {
            return;
        }

        let sample = |col: i32, half_row: i32| -> Option<Color> {
            let px = (col as i64 * img_w as i64 / dest.width as i64) as u32;
            let py = (half_row as i64 * img_h as i64 / (dest.height as i64 * 2)) as u32;
            let [r, g, b, a] = self.pixels.get_pixel(px.min(img_w - 1), py.min(img_h - 1)).0;
            (a >= 128).then_some(Color::Rgb(r, g, b))
        };

        for (x, y) in dest.visible_cells(clip) {
            let col = x as i32 - dest.x;
            let row = y as i32 - dest.y;
            let top = sample(col, row * 2);
            let bottom = sample(col, row * 2 + 1);
            if top.is_none() && bottom.is_none() {
                continue;
            }

            if let Some(cell) = buf.cell_mut((x, y)) {
                cell.set_char('▀')
                    .set_fg(top.unwrap_or(backdrop))
                    .set_bg(bottom.unwrap_or(backdrop));
            }
        }
    }
}

/// The three pictures the game draws. Any of them may be missing, in which
/// case the renderer falls back to text.
#[derive(Debug, Clone, Default)]
pub struct Assets {
    pub launch: Option<Sprite>,
    pub player: Option<Sprite>,
    pub enemy: Option<Sprite>,
}

impl Assets {
    /// Loads `launch_screen.png`, `player_ship.png` and `enemy_ship.png` from
    /// `dir`
    pub fn load(dir: &Path) -> Self {
        let assets = Self {
            launch: load_sprite(dir, "launch_screen.png"),
            player: load_sprite(dir, "player_ship.png"),
            enemy: load_sprite(dir, "enemy_ship.png"),
        };
        info!(
            launch = assets.launch.is_some(),
            player = assets.player.is_some(),
            enemy = assets.enemy.is_some(),
            "assets loaded"
        );
        assets
    }
}

fn load_sprite(dir: &Path, name: &str) -> Option<Sprite> {
    let path = dir.join(name);
    match Sprite::open(&path) {
        Ok(sprite) => Some(sprite),
        Err(err) => {
            debug!(path = %path.display(), %err, "asset unavailable");
            None
        }
    }
}
