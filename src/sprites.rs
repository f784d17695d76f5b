/// Monochrome framebuffer and the bitmaps drawn into it.
///
/// Sprites are stored one row per integer, most significant used bit on the
/// left.  Drawing only reads the game state.

use crate::config::Rules;
use crate::entities::GameState;

pub const PLAYER_SPRITE_WIDTH: i32 = 11;
pub const PLAYER_SPRITE: [u16; 7] = [0x020, 0x070, 0x070, 0x7F8, 0x7FF, 0x7FF, 0x7FF];

/// `[kind][animation frame][row]`
pub const ALIEN_SPRITES: [[[u8; 8]; 2]; 3] = [
    // squid
    [
        [0x18, 0x3C, 0x7E, 0xDB, 0xFF, 0x24, 0x5A, 0x81],
        [0x18, 0x3C, 0x7E, 0xDB, 0xFF, 0x42, 0xA5, 0x42],
    ],
    // crab
    [
        [0x00, 0x3C, 0x7E, 0xDB, 0xFF, 0x5A, 0x81, 0x42],
        [0x00, 0x3C, 0x7E, 0xDB, 0xFF, 0x24, 0x5A, 0xA5],
    ],
    // octopus
    [
        [0x3C, 0x7E, 0xFF, 0xDB, 0xFF, 0x18, 0x24, 0x42],
        [0x3C, 0x7E, 0xFF, 0xDB, 0xFF, 0x18, 0x42, 0x81],
    ],
];

pub const EXPLOSION_SPRITE: [u8; 8] = [0x14, 0x22, 0x5D, 0xA5, 0xA5, 0x5D, 0x22, 0x14];
pub const EXPLOSION_SIZE: i32 = 8;

/// Length of the vertical mark drawn for a projectile, ending at its tip.
pub const PROJECTILE_TRAIL: i32 = 2;

// ── Framebuffer ──────────────────────────────────────────────────────────────

/// One bit per pixel, row-major.  Writes outside the buffer are clipped.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Framebuffer {
    width: usize,
    height: usize,
    pixels: Vec<bool>,
}

impl Framebuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Framebuffer {
            width,
            height,
            pixels: vec![false; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn clear(&mut self) {
        self.pixels.fill(false);
    }

    pub fn get(&self, x: i32, y: i32) -> bool {
        self.index(x, y).map(|i| self.pixels[i]).unwrap_or(false)
    }

    pub fn set(&mut self, x: i32, y: i32) {
        if let Some(i) = self.index(x, y) {
            self.pixels[i] = true;
        }
    }

    pub fn lit_count(&self) -> usize {
        self.pixels.iter().filter(|&&p| p).count()
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return None;
        }
        Some(y as usize * self.width + x as usize)
    }

    /// Blit `rows` at `(x, y)`; bit `width - 1` of each row is the leftmost
    /// pixel.
    pub fn draw_bits<T: Into<u32> + Copy>(&mut self, x: i32, y: i32, width: i32, rows: &[T]) {
        for (dy, &row) in rows.iter().enumerate() {
            let bits: u32 = row.into();
            for col in 0..width {
                if bits & (1 << (width - 1 - col)) != 0 {
                    self.set(x + col, y + dy as i32);
                }
            }
        }
    }

    pub fn vline(&mut self, x: i32, y0: i32, y1: i32) {
        for y in y0.min(y1)..=y0.max(y1) {
            self.set(x, y);
        }
    }
}

// ── Scene ────────────────────────────────────────────────────────────────────

/// Draw one frame of `state` into `fb`.
pub fn draw_scene(fb: &mut Framebuffer, state: &GameState, rules: &Rules) {
    fb.clear();

    let player_y = rules.screen_height - rules.player_height;
    fb.draw_bits(state.player.x, player_y, PLAYER_SPRITE_WIDTH, &PLAYER_SPRITE);

    let frame = state.formation.animation_frame as usize & 1;
    for alien in state.alive_aliens() {
        fb.draw_bits(alien.x, alien.y, 8, &ALIEN_SPRITES[alien.kind.index()][frame]);
    }

    for p in state.active_projectiles() {
        fb.vline(p.x, p.y - PROJECTILE_TRAIL, p.y);
    }

    if state.explosion.active {
        let e = &state.explosion;
        fb.draw_bits(
            e.x - EXPLOSION_SIZE / 2,
            e.y - EXPLOSION_SIZE / 2,
            EXPLOSION_SIZE,
            &EXPLOSION_SPRITE,
        );
    }
}
