/// All game entity types, plus the round-start layout.
///
/// Every pool is a fixed-size array so a whole round is `Copy` and a tick
/// never allocates.

use crate::config::Rules;

pub const MAX_PROJECTILES: usize = 3;
pub const GRID_ROWS: usize = 3;
pub const GRID_COLS: usize = 5;
pub const NUM_ALIENS: usize = GRID_ROWS * GRID_COLS;

// ── Aliens ───────────────────────────────────────────────────────────────────

/// Alien species.  The discriminant doubles as the sprite index and drives
/// the score value: lower index, higher reward.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AlienKind {
    Squid = 0,
    Crab = 1,
    Octopus = 2,
}

impl AlienKind {
    /// Kind assigned to a formation row (`row mod 3`).
    pub fn for_row(row: usize) -> Self {
        match row % 3 {
            0 => AlienKind::Squid,
            1 => AlienKind::Crab,
            _ => AlienKind::Octopus,
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }

    /// Score for destroying one alien of this kind: `10 * (3 - kind)`.
    pub fn points(self) -> u32 {
        10 * (3 - self as u32)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Alien {
    pub x: i32,
    pub y: i32,
    pub alive: bool,
    pub kind: AlienKind,
}

impl Alien {
    /// Half-open point-in-box test against the sprite footprint.
    pub fn contains(&self, x: i32, y: i32, rules: &Rules) -> bool {
        x >= self.x
            && x < self.x + rules.alien_width
            && y >= self.y
            && y < self.y + rules.alien_height
    }
}

/// Row and column of an alien from its storage index (row-major).
pub fn grid_position(index: usize) -> (usize, usize) {
    (index / GRID_COLS, index % GRID_COLS)
}

// ── Projectiles & effects ────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Projectile {
    pub x: i32,
    pub y: i32,
    pub active: bool,
}

/// The single explosion slot.  `(x, y)` is the impact point; the renderer
/// centres the sprite on it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Explosion {
    pub x: i32,
    pub y: i32,
    pub started_at: u64,
    pub active: bool,
}

impl Explosion {
    pub fn at(x: i32, y: i32, now: u64) -> Self {
        Explosion {
            x,
            y,
            started_at: now,
            active: true,
        }
    }
}

// ── Player & formation ───────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Player {
    pub x: i32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    pub fn sign(self) -> i32 {
        match self {
            Direction::Left => -1,
            Direction::Right => 1,
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

/// Motion state shared by the whole alien grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Formation {
    pub direction: Direction,
    pub last_move_ms: u64,
    /// Sprite frame, 0 or 1.
    pub animation_frame: u8,
    pub last_frame_ms: u64,
}

// ── Master game state ────────────────────────────────────────────────────────

/// One round: every entity plus the score.  Cloneable (and `Copy`) so the
/// update functions can return a fresh value without touching the input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GameState {
    pub player: Player,
    pub projectiles: [Projectile; MAX_PROJECTILES],
    pub aliens: [Alien; NUM_ALIENS],
    pub explosion: Explosion,
    pub formation: Formation,
    pub score: u32,
    pub aliens_alive: usize,
}

impl GameState {
    /// Round-start layout: player centred, full grid alive, nothing in
    /// flight, timers started at `now`.
    pub fn new(rules: &Rules, now: u64) -> Self {
        let aliens = std::array::from_fn(|i| {
            let (row, col) = grid_position(i);
            Alien {
                x: rules.formation_origin_x + col as i32 * rules.alien_spacing_x,
                y: rules.formation_origin_y + row as i32 * rules.alien_spacing_y,
                alive: true,
                kind: AlienKind::for_row(row),
            }
        });

        GameState {
            player: Player {
                x: rules.player_start_x(),
            },
            projectiles: [Projectile::default(); MAX_PROJECTILES],
            aliens,
            explosion: Explosion::default(),
            formation: Formation {
                direction: Direction::Right,
                last_move_ms: now,
                animation_frame: 0,
                last_frame_ms: now,
            },
            score: 0,
            aliens_alive: NUM_ALIENS,
        }
    }

    pub fn alive_aliens(&self) -> impl Iterator<Item = &Alien> {
        self.aliens.iter().filter(|a| a.alive)
    }

    /// Aliens still standing this round.
    pub fn alive_count(&self) -> usize {
        self.aliens_alive
    }

    pub fn active_projectiles(&self) -> impl Iterator<Item = &Projectile> {
        self.projectiles.iter().filter(|p| p.active)
    }
}
