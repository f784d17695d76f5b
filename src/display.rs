/// Terminal presenter — all terminal I/O lives here.
///
/// The game is drawn into a monochrome `Framebuffer` first; this module
/// packs two framebuffer rows into one terminal row with half-block glyphs
/// and adds a frame, a score line and a controls hint.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal, QueueableCommand,
};
use pocket_invaders::config::Rules;
use pocket_invaders::entities::GameState;
use pocket_invaders::sprites::{draw_scene, Framebuffer};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_ALIENS: Color = Color::Green;
const C_PIXELS: Color = Color::White;
const C_HINT: Color = Color::DarkGrey;

/// Terminal rows above the play field (HUD + top border).
const TOP: u16 = 2;

/// Columns × rows the terminal needs to show a field of the given size.
pub fn required_size(rules: &Rules) -> (u16, u16) {
    let cols = rules.screen_width as u16 + 2;
    let rows = (rules.screen_height as u16).div_ceil(2) + TOP + 2;
    (cols, rows)
}

// ── Public entry points ───────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(
    out: &mut W,
    fb: &mut Framebuffer,
    state: &GameState,
    rules: &Rules,
) -> std::io::Result<()> {
    draw_scene(fb, state, rules);

    out.queue(terminal::Clear(terminal::ClearType::All))?;
    draw_hud(out, state)?;
    draw_border(out, fb)?;
    draw_pixels(out, fb)?;
    draw_controls_hint(out, fb)?;

    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, 0))?;
    out.flush()?;
    Ok(())
}

/// Title card shown once at start-up.
pub fn splash<W: Write>(out: &mut W, rules: &Rules) -> std::io::Result<()> {
    let (cols, rows) = required_size(rules);
    let title = "SPACE INVADERS";

    out.queue(terminal::Clear(terminal::ClearType::All))?;
    out.queue(cursor::MoveTo(
        (cols / 2).saturating_sub(title.len() as u16 / 2),
        rows / 2,
    ))?;
    out.queue(style::SetForegroundColor(Color::Cyan))?;
    out.queue(Print(title))?;
    out.queue(style::ResetColor)?;
    out.flush()
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, state: &GameState) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(format!("Score:{:>6}", state.score)))?;

    out.queue(cursor::MoveTo(16, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_ALIENS))?;
    out.queue(Print(format!("Aliens:{:>3}", state.aliens_alive)))?;
    Ok(())
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, fb: &Framebuffer) -> std::io::Result<()> {
    let w = fb.width();
    let field_rows = fb.height().div_ceil(2) as u16;

    out.queue(style::SetForegroundColor(C_BORDER))?;

    out.queue(cursor::MoveTo(0, TOP - 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w))))?;

    out.queue(cursor::MoveTo(0, TOP + field_rows))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w))))?;

    for row in TOP..TOP + field_rows {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(w as u16 + 1, row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

// ── Play field ────────────────────────────────────────────────────────────────

fn draw_pixels<W: Write>(out: &mut W, fb: &Framebuffer) -> std::io::Result<()> {
    out.queue(style::SetForegroundColor(C_PIXELS))?;

    let mut line = String::with_capacity(fb.width() * 3);
    for row in 0..fb.height().div_ceil(2) {
        line.clear();
        let top_y = (row * 2) as i32;
        for x in 0..fb.width() as i32 {
            line.push(half_block(fb.get(x, top_y), fb.get(x, top_y + 1)));
        }
        out.queue(cursor::MoveTo(1, TOP + row as u16))?;
        out.queue(Print(&line))?;
    }
    Ok(())
}

fn half_block(top: bool, bottom: bool) -> char {
    match (top, bottom) {
        (true, true) => '█',
        (true, false) => '▀',
        (false, true) => '▄',
        (false, false) => ' ',
    }
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, fb: &Framebuffer) -> std::io::Result<()> {
    let row = TOP + fb.height().div_ceil(2) as u16 + 1;
    out.queue(cursor::MoveTo(1, row))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("← → / A D : Move   SPACE : Shoot   Q : Quit"))?;
    Ok(())
}
