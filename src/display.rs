//! Rendering layer. All terminal I/O lives here.
//!
//! The canvas is squeezed into the terminal between the HUD (row 0) and the
//! controls hint (last row).  `TerminalSurface` answers the draw requests of
//! `render::draw_world`; everything else here is terminal-only chrome.

use std::f32::consts::FRAC_PI_4;
use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use glam::Vec2;

use drift_shooter::config::SpriteSizes;
use drift_shooter::entities::{BulletOwner, GameStatus, ParticleStyle, WorldState};
use drift_shooter::geometry::center;
use drift_shooter::render::{draw_world, Sprite, Surface};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_TILE: Color = Color::DarkGrey;
const C_HUD: Color = Color::Yellow;
const C_HUD_BOOST: Color = Color::Cyan;
const C_PLAYER: Color = Color::White;
const C_ENEMY: Color = Color::Green;
const C_BULLET_PLAYER: Color = Color::Cyan;
const C_BULLET_ENEMY: Color = Color::Magenta;
const C_PARTICLE_WHITE: Color = Color::White;
const C_PARTICLE_GREY: Color = Color::Grey;
const C_PARTICLE_RED: Color = Color::Red;
const C_HINT: Color = Color::DarkGrey;

/// Heading glyphs, starting at "right" and turning clockwise (y points down).
const ARROWS: [&str; 8] = ["→", "↘", "↓", "↙", "←", "↖", "↑", "↗"];

// ── Viewport ──────────────────────────────────────────────────────────────────

/// Maps canvas coordinates to terminal cells and back.
#[derive(Clone, Copy, Debug)]
pub struct Viewport {
    pub cols: u16,
    pub rows: u16,
    canvas: Vec2,
}

impl Viewport {
    pub fn new(cols: u16, rows: u16, width: f32, height: f32) -> Self {
        Self {
            cols,
            rows,
            canvas: Vec2::new(width, height),
        }
    }

    /// Rows available to the canvas (HUD and hint take one each).
    fn play_rows(&self) -> u16 {
        self.rows.saturating_sub(2).max(1)
    }

    /// Cell for a canvas point, or `None` if it falls outside the play area.
    pub fn to_cell(&self, p: Vec2) -> Option<(u16, u16)> {
        let cx = p.x / self.canvas.x * self.cols as f32;
        let cy = p.y / self.canvas.y * self.play_rows() as f32;
        if cx < 0.0 || cy < 0.0 || cx >= self.cols as f32 || cy >= self.play_rows() as f32 {
            return None;
        }
        Some((cx as u16, cy as u16 + 1))
    }

    /// Canvas point at the middle of a terminal cell.
    pub fn to_canvas(&self, col: u16, row: u16) -> Vec2 {
        let x = (col as f32 + 0.5) / self.cols.max(1) as f32 * self.canvas.x;
        let y = (row.saturating_sub(1) as f32 + 0.5) / self.play_rows() as f32 * self.canvas.y;
        Vec2::new(x, y)
    }
}

// ── Surface ───────────────────────────────────────────────────────────────────

pub struct TerminalSurface<'a, W: Write> {
    out: &'a mut W,
    view: Viewport,
    sizes: &'a SpriteSizes,
}

impl<'a, W: Write> TerminalSurface<'a, W> {
    fn put(&mut self, at: Vec2, glyph: &str, color: Color) -> std::io::Result<()> {
        if let Some((col, row)) = self.view.to_cell(at) {
            self.out.queue(cursor::MoveTo(col, row))?;
            self.out.queue(style::SetForegroundColor(color))?;
            self.out.queue(Print(glyph))?;
        }
        Ok(())
    }
}

fn arrow(angle: f32) -> &'static str {
    let octant = (angle / FRAC_PI_4).round() as i32;
    ARROWS[octant.rem_euclid(8) as usize]
}

impl<'a, W: Write> Surface for TerminalSurface<'a, W> {
    type Error = std::io::Error;

    fn clear(&mut self, _width: f32, _height: f32) -> std::io::Result<()> {
        self.out.queue(terminal::Clear(terminal::ClearType::All))?;
        Ok(())
    }

    fn draw_tile(&mut self, pos: Vec2, _edge: f32) -> std::io::Result<()> {
        self.put(pos, "·", C_TILE)
    }

    fn draw_sprite(
        &mut self,
        sprite: Sprite,
        pos: Vec2,
        angle: f32,
        scale: f32,
    ) -> std::io::Result<()> {
        let at = center(pos, sprite.size(self.sizes), scale);
        let (glyph, color) = match sprite {
            Sprite::Player => (arrow(angle), C_PLAYER),
            Sprite::Enemy => (arrow(angle), C_ENEMY),
            Sprite::Bullet(BulletOwner::Player) => ("•", C_BULLET_PLAYER),
            Sprite::Bullet(BulletOwner::Enemy) => ("•", C_BULLET_ENEMY),
            Sprite::Particle(style) => {
                let glyph = if scale >= 0.25 { "*" } else { "." };
                let color = match style {
                    ParticleStyle::White => C_PARTICLE_WHITE,
                    ParticleStyle::Grey => C_PARTICLE_GREY,
                    ParticleStyle::Red => C_PARTICLE_RED,
                };
                (glyph, color)
            }
        };
        self.put(at, glyph, color)
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(out: &mut W, state: &WorldState, view: Viewport) -> std::io::Result<()> {
    {
        let mut surface = TerminalSurface {
            out: &mut *out,
            view,
            sizes: &state.config.sprites,
        };
        draw_world(&mut surface, state)?;
    }

    draw_hud(out, state, view)?;
    draw_controls_hint(out, view)?;

    if state.status() == GameStatus::Dead {
        draw_game_over(out, state, view)?;
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, view.rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, state: &WorldState, view: Viewport) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD))?;
    out.queue(Print(format!(
        "Kills:{:>4}  Enemies:{:>3}/{}  Time:{:>4.0}%",
        state.kills,
        state.enemies.len(),
        state.config.spawner.max_enemies,
        state.time_coef * 100.0
    )))?;

    if state.player.is_boosted() {
        let tag = "[ BOOST ]";
        let x = view.cols.saturating_sub(tag.len() as u16 + 1);
        out.queue(cursor::MoveTo(x, 0))?;
        out.queue(style::SetForegroundColor(C_HUD_BOOST))?;
        out.queue(Print(tag))?;
    }
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, view: Viewport) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, view.rows.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(
        "WASD : Move   Mouse : Aim   E / Space / Click : Shoot   Q : Boost   Esc : Quit",
    ))?;
    Ok(())
}

// ── Game-over overlay ─────────────────────────────────────────────────────────

fn draw_game_over<W: Write>(out: &mut W, state: &WorldState, view: Viewport) -> std::io::Result<()> {
    let kills_line = format!("Enemies destroyed: {:>4}", state.kills);
    let lines: [(&str, Color); 5] = [
        ("╔════════════════════╗", Color::Red),
        ("║     YOU  DIED      ║", Color::Red),
        ("╚════════════════════╝", Color::Red),
        (&kills_line, Color::Yellow),
        ("R - Play Again  Esc - Quit", Color::White),
    ];

    let cx = view.cols / 2;
    let start_row = (view.rows / 2).saturating_sub(lines.len() as u16 / 2);

    for (i, (msg, color)) in lines.iter().enumerate() {
        let row = start_row + i as u16;
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(*msg))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn viewport_round_trips_cell_centres() {
        let view = Viewport::new(80, 26, 800.0, 600.0);
        let p = view.to_canvas(40, 13);
        assert_eq!(view.to_cell(p), Some((40, 13)));
    }

    #[test]
    fn viewport_rejects_points_off_canvas() {
        let view = Viewport::new(80, 26, 800.0, 600.0);
        assert_eq!(view.to_cell(Vec2::new(-1.0, 10.0)), None);
        assert_eq!(view.to_cell(Vec2::new(10.0, 600.0)), None);
    }

    #[test]
    fn arrow_follows_screen_axes() {
        assert_eq!(arrow(0.0), "→");
        assert_eq!(arrow(std::f32::consts::FRAC_PI_2), "↓");
        assert_eq!(arrow(-std::f32::consts::FRAC_PI_2), "↑");
    }
}
