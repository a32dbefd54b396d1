//! Rendering layer. All terminal I/O lives here.
//!
//! Each function receives a mutable writer and an immutable snapshot of the
//! game. No game logic is performed; this module only translates state into
//! terminal commands. One room unit maps to one terminal cell.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use room_shooter::compute::{GameState, GameStatus};
use room_shooter::enemy::{Enemy, EnemyKind};
use room_shooter::entities::{Direction, Door, Item, ItemKind, RoomType};
use room_shooter::geometry::Point2D;
use room_shooter::powerup::{PowerUp, PowerUpKind};
use room_shooter::room::Room;
use room_shooter::weapon::WeaponShot;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_DOOR_OPEN: Color = Color::Green;
const C_DOOR_LOCKED: Color = Color::DarkRed;
const C_HUD_HEARTS: Color = Color::Red;
const C_HUD_COINS: Color = Color::Yellow;
const C_HUD_STATS: Color = Color::Cyan;
const C_PLAYER: Color = Color::White;
const C_ENEMY_CHASER: Color = Color::Green;
const C_ENEMY_SPITTER: Color = Color::Red;
const C_BOSS: Color = Color::Magenta;
const C_SHOT_PLAYER: Color = Color::Cyan;
const C_SHOT_ENEMY: Color = Color::Magenta;
const C_ITEM_HEART: Color = Color::Red;
const C_ITEM_COIN: Color = Color::Yellow;
const C_POWER_UP: Color = Color::Cyan;
const C_POWER_UP_SUPER: Color = Color::Yellow;
const C_HINT: Color = Color::DarkGrey;

/// Screen row of the room's top wall (row 0 is the HUD).
const TOP: u16 = 1;

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(out: &mut W, state: &GameState) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let room = state.current_room();
    draw_border(out, room)?;
    draw_hud(out, state)?;

    for door in room.doors() {
        draw_door(out, door, room.is_completed())?;
    }
    for item in room.items().unwrap_or_default() {
        draw_item(out, item)?;
    }
    for power_up in room.power_ups().unwrap_or_default() {
        draw_power_up(out, power_up)?;
    }
    if let Some(ai) = room.room_ai() {
        for enemy in ai.living_enemies() {
            draw_enemy(out, enemy)?;
        }
        for shot in ai.shots() {
            draw_shot(out, shot, C_SHOT_ENEMY, "•")?;
        }
    }
    if let Some(player) = room.player() {
        for shot in player.weapon.shots() {
            draw_shot(out, shot, C_SHOT_PLAYER, "o")?;
        }
        put(out, player.element.coord(), C_PLAYER, "@")?;
    }

    draw_controls_hint(out, room)?;

    match state.status {
        GameStatus::GameOver => draw_banner(out, room, "GAME  OVER", Color::Red)?,
        GameStatus::Won => draw_banner(out, room, "LEVEL CLEAR", Color::Green)?,
        GameStatus::Playing if state.is_paused() => {
            draw_banner(out, room, "  PAUSED  ", Color::Yellow)?
        }
        GameStatus::Playing => {}
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, bottom_row(room) + 2))?;
    out.flush()?;
    Ok(())
}

// ── Coordinates ───────────────────────────────────────────────────────────────

fn screen(p: Point2D) -> (u16, u16) {
    let col = p.x.round().max(0.0) as u16 + 1;
    let row = p.y.round().max(0.0) as u16 + TOP + 1;
    (col, row)
}

fn bottom_row(room: &Room) -> u16 {
    TOP + room.height().round() as u16 + 1
}

fn put<W: Write>(out: &mut W, p: Point2D, color: Color, glyph: &str) -> std::io::Result<()> {
    let (col, row) = screen(p);
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(glyph))?;
    Ok(())
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, room: &Room) -> std::io::Result<()> {
    let inner = room.width().round() as usize + 1;
    let bottom = bottom_row(room);

    out.queue(style::SetForegroundColor(C_BORDER))?;
    out.queue(cursor::MoveTo(0, TOP))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(inner))))?;
    out.queue(cursor::MoveTo(0, bottom))?;
    out.queue(Print(format!("└{}┘", "─".repeat(inner))))?;

    for row in TOP + 1..bottom {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(inner as u16 + 1, row))?;
        out.queue(Print("│"))?;
    }
    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, state: &GameState) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, 0))?;
    if let Some(player) = state.player() {
        let stats = &player.stats;
        out.queue(style::SetForegroundColor(C_HUD_HEARTS))?;
        out.queue(Print(format!("{:<8}", "♥".repeat(stats.hearts as usize))))?;
        out.queue(style::SetForegroundColor(C_HUD_COINS))?;
        out.queue(Print(format!(" ¢{:<3}", stats.coins)))?;
        out.queue(style::SetForegroundColor(C_HUD_STATS))?;
        out.queue(Print(format!(
            " spd {:.0}  rng {:.0}  tears {}",
            stats.speed, stats.range, stats.tears
        )))?;
    }

    let room = state.current_room();
    let cleared = state.completed_rooms().count();
    let tag = format!(
        "  [{:?} {}/{}  cleared {}/{}]",
        room.room_type(),
        state.level.current_index() + 1,
        state.rooms().len(),
        cleared,
        state.rooms().len(),
    );
    out.queue(style::SetForegroundColor(room_color(room.room_type())))?;
    out.queue(Print(tag))?;
    Ok(())
}

fn room_color(room_type: RoomType) -> Color {
    match room_type {
        RoomType::Start => Color::White,
        RoomType::Shop => Color::Yellow,
        RoomType::Treasure => Color::Cyan,
        RoomType::Boss => Color::Magenta,
        RoomType::Standard => Color::Green,
    }
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn draw_door<W: Write>(out: &mut W, door: &Door, open: bool) -> std::io::Result<()> {
    let color = if open { C_DOOR_OPEN } else { C_DOOR_LOCKED };
    let glyph = match door.direction {
        _ if open => "▒",
        Direction::Up | Direction::Down => "═",
        Direction::Left | Direction::Right => "║",
    };
    put(out, door.element.coord(), color, glyph)
}

fn draw_enemy<W: Write>(out: &mut W, enemy: &Enemy) -> std::io::Result<()> {
    match enemy.kind {
        EnemyKind::Chaser => put(out, enemy.element.coord(), C_ENEMY_CHASER, "x"),
        EnemyKind::Spitter => put(out, enemy.element.coord(), C_ENEMY_SPITTER, "§"),
        EnemyKind::Boss => {
            // 3-wide sprite; mood shows the current mode
            let face = if enemy.hit_strategy().is_shooting() { "<◎>" } else { "[◉]" };
            let c = enemy.element.coord();
            put(out, Point2D::new(c.x - 1.0, c.y), C_BOSS, face)
        }
    }
}

fn draw_shot<W: Write>(
    out: &mut W,
    shot: &WeaponShot,
    color: Color,
    glyph: &str,
) -> std::io::Result<()> {
    put(out, shot.element.coord(), color, glyph)
}

fn draw_item<W: Write>(out: &mut W, item: &Item) -> std::io::Result<()> {
    match item.kind {
        ItemKind::Heart => put(out, item.element.coord(), C_ITEM_HEART, "♥"),
        ItemKind::Coin => put(out, item.element.coord(), C_ITEM_COIN, "¢"),
    }
}

/// Symbols:
///   R  RangeUp
///   S  SpeedUp
///   T  TearsUp
/// Super power-ups are yellow; the shop price is printed underneath.
fn draw_power_up<W: Write>(out: &mut W, power_up: &PowerUp) -> std::io::Result<()> {
    let glyph = match power_up.kind {
        PowerUpKind::RangeUp => "R",
        PowerUpKind::SpeedUp => "S",
        PowerUpKind::TearsUp => "T",
    };
    let color = if power_up.is_super { C_POWER_UP_SUPER } else { C_POWER_UP };
    let at = power_up.element.coord();
    put(out, at, color, glyph)?;
    if let Some(price) = power_up.price {
        put(out, Point2D::new(at.x - 1.0, at.y + 1.0), C_ITEM_COIN, &format!("¢{price}"))?;
    }
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, room: &Room) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, bottom_row(room) + 1))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("W A S D : Move   ← ↑ → ↓ : Shoot   P : Pause   Q : Quit"))?;
    Ok(())
}

// ── Overlays ──────────────────────────────────────────────────────────────────

fn draw_banner<W: Write>(
    out: &mut W,
    room: &Room,
    text: &str,
    color: Color,
) -> std::io::Result<()> {
    let lines = [
        "╔════════════════════╗".to_string(),
        format!("║    {:<16}║", text),
        "╚════════════════════╝".to_string(),
    ];
    let cx = (room.width() / 2.0).round() as u16 + 1;
    let start_row = TOP + (room.height() / 2.0).round() as u16;
    for (i, line) in lines.iter().enumerate() {
        let col = cx.saturating_sub(line.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, start_row + i as u16))?;
        out.queue(style::SetForegroundColor(color))?;
        out.queue(Print(line))?;
    }
    Ok(())
}
