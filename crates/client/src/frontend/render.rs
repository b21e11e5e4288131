//! Draws a [`GameView`] with ratatui.
//!
//! The world is painted on a `Canvas` in world pixels; canvas y grows
//! upwards, so every rectangle is flipped against the world height.

use std::collections::VecDeque;

use game_content::ItemCatalog;
use game_core::state::HintTarget;
use game_core::view::{GateView, ItemView};
use game_core::{GameView, ItemKind, ItemOracle, NpcKind, PropKind, Rect};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect as Area},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        Block, Clear, List, ListItem, Paragraph, Wrap,
        canvas::{Canvas, Context, Rectangle},
    },
};

use super::sprites::GlyphSprites;

const SIDE_PANEL_WIDTH: u16 = 30;
const DIALOGUE_HEIGHT: u16 = 5;

/// Everything besides the view needed to draw a frame.
pub struct RenderContext<'a> {
    pub view: &'a GameView,
    pub items: &'a ItemCatalog,
    pub sprites: &'a GlyphSprites,
    pub selected: usize,
    pub log: &'a VecDeque<String>,
}

pub fn render(frame: &mut Frame, ctx: &RenderContext) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(20), Constraint::Length(SIDE_PANEL_WIDTH)])
        .split(frame.area());

    render_world(frame, columns[0], ctx);
    render_side_panel(frame, columns[1], ctx);

    if let Some(dialogue) = &ctx.view.dialogue {
        let area = bottom_strip(columns[0], DIALOGUE_HEIGHT);
        let title = format!(
            " {} ({}/{}) ",
            npc_name(dialogue.speaker),
            dialogue.index + 1,
            dialogue.total
        );
        let paragraph = Paragraph::new(dialogue.line.as_str())
            .wrap(Wrap { trim: true })
            .block(Block::bordered().title(title).title_bottom(" E: continue "));
        frame.render_widget(Clear, area);
        frame.render_widget(paragraph, area);
    }

    if ctx.view.dead {
        let area = centered(columns[0], 44, 5);
        let paragraph = Paragraph::new(vec![
            Line::from("The ground gives way beneath you."),
            Line::from(""),
            Line::from("Press R to wake up at the camp."),
        ])
        .alignment(Alignment::Center)
        .block(Block::bordered().style(Style::default().fg(Color::Red)));
        frame.render_widget(Clear, area);
        frame.render_widget(paragraph, area);
    }
}

fn render_world(frame: &mut Frame, area: Area, ctx: &RenderContext) {
    let view = ctx.view;
    let title = format!(" Area {} ", view.area.0);
    let canvas = Canvas::default()
        .block(Block::bordered().title(title))
        .marker(Marker::Braille)
        .x_bounds([0.0, f64::from(view.world.x)])
        .y_bounds([0.0, f64::from(view.world.y)])
        .paint(|painter| paint_world(painter, ctx));
    frame.render_widget(canvas, area);
}

fn paint_world(painter: &mut Context, ctx: &RenderContext) {
    let view = ctx.view;
    // Mostly dark: nothing but the fade itself.
    if view.fade > 0.66 {
        return;
    }
    let dim = view.fade > 0.33;
    let tint = |color: Color| if dim { Color::DarkGray } else { color };
    let height = view.world.y;

    for wall in &view.walls {
        painter.draw(&rectangle(wall, height, tint(Color::Gray)));
    }
    for prop in &view.props {
        let color = match prop.kind {
            PropKind::Tree => Color::Green,
            PropKind::Tent => Color::Yellow,
        };
        painter.draw(&rectangle(&prop.visual, height, tint(color)));
    }
    for gate in &view.gates {
        painter.draw(&rectangle(&gate.bounds, height, tint(gate_color(gate))));
    }
    for coin in &view.coin_rects {
        painter.draw(&rectangle(coin, height, tint(Color::LightYellow)));
    }
    painter.layer();

    for npc in &view.npcs {
        painter.draw(&rectangle(&npc.bounds, height, tint(Color::Magenta)));
        let (x, y) = label_point(&npc.bounds, height);
        let style = Style::default().fg(tint(Color::Magenta));
        painter.print(x, y, Span::styled(npc_name(npc.kind), style));
    }
    for item in &view.items {
        paint_item(painter, ctx, item, height, tint(Color::Cyan));
    }

    let player = &view.player;
    if let Some(glyph) = ctx.sprites.glyph(view.facing, view.moving, view.frame) {
        let center = player.center();
        painter.print(
            f64::from(center.x),
            f64::from(height - center.y),
            Span::styled(
                glyph.to_string(),
                Style::default()
                    .fg(tint(Color::White))
                    .add_modifier(Modifier::BOLD),
            ),
        );
    }

    if let Some(hint) = &view.hint {
        let label = match hint.target {
            HintTarget::Npc { .. } => "E talk",
            HintTarget::Item { .. } => "E take",
            HintTarget::Gate(_) => "E open",
        };
        painter.print(
            f64::from(hint.anchor.x),
            f64::from(height - hint.anchor.y + 12.0),
            Span::styled(label, Style::default().fg(Color::LightYellow)),
        );
    }
}

fn paint_item(
    painter: &mut Context,
    ctx: &RenderContext,
    item: &ItemView,
    height: f32,
    color: Color,
) {
    painter.draw(&rectangle(&item.bounds, height, color));
    let (x, y) = label_point(&item.bounds, height);
    let mut label = item_name(ctx.items, item.kind);
    if item.quantity > 1 {
        label = format!("{label} x{}", item.quantity);
    }
    painter.print(x, y, Span::styled(label, Style::default().fg(color)));
}

fn render_side_panel(frame: &mut Frame, area: Area, ctx: &RenderContext) {
    let view = ctx.view;
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Min(6),
            Constraint::Length(8),
        ])
        .split(area);

    let status = Paragraph::new(vec![
        Line::from(format!("Coins: {}", view.coins)),
        Line::from(format!("Speed: {:.0}", view.speed)),
    ])
    .block(Block::bordered().title(" Wayfarer "));
    frame.render_widget(status, rows[0]);

    let inventory: Vec<ListItem> = if view.inventory_open {
        view.inventory
            .iter()
            .enumerate()
            .map(|(index, slot)| {
                let mut style = Style::default();
                if index == ctx.selected {
                    style = style.add_modifier(Modifier::REVERSED);
                }
                let name = item_name(ctx.items, slot.kind);
                let text = format!("{} {name} x{}", index + 1, slot.quantity);
                ListItem::new(text).style(style)
            })
            .collect()
    } else {
        vec![ListItem::new("I: open pack")]
    };
    let title = if view.inventory_open { " Pack  U use  X drop " } else { " Pack " };
    frame.render_widget(List::new(inventory).block(Block::bordered().title(title)), rows[1]);

    let mut lines: Vec<Line> = view
        .notices
        .iter()
        .map(|notice| Line::styled(notice.as_str(), Style::default().fg(Color::LightYellow)))
        .collect();
    lines.extend(ctx.log.iter().rev().map(|entry| Line::from(entry.as_str())));
    let messages = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(Block::bordered().title(" Messages "));
    frame.render_widget(messages, rows[2]);
}

fn rectangle(rect: &Rect, world_height: f32, color: Color) -> Rectangle {
    Rectangle {
        x: f64::from(rect.x),
        y: f64::from(world_height - rect.bottom()),
        width: f64::from(rect.w),
        height: f64::from(rect.h),
        color,
    }
}

/// Just above the top-left corner, in canvas coordinates.
fn label_point(rect: &Rect, world_height: f32) -> (f64, f64) {
    (f64::from(rect.x), f64::from(world_height - rect.y + 4.0))
}

fn gate_color(gate: &GateView) -> Color {
    if gate.locked { Color::Red } else { Color::LightRed }
}

pub fn npc_name(kind: NpcKind) -> &'static str {
    match kind {
        NpcKind::Homeless => "Homeless Man",
        NpcKind::Scout => "Scout",
    }
}

pub fn item_name(items: &ItemCatalog, kind: ItemKind) -> String {
    items
        .definition(kind)
        .map(|definition| definition.name)
        .unwrap_or_else(|| kind.to_string())
}

fn bottom_strip(area: Area, height: u16) -> Area {
    let height = height.min(area.height);
    Area {
        x: area.x,
        y: area.y + area.height - height,
        width: area.width,
        height,
    }
}

fn centered(area: Area, width: u16, height: u16) -> Area {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Area {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
