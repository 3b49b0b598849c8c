//! Silog Kitchen rendering (read-only from state).

use std::cell::RefCell;
use std::rc::Rc;

use ratzilla::ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratzilla::ratatui::style::{Color, Modifier, Style};
use ratzilla::ratatui::text::{Line, Span};
use ratzilla::ratatui::widgets::{Block, Borders, Gauge, Paragraph};
use ratzilla::ratatui::Frame;

use crate::input::{is_narrow_layout, ClickState};
use crate::widgets::{ButtonRow, ClickableList};

use super::actions::*;
use super::catalog;
use super::cooking::{has_all_ingredients, ingredient_available, missing_ingredients};
use super::customers::Urgency;
use super::economy::can_afford_equipment;
use super::rules::{INGREDIENT_UNIT_PRICE, SHOP_BATCH};
use super::state::Ingredient;
use super::{KitchenGame, Screen};

/// Ingredient buttons per row.
const BUTTONS_PER_ROW: usize = 4;

pub fn render(
    game: &KitchenGame,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let is_narrow = is_narrow_layout(area.width);
    let borders = if is_narrow {
        Borders::TOP | Borders::BOTTOM
    } else {
        Borders::ALL
    };
    let banner = banner_line(game);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),                                // Header
            Constraint::Length(if banner.is_some() { 1 } else { 0 }), // Banner
            Constraint::Min(10),                                  // Body
            Constraint::Length(3),                                // Key hints
        ])
        .split(area);

    render_header(game, f, chunks[0], borders);
    if let Some(line) = banner {
        f.render_widget(Paragraph::new(line).alignment(Alignment::Center), chunks[1]);
    }

    let mut cs = click_state.borrow_mut();
    match game.ui.screen {
        Screen::Kitchen if is_narrow => render_kitchen_narrow(game, f, chunks[2], borders, &mut cs),
        Screen::Kitchen => render_kitchen_wide(game, f, chunks[2], borders, &mut cs),
        Screen::Shop => render_shop(game, f, chunks[2], borders, &mut cs),
        Screen::Leaderboard => render_leaderboard(game, f, chunks[2], borders, &mut cs),
    }
    render_hints(game, f, chunks[3], borders, &mut cs);
    render_dragged(game, f, area);
}

fn render_header(game: &KitchenGame, f: &mut Frame, area: Rect, borders: Borders) {
    let gs = game.kitchen.game();
    let sound = if game.ui.muted { "♪ off" } else { "♪ on" };
    let line = Line::from(vec![
        Span::styled(format!("Day {}", gs.day), Style::default().fg(Color::Cyan)),
        Span::styled(format!("  Lv {}", gs.level), Style::default().fg(Color::Magenta)),
        Span::styled(
            format!("  ${}", gs.money),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("  Score {}", gs.score), Style::default().fg(Color::White)),
        Span::styled(format!("  {sound}"), Style::default().fg(Color::DarkGray)),
    ]);
    let widget = Paragraph::new(line)
        .block(
            Block::default()
                .borders(borders)
                .border_style(Style::default().fg(Color::Yellow))
                .title(" Silog Kitchen "),
        )
        .alignment(Alignment::Center);
    f.render_widget(widget, area);
}

/// Day banner first, then rush hour.
fn banner_line(game: &KitchenGame) -> Option<Line<'static>> {
    let gs = game.kitchen.game();
    if game.ui.day_banner > 0 {
        let mut text = format!("── Day {} ──", gs.day);
        if let Some(name) = game
            .ui
            .last_unlock
            .as_deref()
            .and_then(|id| gs.recipe(id))
            .map(|r| r.name.clone())
        {
            text.push_str(&format!("  New recipe: {name}!"));
        }
        return Some(Line::from(Span::styled(
            text,
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )));
    }
    if game.ui.rush_banner > 0 {
        return Some(Line::from(Span::styled(
            "Rush Hour! Multiple customers arriving! 🔥",
            Style::default()
                .fg(Color::Red)
                .add_modifier(Modifier::BOLD | Modifier::SLOW_BLINK),
        )));
    }
    None
}

// ── Kitchen ────────────────────────────────────────────────────

fn render_kitchen_wide(
    game: &KitchenGame,
    f: &mut Frame,
    area: Rect,
    borders: Borders,
    cs: &mut ClickState,
) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(58), Constraint::Percentage(42)])
        .split(area);
    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(recipe_panel_height(game)),
            Constraint::Length(ingredient_panel_height()),
            Constraint::Min(5),
            Constraint::Length(3),
        ])
        .split(columns[0]);

    render_recipes(game, f, left[0], borders, cs);
    render_ingredients(game, f, left[1], borders, cs);
    render_pan(game, f, left[2], borders, cs);
    render_gauge(game, f, left[3], borders);
    render_customers(game, f, columns[1], borders, cs);
}

fn render_kitchen_narrow(
    game: &KitchenGame,
    f: &mut Frame,
    area: Rect,
    borders: Borders,
    cs: &mut ClickState,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(recipe_panel_height(game)),
            Constraint::Length(ingredient_panel_height()),
            Constraint::Length(6),
            Constraint::Length(3),
            Constraint::Min(4),
        ])
        .split(area);

    render_recipes(game, f, chunks[0], borders, cs);
    render_ingredients(game, f, chunks[1], borders, cs);
    render_pan(game, f, chunks[2], borders, cs);
    render_gauge(game, f, chunks[3], borders);
    render_customers(game, f, chunks[4], borders, cs);
}

fn recipe_panel_height(game: &KitchenGame) -> u16 {
    // recipes + "needs" line + borders
    game.kitchen.game().recipes.len() as u16 + 3
}

fn ingredient_panel_height() -> u16 {
    let rows = catalog::ingredients().len().div_ceil(BUTTONS_PER_ROW);
    rows as u16 + 2
}

fn render_recipes(
    game: &KitchenGame,
    f: &mut Frame,
    area: Rect,
    borders: Borders,
    cs: &mut ClickState,
) {
    let gs = game.kitchen.game();
    let cooking = game.kitchen.cooking();
    let selected = cooking.current_recipe.as_ref().map(|r| r.id.as_str());

    let mut cl = ClickableList::new();
    for (i, recipe) in gs.recipes.iter().enumerate() {
        let unlocked = gs.is_unlocked(&recipe.id);
        let is_selected = selected == Some(recipe.id.as_str());
        let marker = if is_selected { "▶" } else { " " };
        let status = if unlocked { "" } else { "  (locked)" };
        let style = if is_selected {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else if unlocked {
            Style::default().fg(Color::White)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let label = format!(
            "{marker}[{}] {}  ${}  {}s{status}",
            i + 1,
            recipe.name,
            recipe.price,
            recipe.cooking_time
        );
        cl.push_clickable(Line::from(Span::styled(label, style)), SELECT_RECIPE_BASE + i as u16);
    }

    let needs = match &cooking.current_recipe {
        None => Span::styled(" Pick a recipe", Style::default().fg(Color::DarkGray)),
        Some(_) if has_all_ingredients(cooking) => {
            Span::styled(" All ingredients in!", Style::default().fg(Color::Green))
        }
        Some(_) => {
            let missing: Vec<String> = missing_ingredients(cooking)
                .iter()
                .map(|id| catalog::ingredient_or_placeholder(id).name)
                .collect();
            Span::styled(
                format!(" Needs: {}", missing.join(", ")),
                Style::default().fg(Color::Gray),
            )
        }
    };
    cl.push(Line::from(needs));

    cl.register_targets(area, cs, 1, 1);
    let block = Block::default()
        .borders(borders)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" Recipes ");
    f.render_widget(Paragraph::new(cl.into_lines()).block(block), area);
}

fn render_ingredients(
    game: &KitchenGame,
    f: &mut Frame,
    area: Rect,
    borders: Borders,
    cs: &mut ClickState,
) {
    let gs = game.kitchen.game();
    let cooking = game.kitchen.cooking();
    let block = Block::default()
        .borders(borders)
        .border_style(Style::default().fg(Color::Green))
        .title(" Ingredients (drag to pan) ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let shelf = catalog::ingredients();
    for (row_idx, chunk) in shelf.chunks(BUTTONS_PER_ROW).enumerate() {
        let y = inner.y + row_idx as u16;
        if y >= inner.y + inner.height {
            break;
        }
        let mut row = ButtonRow::new(" ");
        for (col_idx, ingredient) in chunk.iter().enumerate() {
            let idx = row_idx * BUTTONS_PER_ROW + col_idx;
            let key = (b'A' + idx as u8) as char;
            let live = ingredient_available(gs, cooking, &ingredient.id);
            let style = if live {
                Style::default().fg(swatch(ingredient))
            } else {
                Style::default().fg(Color::DarkGray)
            };
            row = row.button(
                format!("[{key}] {} {}", ingredient.name, gs.stock(&ingredient.id)),
                style,
                INGREDIENT_BASE + idx as u16,
            );
        }
        row.render(f, Rect::new(inner.x, y, inner.width, 1), cs);
    }
}

fn render_pan(
    game: &KitchenGame,
    f: &mut Frame,
    area: Rect,
    borders: Borders,
    cs: &mut ClickState,
) {
    let cooking = game.kitchen.cooking();
    let title = match &cooking.current_recipe {
        Some(r) => format!(" Pan: {} ", r.name),
        None => " Pan ".to_string(),
    };
    let border_color = if cooking.is_dragging {
        Color::Yellow
    } else {
        Color::Gray
    };
    let block = Block::default()
        .borders(borders)
        .border_style(Style::default().fg(border_color))
        .title(title);
    let inner = block.inner(area);
    f.render_widget(block, area);
    cs.add_drop_zone(inner, PAN_ZONE);

    if cooking.ingredients_in_pan.is_empty() {
        let hint = if cooking.current_recipe.is_some() {
            "Drop ingredients here"
        } else {
            ""
        };
        let widget = Paragraph::new(Span::styled(hint, Style::default().fg(Color::DarkGray)))
            .alignment(Alignment::Center);
        f.render_widget(widget, inner);
        return;
    }

    for (i, ingredient) in cooking.ingredients_in_pan.iter().enumerate() {
        let label = ingredient.name.clone();
        let rect = match pan_cell(inner, ingredient, &label) {
            Some(r) => r,
            None => continue,
        };
        let style = Style::default()
            .fg(Color::Black)
            .bg(swatch(ingredient));
        f.render_widget(Paragraph::new(Span::styled(label, style)), rect);
        if !cooking.is_busy() && i < MAX_PAN_TARGETS as usize {
            cs.add_click_target(rect, PAN_INGREDIENT_BASE + i as u16);
        }
    }
}

/// Screen cell for an ingredient placed at a pan percentage, shifted left
/// so the label stays inside the pan.
fn pan_cell(inner: Rect, ingredient: &Ingredient, label: &str) -> Option<Rect> {
    if inner.width == 0 || inner.height == 0 {
        return None;
    }
    let pos = ingredient.position?;
    let width = (Line::from(label).width() as u16).min(inner.width);
    let span_x = (inner.width - width) as f64;
    let span_y = (inner.height - 1) as f64;
    let x = inner.x + (pos.x / 100.0 * span_x).round() as u16;
    let y = inner.y + (pos.y / 100.0 * span_y).round() as u16;
    Some(Rect::new(x, y, width, 1))
}

fn render_gauge(game: &KitchenGame, f: &mut Frame, area: Rect, borders: Borders) {
    let cooking = game.kitchen.cooking();
    let (label, color) = if cooking.cooking_complete {
        ("Ready to serve!".to_string(), Color::Green)
    } else if cooking.cooking_started {
        (format!("Cooking... {}s", cooking.remaining_time), Color::Yellow)
    } else if cooking.current_recipe.is_some() && has_all_ingredients(cooking) {
        ("Ready to cook".to_string(), Color::Cyan)
    } else {
        ("Stove idle".to_string(), Color::DarkGray)
    };
    let ratio = (cooking.cooking_progress / 100.0).clamp(0.0, 1.0);
    let gauge = Gauge::default()
        .block(
            Block::default()
                .borders(borders)
                .border_style(Style::default().fg(Color::Red))
                .title(" Stove "),
        )
        .gauge_style(Style::default().fg(color).bg(Color::Black))
        .ratio(ratio)
        .label(label);
    f.render_widget(gauge, area);
}

fn render_customers(
    game: &KitchenGame,
    f: &mut Frame,
    area: Rect,
    borders: Borders,
    cs: &mut ClickState,
) {
    let gs = game.kitchen.game();
    let mut cl = ClickableList::new();
    let mut waiting_idx = 0usize;

    for customer in &gs.customers {
        let dish = gs
            .recipe(&customer.order)
            .map(|r| r.name.clone())
            .unwrap_or_else(|| customer.order.clone());
        if customer.served {
            let line = Line::from(Span::styled(
                format!("  ✓ {dish}  ★{}", customer.satisfaction),
                Style::default().fg(Color::DarkGray),
            ));
            cl.push(line);
            continue;
        }

        let color = match Urgency::from_time_remaining(customer.time_remaining) {
            Urgency::High => Color::Red,
            Urgency::Medium => Color::Yellow,
            Urgency::Low => Color::Green,
        };
        let text = if waiting_idx < MAX_LETTERED {
            let key = (b'a' + waiting_idx as u8) as char;
            format!("[{key}] {dish}  {}s  ♥{}", customer.time_remaining, customer.patience)
        } else {
            format!("    {dish}  {}s  ♥{}", customer.time_remaining, customer.patience)
        };
        let line = Line::from(Span::styled(text, Style::default().fg(color)));
        if waiting_idx < MAX_LETTERED {
            cl.push_clickable(line, SERVE_BASE + waiting_idx as u16);
        } else {
            cl.push(line);
        }
        waiting_idx += 1;
    }
    if gs.customers.is_empty() {
        cl.push(Line::from(Span::styled(
            " Waiting for customers...",
            Style::default().fg(Color::DarkGray),
        )));
    }

    cl.register_targets(area, cs, 1, 1);
    let title = format!(" Customers {}/{} ", gs.customers.len(), gs.queue_capacity());
    let block = Block::default()
        .borders(borders)
        .border_style(Style::default().fg(Color::Magenta))
        .title(title);
    f.render_widget(Paragraph::new(cl.into_lines()).block(block), area);
}

// ── Shop ───────────────────────────────────────────────────────

fn render_shop(
    game: &KitchenGame,
    f: &mut Frame,
    area: Rect,
    borders: Borders,
    cs: &mut ClickState,
) {
    let gs = game.kitchen.game();
    let batch_cost = INGREDIENT_UNIT_PRICE * SHOP_BATCH as u64;
    let mut cl = ClickableList::new();

    cl.push(Line::from(Span::styled(
        format!(" Ingredients (x{SHOP_BATCH} for ${batch_cost})"),
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD),
    )));
    for (i, ingredient) in catalog::ingredients().iter().enumerate() {
        let key = (b'a' + i as u8) as char;
        let color = if gs.money >= batch_cost {
            Color::White
        } else {
            Color::DarkGray
        };
        cl.push_clickable(
            Line::from(Span::styled(
                format!(" [{key}] {:<8} stock {}", ingredient.name, gs.stock(&ingredient.id)),
                Style::default().fg(color),
            )),
            BUY_INGREDIENT_BASE + i as u16,
        );
    }

    cl.push(Line::from(""));
    cl.push(Line::from(Span::styled(
        " Equipment",
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )));
    for (i, item) in gs.equipment.iter().enumerate() {
        let (status, color) = if item.unlocked {
            ("owned".to_string(), Color::Green)
        } else if can_afford_equipment(gs, &item.id) {
            (format!("${}", item.price), Color::White)
        } else {
            (format!("${}", item.price), Color::DarkGray)
        };
        cl.push_clickable(
            Line::from(Span::styled(
                format!(
                    " [{}] {:<18} Lv{} +{}% speed  {status}",
                    i + 1,
                    item.name,
                    item.level,
                    item.speed_boost
                ),
                Style::default().fg(color),
            )),
            BUY_EQUIPMENT_BASE + i as u16,
        );
    }

    cl.register_targets(area, cs, 1, 1);
    let block = Block::default()
        .borders(borders)
        .border_style(Style::default().fg(Color::Yellow))
        .title(" Shop ");
    f.render_widget(Paragraph::new(cl.into_lines()).block(block), area);
}

// ── Leaderboard ────────────────────────────────────────────────

fn render_leaderboard(
    game: &KitchenGame,
    f: &mut Frame,
    area: Rect,
    borders: Borders,
    cs: &mut ClickState,
) {
    let mut cl = ClickableList::new();
    for (rank, entry) in game.leaderboard.top().iter().enumerate() {
        let color = if rank < 3 { Color::Yellow } else { Color::White };
        cl.push(Line::from(Span::styled(
            format!(" {:>2}. {:<14} {:>6}  {}", rank + 1, entry.username, entry.score, entry.date),
            Style::default().fg(color),
        )));
    }
    cl.push(Line::from(""));
    cl.push_clickable(
        Line::from(Span::styled(" [L] Back", Style::default().fg(Color::DarkGray))),
        TOGGLE_LEADERBOARD,
    );

    cl.register_targets(area, cs, 1, 1);
    let block = Block::default()
        .borders(borders)
        .border_style(Style::default().fg(Color::Yellow))
        .title(" Top Chefs ");
    f.render_widget(Paragraph::new(cl.into_lines()).block(block), area);
}

// ── Hints ──────────────────────────────────────────────────────

fn render_hints(
    game: &KitchenGame,
    f: &mut Frame,
    area: Rect,
    borders: Borders,
    cs: &mut ClickState,
) {
    let key_style = Style::default().fg(Color::Yellow);
    let dim = Style::default().fg(Color::DarkGray);
    let mute_label = if game.ui.muted { "[M] Sound on" } else { "[M] Mute" };

    let row = match game.ui.screen {
        Screen::Kitchen => {
            let end_style = if game.kitchen.can_end_day() { key_style } else { dim };
            ButtonRow::new("  ")
                .button("[C] Cook", key_style, START_COOKING)
                .button("[X] Reset", key_style, RESET_COOKING)
                .button("[E] End day", end_style, END_DAY)
                .button("[P] Shop", key_style, TOGGLE_SHOP)
                .button("[L] Ranking", key_style, TOGGLE_LEADERBOARD)
                .button(mute_label, key_style, TOGGLE_MUTE)
                .button("[N] New game", key_style, NEW_GAME)
        }
        Screen::Shop => ButtonRow::new("  ")
            .button("[P] Close shop", key_style, TOGGLE_SHOP)
            .button(mute_label, key_style, TOGGLE_MUTE),
        Screen::Leaderboard => ButtonRow::new("  ")
            .button("[L] Close", key_style, TOGGLE_LEADERBOARD)
            .button(mute_label, key_style, TOGGLE_MUTE),
    };
    row.block(
        Block::default()
            .borders(borders)
            .border_style(Style::default().fg(Color::DarkGray)),
    )
    .render(f, area, cs);
}

/// The ingredient under the pointer while dragging.
fn render_dragged(game: &KitchenGame, f: &mut Frame, area: Rect) {
    let cooking = game.kitchen.cooking();
    let (ingredient, (col, row)) = match (&cooking.dragged_ingredient, game.ui.pointer) {
        (Some(i), Some(p)) if cooking.is_dragging => (i, p),
        _ => return,
    };
    if col >= area.x + area.width || row >= area.y + area.height {
        return;
    }
    let width = (Line::from(ingredient.name.as_str()).width() as u16)
        .min(area.x + area.width - col);
    let style = Style::default()
        .fg(Color::Black)
        .bg(swatch(ingredient))
        .add_modifier(Modifier::BOLD);
    f.render_widget(
        Paragraph::new(Span::styled(ingredient.name.clone(), style)),
        Rect::new(col, row, width, 1),
    );
}

/// Display colour of an ingredient, from its `#RRGGBB` swatch.
fn swatch(ingredient: &Ingredient) -> Color {
    ingredient
        .color
        .as_deref()
        .and_then(parse_hex)
        .unwrap_or(Color::White)
}

fn parse_hex(s: &str) -> Option<Color> {
    let hex = s.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
    Some(Color::Rgb(channel(0)?, channel(2)?, channel(4)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::InputEvent;
    use crate::kitchen::save::MemoryStore;
    use crate::kitchen::state::PanPosition;
    use ratzilla::ratatui::backend::TestBackend;
    use ratzilla::ratatui::Terminal;

    #[test]
    fn parses_hex_swatches() {
        assert_eq!(parse_hex("#FF6347"), Some(Color::Rgb(255, 99, 71)));
        assert_eq!(parse_hex("#444444"), Some(Color::Rgb(68, 68, 68)));
        assert_eq!(parse_hex("FF6347"), None);
        assert_eq!(parse_hex("#FFF"), None);
        assert_eq!(parse_hex("#GG0000"), None);
    }

    #[test]
    fn missing_swatch_falls_back_to_white() {
        let mut egg = catalog::ingredient("egg").unwrap();
        egg.color = None;
        assert_eq!(swatch(&egg), Color::White);
    }

    #[test]
    fn pan_cell_keeps_label_inside() {
        let inner = Rect::new(10, 5, 20, 6);
        let rice = catalog::ingredient("rice")
            .unwrap()
            .placed(PanPosition { x: 100.0, y: 100.0 });
        let cell = pan_cell(inner, &rice, "Rice").unwrap();
        assert_eq!(cell, Rect::new(26, 10, 4, 1));

        let corner = rice.placed(PanPosition { x: 0.0, y: 0.0 });
        assert_eq!(pan_cell(inner, &corner, "Rice").unwrap(), Rect::new(10, 5, 4, 1));
    }

    #[test]
    fn unplaced_ingredient_has_no_cell() {
        let rice = catalog::ingredient("rice").unwrap();
        assert_eq!(pan_cell(Rect::new(0, 0, 10, 4), &rice, "Rice"), None);
    }

    #[test]
    fn crowded_pan_only_registers_pan_ids() {
        let mut g = KitchenGame::new(Box::new(MemoryStore::new()), 4);
        g.kitchen.end_session();
        g.handle_input(&InputEvent::Key('2'));
        for _ in 0..20 {
            g.handle_input(&InputEvent::Key('A'));
        }
        g.handle_input(&InputEvent::Key('B'));
        g.handle_input(&InputEvent::Key('B'));
        assert_eq!(g.kitchen.cooking().ingredients_in_pan.len(), 22);

        let cs = Rc::new(RefCell::new(ClickState::new()));
        let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
        terminal
            .draw(|f| {
                let area = f.area();
                render(&g, f, area, &cs);
            })
            .unwrap();

        let cs = cs.borrow();
        let pan = cs
            .drop_zones
            .iter()
            .find(|z| z.zone_id == PAN_ZONE)
            .unwrap()
            .rect;
        let in_pan: Vec<u16> = cs
            .targets
            .iter()
            .filter(|t| t.rect.intersects(pan))
            .map(|t| t.action_id)
            .collect();
        assert!(in_pan.contains(&(PAN_INGREDIENT_BASE + 21)));
        assert!(in_pan.iter().all(|id| *id >= PAN_INGREDIENT_BASE));
    }
}
