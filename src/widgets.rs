//! Reusable clickable UI components.
//!
//! Each component renders itself and registers its own click targets, so a
//! label and its hit region can't drift apart.
//!
//! - [`ClickableList`]: vertical list with per-row click targets.
//! - [`ButtonRow`]: one line of buttons with per-button click targets.

use ratzilla::ratatui::layout::Rect;
use ratzilla::ratatui::style::Style;
use ratzilla::ratatui::text::{Line, Span};
use ratzilla::ratatui::widgets::{Block, Paragraph};
use ratzilla::ratatui::Frame;

use crate::input::ClickState;

// ── ClickableList ──────────────────────────────────────────────

/// Lines paired with click actions.
///
/// Annotate lines as clickable while building them, then call
/// [`register_targets`](ClickableList::register_targets) once to bind each
/// action to the row its line lands on.
///
/// ```ignore
/// let mut cl = ClickableList::new();
/// cl.push(Line::from("Recipes"));
/// cl.push_clickable(Line::from(" [1] Yang Chow"), SELECT_RECIPE_BASE);
/// cl.register_targets(area, &mut cs, 1, 1);
/// f.render_widget(Paragraph::new(cl.into_lines()).block(block), area);
/// ```
pub struct ClickableList<'a> {
    lines: Vec<Line<'a>>,
    /// `(line_index, action_id)`.
    actions: Vec<(u16, u16)>,
}

impl<'a> ClickableList<'a> {
    pub fn new() -> Self {
        Self {
            lines: Vec::new(),
            actions: Vec::new(),
        }
    }

    pub fn push(&mut self, line: Line<'a>) {
        self.lines.push(line);
    }

    /// Add a line that triggers `action_id` when tapped.
    pub fn push_clickable(&mut self, line: Line<'a>, action_id: u16) {
        self.actions.push((self.lines.len() as u16, action_id));
        self.lines.push(line);
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn into_lines(self) -> Vec<Line<'a>> {
        self.lines
    }

    /// Register a full-width row target for every clickable line.
    ///
    /// `top_offset`/`bottom_offset` are the rows taken by borders. Lines that
    /// fall below the visible content are skipped. Lines are assumed not to
    /// wrap.
    pub fn register_targets(
        &self,
        area: Rect,
        cs: &mut ClickState,
        top_offset: u16,
        bottom_offset: u16,
    ) {
        let content_y = area.y + top_offset;
        let content_end = area.y + area.height.saturating_sub(bottom_offset);
        for &(line_idx, action_id) in &self.actions {
            let row = content_y + line_idx;
            if row < content_end {
                cs.add_row_target(area, row, action_id);
            }
        }
    }
}

// ── ButtonRow ──────────────────────────────────────────────────

/// A single line of side-by-side buttons.
///
/// Each button's target covers exactly its label, measured in display
/// columns, so buttons packed on one row stay individually tappable.
///
/// ```ignore
/// ButtonRow::new(" ")
///     .button("[A] Rice 20", style, INGREDIENT_BASE)
///     .button("[B] Egg 20", style, INGREDIENT_BASE + 1)
///     .render(f, area, &mut cs);
/// ```
pub struct ButtonRow<'a> {
    buttons: Vec<(String, Style, u16)>,
    separator: &'a str,
    block: Option<Block<'a>>,
}

impl<'a> ButtonRow<'a> {
    pub fn new(separator: &'a str) -> Self {
        Self {
            buttons: Vec::new(),
            separator,
            block: None,
        }
    }

    pub fn button(mut self, label: impl Into<String>, style: Style, action_id: u16) -> Self {
        self.buttons.push((label.into(), style, action_id));
        self
    }

    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }

    /// Target rectangles for a row starting at `(x, y)`, clipped to `width`.
    pub fn targets(&self, x: u16, y: u16, width: u16) -> Vec<(Rect, u16)> {
        let sep_width = Line::from(self.separator).width() as u16;
        let right_edge = x.saturating_add(width);
        let mut cursor = x;
        let mut out = Vec::with_capacity(self.buttons.len());
        for (i, (label, _, action_id)) in self.buttons.iter().enumerate() {
            if i > 0 {
                cursor = cursor.saturating_add(sep_width);
            }
            let w = Line::from(label.as_str()).width() as u16;
            if cursor >= right_edge {
                break;
            }
            let visible = w.min(right_edge - cursor);
            if visible > 0 {
                out.push((Rect::new(cursor, y, visible, 1), *action_id));
            }
            cursor = cursor.saturating_add(w);
        }
        out
    }

    pub fn render(self, f: &mut Frame, area: Rect, cs: &mut ClickState) {
        let inner = match &self.block {
            Some(block) => block.inner(area),
            None => area,
        };
        for (rect, action_id) in self.targets(inner.x, inner.y, inner.width) {
            cs.add_click_target(rect, action_id);
        }

        let mut spans: Vec<Span> = Vec::new();
        for (i, (label, style, _)) in self.buttons.into_iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw(self.separator));
            }
            spans.push(Span::styled(label, style));
        }
        let paragraph = Paragraph::new(Line::from(spans));
        let paragraph = match self.block {
            Some(block) => paragraph.block(block),
            None => paragraph,
        };
        f.render_widget(paragraph, area);
    }
}
