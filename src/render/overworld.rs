//! 地图渲染器
//!
//! 1920×1080 的地图按比例缩放到终端区域，右侧显示状态栏和物品栏。

use crate::app::{App, Session};
use hero::Inventory;
use overworld::{Map, Rect as MapRect};
use ratatui::{
    Frame,
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Widget},
};

const SIDE_PANEL_WIDTH: u16 = 32;

pub struct OverworldRenderer;

impl OverworldRenderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, app: &App) {
        let Some(session) = app.session() else {
            let text = Paragraph::new("No game loaded")
                .style(Style::default().fg(Color::Red))
                .alignment(Alignment::Center);
            frame.render_widget(text, area);
            return;
        };

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(20), Constraint::Length(SIDE_PANEL_WIDTH)])
            .split(area);

        let in_zone = app.map().in_combat_zone(&session.player);
        let title = if in_zone {
            "Map | press E to battle!"
        } else {
            "Map"
        };
        let block = Block::default().title(title).borders(Borders::ALL);
        let inner = block.inner(columns[0]);
        frame.render_widget(block, columns[0]);
        frame.render_widget(
            MapWidget {
                map: app.map(),
                session,
            },
            inner,
        );

        let side = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(8), Constraint::Min(3)])
            .split(columns[1]);
        self.render_stats(frame, side[0], session);
        if session.inventory.is_open() {
            self.render_inventory(frame, side[1], &session.inventory);
        } else {
            let hints = Paragraph::new(vec![
                Line::from("WASD / arrows: move"),
                Line::from("E: battle in the red zone"),
                Line::from("Tab: inventory"),
                Line::from("Esc: save and quit"),
            ])
            .style(Style::default().fg(Color::Gray))
            .block(Block::default().borders(Borders::ALL));
            frame.render_widget(hints, side[1]);
        }
    }

    fn render_stats(&self, frame: &mut Frame, area: Rect, session: &Session) {
        let player = &session.player;
        let lines = vec![
            Line::from(Span::styled(
                player.name.clone(),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(player.class.clone()),
            Line::from(format!("Ego: {}", player.display_ego())),
            Line::from(format!("Flow: {}", player.flow)),
            Line::from(format!("Charisma: {}", player.charisma)),
            Line::from(format!("Pos: ({:.0}, {:.0})", player.x, player.y)),
        ];
        let widget = Paragraph::new(lines).block(Block::default().title("Rapper").borders(Borders::ALL));
        frame.render_widget(widget, area);
    }

    fn render_inventory(&self, frame: &mut Frame, area: Rect, inventory: &Inventory) {
        let items: Vec<ListItem> = if inventory.is_empty() {
            vec![ListItem::new(Span::styled(
                "(empty)",
                Style::default().fg(Color::DarkGray),
            ))]
        } else {
            inventory
                .items()
                .iter()
                .enumerate()
                .map(|(i, name)| {
                    let icon = Inventory::icon_for(name);
                    if i == inventory.selected() {
                        ListItem::new(Span::styled(
                            format!("> {} {}", icon, name),
                            Style::default()
                                .fg(Color::Yellow)
                                .add_modifier(Modifier::BOLD),
                        ))
                    } else {
                        ListItem::new(format!("  {} {}", icon, name))
                    }
                })
                .collect()
        };

        let list = List::new(items).block(
            Block::default()
                .title(format!("Inventory ({})", inventory.len()))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow)),
        );
        frame.render_widget(list, area);
    }
}

impl Default for OverworldRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// 把地图坐标缩放到终端格子
struct MapWidget<'a> {
    map: &'a Map,
    session: &'a Session,
}

impl MapWidget<'_> {
    fn to_cell(&self, area: Rect, x: f64, y: f64) -> (u16, u16) {
        let bounds = &self.map.bounds;
        let fx = ((x - bounds.min_x) / bounds.width().max(1.0)).clamp(0.0, 1.0);
        let fy = ((y - bounds.min_y) / bounds.height().max(1.0)).clamp(0.0, 1.0);
        let col = (fx * area.width as f64) as u16;
        let row = (fy * area.height as f64) as u16;
        (
            area.x + col.min(area.width.saturating_sub(1)),
            area.y + row.min(area.height.saturating_sub(1)),
        )
    }

    fn fill(&self, buf: &mut Buffer, area: Rect, rect: &MapRect, symbol: char, color: Color) {
        let (x0, y0) = self.to_cell(area, rect.min_x, rect.min_y);
        let (x1, y1) = self.to_cell(area, rect.max_x, rect.max_y);
        for x in x0..=x1.max(x0) {
            for y in y0..=y1.max(y0) {
                buf[(x, y)].set_char(symbol).set_fg(color);
            }
        }
    }
}

impl Widget for MapWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        for x in area.left()..area.right() {
            for y in area.top()..area.bottom() {
                buf[(x, y)].set_char('.').set_fg(Color::DarkGray);
            }
        }

        self.fill(buf, area, &self.map.combat_zone, '░', Color::Red);

        for enemy in &self.map.enemies {
            let (x, y) = self.to_cell(area, enemy.x, enemy.y);
            let symbol = enemy.name.chars().next().unwrap_or('E');
            buf[(x, y)]
                .set_char(symbol)
                .set_style(Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD));
        }

        let player = &self.session.player;
        let (x, y) = self.to_cell(area, player.x, player.y);
        buf[(x, y)]
            .set_char('@')
            .set_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD));
    }
}
