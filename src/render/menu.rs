//! 菜单渲染器
//!
//! 标题菜单、存档选择和创建存档三个界面。

use crate::app::{App, TitleOption};
use hero::Class;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
};
use strum::IntoEnumIterator;

use super::centered_rect;

pub struct MenuRenderer;

impl MenuRenderer {
    pub fn new() -> Self {
        Self
    }

    /// 标题菜单
    pub fn render_title(&self, frame: &mut Frame, area: Rect, app: &App) {
        let menu_area = centered_rect(area, 50, 60);
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // 标题
                Constraint::Min(4),    // 菜单项
                Constraint::Length(2), // 底部提示
            ])
            .split(menu_area);

        let title = Paragraph::new("RAP LEGACY")
            .style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
            .block(
                Block::default()
                    .title("v0.1.0")
                    .title_alignment(Alignment::Right)
                    .borders(Borders::ALL),
            )
            .alignment(Alignment::Center);
        frame.render_widget(title, chunks[0]);

        let selected = app.title_option();
        let lines: Vec<Line> = TitleOption::iter()
            .map(|option| Self::option_line(&option.to_string(), option == selected))
            .collect();
        let menu = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL))
            .alignment(Alignment::Center);
        frame.render_widget(menu, chunks[1]);

        self.render_hints(frame, chunks[2], "Up/Down to move, Enter to select, Esc to quit");
    }

    /// 存档选择（最后一项为新建存档）
    pub fn render_save_select(&self, frame: &mut Frame, area: Rect, app: &App) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(3), Constraint::Length(2)])
            .split(centered_rect(area, 80, 80));

        let cursor = app.save_cursor();
        let mut items: Vec<ListItem> = app
            .saves()
            .iter()
            .enumerate()
            .map(|(i, save)| {
                let mut text = format!("{} ({})", save.name, save.class);
                if i == cursor {
                    let hint = if app.pending_delete() == Some(save.name.as_str()) {
                        "   (press Del again to CONFIRM)"
                    } else {
                        "   (Del = delete)"
                    };
                    text = format!("> {}{}", text, hint);
                }
                ListItem::new(Self::list_line(text, i == cursor))
            })
            .collect();

        let create_selected = cursor == app.saves().len();
        let create = if create_selected {
            "> Create a new save"
        } else {
            "Create a new save"
        };
        items.push(ListItem::new(Self::list_line(create.to_string(), create_selected)));

        let list = List::new(items).block(
            Block::default()
                .title("Choose a save")
                .borders(Borders::ALL),
        );
        frame.render_widget(list, chunks[0]);

        self.render_hints(frame, chunks[1], "Enter to play, Esc to go back");
    }

    /// 创建存档：输入名字并选择职业
    pub fn render_create_save(&self, frame: &mut Frame, area: Rect, app: &App) {
        let form = app.form();
        let mut lines = vec![
            Line::from("Character name:"),
            Line::from(Span::styled(
                format!("{}_", form.name),
                Style::default().fg(Color::Yellow),
            )),
            Line::from(""),
            Line::from("Choose a class:"),
        ];
        for (i, class) in Class::iter().enumerate() {
            let label = format!("[{}] {}", i + 1, class);
            lines.push(Self::list_line(label, form.class == Some(class)));
        }
        lines.push(Line::from(""));
        match form.class {
            Some(class) => {
                lines.push(Line::from(format!("Chosen class: {}", class)));
                lines.push(Line::from("Press Enter to confirm"));
            }
            None => lines.push(Line::from(Span::styled(
                "No class chosen yet",
                Style::default().fg(Color::DarkGray),
            ))),
        }

        let paragraph = Paragraph::new(lines).block(
            Block::default()
                .title("New save")
                .borders(Borders::ALL),
        );

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(10), Constraint::Length(2)])
            .split(centered_rect(area, 70, 80));
        frame.render_widget(paragraph, chunks[0]);
        self.render_hints(frame, chunks[1], "Esc to cancel");
    }

    fn render_hints(&self, frame: &mut Frame, area: Rect, text: &str) {
        let hints = Paragraph::new(text.to_string())
            .style(Style::default().fg(Color::Gray))
            .alignment(Alignment::Center);
        frame.render_widget(hints, area);
    }

    fn option_line(label: &str, selected: bool) -> Line<'static> {
        if selected {
            Line::from(Span::styled(
                format!("> {} <", label),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ))
        } else {
            Line::from(label.to_string())
        }
    }

    fn list_line(text: String, selected: bool) -> Line<'static> {
        let style = if selected {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        Line::from(Span::styled(text, style))
    }
}

impl Default for MenuRenderer {
    fn default() -> Self {
        Self::new()
    }
}
