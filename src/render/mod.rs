//! 模块化渲染系统
//!
//! 每个界面一个渲染器，全部只读取 `App` 的状态：
//! - `menu` - 标题、存档选择、创建存档
//! - `overworld` - 地图、状态栏、物品栏
//! - `battle` - 对战界面

pub mod battle;
pub mod menu;
pub mod overworld;

pub use battle::BattleRenderer;
pub use menu::MenuRenderer;
pub use overworld::OverworldRenderer;

use crate::app::{App, Screen};
use crate::notification::Notifications;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph},
};

/// 提示框宽度
const NOTIFICATION_WIDTH: u16 = 44;

/// 绘制一帧
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();
    match app.screen() {
        Screen::Title => MenuRenderer::new().render_title(frame, area, app),
        Screen::SaveSelect => MenuRenderer::new().render_save_select(frame, area, app),
        Screen::CreateSave => MenuRenderer::new().render_create_save(frame, area, app),
        Screen::Overworld => OverworldRenderer::new().render(frame, area, app),
        Screen::Battle => match app.battle() {
            Some(battle) => BattleRenderer::new().render(frame, area, battle),
            None => OverworldRenderer::new().render(frame, area, app),
        },
    }
    render_notifications(frame, area, app.notifications());
}

/// 右上角提示
pub fn render_notifications(frame: &mut Frame, area: Rect, notifications: &Notifications) {
    if notifications.is_empty() {
        return;
    }

    let width = NOTIFICATION_WIDTH.min(area.width);
    let height = (notifications.len() as u16 + 2).min(area.height);
    let popup = Rect::new(area.right().saturating_sub(width), area.y, width, height);

    let lines: Vec<Line> = notifications.iter().map(|n| Line::from(n.text.clone())).collect();
    let widget = Paragraph::new(lines)
        .style(Style::default().fg(Color::White))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        );

    frame.render_widget(Clear, popup);
    frame.render_widget(widget, popup);
}

/// 创建居中的矩形区域
pub fn centered_rect(r: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
