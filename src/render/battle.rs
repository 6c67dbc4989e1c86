//! 对战界面渲染器
//!
//! ```text
//! | 敌人名称 + ego 条                  |
//! | 玩家名称 + ego 条                  |
//! | 攻击菜单 | 战斗记录                 |
//! | 最近一句台词                        |
//! | 提示 / 结果                         |
//! ```

use combat::{Attack, Battle, Combatant, Side};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
};

pub struct BattleRenderer;

impl BattleRenderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, battle: &Battle) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // 敌人
                Constraint::Length(3), // 玩家
                Constraint::Min(5),    // 菜单 + 记录
                Constraint::Length(3), // 台词
                Constraint::Length(1), // 提示
            ])
            .split(area);

        let enemy = battle.enemy();
        self.render_ego(frame, rows[0], &enemy.name, enemy.display_ego(), Color::Magenta);
        let player = battle.player();
        self.render_ego(frame, rows[1], Combatant::name(player), player.display_ego(), Color::Green);

        let middle = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(24), Constraint::Min(10)])
            .split(rows[2]);
        self.render_menu(frame, middle[0], battle);
        self.render_log(frame, middle[1], battle);

        let taunt = match battle.last_taunt() {
            Some(taunt) => {
                let who = match taunt.speaker {
                    Side::Player => Combatant::name(player).to_string(),
                    Side::Enemy => enemy.name.clone(),
                };
                format!("{}: \"{}\"", who, taunt.line)
            }
            None => String::new(),
        };
        let taunt = Paragraph::new(taunt)
            .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::ITALIC))
            .block(Block::default().borders(Borders::ALL))
            .wrap(Wrap { trim: true });
        frame.render_widget(taunt, rows[3]);

        self.render_status(frame, rows[4], battle);
    }

    fn render_ego(&self, frame: &mut Frame, area: Rect, name: &str, ego: i32, color: Color) {
        // 额外加成可能让 ego 超过 100，条最多满格
        let percent = ego.clamp(0, 100) as u16;
        let gauge = Gauge::default()
            .block(Block::default().title(name.to_string()).borders(Borders::ALL))
            .gauge_style(Style::default().fg(color).add_modifier(Modifier::BOLD))
            .percent(percent)
            .label(format!("Ego {}", ego))
            .use_unicode(true);
        frame.render_widget(gauge, area);
    }

    fn render_menu(&self, frame: &mut Frame, area: Rect, battle: &Battle) {
        let player_turn = !battle.is_over() && battle.turn() == Side::Player;
        let lines: Vec<Line> = Attack::menu()
            .into_iter()
            .map(|attack| {
                if attack.index() == battle.selected() {
                    let color = if player_turn { Color::Yellow } else { Color::DarkGray };
                    Line::from(Span::styled(
                        format!("> {} <", attack),
                        Style::default().fg(color).add_modifier(Modifier::BOLD),
                    ))
                } else {
                    Line::from(format!("  {}", attack))
                }
            })
            .collect();

        let menu = Paragraph::new(lines).block(Block::default().title("Attacks").borders(Borders::ALL));
        frame.render_widget(menu, area);
    }

    fn render_log(&self, frame: &mut Frame, area: Rect, battle: &Battle) {
        let lines: Vec<Line> = battle.log().iter().map(|l| Line::from(l.clone())).collect();
        let log = Paragraph::new(lines)
            .block(Block::default().title("Battle").borders(Borders::ALL))
            .wrap(Wrap { trim: true });
        frame.render_widget(log, area);
    }

    fn render_status(&self, frame: &mut Frame, area: Rect, battle: &Battle) {
        let (text, color) = match battle.winner() {
            Some(Side::Player) => ("You won! Press Enter to continue".to_string(), Color::Green),
            Some(Side::Enemy) => ("You lost... Press Enter to continue".to_string(), Color::Red),
            None if battle.turn() == Side::Player => {
                ("Your turn: Up/Down to choose, Enter to attack".to_string(), Color::White)
            }
            None => (format!("{} is thinking...", battle.enemy().name), Color::Gray),
        };
        let status = Paragraph::new(text)
            .style(Style::default().fg(color))
            .alignment(Alignment::Center);
        frame.render_widget(status, area);
    }
}

impl Default for BattleRenderer {
    fn default() -> Self {
        Self::new()
    }
}
