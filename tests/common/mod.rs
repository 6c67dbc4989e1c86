#![allow(dead_code)]

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use rap_legacy::{App, Config};
use std::path::Path;
use std::time::Duration;

/// 测试配置：固定种子，敌人立即出手
pub fn test_config(save_dir: &Path) -> Config {
    Config {
        save_dir: save_dir.to_path_buf(),
        log_dir: save_dir.join("logs"),
        seed: Some(7),
        enemy_delay_ms: 0,
        ..Config::default()
    }
}

pub fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

pub fn press(app: &mut App, code: KeyCode) {
    app.handle_key(key(code));
}

pub fn type_text(app: &mut App, text: &str) {
    for c in text.chars() {
        press(app, KeyCode::Char(c));
    }
}

/// 标题 → 存档选择 → 新建存档界面（假设没有现存存档时光标在“新建”上）
pub fn open_create_form(app: &mut App) {
    press(app, KeyCode::Enter);
    let saves = app.saves().len();
    for _ in 0..saves {
        press(app, KeyCode::Down);
    }
    press(app, KeyCode::Enter);
}

/// 新建存档并进入地图
pub fn new_game(app: &mut App, name: &str, class_key: char) {
    open_create_form(app);
    type_text(app, name);
    press(app, KeyCode::Char(class_key));
    press(app, KeyCode::Enter);
}

/// 从 (100, 100) 走进战斗区域
pub fn walk_into_combat_zone(app: &mut App) {
    for _ in 0..9 {
        press(app, KeyCode::Char('d'));
        press(app, KeyCode::Char('s'));
    }
}

/// 推进一帧
pub fn tick(app: &mut App) {
    app.update(Duration::from_millis(16));
}
