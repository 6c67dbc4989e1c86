//! 输入动作映射
//!
//! 菜单动作与地图动作分离；文字输入（角色命名）由创建存档界面直接处理原始按键。

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use strum::{EnumCount, EnumIter};

/// 地图上的动作
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumCount)]
pub enum GameAction {
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    Interact,        // 在战斗区域内发起挑战
    ToggleInventory, // 打开/关闭物品栏
    Leave,           // 保存并返回标题
}

/// 菜单动作（标题、存档选择、战斗菜单、物品栏）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum UiAction {
    NavigateUp,
    NavigateDown,
    Confirm,
    Cancel,
    Delete,
}

/// 键位配置，每个动作可以绑定多个按键
#[derive(Debug, Clone)]
pub struct KeyBindings {
    pub move_up: Vec<KeyCode>,
    pub move_down: Vec<KeyCode>,
    pub move_left: Vec<KeyCode>,
    pub move_right: Vec<KeyCode>,

    pub interact: Vec<KeyCode>,
    pub inventory: Vec<KeyCode>,

    pub confirm: Vec<KeyCode>,
    pub cancel: Vec<KeyCode>,
    pub delete: Vec<KeyCode>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            // WASD 与方向键都可以移动
            move_up: vec![KeyCode::Up, KeyCode::Char('w'), KeyCode::Char('z')],
            move_down: vec![KeyCode::Down, KeyCode::Char('s')],
            move_left: vec![KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('q')],
            move_right: vec![KeyCode::Right, KeyCode::Char('d')],

            interact: vec![KeyCode::Char('e')],
            inventory: vec![KeyCode::Tab],

            confirm: vec![KeyCode::Enter],
            cancel: vec![KeyCode::Esc],
            delete: vec![KeyCode::Delete],
        }
    }
}

impl KeyBindings {
    fn bound(codes: &[KeyCode], key: &KeyEvent) -> bool {
        codes.iter().any(|code| normalize(*code) == normalize(key.code))
    }
}

/// 字母键不区分大小写
fn normalize(code: KeyCode) -> KeyCode {
    match code {
        KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
        other => other,
    }
}

/// 只处理按下事件（部分终端还会上报松开/重复事件）
pub fn is_press(key: &KeyEvent) -> bool {
    key.kind == KeyEventKind::Press
}

/// Ctrl+C 在任何界面都退出
pub fn is_quit(key: &KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL) && normalize(key.code) == KeyCode::Char('c')
}

/// 将按键转换为地图动作
pub fn map_to_game_action(key: &KeyEvent, bindings: &KeyBindings) -> Option<GameAction> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return None;
    }
    if KeyBindings::bound(&bindings.move_up, key) {
        Some(GameAction::MoveUp)
    } else if KeyBindings::bound(&bindings.move_down, key) {
        Some(GameAction::MoveDown)
    } else if KeyBindings::bound(&bindings.move_left, key) {
        Some(GameAction::MoveLeft)
    } else if KeyBindings::bound(&bindings.move_right, key) {
        Some(GameAction::MoveRight)
    } else if KeyBindings::bound(&bindings.interact, key) {
        Some(GameAction::Interact)
    } else if KeyBindings::bound(&bindings.inventory, key) {
        Some(GameAction::ToggleInventory)
    } else if KeyBindings::bound(&bindings.cancel, key) {
        Some(GameAction::Leave)
    } else {
        None
    }
}

/// 将按键转换为菜单动作。菜单只用方向键导航，字母键留给地图和文字输入。
pub fn map_to_ui_action(key: &KeyEvent, bindings: &KeyBindings) -> Option<UiAction> {
    match key.code {
        KeyCode::Up => Some(UiAction::NavigateUp),
        KeyCode::Down => Some(UiAction::NavigateDown),
        _ if KeyBindings::bound(&bindings.confirm, key) => Some(UiAction::Confirm),
        _ if KeyBindings::bound(&bindings.cancel, key) => Some(UiAction::Cancel),
        _ if KeyBindings::bound(&bindings.delete, key) => Some(UiAction::Delete),
        _ => None,
    }
}

/// 列表焦点（循环导航）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationState {
    current_focus: usize,
    item_count: usize,
}

impl NavigationState {
    pub fn new(item_count: usize) -> Self {
        Self {
            current_focus: 0,
            item_count: item_count.max(1), // 确保至少1个项目
        }
    }

    /// 列表长度变化后调整焦点
    pub fn set_item_count(&mut self, item_count: usize) {
        self.item_count = item_count.max(1);
        if self.current_focus >= self.item_count {
            self.current_focus = self.item_count - 1;
        }
    }

    pub fn item_count(&self) -> usize {
        self.item_count
    }

    pub fn current(&self) -> usize {
        self.current_focus
    }

    pub fn jump_to(&mut self, index: usize) {
        self.current_focus = index.min(self.item_count - 1);
    }

    /// 返回焦点是否移动
    pub fn next(&mut self) -> bool {
        self.step(1)
    }

    pub fn previous(&mut self) -> bool {
        self.step(-1)
    }

    pub fn navigate(&mut self, action: UiAction) -> bool {
        match action {
            UiAction::NavigateUp => self.previous(),
            UiAction::NavigateDown => self.next(),
            _ => false,
        }
    }

    fn step(&mut self, delta: isize) -> bool {
        let count = self.item_count as isize;
        let new_focus = (self.current_focus as isize + delta).rem_euclid(count) as usize;

        let moved = new_focus != self.current_focus;
        self.current_focus = new_focus;
        moved
    }
}
