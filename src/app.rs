//! 应用状态机
//!
//! 标题 → 存档选择 → 创建存档 → 地图 ⇄ 战斗。所有状态变化都发生在
//! `handle_key` 和 `update` 中，渲染只读取状态。

use combat::{Battle, BattleCommand, BattleRng, EnemyTactics, Side};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use error::{GameError, handle_error};
use hero::{Class, Inventory, Player};
use overworld::{Direction, Map};
use save::{SaveRecord, SaveStore};
use std::time::Duration;
use strum::{Display, EnumCount, EnumIter, IntoEnumIterator};

use crate::config::Config;
use crate::input::{
    GameAction, KeyBindings, NavigationState, UiAction, is_press, is_quit, map_to_game_action,
    map_to_ui_action,
};
use crate::notification::Notifications;

/// 角色名最大长度（字符数）
pub const MAX_NAME_LEN: usize = 24;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Title,
    SaveSelect,
    CreateSave,
    Overworld,
    Battle,
}

/// 标题菜单选项
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, EnumCount, Display)]
pub enum TitleOption {
    #[strum(to_string = "New Game")]
    NewGame,
    Quit,
}

/// 创建存档表单
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateForm {
    pub name: String,
    pub class: Option<Class>,
}

/// 当前游玩的存档
#[derive(Debug, Clone)]
pub struct Session {
    pub record: SaveRecord,
    pub player: Player,
    pub inventory: Inventory,
}

impl Session {
    pub fn from_record(record: SaveRecord) -> Self {
        Self {
            player: record.to_player(),
            inventory: record.to_inventory(),
            record,
        }
    }
}

pub struct App {
    config: Config,
    store: SaveStore,
    bindings: KeyBindings,
    screen: Screen,
    title_nav: NavigationState,
    saves: Vec<SaveRecord>,
    save_nav: NavigationState,
    pending_delete: Option<String>,
    form: CreateForm,
    session: Option<Session>,
    map: Map,
    battle: Option<Battle>,
    enemy_timer: Duration,
    rng: BattleRng,
    notifications: Notifications,
    should_quit: bool,
}

impl App {
    pub fn new(config: Config) -> Self {
        let rng = match config.seed {
            Some(seed) => BattleRng::new(seed),
            None => BattleRng::from_entropy(),
        };
        tracing::info!(seed = rng.seed(), save_dir = %config.save_dir.display(), "app created");

        Self {
            store: SaveStore::new(&config.save_dir),
            bindings: KeyBindings::default(),
            screen: Screen::Title,
            title_nav: NavigationState::new(TitleOption::COUNT),
            saves: Vec::new(),
            save_nav: NavigationState::new(1),
            pending_delete: None,
            form: CreateForm::default(),
            session: None,
            map: Map::new(),
            battle: None,
            enemy_timer: Duration::ZERO,
            rng,
            notifications: Notifications::new(),
            should_quit: false,
            config,
        }
    }

    // ---------------------------------------------------------------
    // 输入
    // ---------------------------------------------------------------

    pub fn handle_key(&mut self, key: KeyEvent) {
        if !is_press(&key) {
            return;
        }
        if is_quit(&key) {
            self.quit();
            return;
        }

        match self.screen {
            Screen::Title => self.handle_title(key),
            Screen::SaveSelect => self.handle_save_select(key),
            Screen::CreateSave => self.handle_create_save(key),
            Screen::Overworld => self.handle_overworld(key),
            Screen::Battle => self.handle_battle(key),
        }
    }

    fn handle_title(&mut self, key: KeyEvent) {
        match map_to_ui_action(&key, &self.bindings) {
            Some(action @ (UiAction::NavigateUp | UiAction::NavigateDown)) => {
                self.title_nav.navigate(action);
            }
            Some(UiAction::Confirm) => match self.title_option() {
                TitleOption::NewGame => self.open_save_select(),
                TitleOption::Quit => self.quit(),
            },
            Some(UiAction::Cancel) => self.quit(),
            _ => {}
        }
    }

    fn handle_save_select(&mut self, key: KeyEvent) {
        match map_to_ui_action(&key, &self.bindings) {
            Some(action @ (UiAction::NavigateUp | UiAction::NavigateDown)) => {
                self.save_nav.navigate(action);
            }
            Some(UiAction::Delete) => self.request_delete(),
            Some(UiAction::Confirm) => {
                let index = self.save_nav.current();
                match self.saves.get(index).cloned() {
                    Some(record) => self.start_session(record),
                    None => {
                        self.form = CreateForm::default();
                        self.screen = Screen::CreateSave;
                    }
                }
            }
            Some(UiAction::Cancel) => {
                self.pending_delete = None;
                self.screen = Screen::Title;
            }
            _ => {}
        }
    }

    /// 第一次按删除键标记，第二次在同一存档上按下才真正删除
    fn request_delete(&mut self) {
        let Some(name) = self.saves.get(self.save_nav.current()).map(|s| s.name.clone()) else {
            self.pending_delete = None;
            return;
        };

        if self.pending_delete.as_deref() != Some(name.as_str()) {
            self.pending_delete = Some(name);
            return;
        }

        self.pending_delete = None;
        match self.store.delete(&name) {
            Ok(()) => {
                self.notifications.push(format!("Save '{}' deleted", name));
                self.reload_saves();
            }
            Err(e) => self.report(&e),
        }
    }

    fn handle_create_save(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.screen = Screen::SaveSelect,
            KeyCode::Enter => self.submit_create_form(),
            KeyCode::Backspace => {
                self.form.name.pop();
            }
            KeyCode::Char(c @ '1'..='3') => {
                let index = c as usize - '1' as usize;
                self.form.class = Class::iter().nth(index);
            }
            KeyCode::Char(c)
                if !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
                    && !c.is_control() =>
            {
                if self.form.name.chars().count() < MAX_NAME_LEN {
                    self.form.name.push(c);
                }
            }
            _ => {}
        }
    }

    fn submit_create_form(&mut self) {
        let Some(class) = self.form.class else {
            self.notifications.push("Choose a class first (1, 2 or 3)");
            return;
        };

        let typed = self.form.name.trim();
        let name = if typed.is_empty() {
            format!("Player-{}", self.saves.len() + 1)
        } else {
            typed.to_string()
        };

        match self.store.create(&name, &class.label()) {
            Ok(record) => {
                self.reload_saves();
                self.notifications.push(format!("Welcome, {}!", record.name));
                self.start_session(record);
            }
            Err(e) => self.report(&e),
        }
    }

    fn handle_overworld(&mut self, key: KeyEvent) {
        let Some(action) = map_to_game_action(&key, &self.bindings) else {
            if key.code == KeyCode::Enter {
                self.inspect_selected_item();
            }
            return;
        };
        let step = self.config.move_step;
        let Some(session) = self.session.as_mut() else {
            self.screen = Screen::Title;
            return;
        };

        // 物品栏打开时上下键用于选择物品，角色不移动
        if session.inventory.is_open() {
            match action {
                GameAction::MoveUp => session.inventory.select_previous(),
                GameAction::MoveDown => session.inventory.select_next(),
                GameAction::ToggleInventory => session.inventory.toggle(),
                GameAction::Leave => session.inventory.close(),
                _ => {}
            }
            return;
        }

        match action {
            GameAction::MoveUp => self.map.move_player(&mut session.player, Direction::Up, step),
            GameAction::MoveDown => self.map.move_player(&mut session.player, Direction::Down, step),
            GameAction::MoveLeft => self.map.move_player(&mut session.player, Direction::Left, step),
            GameAction::MoveRight => self.map.move_player(&mut session.player, Direction::Right, step),
            GameAction::ToggleInventory => session.inventory.toggle(),
            GameAction::Interact => {
                if self.map.in_combat_zone(&session.player) {
                    self.start_battle();
                }
            }
            GameAction::Leave => {
                self.save_session();
                self.session = None;
                self.screen = Screen::Title;
            }
        }
    }

    /// 物品效果不在本游戏中实现，只显示名称
    fn inspect_selected_item(&mut self) {
        let item = self
            .session
            .as_ref()
            .filter(|s| s.inventory.is_open())
            .and_then(|s| s.inventory.selected_item())
            .map(str::to_string);
        if let Some(item) = item {
            self.notifications.push(format!("You picked: {}", item));
        }
    }

    fn handle_battle(&mut self, key: KeyEvent) {
        let command = match map_to_ui_action(&key, &self.bindings) {
            Some(UiAction::NavigateUp) => BattleCommand::Previous,
            Some(UiAction::NavigateDown) => BattleCommand::Next,
            Some(UiAction::Confirm) => BattleCommand::Confirm,
            _ => return,
        };

        let Some(battle) = self.battle.as_mut() else {
            self.screen = Screen::Overworld;
            return;
        };
        // 敌人回合由 update 按节奏推进，按键无效
        if !battle.is_over() && battle.turn() == Side::Enemy {
            return;
        }

        battle.update(Some(command));
        if battle.exit_requested() {
            self.finish_battle();
        } else if battle.turn() == Side::Enemy {
            self.enemy_timer = Duration::ZERO;
        }
    }

    // ---------------------------------------------------------------
    // 帧更新
    // ---------------------------------------------------------------

    /// 推进一帧：提示过期与敌人出手节奏
    pub fn update(&mut self, dt: Duration) {
        self.notifications.tick(dt);

        if self.screen != Screen::Battle {
            return;
        }
        let delay = self.config.enemy_delay();
        let Some(battle) = self.battle.as_mut() else {
            return;
        };
        if battle.is_over() {
            return;
        }
        if battle.turn() == Side::Player {
            // 只检查胜负，不替玩家出手
            battle.update(None);
            return;
        }

        self.enemy_timer += dt;
        if self.enemy_timer >= delay {
            self.enemy_timer = Duration::ZERO;
            battle.update(None);
        }
    }

    // ---------------------------------------------------------------
    // 状态切换
    // ---------------------------------------------------------------

    fn open_save_select(&mut self) {
        self.reload_saves();
        self.save_nav.jump_to(0);
        self.pending_delete = None;
        self.screen = Screen::SaveSelect;
    }

    fn reload_saves(&mut self) {
        self.saves = match self.store.list() {
            Ok(saves) => saves,
            Err(e) => {
                self.report(&e);
                Vec::new()
            }
        };
        // 最后一项是“新建存档”
        self.save_nav.set_item_count(self.saves.len() + 1);
    }

    fn start_session(&mut self, record: SaveRecord) {
        tracing::info!(name = %record.name, class = %record.class, "session started");
        self.session = Some(Session::from_record(record));
        self.battle = None;
        self.pending_delete = None;
        self.screen = Screen::Overworld;
    }

    fn start_battle(&mut self) {
        let Some(enemy) = self.map.encounter_enemy().cloned() else {
            return;
        };
        let Some(session) = self.session.as_mut() else {
            return;
        };
        session.inventory.close();

        let battle = Battle::start(
            &mut session.player,
            &enemy,
            EnemyTactics::default(),
            self.rng.fork(),
        );
        self.battle = Some(battle);
        self.enemy_timer = Duration::ZERO;
        self.screen = Screen::Battle;
    }

    fn finish_battle(&mut self) {
        let Some(battle) = self.battle.take() else {
            return;
        };
        if let Some(session) = self.session.as_mut() {
            battle.settle(&mut session.player);
        }
        match battle.winner() {
            Some(Side::Player) => self.notifications.push(format!("You won against {}!", battle.enemy().name)),
            Some(Side::Enemy) => self.notifications.push(format!("{} roasted you...", battle.enemy().name)),
            None => {}
        }
        self.save_session();
        self.screen = Screen::Overworld;
    }

    /// 把当前游戏状态写回存档
    pub fn save_session(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        session.record.update_from(&session.player, &session.inventory);
        match self.store.overwrite(&session.record) {
            Ok(()) => self.notifications.push("Game saved"),
            Err(e) => self.report(&e),
        }
    }

    /// 退出前保存
    pub fn quit(&mut self) {
        if self.session.is_some() && self.battle.is_none() {
            self.save_session();
        }
        self.should_quit = true;
    }

    fn report(&mut self, error: &GameError) {
        if error.is_user_error() {
            tracing::info!(%error, "rejected");
        } else {
            tracing::error!(%error, "operation failed");
        }
        self.notifications.push(handle_error(error));
    }

    // ---------------------------------------------------------------
    // 只读访问（渲染与测试）
    // ---------------------------------------------------------------

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn title_option(&self) -> TitleOption {
        TitleOption::iter()
            .nth(self.title_nav.current())
            .unwrap_or(TitleOption::NewGame)
    }

    pub fn saves(&self) -> &[SaveRecord] {
        &self.saves
    }

    /// 选中的行；等于 `saves().len()` 时表示“新建存档”
    pub fn save_cursor(&self) -> usize {
        self.save_nav.current()
    }

    pub fn pending_delete(&self) -> Option<&str> {
        self.pending_delete.as_deref()
    }

    pub fn form(&self) -> &CreateForm {
        &self.form
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn map(&self) -> &Map {
        &self.map
    }

    pub fn session_mut(&mut self) -> Option<&mut Session> {
        self.session.as_mut()
    }

    pub fn battle(&self) -> Option<&Battle> {
        self.battle.as_ref()
    }

    pub fn notifications(&self) -> &Notifications {
        &self.notifications
    }
}
