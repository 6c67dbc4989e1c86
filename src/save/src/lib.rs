// src/save/src/lib.rs
//! 存档系统
//!
//! 所有存档保存在同一个 JSON 数组文件中，每次创建、更新或删除都会整体重写。

use error::GameError;
use hero::{Class, Inventory, Player};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
    time::{SystemTime, UNIX_EPOCH},
};

/// 存档文件名
pub const SAVES_FILE: &str = "saves.json";

/// Where an unreadable save file is moved before it is reset.
pub const CORRUPT_BACKUP_SUFFIX: &str = "bak";

/// 新存档的初始位置
pub const NEW_SAVE_X: f64 = 100.0;
pub const NEW_SAVE_Y: f64 = 100.0;

/// 单个存档记录
///
/// 缺失的字段取默认值：位置回到出生点，属性回到初始值，其余为空。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SaveRecord {
    pub name: String,
    pub class: String,
    pub inventory: Vec<String>,
    #[serde(rename = "created_unix")]
    pub created: i64,

    // 位置
    pub player_x: f64,
    pub player_y: f64,

    // 属性
    pub ego: i32,
    pub flow: i32,
    pub charisma: i32,
}

impl Default for SaveRecord {
    fn default() -> Self {
        let fresh = Player::new(NEW_SAVE_X, NEW_SAVE_Y, String::new());
        Self {
            name: String::new(),
            class: String::new(),
            inventory: Vec::new(),
            created: 0,
            player_x: fresh.x,
            player_y: fresh.y,
            ego: fresh.ego,
            flow: fresh.flow,
            charisma: fresh.charisma,
        }
    }
}

impl SaveRecord {
    /// 为新角色创建存档记录
    pub fn new(name: impl Into<String>, class: impl Into<String>) -> Self {
        let class = class.into();
        let fresh = Player::new(NEW_SAVE_X, NEW_SAVE_Y, class.clone());
        Self {
            name: name.into(),
            inventory: Class::starting_kit_for(&class),
            class,
            created: unix_now(),
            player_x: fresh.x,
            player_y: fresh.y,
            ego: fresh.ego,
            flow: fresh.flow,
            charisma: fresh.charisma,
        }
    }

    /// 根据存档恢复玩家
    pub fn to_player(&self) -> Player {
        let mut player = Player::new(self.player_x, self.player_y, self.class.clone()).with_name(self.name.clone());
        player.ego = self.ego;
        player.flow = self.flow;
        player.charisma = self.charisma;
        player
    }

    pub fn to_inventory(&self) -> Inventory {
        Inventory::from_items(self.inventory.clone())
    }

    /// 用当前游戏状态更新存档（名称与创建时间不变）
    pub fn update_from(&mut self, player: &Player, inventory: &Inventory) {
        self.class = player.class.clone();
        self.inventory = inventory.items().to_vec();
        self.player_x = player.x;
        self.player_y = player.y;
        self.ego = player.ego;
        self.flow = player.flow;
        self.charisma = player.charisma;
    }
}

fn unix_now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or_default()
}

/// 存档系统
#[derive(Debug, Clone)]
pub struct SaveStore {
    save_dir: PathBuf,
}

impl SaveStore {
    /// 初始化存档系统（目录和文件在首次访问时创建）
    pub fn new(save_dir: impl AsRef<Path>) -> Self {
        Self {
            save_dir: save_dir.as_ref().to_path_buf(),
        }
    }

    /// 获取存档目录路径
    pub fn save_dir(&self) -> &Path {
        &self.save_dir
    }

    /// 获取存档文件路径
    pub fn save_path(&self) -> PathBuf {
        self.save_dir.join(SAVES_FILE)
    }

    /// 确保目录存在，文件不存在时写入空数组
    pub fn ensure(&self) -> Result<(), GameError> {
        if !self.save_dir.exists() {
            fs::create_dir_all(&self.save_dir)?;
            tracing::info!(dir = %self.save_dir.display(), "created save directory");
        }
        let path = self.save_path();
        if !path.exists() {
            fs::write(&path, b"[]")?;
        }
        Ok(())
    }

    /// 读取全部存档
    ///
    /// An empty file reads as no saves. A file that cannot be parsed is moved
    /// aside and replaced with an empty array.
    pub fn load_all(&self) -> Result<Vec<SaveRecord>, GameError> {
        self.ensure()?;
        let path = self.save_path();
        let data = fs::read(&path)?;
        if data.iter().all(u8::is_ascii_whitespace) {
            return Ok(Vec::new());
        }

        match serde_json::from_slice(&data) {
            Ok(saves) => Ok(saves),
            Err(err) => {
                let backup = path.with_extension(format!("json.{}", CORRUPT_BACKUP_SUFFIX));
                tracing::warn!(
                    error = %err,
                    backup = %backup.display(),
                    "save file is corrupted, resetting it"
                );
                fs::rename(&path, &backup)?;
                fs::write(&path, b"[]")?;
                Ok(Vec::new())
            }
        }
    }

    /// 整体写入全部存档（先写临时文件再原子性重命名）
    pub fn save_all(&self, saves: &[SaveRecord]) -> Result<(), GameError> {
        self.ensure()?;
        let path = self.save_path();
        let temp_path = path.with_extension("tmp");

        let json = serde_json::to_vec_pretty(saves)?;
        let mut file = fs::File::create(&temp_path)?;
        file.write_all(&json)?;
        file.flush()?;
        fs::rename(&temp_path, &path)?;

        tracing::debug!(count = saves.len(), "saves written");
        Ok(())
    }

    pub fn list(&self) -> Result<Vec<SaveRecord>, GameError> {
        self.load_all()
    }

    /// 按名称查找存档（精确匹配）
    pub fn get(&self, name: &str) -> Result<Option<SaveRecord>, GameError> {
        Ok(self.load_all()?.into_iter().find(|s| s.name == name))
    }

    pub fn exists(&self, name: &str) -> Result<bool, GameError> {
        Ok(self.get(name)?.is_some())
    }

    /// 创建新存档；空名称或重名时返回错误且不修改文件
    pub fn create(&self, name: &str, class: &str) -> Result<SaveRecord, GameError> {
        if name.is_empty() {
            return Err(GameError::EmptySaveName);
        }

        let mut saves = self.load_all()?;
        if saves.iter().any(|s| s.name == name) {
            return Err(GameError::DuplicateSave(name.to_string()));
        }

        let record = SaveRecord::new(name, class);
        saves.push(record.clone());
        self.save_all(&saves)?;

        tracing::info!(name, class, "save created");
        Ok(record)
    }

    /// 替换同名存档，不存在时追加
    pub fn overwrite(&self, updated: &SaveRecord) -> Result<(), GameError> {
        let mut saves = self.load_all()?;
        match saves.iter_mut().find(|s| s.name == updated.name) {
            Some(existing) => *existing = updated.clone(),
            None => saves.push(updated.clone()),
        }
        self.save_all(&saves)
    }

    /// 删除存档
    pub fn delete(&self, name: &str) -> Result<(), GameError> {
        let mut saves = self.load_all()?;
        let before = saves.len();
        saves.retain(|s| s.name != name);
        if saves.len() == before {
            return Err(GameError::SaveNotFound(name.to_string()));
        }
        self.save_all(&saves)?;
        tracing::info!(name, "save deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hero::item_names;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn new_record_uses_class_kit_and_base_stats() {
        let record = SaveRecord::new("Booba", "Hitmakers");
        assert_eq!(
            record.inventory,
            vec![
                item_names::MICRO.to_string(),
                item_names::CRISTALLINE_SUSPICIOUS.to_string(),
                item_names::PHONE.to_string(),
            ]
        );
        assert_eq!((record.player_x, record.player_y), (100.0, 100.0));
        assert_eq!((record.ego, record.flow, record.charisma), (100, 10, 5));
        assert!(record.created > 0);
    }

    #[test]
    fn unknown_class_gets_microphone_only() {
        let record = SaveRecord::new("Anon", "Beatmaker");
        assert_eq!(record.inventory, vec![item_names::MICRO.to_string()]);
    }

    #[test]
    fn json_keys_match_the_file_format() {
        let record = SaveRecord::new("Orelsan", "Lyricistes");
        let value = serde_json::to_value(&record).unwrap();
        for key in [
            "name",
            "class",
            "inventory",
            "created_unix",
            "player_x",
            "player_y",
            "ego",
            "flow",
            "charisma",
        ] {
            assert!(value.get(key).is_some(), "missing key {}", key);
        }
    }

    #[test]
    fn player_round_trip_through_record() {
        let mut record = SaveRecord::new("Damso", "Performeurs");
        let mut player = record.to_player();
        assert_eq!(player.name, "Damso");
        player.x = 640.0;
        player.flow = 13;
        let mut bag = record.to_inventory();
        bag.add_item(item_names::CRISTALLINE);

        record.update_from(&player, &bag);
        assert_eq!(record.player_x, 640.0);
        assert_eq!(record.flow, 13);
        assert_eq!(record.inventory.last().map(String::as_str), Some(item_names::CRISTALLINE));
        assert_eq!(record.name, "Damso");
    }

    #[test]
    fn ensure_creates_directory_and_empty_array() {
        let temp_dir = tempdir().unwrap();
        let store = SaveStore::new(temp_dir.path().join("nested").join("saves"));
        assert!(store.list().unwrap().is_empty());
        assert_eq!(fs::read_to_string(store.save_path()).unwrap(), "[]");
    }

    #[test]
    fn create_get_overwrite_delete() {
        let temp_dir = tempdir().unwrap();
        let store = SaveStore::new(temp_dir.path());

        let created = store.create("Alpha", "Lyricistes").unwrap();
        store.create("Beta", "Hitmakers").unwrap();
        assert_eq!(store.list().unwrap().len(), 2);
        assert_eq!(store.get("Alpha").unwrap(), Some(created.clone()));

        let mut updated = created;
        updated.ego = 42;
        store.overwrite(&updated).unwrap();
        assert_eq!(store.get("Alpha").unwrap().unwrap().ego, 42);
        assert_eq!(store.list().unwrap().len(), 2);

        store.delete("Alpha").unwrap();
        assert!(!store.exists("Alpha").unwrap());
        assert!(matches!(store.delete("Alpha"), Err(GameError::SaveNotFound(_))));
    }

    #[test]
    fn overwrite_appends_unknown_names() {
        let temp_dir = tempdir().unwrap();
        let store = SaveStore::new(temp_dir.path());
        store.overwrite(&SaveRecord::new("Gamma", "Performeurs")).unwrap();
        assert!(store.exists("Gamma").unwrap());
    }

    #[test]
    fn empty_name_is_rejected() {
        let temp_dir = tempdir().unwrap();
        let store = SaveStore::new(temp_dir.path());
        assert!(matches!(store.create("", "Lyricistes"), Err(GameError::EmptySaveName)));
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn blank_file_reads_as_empty() {
        let temp_dir = tempdir().unwrap();
        let store = SaveStore::new(temp_dir.path());
        fs::write(store.save_path(), "  \n").unwrap();
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn corrupted_file_is_backed_up_and_reset() {
        let temp_dir = tempdir().unwrap();
        let store = SaveStore::new(temp_dir.path());
        fs::write(store.save_path(), "{ not json").unwrap();

        assert!(store.list().unwrap().is_empty());
        assert_eq!(fs::read_to_string(store.save_path()).unwrap(), "[]");
        let backup = temp_dir.path().join("saves.json.bak");
        assert_eq!(fs::read_to_string(backup).unwrap(), "{ not json");

        // 修复后可以正常创建
        store.create("Delta", "Hitmakers").unwrap();
        assert_eq!(store.list().unwrap().len(), 1);
    }
}
