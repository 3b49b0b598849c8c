//! Silog Kitchen セーブ/ロード機能。
//!
//! ## バージョニング方針
//!
//! - `SAVE_VERSION`: 現在のセーブ形式バージョン。フィールド追加時にインクリメントする。
//! - `MIN_COMPATIBLE_VERSION`: 互換性を維持できる最小バージョン。
//!   既存フィールドの意味変更や削除など破壊的変更を行った場合のみインクリメントする。
//!
//! 不足フィールドは新規ゲームの値で補完し、未知のフィールドは無視する。
//!
//! ## ストレージ
//!
//! 保存先は [`KeyValueStore`] で抽象化している。ブラウザでは localStorage
//! ([`LocalStore`])、テストではメモリ上の [`MemoryStore`] を使う。

use std::collections::{BTreeMap, BTreeSet, HashMap};

use log::{info, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::catalog;
use super::rules::GAME_STATE_KEY;
use super::state::{Customer, GameState};

/// セーブデータのフォーマットバージョン。
pub const SAVE_VERSION: u32 = 1;

/// 互換性を維持できる最小バージョン。
pub const MIN_COMPATIBLE_VERSION: u32 = 1;

/// ストレージ操作の失敗。
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage is not available")]
    Unavailable,
    #[error("storage rejected the operation: {0}")]
    Rejected(String),
}

/// セーブ/ロードの失敗。
#[derive(Debug, Error)]
pub enum SaveError {
    #[error("failed to serialize save data: {0}")]
    Serialize(#[source] serde_json::Error),
    #[error("failed to parse save data: {0}")]
    Parse(#[source] serde_json::Error),
    #[error("save version {saved} is older than the minimum compatible version {min}")]
    Incompatible { saved: u32, min: u32 },
    #[error(transparent)]
    Storage(#[from] StoreError),
}

/// 文字列のキーと値を保存するフラットなストア。
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

/// メモリ上のストア。ネイティブ実行とテスト用。
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// ブラウザの localStorage。WASM 環境でのみ動作。
#[cfg(target_arch = "wasm32")]
pub struct LocalStore {
    storage: web_sys::Storage,
}

#[cfg(target_arch = "wasm32")]
impl LocalStore {
    /// localStorage にアクセスする。使えない環境 (プライベートモード等) では None。
    pub fn open() -> Option<Self> {
        let storage = web_sys::window()?.local_storage().ok()??;
        Some(Self { storage })
    }
}

#[cfg(target_arch = "wasm32")]
impl KeyValueStore for LocalStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.storage
            .get_item(key)
            .map_err(|e| StoreError::Rejected(format!("{e:?}")))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.storage
            .set_item(key, value)
            .map_err(|e| StoreError::Rejected(format!("{e:?}")))
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.storage
            .remove_item(key)
            .map_err(|e| StoreError::Rejected(format!("{e:?}")))
    }
}

/// シリアライズ用のセーブデータ構造体。
/// レシピと設備の定義はカタログから再構築するので、解放状態だけを持つ。
#[derive(Serialize, Deserialize)]
struct SaveData {
    version: u32,
    game: GameSave,
}

#[derive(Serialize, Deserialize)]
#[serde(default)]
struct GameSave {
    money: u64,
    score: u64,
    day: u32,
    level: u32,
    customers: Vec<Customer>,
    inventory: BTreeMap<String, u32>,
    unlocked_recipes: BTreeSet<String>,
    /// 購入済み設備の id。
    equipment_unlocked: Vec<String>,
}

/// 不足フィールドは新規ゲームの値になる。
impl Default for GameSave {
    fn default() -> Self {
        extract_game(&GameState::new())
    }
}

fn extract_game(gs: &GameState) -> GameSave {
    GameSave {
        money: gs.money,
        score: gs.score,
        day: gs.day,
        level: gs.level,
        customers: gs.customers.clone(),
        inventory: gs.inventory.clone(),
        unlocked_recipes: gs.unlocked_recipes.clone(),
        equipment_unlocked: gs
            .equipment
            .iter()
            .filter(|e| e.unlocked)
            .map(|e| e.id.clone())
            .collect(),
    }
}

/// GameState からセーブ用データを抽出する。
fn extract_save(gs: &GameState) -> SaveData {
    SaveData {
        version: SAVE_VERSION,
        game: extract_game(gs),
    }
}

/// セーブデータから GameState を復元する。
/// カタログに無い id は読み飛ばす。
fn apply_save(save: GameSave) -> GameState {
    let mut gs = GameState::new();
    gs.money = save.money;
    gs.score = save.score;
    gs.day = save.day.max(1);
    gs.level = save.level.max(1);
    gs.customers = save.customers;
    // 旧セーブに無い食材は初期在庫のまま
    gs.inventory.extend(save.inventory);

    gs.unlocked_recipes = save
        .unlocked_recipes
        .into_iter()
        .filter(|id| gs.recipe(id).is_some())
        .collect();
    for recipe in gs.recipes.iter_mut() {
        recipe.unlocked = gs.unlocked_recipes.contains(&recipe.id);
    }

    let defaults = catalog::equipment();
    for (item, default) in gs.equipment.iter_mut().zip(defaults.iter()) {
        item.unlocked = default.unlocked || save.equipment_unlocked.contains(&item.id);
    }
    gs
}

/// ゲーム状態をストアに保存する。
pub fn save_game(store: &mut dyn KeyValueStore, gs: &GameState) -> Result<(), SaveError> {
    let json = serde_json::to_string(&extract_save(gs)).map_err(SaveError::Serialize)?;
    store.set(GAME_STATE_KEY, &json)?;
    Ok(())
}

/// ストアからゲーム状態を復元する。セーブが無ければ `Ok(None)`。
pub fn load_game(store: &dyn KeyValueStore) -> Result<Option<GameState>, SaveError> {
    let json = match store.get(GAME_STATE_KEY)? {
        Some(j) => j,
        None => return Ok(None),
    };
    let save_data: SaveData = serde_json::from_str(&json).map_err(SaveError::Parse)?;

    if save_data.version < MIN_COMPATIBLE_VERSION {
        return Err(SaveError::Incompatible {
            saved: save_data.version,
            min: MIN_COMPATIBLE_VERSION,
        });
    }
    if save_data.version < SAVE_VERSION {
        info!(
            "migrating save data (saved={}, current={})",
            save_data.version, SAVE_VERSION
        );
    }
    Ok(Some(apply_save(save_data.game)))
}

/// ロードして、失敗したら新規ゲームにする。
/// 壊れたデータや互換性のないデータは削除する。
pub fn load_or_default(store: &mut dyn KeyValueStore) -> GameState {
    match load_game(store) {
        Ok(Some(gs)) => gs,
        Ok(None) => GameState::new(),
        Err(SaveError::Storage(e)) => {
            warn!("Silog Kitchen: ストレージから読み込めません: {e}");
            GameState::new()
        }
        Err(e) => {
            warn!("Silog Kitchen: セーブデータを破棄します: {e}");
            if let Err(e) = store.remove(GAME_STATE_KEY) {
                warn!("Silog Kitchen: セーブデータの削除に失敗: {e}");
            }
            GameState::new()
        }
    }
}

/// セーブデータを削除する。
pub fn delete_save(store: &mut dyn KeyValueStore) -> Result<(), SaveError> {
    store.remove(GAME_STATE_KEY)?;
    Ok(())
}
