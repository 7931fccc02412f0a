use std::path::PathBuf;

/// データディレクトリを指定する環境変数
pub const DATA_DIR_VAR: &str = "LIBRARY_DATA_DIR";

/// ログフィルタの既定値（`RUST_LOG`で上書き可能）
pub const DEFAULT_LOG_FILTER: &str = "rusty_library_lending=info";

/// アプリケーション設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// `members.json` と `books.json` を置くディレクトリ
    pub data_dir: PathBuf,
}

impl AppConfig {
    /// 環境変数から設定を読み込む
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let data_dir = lookup(DATA_DIR_VAR)
            .filter(|value| !value.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));
        Self { data_dir }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}
