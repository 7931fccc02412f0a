use serde::{Deserialize, Serialize};

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// 会員ストアの1レコード
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberRecord {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub member_number: i64,
    pub password: String,
    /// 貸出中の書籍のISBN（貸出順）。古いストアには存在しない。
    #[serde(default)]
    pub active_loans: Vec<String>,
}

/// 評価レコード
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingRecord {
    pub member_number: i64,
    pub stars: i64,
}

/// 書籍ストアの1レコード
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookRecord {
    pub isbn: String,
    pub title: String,
    pub author: String,
    pub category: String,
    #[serde(default)]
    pub loaned: bool,
    #[serde(default)]
    pub ratings: Vec<RatingRecord>,
}

/// スナップショット - カタログと会員名簿の全状態
///
/// 2つの独立したレコード配列ストアに対応する。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    pub members: Vec<MemberRecord>,
    pub books: Vec<BookRecord>,
}

/// スナップショットストアポート
///
/// 永続化の境界。エンコードの詳細はアダプターに閉じる。
/// 書き込みは常に全体の上書き。
pub trait SnapshotStore: Send + Sync {
    /// 両ストアを読み込む
    ///
    /// いずれかのストアが存在しない場合は`Ok(None)`（初回起動）。
    /// それ以外の読み込み失敗はエラー。
    fn load(&self) -> Result<Option<Snapshot>>;

    /// 両ストアを全体上書きする
    ///
    /// 2つのストアの書き込みはアトミックではない。
    /// 1つ目の書き込み後に失敗した場合、ディスク上の2つのストアは不整合になりうる。
    fn save(&self, snapshot: &Snapshot) -> Result<()>;
}
