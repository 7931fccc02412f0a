use super::{Isbn, MemberNumber, Rating, Stars, ValidationError};

/// 空文字列を拒否するヘルパー
pub(crate) fn require_non_empty(
    field: &'static str,
    value: impl Into<String>,
) -> Result<String, ValidationError> {
    let value = value.into();
    if value.is_empty() {
        return Err(ValidationError::EmptyField(field));
    }
    Ok(value)
}

/// 書籍 - カタログの1エントリ
///
/// 評価（会員ごとに最大1件）と貸出フラグを所有する。
///
/// 不変条件：`loaned == true` ⇔ ちょうど1人の会員の貸出一覧に含まれる。
/// この不変条件は書籍自身ではなく貸出サービスが維持する。
#[derive(Debug, Clone, PartialEq)]
pub struct Book {
    isbn: Isbn,
    title: String,
    author: String,
    category: String,
    loaned: bool,
    ratings: Vec<Rating>,
}

impl Book {
    /// 書籍を作成する
    ///
    /// # エラー
    /// いずれかの項目が空の場合は`ValidationError::EmptyField`
    pub fn new(
        isbn: impl Into<String>,
        title: impl Into<String>,
        author: impl Into<String>,
        category: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            isbn: Isbn::new(isbn)?,
            title: require_non_empty("title", title)?,
            author: require_non_empty("author", author)?,
            category: require_non_empty("category", category)?,
            loaned: false,
            ratings: Vec::new(),
        })
    }

    pub fn isbn(&self) -> &Isbn {
        &self.isbn
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn is_loaned(&self) -> bool {
        self.loaned
    }

    /// 評価一覧（記録順）
    pub fn ratings(&self) -> &[Rating] {
        &self.ratings
    }

    /// 評価を登録する（upsert）
    ///
    /// 同じ会員の評価が既にあれば星の数を置き換え、なければ末尾に追加する。
    /// 星の数の範囲は`Stars`の型で保証される。
    pub fn rate(&mut self, member_number: MemberNumber, stars: Stars) {
        match self
            .ratings
            .iter_mut()
            .find(|r| r.member_number == member_number)
        {
            Some(existing) => existing.stars = stars,
            None => self.ratings.push(Rating::new(member_number, stars)),
        }
    }

    /// 平均評価
    ///
    /// 記録されている評価の星の合計 / 評価件数。評価がなければ0。
    pub fn average_rating(&self) -> f64 {
        if self.ratings.is_empty() {
            return 0.0;
        }
        let total: u32 = self
            .ratings
            .iter()
            .map(|r| u32::from(r.stars.value()))
            .sum();
        f64::from(total) / self.ratings.len() as f64
    }

    /// 貸出フラグを切り替える（検証なし）
    pub fn mark_loaned(&mut self, loaned: bool) {
        self.loaned = loaned;
    }
}
