use std::sync::Arc;

use crate::domain::{
    Book, Catalog, Directory, MAX_LOANS, Member, MemberNumber, Stars, ValidationError,
    is_valid_email,
};
use crate::ports::SnapshotStore;

use super::errors::{LendingError, Result};
use super::session::Session;
use super::snapshot;

/// 確認対象のプロフィール項目
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileField {
    FirstName,
    LastName,
    Email,
    Password,
}

/// ログイン中の会員の概要（読み取り専用）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberSummary {
    pub full_name: String,
    pub email: String,
}

/// 貸出サービス（オーケストレーター）
///
/// カタログ・会員名簿・セッションを保持し、すべての更新ルールを適用する。
/// 更新が成功するたびにスナップショット全体を保存する。
///
/// 状態遷移：
/// - `LoggedOut` --authenticate--> `LoggedIn(member)`
/// - 任意の状態 --logout--> `LoggedOut`
///
/// # 並行性
///
/// 単一スレッド・同期実行を前提とする。複数の呼び出し元から使う場合は
/// サービス全体を1つの`Mutex`で包むこと。
pub struct LendingService {
    catalog: Catalog,
    directory: Directory,
    session: Session,
    store: Arc<dyn SnapshotStore>,
}

impl std::fmt::Debug for LendingService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LendingService")
            .field("books", &self.catalog.len())
            .field("members", &self.directory.len())
            .field("session", &self.session)
            .finish()
    }
}

impl LendingService {
    /// 起動処理
    ///
    /// ストアから両方のレコード配列を読み込む。いずれかが存在しない場合は
    /// 初期データ（書籍2冊・会員1人）を投入し、直ちに保存する。
    ///
    /// # エラー
    /// - `Persistence`: 「存在しない」以外の読み込み失敗、不正なレコード、初期データの保存失敗
    pub fn start(store: Arc<dyn SnapshotStore>) -> Result<Self> {
        let loaded = store.load().map_err(LendingError::Persistence)?;

        let service = match loaded {
            Some(snapshot) => {
                let (catalog, directory) = snapshot::restore(&snapshot)
                    .map_err(|e| LendingError::Persistence(Box::new(e)))?;
                tracing::info!(
                    books = catalog.len(),
                    members = directory.len(),
                    "Loaded library snapshot"
                );
                Self::with_state(catalog, directory, store)
            }
            None => {
                let (catalog, directory) = snapshot::seed()?;
                tracing::info!("No snapshot found, seeding default catalog and members");
                let service = Self::with_state(catalog, directory, store);
                service.persist()?;
                service
            }
        };

        Ok(service)
    }

    /// 任意の状態からサービスを組み立てる（保存は行わない）
    pub fn with_state(
        catalog: Catalog,
        directory: Directory,
        store: Arc<dyn SnapshotStore>,
    ) -> Self {
        Self {
            catalog,
            directory,
            session: Session::LoggedOut,
            store,
        }
    }

    pub fn session(&self) -> Session {
        self.session
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn directory(&self) -> &Directory {
        &self.directory
    }

    // ------------------------------------------------------------------
    // セッション
    // ------------------------------------------------------------------

    /// ログインする
    ///
    /// 成功時は`LoggedIn`へ遷移する。失敗時は常に`LoggedOut`になる。
    ///
    /// # エラー
    /// - `Validation`: 会員番号が0以下（検索前に判定）
    /// - `AuthenticationFailed`: 会員が存在しない、またはパスワード不一致
    pub fn authenticate(&mut self, member_number: i64, password: &str) -> Result<()> {
        self.session = Session::LoggedOut;
        if member_number <= 0 {
            return Err(ValidationError::InvalidMemberNumber(member_number).into());
        }
        // 正だが会員番号の範囲を超える値は、該当する会員がいないものとして扱う
        let Ok(member_number) = MemberNumber::try_from(member_number) else {
            tracing::warn!(member_number, "Authentication failed");
            return Err(LendingError::AuthenticationFailed);
        };

        match self.directory.find_by_number(member_number) {
            Some(member) if member.password_matches(password) => {
                self.session = Session::LoggedIn(member_number);
                tracing::info!(member_number = %member_number, "Member logged in");
                Ok(())
            }
            _ => {
                tracing::warn!(member_number = %member_number, "Authentication failed");
                Err(LendingError::AuthenticationFailed)
            }
        }
    }

    /// ログアウトする（無条件）
    pub fn logout(&mut self) {
        if let Some(member_number) = self.session.current_member() {
            tracing::info!(member_number = %member_number, "Member logged out");
        }
        self.session = Session::LoggedOut;
    }

    // ------------------------------------------------------------------
    // カタログ（ログイン不要）
    // ------------------------------------------------------------------

    /// 貸出可能な書籍（登録順）。なければ空。
    pub fn list_available_books(&self) -> Vec<&Book> {
        self.catalog.list_available()
    }

    pub fn list_all_books(&self) -> Vec<&Book> {
        self.catalog.list_all()
    }

    pub fn find_book(&self, isbn: &str) -> Result<&Book> {
        self.catalog
            .find_by_isbn(isbn)
            .ok_or_else(|| LendingError::BookNotFound(isbn.to_string()))
    }

    pub fn average_rating(&self, isbn: &str) -> Result<f64> {
        Ok(self.find_book(isbn)?.average_rating())
    }

    // ------------------------------------------------------------------
    // 貸出・返却・評価（ログイン必須）
    // ------------------------------------------------------------------

    /// 書籍を借りる
    ///
    /// ビジネスルール：
    /// - 書籍がカタログに存在すること
    /// - 会員の貸出数が上限（10冊）未満であること
    /// - 書籍が誰にも貸し出されていないこと
    pub fn borrow_book(&mut self, isbn: &str) -> Result<()> {
        let member_number = self.require_login()?;

        let book = self
            .catalog
            .find_by_isbn_mut(isbn)
            .ok_or_else(|| LendingError::BookNotFound(isbn.to_string()))?;
        let member = self
            .directory
            .find_by_number_mut(member_number)
            .ok_or(LendingError::MemberNotFound(member_number))?;

        if member.is_at_capacity() {
            return Err(LendingError::LoanLimitExceeded { max: MAX_LOANS });
        }
        if book.is_loaned() {
            return Err(LendingError::AlreadyLoaned(book.isbn().clone()));
        }

        member.add_loan(book)?;
        tracing::info!(
            member_number = %member_number,
            isbn = %isbn,
            loans = member.loan_count(),
            "Book borrowed"
        );

        self.persist()
    }

    /// 書籍を返却する
    ///
    /// # エラー
    /// - `BookNotFound`: カタログに存在しない
    /// - `LoanNotFound`: ログイン中の会員が借りていない
    pub fn return_book(&mut self, isbn: &str) -> Result<()> {
        let member_number = self.require_login()?;

        let book = self
            .catalog
            .find_by_isbn_mut(isbn)
            .ok_or_else(|| LendingError::BookNotFound(isbn.to_string()))?;
        let member = self
            .directory
            .find_by_number_mut(member_number)
            .ok_or(LendingError::MemberNotFound(member_number))?;

        if !member.holds(book.isbn()) {
            return Err(LendingError::LoanNotFound(book.isbn().clone()));
        }
        member.remove_loan(book)?;
        tracing::info!(member_number = %member_number, isbn = %isbn, "Book returned");

        self.persist()
    }

    /// 書籍を評価する（同じ会員の評価は置き換え）
    pub fn rate_book(&mut self, isbn: &str, stars: i64) -> Result<()> {
        let member_number = self.require_login()?;

        let book = self
            .catalog
            .find_by_isbn_mut(isbn)
            .ok_or_else(|| LendingError::BookNotFound(isbn.to_string()))?;
        let stars = Stars::try_from(stars)?;

        book.rate(member_number, stars);
        tracing::info!(
            member_number = %member_number,
            isbn = %isbn,
            stars = stars.value(),
            average = book.average_rating(),
            "Book rated"
        );

        self.persist()
    }

    // ------------------------------------------------------------------
    // プロフィール（ログイン必須）
    // ------------------------------------------------------------------

    /// 入力値がログイン中の会員の現在の値と一致するか確認する
    ///
    /// 変更前の確認入力に使う。
    pub fn confirm_profile_field(&self, field: ProfileField, candidate: &str) -> Result<bool> {
        let member = self.current_member()?;
        Ok(match field {
            ProfileField::FirstName => member.first_name() == candidate,
            ProfileField::LastName => member.last_name() == candidate,
            ProfileField::Email => member.email() == candidate,
            ProfileField::Password => member.password_matches(candidate),
        })
    }

    pub fn change_first_name(&mut self, value: &str) -> Result<()> {
        self.update_profile("first name", |member| member.change_first_name(value))
    }

    pub fn change_last_name(&mut self, value: &str) -> Result<()> {
        self.update_profile("last name", |member| member.change_last_name(value))
    }

    /// メールアドレスを変更する
    ///
    /// # エラー
    /// 形式が不正な場合は`Validation`（状態は変更しない）
    pub fn change_email(&mut self, value: &str) -> Result<()> {
        self.require_login()?;
        if !is_valid_email(value) {
            return Err(ValidationError::InvalidEmail(value.to_string()).into());
        }
        self.update_profile("email", |member| member.change_email(value))
    }

    pub fn change_password(&mut self, value: &str) -> Result<()> {
        self.update_profile("password", |member| member.change_password(value))
    }

    // ------------------------------------------------------------------
    // 照会（ログイン必須）
    // ------------------------------------------------------------------

    pub fn current_loan_count(&self) -> Result<usize> {
        Ok(self.current_member()?.loan_count())
    }

    pub fn max_loan_capacity(&self) -> Result<usize> {
        Ok(self.current_member()?.max_loans())
    }

    /// ログイン中の会員が借りている書籍（貸出順）
    pub fn list_current_member_loans(&self) -> Result<Vec<&Book>> {
        let member = self.current_member()?;
        Ok(member
            .list_loans()
            .iter()
            .filter_map(|isbn| self.catalog.find_by_isbn(isbn.as_str()))
            .collect())
    }

    pub fn describe_current_member(&self) -> Result<MemberSummary> {
        let member = self.current_member()?;
        Ok(MemberSummary {
            full_name: member.full_name(),
            email: member.email().to_string(),
        })
    }

    // ------------------------------------------------------------------
    // 内部ヘルパー
    // ------------------------------------------------------------------

    fn require_login(&self) -> Result<MemberNumber> {
        self.session
            .current_member()
            .ok_or(LendingError::NotLoggedIn)
    }

    fn current_member(&self) -> Result<&Member> {
        let member_number = self.require_login()?;
        self.directory
            .find_by_number(member_number)
            .ok_or(LendingError::MemberNotFound(member_number))
    }

    fn update_profile<F>(&mut self, field: &'static str, apply: F) -> Result<()>
    where
        F: FnOnce(&mut Member) -> std::result::Result<(), ValidationError>,
    {
        let member_number = self.require_login()?;
        let member = self
            .directory
            .find_by_number_mut(member_number)
            .ok_or(LendingError::MemberNotFound(member_number))?;

        apply(member)?;
        tracing::info!(member_number = %member_number, field, "Profile updated");

        self.persist()
    }

    /// スナップショット全体を保存する
    ///
    /// 保存に失敗してもメモリ上の変更は巻き戻さない。
    fn persist(&self) -> Result<()> {
        let snapshot = snapshot::capture(&self.catalog, &self.directory);
        self.store.save(&snapshot).map_err(|e| {
            tracing::error!("Failed to save library snapshot: {}", e);
            LendingError::Persistence(e)
        })
    }
}
