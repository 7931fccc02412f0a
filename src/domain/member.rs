use super::book::require_non_empty;
use super::{Book, Isbn, LoanError, MAX_LOANS, MemberNumber, ValidationError, is_valid_email};

/// 会員 - 会員名簿の1エントリ
///
/// 貸出中の書籍をISBNで参照する（書籍本体はカタログが所有）。
///
/// 不変条件：
/// - 貸出一覧に同じ書籍は重複しない
/// - 貸出一覧の件数は`MAX_LOANS`以下
/// - 貸出一覧の順序は貸出順
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    member_number: MemberNumber,
    first_name: String,
    last_name: String,
    email: String,
    password: String,
    active_loans: Vec<Isbn>,
}

impl Member {
    /// 会員を作成する
    ///
    /// # エラー
    /// - 空の項目：`ValidationError::EmptyField`
    /// - 会員番号が正でない：`ValidationError::InvalidMemberNumber`
    /// - メール形式が不正：`ValidationError::InvalidEmail`
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
        member_number: i64,
        password: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let first_name = require_non_empty("first name", first_name)?;
        let last_name = require_non_empty("last name", last_name)?;
        let email = require_non_empty("email", email)?;
        if !is_valid_email(&email) {
            return Err(ValidationError::InvalidEmail(email));
        }
        let member_number = MemberNumber::try_from(member_number)?;
        let password = require_non_empty("password", password)?;

        Ok(Self {
            member_number,
            first_name,
            last_name,
            email,
            password,
            active_loans: Vec::new(),
        })
    }

    pub fn member_number(&self) -> MemberNumber {
        self.member_number
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    /// 平文比較（ハッシュ化は行わない）
    pub fn password_matches(&self, candidate: &str) -> bool {
        self.password == candidate
    }

    pub(crate) fn password(&self) -> &str {
        &self.password
    }

    pub fn loan_count(&self) -> usize {
        self.active_loans.len()
    }

    pub fn max_loans(&self) -> usize {
        MAX_LOANS
    }

    pub fn is_at_capacity(&self) -> bool {
        self.active_loans.len() >= MAX_LOANS
    }

    pub fn holds(&self, isbn: &Isbn) -> bool {
        self.active_loans.contains(isbn)
    }

    /// 貸出中の書籍（貸出順）
    pub fn list_loans(&self) -> &[Isbn] {
        &self.active_loans
    }

    /// 書籍を貸出一覧の末尾に追加し、貸出フラグを立てる
    ///
    /// 書籍が未貸出であることは呼び出し側（貸出サービス）が確認済みであること。
    ///
    /// # エラー
    /// 既に`MAX_LOANS`冊借りている場合は`LoanError::CapacityExceeded`
    pub fn add_loan(&mut self, book: &mut Book) -> Result<(), LoanError> {
        if self.is_at_capacity() {
            return Err(LoanError::CapacityExceeded { max: MAX_LOANS });
        }
        self.active_loans.push(book.isbn().clone());
        book.mark_loaned(true);
        Ok(())
    }

    /// 書籍を貸出一覧から外し、貸出フラグを下ろす
    ///
    /// 残りの貸出の相対順序は保たれる。
    ///
    /// # エラー
    /// 一覧にない書籍の場合は`LoanError::NotHeld`
    pub fn remove_loan(&mut self, book: &mut Book) -> Result<(), LoanError> {
        let position = self
            .active_loans
            .iter()
            .position(|isbn| isbn == book.isbn())
            .ok_or_else(|| LoanError::NotHeld(book.isbn().clone()))?;
        self.active_loans.remove(position);
        book.mark_loaned(false);
        Ok(())
    }

    pub fn change_first_name(&mut self, value: impl Into<String>) -> Result<(), ValidationError> {
        self.first_name = require_non_empty("first name", value)?;
        Ok(())
    }

    pub fn change_last_name(&mut self, value: impl Into<String>) -> Result<(), ValidationError> {
        self.last_name = require_non_empty("last name", value)?;
        Ok(())
    }

    /// 形式チェックは呼び出し側の責務
    pub fn change_email(&mut self, value: impl Into<String>) -> Result<(), ValidationError> {
        self.email = require_non_empty("email", value)?;
        Ok(())
    }

    pub fn change_password(&mut self, value: impl Into<String>) -> Result<(), ValidationError> {
        self.password = require_non_empty("password", value)?;
        Ok(())
    }

    /// スナップショット復元用：検証済みの貸出一覧を戻す
    pub(crate) fn restore_loans(&mut self, loans: Vec<Isbn>) {
        self.active_loans = loans;
    }
}
