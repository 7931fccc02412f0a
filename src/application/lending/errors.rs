use thiserror::Error;

use crate::domain::{Isbn, LoanError, MemberNumber, ValidationError};

/// エラーの分類
///
/// 呼び出し側はメッセージ文字列ではなくこの分類で分岐する。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Authentication,
    NotFound,
    CapacityExceeded,
    State,
    Persistence,
}

/// 貸出サービスのエラー
#[derive(Debug, Error)]
pub enum LendingError {
    /// 入力値が不正
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// 会員番号またはパスワードが一致しない
    #[error("Unknown member number or wrong password")]
    AuthenticationFailed,

    /// 書籍が存在しない
    #[error("Book not found: {0}")]
    BookNotFound(String),

    /// 会員が存在しない
    #[error("Member not found: {0}")]
    MemberNotFound(MemberNumber),

    /// ログイン中の会員がその書籍を借りていない
    #[error("Book {0} is not on loan to the current member")]
    LoanNotFound(Isbn),

    /// 書籍が既に貸出中
    #[error("Book {0} is already on loan")]
    AlreadyLoaned(Isbn),

    /// 貸出上限に達している
    #[error("Loan limit exceeded (max {max} books)")]
    LoanLimitExceeded { max: usize },

    /// ログインしていない
    #[error("No member is logged in")]
    NotLoggedIn,

    /// スナップショットの読み込み・保存エラー
    #[error("Snapshot store error")]
    Persistence(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl LendingError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            LendingError::Validation(_) | LendingError::AlreadyLoaned(_) => ErrorKind::Validation,
            LendingError::AuthenticationFailed => ErrorKind::Authentication,
            LendingError::BookNotFound(_)
            | LendingError::MemberNotFound(_)
            | LendingError::LoanNotFound(_) => ErrorKind::NotFound,
            LendingError::LoanLimitExceeded { .. } => ErrorKind::CapacityExceeded,
            LendingError::NotLoggedIn => ErrorKind::State,
            LendingError::Persistence(_) => ErrorKind::Persistence,
        }
    }
}

impl From<LoanError> for LendingError {
    fn from(err: LoanError) -> Self {
        match err {
            LoanError::CapacityExceeded { max } => LendingError::LoanLimitExceeded { max },
            LoanError::NotHeld(isbn) => LendingError::LoanNotFound(isbn),
        }
    }
}

/// アプリケーション層の Result型
pub type Result<T> = std::result::Result<T, LendingError>;
