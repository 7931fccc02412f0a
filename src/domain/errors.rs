use thiserror::Error;

use super::{Isbn, MemberNumber};

/// 入力値のバリデーションエラー
///
/// コンストラクタ・セッター・コレクションへの追加で発生する。
/// このエラーが返された場合、オブジェクトは生成されない。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// 必須項目が空
    #[error("{0} must not be empty")]
    EmptyField(&'static str),

    /// 会員番号が正の整数ではない
    #[error("Invalid member number: {0} (must be a positive integer)")]
    InvalidMemberNumber(i64),

    /// 星の数が0〜5の範囲外
    #[error("Stars out of range: {0} (must be between 0 and 5)")]
    StarsOutOfRange(i64),

    /// メールアドレスの形式が不正
    #[error("Invalid email address: {0}")]
    InvalidEmail(String),

    /// ISBNが既にカタログに存在する
    #[error("Duplicate ISBN: {0}")]
    DuplicateIsbn(Isbn),

    /// 会員番号が既に登録されている
    #[error("Duplicate member number: {0}")]
    DuplicateMemberNumber(MemberNumber),
}

/// 貸出記録のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoanError {
    /// 貸出上限に達している
    #[error("Loan limit reached (max {max} books)")]
    CapacityExceeded { max: usize },

    /// 会員がその書籍を借りていない
    #[error("Book {0} is not on loan to this member")]
    NotHeld(Isbn),
}
