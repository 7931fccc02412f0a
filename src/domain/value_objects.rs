use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// 会員1人あたりの最大貸出冊数
pub const MAX_LOANS: usize = 10;

/// 評価の最大星数
pub const MAX_STARS: u8 = 5;

/// ISBN - 書籍の一意キー
///
/// 不変条件：空文字列ではない
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Isbn(String);

impl Isbn {
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.is_empty() {
            return Err(ValidationError::EmptyField("isbn"));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Isbn {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Isbn> for String {
    fn from(isbn: Isbn) -> Self {
        isbn.0
    }
}

impl fmt::Display for Isbn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// 会員番号 - 会員の一意キー
///
/// 不変条件：正の整数
/// 0以下の値は型として存在できない。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct MemberNumber(u32);

impl MemberNumber {
    pub fn value(&self) -> u32 {
        self.0
    }
}

impl TryFrom<i64> for MemberNumber {
    type Error = ValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match u32::try_from(value) {
            Ok(n) if n > 0 => Ok(Self(n)),
            _ => Err(ValidationError::InvalidMemberNumber(value)),
        }
    }
}

impl From<MemberNumber> for i64 {
    fn from(number: MemberNumber) -> Self {
        i64::from(number.0)
    }
}

impl fmt::Display for MemberNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 星の数（0〜5）
///
/// 範囲外の値（6以上、負数）を作成できないようにする。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct Stars(u8);

impl Stars {
    pub fn value(&self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for Stars {
    type Error = ValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match u8::try_from(value) {
            Ok(n) if n <= MAX_STARS => Ok(Self(n)),
            _ => Err(ValidationError::StarsOutOfRange(value)),
        }
    }
}

impl From<Stars> for i64 {
    fn from(stars: Stars) -> Self {
        i64::from(stars.0)
    }
}
