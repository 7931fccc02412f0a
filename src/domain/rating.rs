use serde::{Deserialize, Serialize};

use super::{MemberNumber, Stars};

/// 評価 - 1人の会員が1冊の書籍に付けた星の数
///
/// 書籍の中にのみ存在し、単独では削除されない。
/// 同じ会員が再評価した場合は置き換えられる。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rating {
    pub member_number: MemberNumber,
    pub stars: Stars,
}

impl Rating {
    pub fn new(member_number: MemberNumber, stars: Stars) -> Self {
        Self {
            member_number,
            stars,
        }
    }
}
