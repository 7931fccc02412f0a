use super::{Member, MemberNumber, ValidationError};

/// 会員名簿 - 会員番号で一意な会員の順序付きコレクション
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Directory {
    members: Vec<Member>,
}

impl Directory {
    pub fn new() -> Self {
        Self::default()
    }

    /// 会員を登録する
    ///
    /// # エラー
    /// 同じ会員番号が既に存在する場合は`ValidationError::DuplicateMemberNumber`
    pub fn add(&mut self, member: Member) -> Result<(), ValidationError> {
        if self.find_by_number(member.member_number()).is_some() {
            return Err(ValidationError::DuplicateMemberNumber(
                member.member_number(),
            ));
        }
        self.members.push(member);
        Ok(())
    }

    pub fn find_by_number(&self, member_number: MemberNumber) -> Option<&Member> {
        self.members
            .iter()
            .find(|m| m.member_number() == member_number)
    }

    pub fn find_by_number_mut(&mut self, member_number: MemberNumber) -> Option<&mut Member> {
        self.members
            .iter_mut()
            .find(|m| m.member_number() == member_number)
    }

    pub fn list_all(&self) -> &[Member] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}
