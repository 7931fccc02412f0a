use crate::domain::MemberNumber;

/// セッション状態
///
/// サービスのインスタンスごとに保持する（プロセス全体の共有状態ではない）。
/// ログイン中の会員は会員番号で参照し、本体は会員名簿が所有する。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Session {
    #[default]
    LoggedOut,
    LoggedIn(MemberNumber),
}

impl Session {
    pub fn current_member(&self) -> Option<MemberNumber> {
        match self {
            Session::LoggedOut => None,
            Session::LoggedIn(number) => Some(*number),
        }
    }
}
