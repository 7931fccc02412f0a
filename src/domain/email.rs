use regex::Regex;
use std::sync::LazyLock;

/// ローカル部 `@` ドメイン（`.` を少なくとも1つ含む）
static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern is a valid regex")
});

/// メールアドレスの形式チェック（純粋な述語）
///
/// 空でないローカル部、`@`、`.` を含むドメインを要求する。
pub fn is_valid_email(candidate: &str) -> bool {
    EMAIL_PATTERN.is_match(candidate)
}
