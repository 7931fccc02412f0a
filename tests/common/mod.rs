#![allow(dead_code)]

use rusty_library_lending::adapters::in_memory::InMemorySnapshotStore;
use rusty_library_lending::application::lending::LendingService;
use rusty_library_lending::domain::{Book, Catalog, Directory, Member};
use std::sync::Arc;

/// テスト用の会員番号とパスワード
pub const MEMBER_NUMBER: i64 = 1;
pub const PASSWORD: &str = "john123";

/// シナリオ用の初期状態でサービスを組み立てる
///
/// 会員：John Doe（1 / john123）、書籍：ISBN-A と ISBN-B（いずれも貸出可能）
pub fn scenario_service() -> (LendingService, Arc<InMemorySnapshotStore>) {
    let mut directory = Directory::new();
    directory
        .add(Member::new("John", "Doe", "john.doe@x.cl", MEMBER_NUMBER, PASSWORD).unwrap())
        .unwrap();
    directory
        .add(Member::new("Jane", "Roe", "jane.roe@x.cl", 2, "jane456").unwrap())
        .unwrap();

    let mut catalog = Catalog::new();
    catalog
        .add(Book::new("ISBN-A", "Book A", "Author A", "Fiction").unwrap())
        .unwrap();
    catalog
        .add(Book::new("ISBN-B", "Book B", "Author B", "Science").unwrap())
        .unwrap();

    let store = Arc::new(InMemorySnapshotStore::new());
    let service = LendingService::with_state(catalog, directory, store.clone());
    (service, store)
}

/// 指定冊数の書籍を持つカタログでサービスを組み立てる
pub fn service_with_books(count: usize) -> (LendingService, Arc<InMemorySnapshotStore>) {
    let mut directory = Directory::new();
    directory
        .add(Member::new("John", "Doe", "john.doe@x.cl", MEMBER_NUMBER, PASSWORD).unwrap())
        .unwrap();

    let mut catalog = Catalog::new();
    for n in 0..count {
        catalog
            .add(Book::new(format!("ISBN-{n}"), "Title", "Author", "Category").unwrap())
            .unwrap();
    }

    let store = Arc::new(InMemorySnapshotStore::new());
    let service = LendingService::with_state(catalog, directory, store.clone());
    (service, store)
}

pub fn available_isbns(service: &LendingService) -> Vec<String> {
    service
        .list_available_books()
        .iter()
        .map(|b| b.isbn().as_str().to_string())
        .collect()
}
