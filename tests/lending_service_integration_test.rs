use rusty_library_lending::adapters::in_memory::InMemorySnapshotStore;
use rusty_library_lending::application::lending::{
    ErrorKind, LendingError, LendingService, ProfileField, Session,
};
use rusty_library_lending::domain::MAX_LOANS;
use std::sync::Arc;

mod common;

use common::{MEMBER_NUMBER, PASSWORD, available_isbns, scenario_service, service_with_books};

// ============================================================================
// 起動処理
// ============================================================================

#[test]
fn test_start_seeds_and_persists_on_first_run() {
    let store = Arc::new(InMemorySnapshotStore::new());

    let service = LendingService::start(store.clone()).unwrap();

    assert_eq!(service.list_all_books().len(), 2);
    assert_eq!(service.directory().len(), 1);
    assert_eq!(store.save_count(), 1);
    let saved = store.last_saved().unwrap();
    assert_eq!(saved.members[0].member_number, 1);
    assert_eq!(saved.books[0].isbn, "1491910771");
    assert_eq!(saved.books[1].isbn, "1491910772");
}

#[test]
fn test_start_loads_existing_snapshot_without_reseeding() {
    let (mut service, store) = scenario_service();
    service.authenticate(MEMBER_NUMBER, PASSWORD).unwrap();
    service.borrow_book("ISBN-A").unwrap();
    service.rate_book("ISBN-B", 5).unwrap();
    let saved = store.last_saved().unwrap();

    let reloaded_store = Arc::new(InMemorySnapshotStore::with_snapshot(saved));
    let mut reloaded = LendingService::start(reloaded_store.clone()).unwrap();

    assert_eq!(reloaded_store.save_count(), 0);
    assert_eq!(reloaded.session(), Session::LoggedOut);
    assert_eq!(available_isbns(&reloaded), vec!["ISBN-B"]);
    assert_eq!(reloaded.average_rating("ISBN-B").unwrap(), 5.0);

    reloaded.authenticate(MEMBER_NUMBER, PASSWORD).unwrap();
    assert_eq!(reloaded.current_loan_count().unwrap(), 1);
    reloaded.return_book("ISBN-A").unwrap();
}

#[test]
fn test_start_fails_when_seed_cannot_be_saved() {
    let store = Arc::new(InMemorySnapshotStore::new());
    store.fail_saves(true);

    let err = LendingService::start(store).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Persistence);
}

// ============================================================================
// 認証
// ============================================================================

#[test]
fn test_authenticate_with_right_credentials() {
    let (mut service, _) = scenario_service();

    service.authenticate(MEMBER_NUMBER, PASSWORD).unwrap();

    assert!(matches!(service.session(), Session::LoggedIn(_)));
}

#[test]
fn test_authenticate_wrong_password_stays_logged_out() {
    let (mut service, _) = scenario_service();

    let err = service.authenticate(MEMBER_NUMBER, "nope").unwrap_err();

    assert!(matches!(err, LendingError::AuthenticationFailed));
    assert_eq!(err.kind(), ErrorKind::Authentication);
    assert_eq!(service.session(), Session::LoggedOut);
}

#[test]
fn test_authenticate_unknown_member() {
    let (mut service, _) = scenario_service();

    let err = service.authenticate(99, PASSWORD).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Authentication);
}

#[test]
fn test_authenticate_non_positive_number_is_validation_error() {
    let (mut service, _) = scenario_service();

    assert_eq!(
        service.authenticate(0, PASSWORD).unwrap_err().kind(),
        ErrorKind::Validation
    );
    assert_eq!(
        service.authenticate(-1, PASSWORD).unwrap_err().kind(),
        ErrorKind::Validation
    );
}

#[test]
fn test_authenticate_number_beyond_member_range_is_authentication_error() {
    let (mut service, _) = scenario_service();
    service.authenticate(MEMBER_NUMBER, PASSWORD).unwrap();

    let err = service
        .authenticate(i64::from(u32::MAX) + 1, PASSWORD)
        .unwrap_err();

    assert!(matches!(err, LendingError::AuthenticationFailed));
    assert_eq!(err.kind(), ErrorKind::Authentication);
    assert_eq!(service.session(), Session::LoggedOut);
    assert_eq!(
        service.authenticate(i64::MAX, PASSWORD).unwrap_err().kind(),
        ErrorKind::Authentication
    );
}

#[test]
fn test_failed_authenticate_clears_previous_session() {
    let (mut service, _) = scenario_service();
    service.authenticate(MEMBER_NUMBER, PASSWORD).unwrap();

    assert!(service.authenticate(2, "wrong").is_err());

    assert_eq!(service.session(), Session::LoggedOut);
}

#[test]
fn test_logout_is_unconditional() {
    let (mut service, _) = scenario_service();
    service.logout();
    assert_eq!(service.session(), Session::LoggedOut);

    service.authenticate(MEMBER_NUMBER, PASSWORD).unwrap();
    service.logout();
    assert_eq!(service.session(), Session::LoggedOut);
}

// ============================================================================
// セッション必須の操作
// ============================================================================

#[test]
fn test_gated_operations_fail_when_logged_out_without_mutation() {
    let (mut service, store) = scenario_service();
    let catalog_before = service.catalog().clone();
    let directory_before = service.directory().clone();

    let results = vec![
        service.borrow_book("ISBN-A").map(|_| ()),
        service.return_book("ISBN-A").map(|_| ()),
        service.rate_book("ISBN-A", 3).map(|_| ()),
        service.change_first_name("X").map(|_| ()),
        service.change_last_name("X").map(|_| ()),
        service.change_email("x@y.cl").map(|_| ()),
        service.change_password("X").map(|_| ()),
        service.current_loan_count().map(|_| ()),
        service.max_loan_capacity().map(|_| ()),
        service.list_current_member_loans().map(|_| ()),
        service.describe_current_member().map(|_| ()),
        service
            .confirm_profile_field(ProfileField::Password, PASSWORD)
            .map(|_| ()),
    ];

    for result in results {
        assert_eq!(result.unwrap_err().kind(), ErrorKind::State);
    }
    assert_eq!(service.catalog(), &catalog_before);
    assert_eq!(service.directory(), &directory_before);
    assert_eq!(store.save_count(), 0);
}

#[test]
fn test_catalog_queries_do_not_need_a_session() {
    let (service, _) = scenario_service();

    assert_eq!(service.list_all_books().len(), 2);
    assert_eq!(available_isbns(&service), vec!["ISBN-A", "ISBN-B"]);
    assert_eq!(service.average_rating("ISBN-A").unwrap(), 0.0);
}

// ============================================================================
// 貸出・返却
// ============================================================================

#[test]
fn test_scenario_borrow_rate_return() {
    let (mut service, store) = scenario_service();

    service.authenticate(MEMBER_NUMBER, PASSWORD).unwrap();

    service.borrow_book("ISBN-A").unwrap();
    assert_eq!(service.current_loan_count().unwrap(), 1);
    assert_eq!(available_isbns(&service), vec!["ISBN-B"]);

    service.rate_book("ISBN-A", 4).unwrap();
    service.rate_book("ISBN-A", 2).unwrap();
    assert_eq!(service.average_rating("ISBN-A").unwrap(), 2.0);
    assert_eq!(service.find_book("ISBN-A").unwrap().ratings().len(), 1);

    service.return_book("ISBN-A").unwrap();
    assert_eq!(available_isbns(&service), vec!["ISBN-A", "ISBN-B"]);
    assert_eq!(service.current_loan_count().unwrap(), 0);

    // 各更新操作の後に保存される
    assert_eq!(store.save_count(), 4);
}

#[test]
fn test_borrow_unknown_isbn() {
    let (mut service, store) = scenario_service();
    service.authenticate(MEMBER_NUMBER, PASSWORD).unwrap();

    let err = service.borrow_book("ISBN-Z").unwrap_err();

    assert!(matches!(err, LendingError::BookNotFound(ref isbn) if isbn == "ISBN-Z"));
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert_eq!(store.save_count(), 0);
}

#[test]
fn test_borrow_book_already_loaned_by_someone_else() {
    let (mut service, _) = scenario_service();
    service.authenticate(2, "jane456").unwrap();
    service.borrow_book("ISBN-A").unwrap();
    service.logout();

    service.authenticate(MEMBER_NUMBER, PASSWORD).unwrap();
    let err = service.borrow_book("ISBN-A").unwrap_err();

    assert!(matches!(err, LendingError::AlreadyLoaned(_)));
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert_eq!(service.current_loan_count().unwrap(), 0);
}

#[test]
fn test_borrow_same_book_twice() {
    let (mut service, _) = scenario_service();
    service.authenticate(MEMBER_NUMBER, PASSWORD).unwrap();
    service.borrow_book("ISBN-A").unwrap();

    let err = service.borrow_book("ISBN-A").unwrap_err();

    assert!(matches!(err, LendingError::AlreadyLoaned(_)));
    assert_eq!(service.current_loan_count().unwrap(), 1);
}

#[test]
fn test_eleventh_borrow_exceeds_capacity() {
    let (mut service, _) = service_with_books(MAX_LOANS + 1);
    service.authenticate(MEMBER_NUMBER, PASSWORD).unwrap();

    for n in 0..MAX_LOANS {
        service.borrow_book(&format!("ISBN-{n}")).unwrap();
    }
    let err = service
        .borrow_book(&format!("ISBN-{MAX_LOANS}"))
        .unwrap_err();

    assert!(matches!(err, LendingError::LoanLimitExceeded { max } if max == MAX_LOANS));
    assert_eq!(err.kind(), ErrorKind::CapacityExceeded);
    assert_eq!(service.current_loan_count().unwrap(), MAX_LOANS);
    assert_eq!(service.max_loan_capacity().unwrap(), MAX_LOANS);
    assert!(
        !service
            .find_book(&format!("ISBN-{MAX_LOANS}"))
            .unwrap()
            .is_loaned()
    );
}

#[test]
fn test_return_then_borrow_again() {
    let (mut service, _) = scenario_service();
    service.authenticate(MEMBER_NUMBER, PASSWORD).unwrap();
    service.borrow_book("ISBN-B").unwrap();

    service.return_book("ISBN-B").unwrap();
    assert!(!service.find_book("ISBN-B").unwrap().is_loaned());

    service.borrow_book("ISBN-B").unwrap();
    assert!(service.find_book("ISBN-B").unwrap().is_loaned());
}

#[test]
fn test_return_book_not_held_by_current_member() {
    let (mut service, _) = scenario_service();
    service.authenticate(2, "jane456").unwrap();
    service.borrow_book("ISBN-A").unwrap();
    service.logout();
    service.authenticate(MEMBER_NUMBER, PASSWORD).unwrap();

    let err = service.return_book("ISBN-A").unwrap_err();

    assert!(matches!(err, LendingError::LoanNotFound(_)));
    assert_eq!(err.kind(), ErrorKind::NotFound);
    // Janeの貸出は残っている
    assert!(service.find_book("ISBN-A").unwrap().is_loaned());

    let err = service.return_book("ISBN-Z").unwrap_err();
    assert!(matches!(err, LendingError::BookNotFound(_)));
}

#[test]
fn test_list_current_member_loans_in_borrow_order() {
    let (mut service, _) = scenario_service();
    service.authenticate(MEMBER_NUMBER, PASSWORD).unwrap();
    service.borrow_book("ISBN-B").unwrap();
    service.borrow_book("ISBN-A").unwrap();

    let loans: Vec<String> = service
        .list_current_member_loans()
        .unwrap()
        .iter()
        .map(|b| b.isbn().to_string())
        .collect();

    assert_eq!(loans, vec!["ISBN-B", "ISBN-A"]);
    assert!(service.list_available_books().is_empty());
}

// ============================================================================
// 評価
// ============================================================================

#[test]
fn test_rate_book_validates_stars() {
    let (mut service, store) = scenario_service();
    service.authenticate(MEMBER_NUMBER, PASSWORD).unwrap();

    assert_eq!(
        service.rate_book("ISBN-A", 6).unwrap_err().kind(),
        ErrorKind::Validation
    );
    assert_eq!(
        service.rate_book("ISBN-A", -1).unwrap_err().kind(),
        ErrorKind::Validation
    );
    assert_eq!(
        service.rate_book("ISBN-Z", 3).unwrap_err().kind(),
        ErrorKind::NotFound
    );
    assert!(service.find_book("ISBN-A").unwrap().ratings().is_empty());
    assert_eq!(store.save_count(), 0);
}

#[test]
fn test_average_over_several_members() {
    let (mut service, _) = scenario_service();
    service.authenticate(MEMBER_NUMBER, PASSWORD).unwrap();
    service.rate_book("ISBN-B", 5).unwrap();
    service.logout();
    service.authenticate(2, "jane456").unwrap();
    service.rate_book("ISBN-B", 2).unwrap();

    assert_eq!(service.average_rating("ISBN-B").unwrap(), 3.5);
}

// ============================================================================
// プロフィール
// ============================================================================

#[test]
fn test_profile_changes_are_persisted() {
    let (mut service, store) = scenario_service();
    service.authenticate(MEMBER_NUMBER, PASSWORD).unwrap();

    service.change_first_name("Johnny").unwrap();
    service.change_last_name("Roe").unwrap();
    service.change_email("johnny.roe@x.cl").unwrap();
    service.change_password("secret").unwrap();

    let summary = service.describe_current_member().unwrap();
    assert_eq!(summary.full_name, "Johnny Roe");
    assert_eq!(summary.email, "johnny.roe@x.cl");
    assert_eq!(store.save_count(), 4);

    let saved = store.last_saved().unwrap();
    assert_eq!(saved.members[0].password, "secret");

    service.logout();
    assert!(service.authenticate(MEMBER_NUMBER, PASSWORD).is_err());
    service.authenticate(MEMBER_NUMBER, "secret").unwrap();
}

#[test]
fn test_change_email_rejects_bad_format() {
    let (mut service, store) = scenario_service();
    service.authenticate(MEMBER_NUMBER, PASSWORD).unwrap();

    let err = service.change_email("john.doe").unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Validation);
    assert_eq!(service.describe_current_member().unwrap().email, "john.doe@x.cl");
    assert_eq!(store.save_count(), 0);
}

#[test]
fn test_change_rejects_empty_values() {
    let (mut service, _) = scenario_service();
    service.authenticate(MEMBER_NUMBER, PASSWORD).unwrap();

    assert_eq!(
        service.change_first_name("").unwrap_err().kind(),
        ErrorKind::Validation
    );
    assert_eq!(
        service.change_password("").unwrap_err().kind(),
        ErrorKind::Validation
    );
}

#[test]
fn test_confirm_profile_field() {
    let (mut service, _) = scenario_service();
    service.authenticate(MEMBER_NUMBER, PASSWORD).unwrap();

    assert!(service.confirm_profile_field(ProfileField::FirstName, "John").unwrap());
    assert!(!service.confirm_profile_field(ProfileField::LastName, "Smith").unwrap());
    assert!(service.confirm_profile_field(ProfileField::Email, "john.doe@x.cl").unwrap());
    assert!(service.confirm_profile_field(ProfileField::Password, PASSWORD).unwrap());
}

// ============================================================================
// 保存失敗
// ============================================================================

#[test]
fn test_save_failure_is_reported_without_rollback() {
    let (mut service, store) = scenario_service();
    service.authenticate(MEMBER_NUMBER, PASSWORD).unwrap();
    store.fail_saves(true);

    let err = service.borrow_book("ISBN-A").unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Persistence);
    // メモリ上の変更は残る
    assert_eq!(service.current_loan_count().unwrap(), 1);
    assert!(store.last_saved().is_none());

    store.fail_saves(false);
    service.return_book("ISBN-A").unwrap();
    assert_eq!(store.save_count(), 1);
}
