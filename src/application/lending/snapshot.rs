use std::collections::HashSet;

use crate::domain::{
    Book, Catalog, Directory, Isbn, MAX_LOANS, Member, MemberNumber, Stars, ValidationError,
};
use crate::ports::{BookRecord, MemberRecord, RatingRecord, Snapshot};

/// カタログと会員名簿からスナップショットを構築する
pub(super) fn capture(catalog: &Catalog, directory: &Directory) -> Snapshot {
    let members = directory
        .list_all()
        .iter()
        .map(|member| MemberRecord {
            first_name: member.first_name().to_string(),
            last_name: member.last_name().to_string(),
            email: member.email().to_string(),
            member_number: i64::from(member.member_number()),
            password: member.password().to_string(),
            active_loans: member
                .list_loans()
                .iter()
                .map(|isbn| isbn.as_str().to_string())
                .collect(),
        })
        .collect();

    let books = catalog
        .list_all()
        .into_iter()
        .map(|book| BookRecord {
            isbn: book.isbn().as_str().to_string(),
            title: book.title().to_string(),
            author: book.author().to_string(),
            category: book.category().to_string(),
            loaned: book.is_loaned(),
            ratings: book
                .ratings()
                .iter()
                .map(|r| RatingRecord {
                    member_number: i64::from(r.member_number),
                    stars: i64::from(r.stars),
                })
                .collect(),
        })
        .collect();

    Snapshot { members, books }
}

/// スナップショットからカタログと会員名簿を復元する
///
/// すべてのレコードをドメインのコンストラクタで検証する。
/// 貸出の不変条件（貸出フラグ ⇔ ちょうど1人の会員が保持）を修復する：
/// - 存在しない・未貸出・他の会員が保持済みのISBNは会員の貸出一覧から外す
/// - どの会員も保持していない貸出中の書籍はフラグを下ろす
pub(super) fn restore(snapshot: &Snapshot) -> Result<(Catalog, Directory), ValidationError> {
    let mut catalog = Catalog::new();
    for record in &snapshot.books {
        catalog.add(restore_book(record)?)?;
    }

    let mut directory = Directory::new();
    let mut claimed: HashSet<Isbn> = HashSet::new();
    for record in &snapshot.members {
        let mut member = Member::new(
            record.first_name.clone(),
            record.last_name.clone(),
            record.email.clone(),
            record.member_number,
            record.password.clone(),
        )?;

        let mut loans = Vec::new();
        for raw in &record.active_loans {
            let on_loan = catalog.find_by_isbn(raw).is_some_and(Book::is_loaned);
            let isbn = match Isbn::new(raw.as_str()) {
                Ok(isbn) if on_loan && loans.len() < MAX_LOANS && !claimed.contains(&isbn) => isbn,
                _ => {
                    tracing::warn!(
                        member_number = record.member_number,
                        isbn = %raw,
                        "Dropping inconsistent loan from snapshot"
                    );
                    continue;
                }
            };
            claimed.insert(isbn.clone());
            loans.push(isbn);
        }
        member.restore_loans(loans);
        directory.add(member)?;
    }

    for book in catalog.books_mut() {
        if book.is_loaned() && !claimed.contains(book.isbn()) {
            tracing::warn!(isbn = %book.isbn(), "Clearing loan flag held by no member");
            book.mark_loaned(false);
        }
    }

    Ok((catalog, directory))
}

fn restore_book(record: &BookRecord) -> Result<Book, ValidationError> {
    let mut book = Book::new(
        record.isbn.clone(),
        record.title.clone(),
        record.author.clone(),
        record.category.clone(),
    )?;
    for rating in &record.ratings {
        let member_number = MemberNumber::try_from(rating.member_number)?;
        let stars = Stars::try_from(rating.stars)?;
        book.rate(member_number, stars);
    }
    book.mark_loaned(record.loaned);
    Ok(book)
}

/// 初回起動時の初期データ
pub(super) fn seed() -> Result<(Catalog, Directory), ValidationError> {
    let mut directory = Directory::new();
    directory.add(Member::new("John", "Doe", "john.doe@ucn.cl", 1, "john123")?)?;

    let mut catalog = Catalog::new();
    catalog.add(Book::new(
        "1491910771",
        "Head First Java: A Brain-Friendly Guide",
        "Kathy Sierra",
        "Programming Languages",
    )?)?;
    catalog.add(Book::new(
        "1491910772",
        "Effective Java",
        "Joshua Bloch",
        "Programming Languages",
    )?)?;

    Ok((catalog, directory))
}
