use super::{Book, Isbn, ValidationError};

/// カタログ - ISBNで一意な書籍の順序付きコレクション
///
/// 書籍を排他的に所有する。順序は登録順。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    books: Vec<Book>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// 書籍を登録する
    ///
    /// # エラー
    /// 同じISBNが既に存在する場合は`ValidationError::DuplicateIsbn`
    pub fn add(&mut self, book: Book) -> Result<(), ValidationError> {
        if self.contains(book.isbn()) {
            return Err(ValidationError::DuplicateIsbn(book.isbn().clone()));
        }
        self.books.push(book);
        Ok(())
    }

    pub fn contains(&self, isbn: &Isbn) -> bool {
        self.books.iter().any(|b| b.isbn() == isbn)
    }

    pub fn find_by_isbn(&self, isbn: &str) -> Option<&Book> {
        self.books.iter().find(|b| b.isbn().as_str() == isbn)
    }

    pub fn find_by_isbn_mut(&mut self, isbn: &str) -> Option<&mut Book> {
        self.books.iter_mut().find(|b| b.isbn().as_str() == isbn)
    }

    /// 貸出可能な書籍（登録順）。なければ空。
    pub fn list_available(&self) -> Vec<&Book> {
        self.books.iter().filter(|b| !b.is_loaned()).collect()
    }

    /// 全書籍（登録順）
    pub fn list_all(&self) -> Vec<&Book> {
        self.books.iter().collect()
    }

    pub(crate) fn books_mut(&mut self) -> impl Iterator<Item = &mut Book> {
        self.books.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }
}
