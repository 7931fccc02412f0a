//! 対話式のテキストメニュー
//!
//! 貸出サービスを単純な呼び出しで操作する薄いドライバー。
//! 利用者向けの文言はすべてここに置く。

use std::io::{self, BufRead, Write};

use crate::application::lending::{LendingService, ProfileField};
use crate::domain::Book;

/// 入力が終わるか「終了」が選ばれるまでメニューを回す
pub fn run<R: BufRead, W: Write>(
    service: &mut LendingService,
    input: R,
    output: W,
) -> io::Result<()> {
    Console {
        service,
        input,
        output,
    }
    .login_menu()
}

struct Console<'a, R, W> {
    service: &'a mut LendingService,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<'_, R, W> {
    /// 1行読む。入力の終端では`None`
    fn prompt(&mut self, label: &str) -> io::Result<Option<String>> {
        write!(self.output, "{label}")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn login_menu(&mut self) -> io::Result<()> {
        loop {
            writeln!(
                self.output,
                "\n[*] Welcome to the library [*]\n[1] Log in\n[2] Exit"
            )?;
            let Some(option) = self.prompt("Choose an option: ")? else {
                return Ok(());
            };
            match option.as_str() {
                "1" => {
                    if !self.log_in()? {
                        return Ok(());
                    }
                }
                "2" => {
                    writeln!(self.output, "Goodbye!")?;
                    return Ok(());
                }
                _ => writeln!(self.output, "Invalid option, try again")?,
            }
        }
    }

    /// ログインしてメインメニューへ。入力の終端で`false`
    fn log_in(&mut self) -> io::Result<bool> {
        writeln!(self.output, "[*] Log in [*]")?;
        let member_number = loop {
            let Some(raw) = self.prompt("Member number: ")? else {
                return Ok(false);
            };
            match raw.parse::<i64>() {
                Ok(n) => break n,
                Err(_) => writeln!(self.output, "Member number must be an integer")?,
            }
        };
        let Some(password) = self.prompt("Password: ")? else {
            return Ok(false);
        };

        if let Err(e) = self.service.authenticate(member_number, &password) {
            writeln!(self.output, "Error: {e}")?;
            return Ok(true);
        }
        self.main_menu()
    }

    fn main_menu(&mut self) -> io::Result<bool> {
        loop {
            writeln!(
                self.output,
                "\n[*] Library [*]\n[1] Borrow a book\n[2] Edit profile\n[3] Rate a book\n[4] Return a book\n[5] My loans\n[6] Log out"
            )?;
            let Some(option) = self.prompt("Choose an option: ")? else {
                self.service.logout();
                return Ok(false);
            };
            let keep_going = match option.as_str() {
                "1" => self.borrow()?,
                "2" => self.edit_profile()?,
                "3" => self.rate()?,
                "4" => self.give_back()?,
                "5" => {
                    self.show_loans()?;
                    true
                }
                "6" => {
                    self.service.logout();
                    return Ok(true);
                }
                _ => {
                    writeln!(self.output, "Invalid option, try again")?;
                    true
                }
            };
            if !keep_going {
                self.service.logout();
                return Ok(false);
            }
        }
    }

    fn write_book(&mut self, book: &Book) -> io::Result<()> {
        writeln!(
            self.output,
            "Title    : {}\nAuthor   : {}\nISBN     : {}\nCategory : {}\n",
            book.title(),
            book.author(),
            book.isbn(),
            book.category()
        )
    }

    fn borrow(&mut self) -> io::Result<bool> {
        writeln!(self.output, "[*] Borrow a book [*]")?;
        let (count, max) = match (
            self.service.current_loan_count(),
            self.service.max_loan_capacity(),
        ) {
            (Ok(count), Ok(max)) => (count, max),
            (Err(e), _) | (_, Err(e)) => {
                writeln!(self.output, "Error: {e}")?;
                return Ok(true);
            }
        };
        if count >= max {
            writeln!(self.output, "Error: loan limit reached (max {max} books)")?;
            return Ok(true);
        }

        let available: Vec<Book> = self
            .service
            .list_available_books()
            .into_iter()
            .cloned()
            .collect();
        if available.is_empty() {
            writeln!(self.output, "All books are currently on loan")?;
            return Ok(true);
        }
        for book in &available {
            self.write_book(book)?;
        }

        let Some(isbn) = self.prompt("ISBN of the book to borrow: ")? else {
            return Ok(false);
        };
        match self.service.borrow_book(&isbn) {
            Ok(()) => writeln!(self.output, "Book borrowed")?,
            Err(e) => writeln!(self.output, "Error: {e}")?,
        }
        Ok(true)
    }

    fn give_back(&mut self) -> io::Result<bool> {
        writeln!(self.output, "[*] Return a book [*]")?;
        if !self.show_loans()? {
            return Ok(true);
        }
        let Some(isbn) = self.prompt("ISBN of the book to return: ")? else {
            return Ok(false);
        };
        match self.service.return_book(&isbn) {
            Ok(()) => writeln!(self.output, "Book returned")?,
            Err(e) => writeln!(self.output, "Error: {e}")?,
        }
        Ok(true)
    }

    /// 貸出一覧を表示する。1冊もなければ`false`
    fn show_loans(&mut self) -> io::Result<bool> {
        let loans: Vec<Book> = match self.service.list_current_member_loans() {
            Ok(loans) => loans.into_iter().cloned().collect(),
            Err(e) => {
                writeln!(self.output, "Error: {e}")?;
                return Ok(false);
            }
        };
        if loans.is_empty() {
            writeln!(self.output, "You have no books on loan")?;
            return Ok(false);
        }
        for book in &loans {
            self.write_book(book)?;
        }
        Ok(true)
    }

    fn rate(&mut self) -> io::Result<bool> {
        writeln!(self.output, "[*] Rate a book [*]")?;
        let books: Vec<Book> = self
            .service
            .list_all_books()
            .into_iter()
            .cloned()
            .collect();
        for book in &books {
            self.write_book(book)?;
            writeln!(self.output, "Rating   : {:.1}\n", book.average_rating())?;
        }

        let Some(isbn) = self.prompt("ISBN of the book to rate: ")? else {
            return Ok(false);
        };
        let stars = loop {
            let Some(raw) = self.prompt("Stars (0-5): ")? else {
                return Ok(false);
            };
            match raw.parse::<i64>() {
                Ok(n) => break n,
                Err(_) => writeln!(self.output, "Stars must be an integer")?,
            }
        };
        match self.service.rate_book(&isbn, stars) {
            Ok(()) => {
                let average = self.service.average_rating(&isbn).unwrap_or_default();
                writeln!(self.output, "Rating saved. New average: {average:.1}")?;
            }
            Err(e) => writeln!(self.output, "Error: {e}")?,
        }
        Ok(true)
    }

    fn edit_profile(&mut self) -> io::Result<bool> {
        loop {
            writeln!(self.output, "[*] Edit profile [*]")?;
            match self.service.describe_current_member() {
                Ok(summary) => writeln!(
                    self.output,
                    "Name: {}\nEmail: {}",
                    summary.full_name, summary.email
                )?,
                Err(e) => {
                    writeln!(self.output, "Error: {e}")?;
                    return Ok(true);
                }
            }
            writeln!(
                self.output,
                "[1] Edit email\n[2] Edit password\n[3] Edit first name\n[4] Edit last name\n[5] Back"
            )?;
            let Some(option) = self.prompt("Choose an option: ")? else {
                return Ok(false);
            };
            let field = match option.as_str() {
                "1" => ProfileField::Email,
                "2" => ProfileField::Password,
                "3" => ProfileField::FirstName,
                "4" => ProfileField::LastName,
                "5" => return Ok(true),
                _ => {
                    writeln!(self.output, "Invalid option, try again")?;
                    continue;
                }
            };
            if !self.change_field(field)? {
                return Ok(false);
            }
        }
    }

    /// 現在の値を確認してから新しい値を設定する。入力の終端で`false`
    fn change_field(&mut self, field: ProfileField) -> io::Result<bool> {
        let label = match field {
            ProfileField::FirstName => "first name",
            ProfileField::LastName => "last name",
            ProfileField::Email => "email",
            ProfileField::Password => "password",
        };

        let Some(current) = self.prompt(&format!("Current {label}: "))? else {
            return Ok(false);
        };
        match self.service.confirm_profile_field(field, &current) {
            Ok(true) => {}
            Ok(false) => {
                writeln!(self.output, "The current {label} does not match")?;
                return Ok(true);
            }
            Err(e) => {
                writeln!(self.output, "Error: {e}")?;
                return Ok(true);
            }
        }

        let Some(new_value) = self.prompt(&format!("New {label}: "))? else {
            return Ok(false);
        };
        if field == ProfileField::Password {
            let Some(repeated) = self.prompt("Repeat the new password: ")? else {
                return Ok(false);
            };
            if repeated != new_value {
                writeln!(self.output, "The passwords do not match")?;
                return Ok(true);
            }
        }

        let result = match field {
            ProfileField::FirstName => self.service.change_first_name(&new_value),
            ProfileField::LastName => self.service.change_last_name(&new_value),
            ProfileField::Email => self.service.change_email(&new_value),
            ProfileField::Password => self.service.change_password(&new_value),
        };
        match result {
            Ok(()) => writeln!(self.output, "The {label} was updated")?,
            Err(e) => writeln!(self.output, "Error: {e}")?,
        }
        Ok(true)
    }
}
