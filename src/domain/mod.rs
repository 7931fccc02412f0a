pub mod book;
pub mod catalog;
pub mod directory;
pub mod email;
pub mod errors;
pub mod member;
pub mod rating;
pub mod value_objects;

pub use book::Book;
pub use catalog::Catalog;
pub use directory::Directory;
pub use email::is_valid_email;
pub use errors::*;
pub use member::Member;
pub use rating::Rating;
pub use value_objects::*;
