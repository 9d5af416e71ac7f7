pub mod authors;
pub mod bbs;
pub mod books;
pub mod common;
pub mod machines;
pub mod movies;
pub mod notes;
pub mod rubrics;
pub mod users;
