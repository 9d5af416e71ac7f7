pub mod bbs;
pub mod books;
pub mod error;
pub mod state;
pub mod status;
