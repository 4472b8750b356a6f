pub mod image;
pub mod library;
pub mod session;
