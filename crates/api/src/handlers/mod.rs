pub mod feed;
pub mod karma;
pub mod questions;
pub mod search;
pub mod topics;
pub mod users;
