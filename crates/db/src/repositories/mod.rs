//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async query functions
//! that accept `&PgPool` as the first argument and return raw sqlx results.

pub mod answer_repo;
pub mod karma_repo;
pub mod question_repo;
pub mod search_repo;
pub mod user_repo;

pub use answer_repo::AnswerRepo;
pub use karma_repo::KarmaRepo;
pub use question_repo::QuestionRepo;
pub use search_repo::SearchRepo;
pub use user_repo::UserRepo;
