pub mod boards;
pub mod categories;
pub mod posts;
pub mod topics;
pub mod users;
