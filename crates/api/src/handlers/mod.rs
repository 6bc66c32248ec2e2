pub mod auth;
pub mod conflicts;
pub mod scenes;
pub mod shows;
pub mod users;
