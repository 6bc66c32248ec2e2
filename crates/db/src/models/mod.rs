pub mod company;
pub mod scene;
pub mod show;
pub mod user;
