//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument. Every query is scoped by
//! `company_id`; cross-tenant reads are impossible by construction.

pub mod company_repo;
pub mod scene_repo;
pub mod show_repo;
pub mod user_repo;

pub use company_repo::CompanyRepo;
pub use scene_repo::SceneRepo;
pub use show_repo::ShowRepo;
pub use user_repo::UserRepo;
