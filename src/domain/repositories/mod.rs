//! Repository traits describing the persistence seam.

pub mod link_repository;

pub use link_repository::{LinkQuery, LinkRepository, MAX_PAGE_SIZE, SortField, SortOrder};

#[cfg(test)]
pub use link_repository::MockLinkRepository;
