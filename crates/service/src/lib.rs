//! Service layer providing business-oriented operations on top of models.
//! - Separates business logic from data access.
//! - Reuses validation and entity definitions in the `models` crate.
//! - Provides clear error types and documented interfaces.

pub mod errors;
pub mod pagination;
pub mod runtime;
pub mod storage;

pub mod auth;

pub mod activity_service;
pub mod media_service;
pub mod sync_service;

pub mod catalog_service;
pub mod formation_service;
pub mod carousel_service;
pub mod about_service;
pub mod partner_service;
pub mod brand_service;
pub mod review_service;
pub mod recruitment_service;
pub mod contact_service;
pub mod site_config_service;
pub mod overview_service;

#[cfg(test)]
pub mod test_support;
