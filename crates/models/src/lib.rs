pub mod errors;
pub mod db;

pub mod admin_user;
pub mod admin_credentials;
pub mod site_config;
pub mod service;
pub mod formation;
pub mod carousel_image;
pub mod about_image;
pub mod partner;
pub mod brand;
pub mod customer_review;
pub mod job_offer;
pub mod job_application;
pub mod spontaneous_application;
pub mod contact;
pub mod media_asset;
pub mod activity;

#[cfg(test)]
mod tests;
