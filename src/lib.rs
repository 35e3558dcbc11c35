pub mod config;
pub mod db;
pub mod detail;
pub mod error;
pub mod home;
pub mod images;
pub mod itunes;
pub mod model;
pub mod net;
pub mod repository;
pub mod route;
pub mod usecase;
