//! Landing-page resolution, navigation guards and chart rendering for the
//! FemiMed clinic dashboard.
pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
