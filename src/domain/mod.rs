// Domain layer - Core models with no I/O
pub mod chart;
pub mod home;
pub mod navigation;
pub mod role;
