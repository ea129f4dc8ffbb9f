pub mod home;
pub mod module;
pub mod practice;
