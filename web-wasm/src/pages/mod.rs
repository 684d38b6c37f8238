pub mod detail;
pub mod home;
pub mod login;
pub mod register;
pub mod results;
