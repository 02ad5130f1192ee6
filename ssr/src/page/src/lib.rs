pub mod avatar;
pub mod home;
