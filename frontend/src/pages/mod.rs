pub mod admin_upload;
pub mod admin_users;
pub mod chatbot;
pub mod home;
pub mod login;
pub mod profile;
pub mod register;
pub mod resource_detail;
pub mod resources;
