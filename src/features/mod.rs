pub mod files;
pub mod messages;
pub mod profiles;
