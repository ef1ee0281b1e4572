pub mod chat;
pub mod image_upload;
