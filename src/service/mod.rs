pub mod event;
pub mod group;
pub mod log;
pub mod message;
pub mod photo;
pub mod resource;
pub mod thread;
pub mod user;
