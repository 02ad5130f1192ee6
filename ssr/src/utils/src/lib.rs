pub mod api;
pub mod browser;
pub mod dispatcher;
pub mod events;
pub mod notify;
pub mod push_channel;
pub mod types;
