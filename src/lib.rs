pub mod config;
pub mod hierarchy;
pub mod http_client;
pub mod image_fetch;
pub mod image_view;
pub mod resolver;
pub mod selection;
pub mod state;
pub mod theme;
