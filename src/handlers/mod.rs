pub mod api;
pub mod home_handler;
pub mod index_handler;
pub mod logout_handler;
pub mod oauth;

pub use api::saved_searches_handler;
pub use home_handler::home_handler;
pub use index_handler::index_handler;
pub use logout_handler::logout_handler;
pub use oauth::{callback_handler, login_handler};
