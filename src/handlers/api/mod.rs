pub mod saved_searches_handler;

pub use saved_searches_handler::saved_searches_handler;
