pub mod core;
pub mod http_json_source;
pub mod mock;
pub mod observability;

pub use self::core::HttpClientFactory;
pub use http_json_source::HttpJsonSource;
pub use mock::MockJsonSource;
