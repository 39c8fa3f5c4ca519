pub mod semux_api;
pub mod util;

pub use semux_api::HttpNodeApi;
