pub mod config;
pub mod document;
pub mod filter;
pub mod fragment;
pub mod heading;
pub mod timestamp;

pub use config::*;
pub use document::*;
pub use filter::*;
pub use fragment::*;
pub use heading::*;
pub use timestamp::*;
