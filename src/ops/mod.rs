pub mod clocking;
pub mod completion;
pub mod filter;
pub mod outline;
pub mod repeater;
