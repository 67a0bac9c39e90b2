pub mod memory;
pub mod remote;
pub mod traits;
