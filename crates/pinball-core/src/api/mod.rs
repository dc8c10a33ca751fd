pub mod types;
#[cfg(feature = "physics")]
pub mod session;
