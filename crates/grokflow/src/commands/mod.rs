pub mod deploy;
pub mod urls;
