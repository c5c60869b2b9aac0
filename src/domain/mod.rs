pub mod topology;
pub mod utils;
