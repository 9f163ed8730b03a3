mod health_check;
mod recipients;

pub use health_check::*;
pub use recipients::*;
