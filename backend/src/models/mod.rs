pub mod body;
pub mod location;
pub mod position;
pub mod time;

pub use body::*;
pub use location::*;
pub use position::*;
pub use time::*;
