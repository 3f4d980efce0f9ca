mod episode;
pub use episode::*;
mod feed;
pub use feed::*;
