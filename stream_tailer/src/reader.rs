mod cursor;
mod entry;
mod redis_stream_reader;
mod reply;
mod source;
mod start_from;

pub use cursor::*;
pub use entry::*;
pub use redis_stream_reader::*;
pub use reply::*;
pub use source::*;
pub use start_from::*;
