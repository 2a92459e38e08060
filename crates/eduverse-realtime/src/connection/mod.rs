mod handle;
mod pool;

pub use handle::ConnectionHandle;
pub use pool::ConnectionPool;
