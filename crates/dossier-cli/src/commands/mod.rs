//! Command implementations.

pub mod extract;
pub mod info;
pub mod list;

pub use self::extract::execute_extract;
pub use self::info::execute_info;
pub use self::list::execute_list;
