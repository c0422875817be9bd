pub mod aggregate;
pub mod backup;
pub mod gate;
pub mod log;
pub mod recorder;
pub mod resolver;
pub mod work_index;
