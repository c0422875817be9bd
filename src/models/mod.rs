pub mod pomodoro;
pub mod project;
pub mod summary;
pub mod window;
