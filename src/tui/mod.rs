pub mod dashboard;
pub mod event;
pub mod terminal;
