pub mod interactions;
pub mod updater;
