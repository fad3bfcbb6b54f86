
//! User-selected settings that affect evaluation and display.

pub mod calculation;
