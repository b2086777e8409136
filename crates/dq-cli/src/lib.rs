//! Terminal front end for the data-quality dashboard.

pub mod cli;
pub mod commands;
pub mod logging;
