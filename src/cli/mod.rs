//! Command-line front end over record library files.

pub mod commands;
