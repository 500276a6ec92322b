//! Console cores that plug into the lantern shell.

pub mod registry;
pub mod test_pattern;
