pub mod render;
pub mod source;

#[cfg(test)]
pub mod fixtures;
