pub mod meta;
pub mod packs;
pub mod pulls;
