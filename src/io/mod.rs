//! I/O layer: recursive discovery of candidate files, image decoding into
//! RGBA8, and `writers` for re-encoding PNGs over their source path.
pub mod discover;
pub use discover::{Discovery, discover_files};

pub mod reader;
pub use reader::load_rgba;

pub mod writers;
