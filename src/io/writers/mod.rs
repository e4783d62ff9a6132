pub mod png;
pub use png::write_png_in_place;
