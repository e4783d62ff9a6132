pub mod whiteout;
