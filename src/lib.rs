#![doc = r#"
whiteout — batch removal of near-white PNG backgrounds.

This crate rewrites image files in place so that pixels whose red, green and
blue channels are all at or above `255 - tolerance` become fully transparent.
Color values are never changed; only alpha is zeroed. It powers the `whiteout`
CLI and can be embedded in asset pipelines.

Process one file
----------------
```rust,no_run
use std::path::Path;
use whiteout::{process_file_in_place, Tolerance};

fn main() -> whiteout::Result<()> {
    let outcome = process_file_in_place(Path::new("public/assets/gem/ruby.png"), Tolerance(30))?;
    println!("cleared {} pixels", outcome.cleared_pixels);
    Ok(())
}
```

Process an assets root
----------------------
Each configured subdirectory is processed recursively; missing ones are
skipped. A missing root is an error and nothing is touched.

```rust,no_run
use std::path::Path;
use whiteout::{process_assets_root, ProcessingParams, Silent};

fn main() -> whiteout::Result<()> {
    let run = process_assets_root(Path::new("public/assets"), &ProcessingParams::default(), &mut Silent)?;
    println!("ok={} failed={}", run.totals.succeeded, run.totals.failed);
    Ok(())
}
```

Transform a buffer
------------------
```rust
use whiteout::{clear_background_rgba, Tolerance};

let mut px = [250u8, 250, 250, 255, 10, 10, 10, 255];
assert_eq!(clear_background_rgba(&mut px, Tolerance(30)), 1);
assert_eq!(px, [250, 250, 250, 0, 10, 10, 10, 255]);
```

Useful modules
--------------
- [`api`] — high-level entry points and run reports.
- [`core`] — processing parameters and the pixel transform.
- [`io`] — discovery, decoding and PNG writing.
- [`error`] — crate-level `Error` and `Result`.
"#]

pub mod api;
pub mod core;
pub mod error;
pub mod io;
pub mod types;

// Curated public API surface
pub use crate::core::params::{DEFAULT_SUBDIRS, ProcessingParams};
pub use crate::core::processing::whiteout::{clear_background, clear_background_rgba, is_background};
pub use error::{Error, Result};
pub use types::{ExtensionFilter, ExtensionMatch, Tolerance};

pub use api::{
    BatchObserver, BatchReport, FileFailure, FileOutcome, FolderReport, RunReport, RunSummary,
    Silent, process_assets_root, process_directory, process_file_in_place,
};
