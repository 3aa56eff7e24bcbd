//! Output generation for the corpus and the run metadata.
//!
//! # Submodules
//!
//! - [`json`]: Reads and writes the corpus JSON file
//! - [`metadata`]: Maintains the run record next to the corpus
//!
//! # Output Structure
//!
//! ```text
//! output_dir/
//! ├── awesome-lists.json   # Corpus, pretty-printed
//! └── metadata.json        # {last_updated, update_count}
//! ```

pub mod json;
pub mod metadata;
