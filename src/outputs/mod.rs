//! Renderers for a pass.
//!
//! # Submodules
//!
//! - [`html`]: the dashboard page served by the web layer
//! - [`markdown`]: Markdown report printed by the `pass` subcommand
//! - [`json`]: dated JSON snapshots written by the `pass` subcommand
//!
//! # Output Structure
//!
//! ```text
//! json_output_dir/
//! └── 2026-10-19/
//!     ├── technology.json
//!     └── research-papers.json
//! ```

pub mod html;
pub mod json;
pub mod markdown;
