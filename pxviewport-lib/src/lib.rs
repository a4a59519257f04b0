//! Rewrites pixel lengths in stylesheets into viewport units.
//!
//! ```
//! use pxviewport_lib::generate::viewport_css::{process, OutputOptions};
//! use pxviewport_lib::options::PartialOptions;
//! use pxviewport_lib::transform::PxToViewport;
//!
//! let plugin = PxToViewport::from_partial(PartialOptions::default()).unwrap();
//! let out = process(".a { width: 100px; }", None, &plugin, OutputOptions::default()).unwrap();
//! assert_eq!(out.css, ".a { width: 31.25vw; }");
//! ```

pub mod batch;
pub mod error;
pub mod generate;
pub mod options;
pub mod transform;
pub mod tree;

pub mod parser {
    pub mod css_printer;
    pub mod css_reader;
    pub mod minify;
}

pub mod style {
    pub mod filters;
    pub mod prop_list;
    pub mod unit_pattern;
}

pub use error::{Error, Result};
pub use options::{Options, PartialOptions};
pub use transform::{PxToViewport, TransformReport, Warning};
