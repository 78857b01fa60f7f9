//! # etch-bend-lines
//!
//! Finds bend lines in sheet-metal flat-pattern DXF drawings, reads the bend
//! notes placed next to them and adds etch marks over every upward bend.
//!
//! ## Features
//!
//! - Bend lines picked by line type (`CENTERX2`) or layer (`BEND`)
//! - Bend notes such as `UP 90° R.03` or `DN 45° R 0.125` matched to the
//!   nearest bend line
//! - Etch marks for upward bends, without duplicating marks already drawn
//! - Coarse part classification (flat, angle, channel, pan, Z-angle)
//! - ASCII DXF read/write that leaves everything it does not touch as it was
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use etch_bend_lines::{EtchConfiguration, Etcher};
//!
//! let etcher = Etcher::new(EtchConfiguration::default().with_etch_length(0.5));
//! let report = etcher.etch_file("part.dxf")?;
//! println!("{}", report);
//! # Ok::<(), etch_bend_lines::error::EtchError>(())
//! ```
//!
//! ## Architecture
//!
//! The bend engine works on the [`Drawing`] trait and never sees DXF:
//!
//! - [`geometry`] - segment math shared by everything else
//! - [`bend`] - note grammar and bend extraction
//! - [`etch`] - etch mark geometry
//! - [`part_type`] - part classification
//! - [`etcher`] - applies all of the above to a drawing
//! - [`document`] and [`io`] - the DXF backed [`Drawing`]

#![allow(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod bend;
pub mod config;
pub mod document;
pub mod drawing;
pub mod entities;
pub mod error;
pub mod etch;
pub mod etcher;
pub mod geometry;
pub mod io;
pub mod notification;
pub mod part_type;
pub mod tables;
pub mod types;

// Re-export commonly used types
pub use bend::{Bend, BendDirection, BendLineExtractor, BendNote, NoteGrammar};
pub use config::{EtchConfiguration, LayerStyle};
pub use document::CadDocument;
pub use drawing::{Annotation, Drawing, DrawingLine};
pub use entities::EntityType;
pub use error::{EtchError, Result};
pub use etch::EtchGenerator;
pub use etcher::{EtchReport, Etcher};
pub use geometry::Segment;
pub use io::dxf::{DxfReader, DxfReaderConfiguration, DxfWriter};
pub use notification::{Notification, NotificationCollection, NotificationType};
pub use part_type::PartType;
pub use types::{Color, DxfVersion, Handle, Vector2, Vector3};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
