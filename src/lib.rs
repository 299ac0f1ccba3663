//! The `s2o` library implements the core of the S2 spherical geometry
//! system.
//!
//! S2 decomposes the unit sphere into a hierarchy of cells obtained by
//! projecting the six faces of the circumscribed cube and recursively
//! subdividing each face along a space-filling curve. On top of that
//! addressing substrate, `s2o` provides polymorphic shapes (points,
//! polylines, polygons), a spatial index over heterogeneous shape
//! collections, robust edge predicates, proximity queries and arc-length
//! interpolation along shape chains.

// Lints {{{

#![deny(
    nonstandard_style,
    rust_2018_idioms,
    rust_2021_compatibility,
    future_incompatible,
    rustdoc::all,
    rustdoc::missing_crate_level_docs,
    unsafe_code,
    unused_import_braces,
    unused_lifetimes,
    unused_qualifications,
    clippy::clone_on_ref_ptr,
    clippy::dbg_macro,
    clippy::exit,
    clippy::float_cmp_const,
    clippy::get_unwrap,
    clippy::mem_forget,
    clippy::print_stderr,
    clippy::print_stdout,
    clippy::rest_pat_in_fully_bound_structs,
    clippy::str_to_string,
    clippy::string_add,
    clippy::string_to_string,
    clippy::todo,
    clippy::unimplemented,
    clippy::use_debug,
    clippy::verbose_file_reads
)]
#![allow(
    // Usually yes, but not really applicable for most literals in this crate.
    clippy::unreadable_literal,
    // "It requires the user to type the module name twice."
    // => not true here since internal modules are hidden from the users.
    clippy::module_name_repetitions,
)]

// }}}

mod angle;
mod cap;
mod cell;
mod chain;
mod chord_angle;
mod coord;
mod dump;
mod edge;
pub mod error;
mod graph;
mod index;
mod interval;
mod latlng_rect;
mod point;
mod predicates;
mod query;
mod r2rect;
mod shape;

pub use angle::Angle;
pub use cap::Cap;
pub use cell::{Cell, CellId};
pub use chain::{ChainInterpolation, InterpolationResult};
pub use chord_angle::ChordAngle;
pub use coord::LatLng;
pub use dump::dump;
pub use edge::{
    crosser::{
        crossing_sign, edge_or_vertex_crossing, vertex_crossing, Crossing,
        EdgeCrosser,
    },
    interpolate::{interpolate, interpolate_at_distance},
};
pub use graph::{
    DegenerateEdges, DuplicateEdges, EdgeType, GraphOptions, IdSetLexicon,
    ProcessedEdges, SequenceLexicon, SiblingPairs,
};
pub use index::{
    CellRelation, ClippedShape, ContainsPointQuery, IncidentEdgeTracker,
    IndexCell, ShapeIndex, ShapeIndexIterator,
};
pub use latlng_rect::LatLngRect;
pub use point::Point;
pub use r2rect::{R2Point, R2Rect};
pub use query::{
    CellTarget, ClosestEdgeQuery, DistanceTarget, EdgeQueryOptions,
    EdgeTarget, FurthestEdgeQuery, PointTarget, QueryResult,
    ShapeIndexTarget,
};
pub use shape::{
    Chain, ChainPosition, Dimension, Edge, LaxLoop, LaxPolygon, LaxPolyline,
    PointVector, ReferencePoint, Shape, ShapeId,
};

// -----------------------------------------------------------------------------

/// Number of faces of the cube circumscribed around the unit sphere.
const NUM_FACES: u8 = 6;

/// Maximum subdivision depth of a cube face.
///
/// Leaf cells are roughly 0.7cm² on Earth.
const MAX_LEVEL: u8 = 30;

/// Number of bits encoding the Hilbert curve position within a face.
const POS_BITS: u64 = 2 * MAX_LEVEL as u64 + 1;

/// Number of leaf cells spanning the width of a face.
const MAX_SIZE: u32 = 1 << MAX_LEVEL;

// 2π
const TWO_PI: f64 = 2. * std::f64::consts::PI;

/// `f64` machine epsilon (the difference between 1.0 and the next larger
/// representable value).
const DBL_EPSILON: f64 = 2.220446049250313e-16;
