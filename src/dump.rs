use crate::{
    coord::LatLng,
    index::ShapeIndex,
    point::Point,
    shape::{Dimension, Shape},
};
use std::fmt::Write;

/// Formats the shapes of an index as compact text, for debugging and
/// tests.
///
/// The output has the form `"<points> # <polylines> # <polygons>"`: each
/// section lists chains as comma-separated `lat:lng` vertices (in
/// degrees), chains are separated by `|`, and the loops of a polygon by
/// `;`. The empty and full polygons use the tokens `empty` and `full`.
#[must_use]
pub fn dump(index: &ShapeIndex) -> String {
    let mut points = Vec::new();
    let mut polylines = Vec::new();
    let mut polygons = Vec::new();

    for id in 0..index.num_shape_ids() {
        let Some(shape) = index.shape(id) else {
            continue;
        };
        match shape.dimension() {
            Dimension::Point => {
                for e in 0..shape.num_edges() {
                    points.push(format_vertex(shape.edge(e).v0));
                }
            }
            Dimension::Polyline => {
                for chain_id in 0..shape.num_chains() {
                    polylines.push(format_chain(shape.as_ref(), chain_id, false));
                }
            }
            Dimension::Polygon => {
                polygons.push(format_polygon(shape.as_ref()));
            }
        }
    }

    format!(
        "{} # {} # {}",
        points.join(" | "),
        polylines.join(" | "),
        polygons.join(" | ")
    )
}

fn format_vertex(p: Point) -> String {
    let ll = LatLng::from(p).normalized();
    format!("{}:{}", format_degrees(ll.lat()), format_degrees(ll.lng()))
}

/// Degrees rounded to 15 significant digits and trimmed of trailing
/// zeros, so that whole-degree values print whole.
fn format_degrees(degrees: f64) -> String {
    let magnitude = degrees.abs();
    let int_digits = if magnitude >= 1. {
        magnitude.log10().floor() as usize + 1
    } else {
        1
    };
    let precision = 15usize.saturating_sub(int_digits);

    let mut out = format!("{degrees:.precision$}");
    if out.contains('.') {
        while out.ends_with('0') {
            out.pop();
        }
        if out.ends_with('.') {
            out.pop();
        }
    }
    if out == "-0" {
        out.clear();
        out.push('0');
    }
    out
}

/// One chain as comma-separated vertices; closed chains skip the
/// repeated final vertex.
fn format_chain(shape: &dyn Shape, chain_id: i32, closed: bool) -> String {
    let chain = shape.chain(chain_id);
    let mut out = String::new();
    for offset in 0..chain.length {
        let edge = shape.chain_edge(chain_id, offset);
        if offset > 0 {
            out.push_str(", ");
        }
        let _ = write!(out, "{}", format_vertex(edge.v0));
        if !closed && offset + 1 == chain.length {
            let _ = write!(out, ", {}", format_vertex(edge.v1));
        }
    }
    out
}

fn format_polygon(shape: &dyn Shape) -> String {
    if shape.is_full() {
        return "full".to_owned();
    }
    if shape.is_empty() {
        return "empty".to_owned();
    }
    let loops: Vec<String> = (0..shape.num_chains())
        .map(|chain_id| format_chain(shape, chain_id, true))
        .collect();
    loops.join("; ")
}

#[cfg(test)]
#[path = "./dump_tests.rs"]
mod tests;
