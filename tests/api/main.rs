mod cell;
mod cell_id;
mod chain_interpolation;
mod edge_query;
mod graph;
mod latlng;
mod shape_index;
