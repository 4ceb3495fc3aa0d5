pub mod predict;
pub mod probes;
