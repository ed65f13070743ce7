mod aggregation;
mod common;
mod properties;
