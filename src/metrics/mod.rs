pub mod aggregator;
pub mod collector;
pub mod counters;
pub mod ring_buffer;
pub mod sink;
pub mod store;
