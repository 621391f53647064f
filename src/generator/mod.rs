pub mod chart;
pub mod context;
pub mod deck;
pub mod outlet;
pub mod research;
pub mod workflow;
