pub mod observability_demo;

pub use observability_demo::observability_demo_flow;
