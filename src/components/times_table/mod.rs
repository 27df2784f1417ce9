mod component;
mod error;
mod geometry;
mod render;
mod state;
mod surface;
mod types;

pub use component::TimesTableSvg;
pub use types::DiagramConfig;
