#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod layout;
pub mod parser;
pub mod random;
pub mod raster;
pub mod render;
pub mod text_metrics;
pub mod worker;

#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{CloudConfig, Config, RenderConfig, RotateType, load_config};
pub use layout::{
    BoundingRect, CloudError, FontStyle, GlyphMask, OccupancyState, PlacedWord, StyledWord,
    TextSize, WordCloud, WordConfig, WordSpec, compute_placements, find_position,
    fit_to_container,
};
pub use parser::parse_words;
pub use raster::{BoxRasterizer, FontRasterizer, Rasterizer};
pub use render::render_svg;
pub use worker::ComputeHost;
