//! CLI command implementations.

pub(crate) mod copy_assets;
pub(crate) mod render;

pub(crate) use copy_assets::CopyAssetsArgs;
pub(crate) use render::RenderArgs;
