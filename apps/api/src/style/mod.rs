// Style resolution: template catalog, color/font schemes and the resolver that
// merges document overrides over template defaults.

pub mod catalog;
pub mod color;
pub mod resolver;
pub mod scheme;

