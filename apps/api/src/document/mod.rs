// The CV document: data model, tolerant normalization from host JSON, and the
// editing operations the host applies to it.

pub mod handlers;
pub mod model;
pub mod normalize;
pub mod ops;
