pub mod codec;
pub mod collect;
pub mod compile;
pub mod locator;
pub mod model;
pub mod raw;
pub mod registry;
pub mod source;
pub mod store;
pub mod validate;
