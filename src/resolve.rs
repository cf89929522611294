//! Turning keyed requests into property values.

pub mod request;
pub mod value;

pub use request::{
    I18nProp,
    KeyedRequest,
};
pub use value::{
    ResolvedOutput,
    ValueResolver,
};
