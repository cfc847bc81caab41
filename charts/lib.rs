mod components;

pub use self::components::*;
