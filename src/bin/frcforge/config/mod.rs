mod convert;

pub use convert::build_convert_config;
