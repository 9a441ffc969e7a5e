pub mod args;
pub mod kac_configuration;
pub mod output_format;
