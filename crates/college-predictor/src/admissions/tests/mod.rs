mod browse;
mod common;
