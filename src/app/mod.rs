mod runner;
mod summary;

pub(crate) use runner::run_load_test;
