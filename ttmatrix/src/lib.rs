pub mod app;
pub mod model;

#[cfg(test)]
mod test_fixture_ops;
