pub mod browse;
pub mod deliver;
pub mod generate;
pub mod settings;

#[cfg(test)]
pub(crate) mod test_support;
