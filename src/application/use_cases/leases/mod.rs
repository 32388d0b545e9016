pub mod manage_leases;
pub mod timeline;

#[cfg(test)]
pub(crate) mod test_support;
