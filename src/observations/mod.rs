pub mod collect;
pub mod error;
pub mod fetcher;
pub mod response;

#[cfg(test)]
pub(crate) mod test_utils;
