pub mod dispatch;

#[cfg(test)]
pub(crate) mod testing;
