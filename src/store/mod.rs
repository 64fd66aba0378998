mod observable;

pub use observable::Store;

#[cfg(test)]
mod tests;
