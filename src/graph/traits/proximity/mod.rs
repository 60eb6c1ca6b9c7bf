mod definition;
mod implementation;

#[cfg(test)]
mod test;

pub use definition::SpatialIndex;
