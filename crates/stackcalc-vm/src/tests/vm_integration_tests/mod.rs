
pub mod arithmetic;
pub mod concurrency;
pub mod properties;
pub mod serialization;
pub mod stack_depth;
