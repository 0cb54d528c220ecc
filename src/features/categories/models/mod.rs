pub mod category;

pub use category::{AuditFields, Category, CategoryStatus, NewCategory};
