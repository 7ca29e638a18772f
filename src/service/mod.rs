//! Business operations over categories and blocks, plus the audit trail they write to.

pub mod audit;
pub mod block_ops;
pub mod category_ops;

pub use audit::AuditLog;
pub use block_ops::BlockService;
pub use category_ops::CategoryService;
