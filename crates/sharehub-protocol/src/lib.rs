pub mod batch;
pub mod fold;
pub mod response;

pub use batch::{ShareBatch, ShareRequest};
pub use fold::FoldedObject;
pub use response::{MessageBody, Tally, NOTHING_TO_DO};
