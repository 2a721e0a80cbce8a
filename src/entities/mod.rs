//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod extracted_transaction;
pub mod session;
pub mod spending_amount;
pub mod spending_location;
pub mod upload;
pub mod user;

// Re-export specific types to avoid conflicts
pub use extracted_transaction::{
    Column as ExtractedTransactionColumn, Entity as ExtractedTransaction,
    Model as ExtractedTransactionModel,
};
pub use session::{Column as SessionColumn, Entity as Session, Model as SessionModel};
pub use spending_amount::{
    Column as SpendingAmountColumn, Entity as SpendingAmount, Model as SpendingAmountModel,
};
pub use spending_location::{
    Column as SpendingLocationColumn, Entity as SpendingLocation, Model as SpendingLocationModel,
};
pub use upload::{Column as UploadColumn, Entity as Upload, Model as UploadModel};
pub use user::{Column as UserColumn, Entity as User, Model as UserModel};
