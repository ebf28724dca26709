pub mod loan;
pub mod table;
