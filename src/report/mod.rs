pub mod aggregate;
pub mod charts;
pub mod derive;
pub mod rows;
pub mod table;
