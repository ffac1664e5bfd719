pub mod colors;
pub mod date;
pub mod fs;
pub mod table;
pub mod time;
