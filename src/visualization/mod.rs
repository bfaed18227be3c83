pub mod console;
pub mod ascii;
