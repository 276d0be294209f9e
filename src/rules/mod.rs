pub mod preservation;
