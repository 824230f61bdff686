pub mod eda;
