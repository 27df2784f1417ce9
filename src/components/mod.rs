pub mod times_table;
