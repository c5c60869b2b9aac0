pub mod link_table;
