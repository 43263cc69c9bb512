pub mod help;
pub mod sale_details;
pub mod urgent_sales;
