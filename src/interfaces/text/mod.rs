pub mod receipt_view;
