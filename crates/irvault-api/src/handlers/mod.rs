pub mod master_data;
pub mod upload_bulk;
pub mod upload_ir;
