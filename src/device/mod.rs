mod get_ident;
pub use get_ident::{DeviceIdent, GetIdent};

mod get_record_count;
pub use get_record_count::GetRecordCount;
