mod csv_import;

pub(crate) use csv_import::{parse_record_spec, RecordImporter};
