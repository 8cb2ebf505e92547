mod record;

pub(crate) use record::{check_magnitude, parse_date, Record};
