//! A well-formed derive compiles and resolves its tag values.

use serde::{Deserialize, Serialize};
use structextract::{Extractable, Extractor};

#[derive(Extractable, Serialize, Deserialize, Default)]
struct Good {
    #[extract(tags = r#"json:"field_1,omitempty" db:"field1""#)]
    field1: String,
}

fn main() {
    let record = Good::default();
    let extractor = Extractor::new(&record);
    assert_eq!(extractor.names().unwrap(), ["field1"]);
}
