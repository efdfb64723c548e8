//! Tag strings must follow the `key:"value"` grammar.

use serde::{Deserialize, Serialize};
use structextract::Extractable;

#[derive(Extractable, Serialize, Deserialize, Default)]
struct Bad {
    #[extract(tags = "json:field_1")]
    field1: String,
}

fn main() {
    let _ = Bad::default();
}
