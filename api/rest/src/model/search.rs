use serde::Deserialize;
use validator::Validate;

#[derive(Deserialize, Validate)]
pub struct SearchReqQuery {
    #[validate(length(min = 1, max = 256))]
    q: String,
}

impl SearchReqQuery {
    pub fn q(&self) -> &str {
        &self.q
    }
}
