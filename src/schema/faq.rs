use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Faq {
    pub id: Uuid,
    pub question: String,
    pub answer: String,
    #[serde(default)]
    pub position: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct FaqBody {
    #[validate(length(min = 1, max = 500))]
    pub question: String,
    #[validate(length(min = 1, max = 5000))]
    pub answer: String,
}
