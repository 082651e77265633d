pub mod enums;
pub mod questionnaire;

pub use enums::*;
pub use questionnaire::*;
