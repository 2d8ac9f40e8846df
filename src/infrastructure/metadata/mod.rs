mod static_expected_text_resolver;
mod tag_expected_text_resolver;

pub use static_expected_text_resolver::StaticExpectedTextResolver;
pub use tag_expected_text_resolver::{
    EXPECTED_TEXT_KEYS, TagExpectedTextResolver, select_expected_text,
};
