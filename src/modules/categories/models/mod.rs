pub mod category;

pub use category::{
    name_key, CategoryKind, CreateCategoryRequest, CustomCategory, UpdateCategoryRequest,
    DEFAULT_CATEGORY_COLOR, DEFAULT_CATEGORY_ICON,
};
