pub mod character;
pub mod scene;
