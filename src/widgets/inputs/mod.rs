pub mod checkbox;
pub mod datetime;
pub mod image;
pub mod password;
pub mod select;
pub mod switch;
pub mod text;
pub mod textarea;
pub mod unique_text;

pub use checkbox::CheckboxInput;
pub use datetime::DateTimeInput;
pub use image::ImageUploadInput;
pub use password::PasswordInput;
pub use select::SelectInput;
pub use switch::SwitchInput;
pub use text::TextInput;
pub use textarea::TextAreaInput;
pub use unique_text::UniqueTextInput;
