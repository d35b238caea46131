pub mod advocate;
pub mod badge;
pub mod course;
pub mod draft;
pub mod estimated_date;
pub mod faq;
pub mod image;
pub mod organization;
pub mod user;
