pub mod address;
pub mod announcement;
pub mod author;
pub mod author_role;
pub mod email;
pub mod heading;
pub mod phone;
pub mod role;
pub mod suitable_ad;

pub use role::RoleName;
