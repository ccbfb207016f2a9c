#[allow(unused_imports)]
pub mod prelude {
    pub use super::button::Entity as Button;
    pub use super::schedule::Entity as Schedule;
}

pub mod button;
pub mod schedule;
