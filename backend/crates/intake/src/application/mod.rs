//! Application Layer

pub mod career;
pub mod contact;

pub use career::{ListApplicationsUseCase, SubmitApplicationUseCase, UpdateApplicationStatusUseCase};
pub use contact::{ListContactsUseCase, SubmitContactUseCase, UpdateContactStatusUseCase};
